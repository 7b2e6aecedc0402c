//! The device determination mini-phase.
//!
//! Flow: `has_bomb_to_resolve` → `start_bomb_siesta` → the bodyguard guesses
//! or skips → the target guesses if still needed. Every outcome clears the
//! device; it can never be planted again.

use tracing::info;

use crate::abilities::{DevicePhase, GuardianOutcome, TargetOutcome};
use crate::core::{DeathCause, GameState, Phase, PlayerId};
use crate::roles::Role;

impl GameState {
    /// A planted device waits on a living target.
    #[must_use]
    pub fn has_bomb_to_resolve(&self) -> bool {
        self.device.phase() == DevicePhase::Planted
            && self.device.target().is_some_and(|t| self.is_alive(t))
    }

    /// Enter the determination phase.
    pub fn start_bomb_siesta(&mut self) -> bool {
        if self.phase != Phase::Day || !self.has_bomb_to_resolve() {
            return false;
        }
        if !self.device.begin_determination() {
            return false;
        }
        let name = self.device.target().map(|t| self.name_of(t)).unwrap_or_default();
        info!("device determination started");
        self.log(format!("A device is ticking on {name}"));
        true
    }

    /// Whether a living bodyguard, other than the target, may guess first.
    #[must_use]
    pub fn is_bodyguard_alive_for_bomb(&self) -> bool {
        self.bomb_guardian().is_some()
    }

    fn bomb_guardian(&self) -> Option<PlayerId> {
        self.living_holder(Role::Bodyguard)
            .filter(|id| self.device.target() != Some(*id))
    }

    /// The bodyguard guesses. A wrong guess kills the bodyguard instead of
    /// the target.
    pub fn bomb_guardian_guess(&mut self, guess: u8) -> Option<GuardianOutcome> {
        let guardian = self.bomb_guardian()?;
        let outcome = self.device.guardian_guess(guess)?;
        let name = self.name_of(guardian);
        match outcome {
            GuardianOutcome::Defused => {
                self.log(format!("{name} defused the device"));
            }
            GuardianOutcome::Wrong => {
                self.mark_dead(guardian, DeathCause::DeviceDetonation);
                self.log(format!("{name} guessed wrong and died protecting the target"));
                self.settle_deaths(&[guardian]);
                self.check_win_condition();
            }
        }
        self.device.clear();
        Some(outcome)
    }

    /// The bodyguard passes the attempt to the target.
    pub fn bomb_guardian_skip(&mut self) -> bool {
        if self.bomb_guardian().is_none() {
            return false;
        }
        let skipped = self.device.guardian_skip();
        if skipped {
            self.log("The bodyguard declined to guess");
        }
        skipped
    }

    /// The target guesses. Only allowed once the bodyguard is out of the
    /// picture.
    pub fn bomb_target_guess(&mut self, guess: u8) -> Option<TargetOutcome> {
        if self.bomb_guardian().is_some() && !self.device.guardian_skipped() {
            return None;
        }
        let target = self.device.target()?;
        let outcome = self.device.target_guess(guess)?;
        let name = self.name_of(target);
        match outcome {
            TargetOutcome::Defused => {
                self.log(format!("{name} defused the device"));
            }
            TargetOutcome::Exploded => {
                self.mark_dead(target, DeathCause::DeviceDetonation);
                self.log(format!("The device exploded and killed {name}"));
                self.settle_deaths(&[target]);
                self.check_win_condition();
            }
        }
        self.device.clear();
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use crate::abilities::{DevicePhase, GuardianOutcome, TargetOutcome};
    use crate::core::{GameState, Phase, Player, PlayerId, RulesConfig};
    use crate::roles::Role;

    fn planted(roles: &[Role], target: u32, password: u8) -> GameState {
        let mut state = GameState::new(RulesConfig::default(), 5);
        for (i, role) in roles.iter().enumerate() {
            let mut player = Player::new(PlayerId::new(i as u32 + 1), format!("P{}", i + 1));
            player.assign_role(*role);
            state.players.push(player);
        }
        state.round = 1;
        state.phase = Phase::Day;
        state.device.plant(PlayerId::new(target), password);
        state
    }

    const TABLE: [Role; 8] = [
        Role::Godfather,
        Role::Bomber,
        Role::Bodyguard,
        Role::Doctor,
        Role::Citizen,
        Role::Citizen,
        Role::Citizen,
        Role::Citizen,
    ];

    #[test]
    fn test_guardian_defuses() {
        let mut state = planted(&TABLE, 5, 2);
        assert!(state.has_bomb_to_resolve());
        assert!(state.start_bomb_siesta());
        assert!(state.is_bodyguard_alive_for_bomb());

        assert_eq!(state.bomb_target_guess(2), None);
        assert_eq!(state.bomb_guardian_guess(2), Some(GuardianOutcome::Defused));
        assert_eq!(state.device().phase(), DevicePhase::None);
        assert!(state.device().is_used());
        assert!(state.is_alive(PlayerId::new(5)));
    }

    #[test]
    fn test_guardian_wrong_dies() {
        let mut state = planted(&TABLE, 5, 2);
        state.start_bomb_siesta();

        assert_eq!(state.bomb_guardian_guess(4), Some(GuardianOutcome::Wrong));
        assert!(!state.is_alive(PlayerId::new(3)));
        assert!(state.is_alive(PlayerId::new(5)));
        assert!(!state.has_bomb_to_resolve());
    }

    #[test]
    fn test_target_explodes_without_guardian() {
        let mut roles = TABLE;
        roles[2] = Role::Citizen;
        let mut state = planted(&roles, 5, 1);
        state.start_bomb_siesta();
        assert!(!state.is_bodyguard_alive_for_bomb());

        assert_eq!(state.bomb_target_guess(3), Some(TargetOutcome::Exploded));
        assert!(!state.is_alive(PlayerId::new(5)));
        assert_eq!(state.device().phase(), DevicePhase::None);
    }

    #[test]
    fn test_no_guess_before_siesta() {
        let mut state = planted(&TABLE, 5, 1);
        assert_eq!(state.bomb_guardian_guess(1), None);
        assert!(!state.bomb_guardian_skip());
        assert_eq!(state.device().phase(), DevicePhase::Planted);
    }
}
