//! Setup and phase transitions.
//!
//! Setup operations only work in `Phase::Setup`. Phase transitions are
//! no-ops once the game has ended.

use std::collections::BTreeMap;

use tracing::{info, warn};

use super::error::SetupError;
use super::player::{Player, PlayerId};
use super::state::{GameState, Phase};
use crate::abilities::{AmmunitionPool, ExplosiveDevice, RecruitmentAlliance};
use crate::roles::{Role, RoleRegistry, Team};

impl GameState {
    // === Players ===

    /// Add a player. Returns `None` outside setup.
    pub fn add_player(&mut self, display_name: impl Into<String>) -> Option<PlayerId> {
        if self.phase != Phase::Setup {
            return None;
        }
        let id = PlayerId::new(self.next_player_id);
        self.next_player_id += 1;
        self.players.push(Player::new(id, display_name));
        Some(id)
    }

    /// Remove a player during setup.
    pub fn remove_player(&mut self, id: PlayerId) -> bool {
        if self.phase != Phase::Setup {
            return false;
        }
        let before = self.players.len();
        self.players.retain(|p| p.id != id);
        self.players.len() != before
    }

    // === Role selection ===

    /// Set how many copies of `role` are in the game. Zero removes it.
    pub fn set_role_count(&mut self, role: Role, count: u32) {
        if count == 0 {
            self.selected_role_counts.remove(&role);
        } else {
            self.selected_role_counts.insert(role, count);
        }
    }

    /// Replace the whole role selection.
    pub fn set_selected_role_counts(&mut self, counts: BTreeMap<Role, u32>) {
        self.selected_role_counts = counts.into_iter().filter(|(_, c)| *c > 0).collect();
    }

    /// Number of roles currently selected.
    #[must_use]
    pub fn selected_role_total(&self) -> usize {
        self.selected_role_counts.values().map(|c| *c as usize).sum()
    }

    /// Every problem with the current setup.
    #[must_use]
    pub fn setup_errors(&self) -> Vec<SetupError> {
        let mut errors = Vec::new();
        let players = self.players.len();

        if self.phase != Phase::Setup {
            errors.push(SetupError::NotInSetup);
        }
        if players < self.config.min_players {
            errors.push(SetupError::NotEnoughPlayers {
                min: self.config.min_players,
                found: players,
            });
        }
        let roles = self.selected_role_total();
        if roles != players {
            errors.push(SetupError::RoleCountMismatch { roles, players });
        }
        for (&role, &count) in &self.selected_role_counts {
            let def = role.definition();
            let max = if def.unique { 1 } else { def.max_count };
            if count > max {
                errors.push(SetupError::TooManyCopies { role, count, max });
            }
        }

        let mafia: usize = self
            .selected_role_counts
            .iter()
            .filter(|(role, _)| role.team() == Team::Mafia)
            .map(|(_, c)| *c as usize)
            .sum();
        if mafia == 0 {
            errors.push(SetupError::NoMafia);
        } else if roles > 0 && mafia >= roles - mafia {
            errors.push(SetupError::MafiaMajority);
        }

        errors
    }

    /// Human-readable setup problems; empty when the game can start.
    #[must_use]
    pub fn validate_setup(&self) -> Vec<String> {
        self.setup_errors().iter().map(ToString::to_string).collect()
    }

    /// Deal roles: expand the selection in registry order, shuffle, and zip
    /// onto seating order.
    pub fn assign_roles(&mut self) -> Result<(), SetupError> {
        if let Some(err) = self.setup_errors().into_iter().next() {
            warn!(%err, "role assignment refused");
            return Err(err);
        }

        let mut pool: Vec<Role> = RoleRegistry::global()
            .iter()
            .flat_map(|def| {
                let count = self.selected_role_counts.get(&def.role).copied().unwrap_or(0);
                std::iter::repeat(def.role).take(count as usize)
            })
            .collect();
        self.rng.shuffle(&mut pool);

        for (player, role) in self.players.iter_mut().zip(pool) {
            player.assign_role(role);
        }

        self.device = ExplosiveDevice::new();
        self.ammo = AmmunitionPool::new(self.config.blank_bullets, self.config.live_bullets);
        self.alliance = RecruitmentAlliance::new(self.config.alliance_max_size);
        if let Some(leader) = self.living_holder(Role::Freemason) {
            self.alliance.set_leader(leader);
        }

        self.phase = Phase::RoleReveal;
        info!(players = self.players.len(), "roles assigned");
        self.log("Roles have been dealt");
        Ok(())
    }

    /// Full reset: forget players, roles and progress. Player ids restart.
    ///
    /// The configuration, role selection and RNG stream carry over.
    pub fn reset(&mut self) {
        let mut fresh = GameState::new(self.config.clone(), 0);
        fresh.rng = self.rng.clone();
        fresh.selected_role_counts = std::mem::take(&mut self.selected_role_counts);
        *self = fresh;
        info!("game reset");
    }

    // === Phase transitions ===

    fn can_transition(&self) -> bool {
        !matches!(self.phase, Phase::Setup | Phase::Ended)
    }

    /// Introduction day.
    pub fn start_blind_day(&mut self) -> bool {
        if !self.can_transition() {
            return false;
        }
        self.phase = Phase::BlindDay;
        self.votes.clear();
        info!("blind day started");
        self.log("Introduction day begins");
        true
    }

    /// Introduction night: resets night state but has no steps.
    pub fn start_blind_night(&mut self) -> bool {
        if !self.can_transition() {
            return false;
        }
        self.phase = Phase::BlindNight;
        self.begin_night();
        self.night_steps.clear();
        info!("blind night started");
        self.log("Introduction night begins");
        true
    }

    /// A real night: reset night state and build this night's steps.
    pub fn start_night(&mut self) -> bool {
        if !self.can_transition() {
            return false;
        }
        self.phase = Phase::Night;
        self.begin_night();
        self.night_steps = self.build_night_steps();
        info!(round = self.round, steps = self.night_steps.len(), "night started");
        self.log(format!("Night {} begins", self.round));
        true
    }

    /// A real day: the round advances.
    pub fn start_day(&mut self) -> bool {
        if !self.can_transition() {
            return false;
        }
        self.round += 1;
        self.phase = Phase::Day;
        self.votes.clear();
        info!(round = self.round, "day started");
        self.log(format!("Day {} begins", self.round));

        if let Some(revealed) = self.trackers.pending_reveal.take() {
            let role = self.player(revealed).and_then(|p| p.role);
            let name = self.name_of(revealed);
            if let Some(role) = role {
                self.log(format!("{name} is exposed as {role}"));
                if role == Role::Jack {
                    if let Some(jack) = self.player_mut(revealed) {
                        jack.curse.lock();
                    }
                }
            }
        }

        if let Some(target) = self.device.target() {
            if !self.is_alive(target) {
                self.device.clear();
                self.log("The device target is already dead; the device is cleared");
            }
        }
        true
    }

    /// Reset per-night state. Runs before any action can be recorded.
    fn begin_night(&mut self) {
        for player in &mut self.players {
            player.reset_night_flags();
        }
        self.night_actions.clear();
        self.night_steps.clear();
        self.current_step = 0;
        self.night_resolved = false;
        self.trackers.prior_blocked = self.trackers.last_blocked.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RulesConfig;

    fn eight_players() -> GameState {
        let mut state = GameState::new(RulesConfig::default(), 7);
        for i in 1..=8 {
            state.add_player(format!("P{i}"));
        }
        state
    }

    fn standard_roles(state: &mut GameState) {
        state.set_role_count(Role::Godfather, 1);
        state.set_role_count(Role::Mafia, 1);
        state.set_role_count(Role::Doctor, 1);
        state.set_role_count(Role::Detective, 1);
        state.set_role_count(Role::Freemason, 1);
        state.set_role_count(Role::Citizen, 3);
    }

    #[test]
    fn test_player_ids_monotonic() {
        let mut state = GameState::new(RulesConfig::default(), 7);
        let a = state.add_player("A").unwrap();
        let b = state.add_player("B").unwrap();
        assert!(state.remove_player(a));
        let c = state.add_player("C").unwrap();

        assert_eq!(a, PlayerId::new(1));
        assert_eq!(b, PlayerId::new(2));
        assert_eq!(c, PlayerId::new(3));
        assert!(!state.remove_player(a));
    }

    #[test]
    fn test_validate_setup_reports_problems() {
        let mut state = GameState::new(RulesConfig::default(), 7);
        state.add_player("A");
        state.set_role_count(Role::Doctor, 2);

        let errors = state.setup_errors();
        assert!(errors.contains(&SetupError::NotEnoughPlayers { min: 8, found: 1 }));
        assert!(errors.contains(&SetupError::RoleCountMismatch { roles: 2, players: 1 }));
        assert!(errors.contains(&SetupError::TooManyCopies {
            role: Role::Doctor,
            count: 2,
            max: 1
        }));
        assert!(errors.contains(&SetupError::NoMafia));
        assert_eq!(state.validate_setup().len(), errors.len());
    }

    #[test]
    fn test_assign_roles() {
        let mut state = eight_players();
        standard_roles(&mut state);
        assert!(state.validate_setup().is_empty());

        state.assign_roles().unwrap();

        assert_eq!(state.phase(), Phase::RoleReveal);
        assert!(state.players().iter().all(|p| p.role.is_some()));
        let godfathers = state
            .players()
            .iter()
            .filter(|p| p.has_role(Role::Godfather))
            .count();
        assert_eq!(godfathers, 1);
        assert!(state.holder_of(Role::Godfather).unwrap().shield.is_active());
        assert_eq!(state.alliance().leader(), state.living_holder(Role::Freemason));
    }

    #[test]
    fn test_assign_roles_is_seeded() {
        let deal = |seed| {
            let mut state = GameState::new(RulesConfig::default(), seed);
            for i in 1..=8 {
                state.add_player(format!("P{i}"));
            }
            standard_roles(&mut state);
            state.assign_roles().unwrap();
            state.players().iter().map(|p| p.role).collect::<Vec<_>>()
        };
        assert_eq!(deal(11), deal(11));
    }

    #[test]
    fn test_assign_roles_rejects_bad_setup() {
        let mut state = eight_players();
        state.set_role_count(Role::Citizen, 8);
        assert_eq!(state.assign_roles(), Err(SetupError::NoMafia));
        assert_eq!(state.phase(), Phase::Setup);
    }

    #[test]
    fn test_round_advances_only_on_day() {
        let mut state = eight_players();
        standard_roles(&mut state);
        state.assign_roles().unwrap();

        assert!(state.start_blind_day());
        assert!(state.start_blind_night());
        assert_eq!(state.round(), 0);
        assert!(state.start_day());
        assert_eq!(state.round(), 1);
        assert!(state.start_night());
        assert_eq!(state.round(), 1);
        assert_eq!(state.phase(), Phase::Night);
    }

    #[test]
    fn test_no_transition_before_roles() {
        let mut state = eight_players();
        assert!(!state.start_night());
        assert_eq!(state.phase(), Phase::Setup);
    }

    #[test]
    fn test_reset_restarts_ids() {
        let mut state = eight_players();
        standard_roles(&mut state);
        state.assign_roles().unwrap();

        state.reset();
        assert_eq!(state.phase(), Phase::Setup);
        assert!(state.players().is_empty());
        assert_eq!(state.add_player("Z"), Some(PlayerId::new(1)));
        assert_eq!(state.selected_role_total(), 8);
    }
}
