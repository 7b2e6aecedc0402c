//! Morning ammunition: manual grants, shots and end-of-discussion expiry.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::abilities::AmmoKind;
use crate::core::{DeathCause, GameState, Phase, PlayerId};
use crate::roles::Team;

/// Why a live bullet did no harm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeutralizedBy {
    /// Target was blocked on the night just resolved.
    Block,
    /// Target was healed.
    Heal,
    /// Target's role ignores morning shots.
    Immunity,
    /// Target's shield took the hit.
    Shield,
}

/// Result of a morning shot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MorningShotOutcome {
    /// Rejected; the bullet is kept.
    Invalid,
    /// Shooter carries no bullet.
    NoBullet,
    /// Harmless bullet.
    Blank,
    /// Live bullet stopped.
    Neutralized(NeutralizedBy),
    /// Target died; their team is revealed.
    Killed {
        /// Team of the dead player.
        team: Option<Team>,
    },
}

impl GameState {
    /// Hand `holder` a bullet outside the night distribution.
    pub fn gunner_give_bullet(&mut self, holder: PlayerId, kind: AmmoKind) -> bool {
        if matches!(self.phase, Phase::Setup | Phase::Ended) || !self.is_alive(holder) {
            return false;
        }
        let round = self.round;
        let given = self.ammo.give_bullet(holder, kind, round);
        if given {
            let name = self.name_of(holder);
            self.log(format!("{name} received a bullet"));
        } else {
            warn!(holder = holder.raw(), ?kind, "bullet not given");
        }
        given
    }

    /// `shooter` fires their bullet at `target`.
    pub fn resolve_morning_shot(&mut self, shooter: PlayerId, target: PlayerId) -> MorningShotOutcome {
        if self.phase != Phase::Day || !self.is_alive(shooter) || !self.is_alive(target) {
            return MorningShotOutcome::Invalid;
        }
        let shooter_team = self.player(shooter).and_then(|p| p.team());
        if shooter == target && shooter_team != Some(Team::Mafia) {
            return MorningShotOutcome::Invalid;
        }
        let Some(kind) = self.ammo.use_bullet(shooter) else {
            return MorningShotOutcome::NoBullet;
        };

        let shooter_name = self.name_of(shooter);
        let target_name = self.name_of(target);
        if kind == AmmoKind::Blank {
            self.log(format!("{shooter_name} fired a blank at {target_name}"));
            return MorningShotOutcome::Blank;
        }

        if let Some(reason) = self.morning_protection(target) {
            self.log(format!("{shooter_name}'s shot at {target_name} did no harm"));
            return MorningShotOutcome::Neutralized(reason);
        }

        self.mark_dead(target, DeathCause::MorningShot);
        let team = self.player(target).and_then(|p| p.team());
        let revealed = team.map_or_else(|| "unknown".to_string(), |t| t.to_string());
        self.log(format!("{shooter_name} shot {target_name}, who was {revealed}"));
        self.settle_deaths(&[target]);
        self.check_win_condition();
        MorningShotOutcome::Killed { team }
    }

    /// The first protection that stops a live bullet, consuming it.
    fn morning_protection(&mut self, target: PlayerId) -> Option<NeutralizedBy> {
        if self.trackers.last_blocked == Some(target) {
            return Some(NeutralizedBy::Block);
        }
        let player = self.player_mut(target)?;
        if player.healed {
            player.healed = false;
            return Some(NeutralizedBy::Heal);
        }
        if player.role.is_some_and(|r| r.definition().morning_shot_immune) {
            return Some(NeutralizedBy::Immunity);
        }
        if player.shield.absorb(DeathCause::MorningShot) {
            return Some(NeutralizedBy::Shield);
        }
        None
    }

    /// End of discussion: every unfired live bullet goes off in its holder's
    /// hands, and all other bullets are discarded.
    pub fn resolve_live_expiration(&mut self) -> Vec<PlayerId> {
        if matches!(self.phase, Phase::Setup | Phase::Ended) {
            return Vec::new();
        }
        let holders = self.ammo.expire();
        let mut killed = Vec::new();
        for holder in holders {
            if self.mark_dead(holder, DeathCause::AmmoExpiry) {
                let name = self.name_of(holder);
                self.log(format!("{name}'s unfired live bullet went off"));
                killed.push(holder);
            }
        }
        if !killed.is_empty() {
            info!(count = killed.len(), "live bullets expired");
            self.settle_deaths(&killed);
            self.check_win_condition();
        }
        killed
    }
}
