//! Night step building and iteration.
//!
//! A step is one role's turn to act. Steps are built once when the night
//! starts, then the moderator records or skips each one in order.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::abilities::{AmmoKind, ExplosiveDevice};
use crate::core::{ActionExtra, GameState, LeaderMode, NightAction, PlayerId};
use crate::roles::{NightActionKind, Role, RoleDefinition, RoleRegistry, Team};

/// One role's turn during the night.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NightStep {
    /// Role acting.
    #[serde(alias = "roleId")]
    pub role: Role,
    /// Players allowed to act for the role.
    pub actors: SmallVec<[PlayerId; 4]>,
    /// Recorded target.
    #[serde(alias = "targetId")]
    pub target: Option<PlayerId>,
    /// Recorded or skipped.
    pub completed: bool,
}

impl NightStep {
    fn new(role: Role, actors: SmallVec<[PlayerId; 4]>) -> Self {
        Self {
            role,
            actors,
            target: None,
            completed: false,
        }
    }

    /// Whether `id` may act in this step.
    #[must_use]
    pub fn has_actor(&self, id: PlayerId) -> bool {
        self.actors.contains(&id)
    }
}

impl GameState {
    /// Build this night's steps from the living roster.
    ///
    /// Steps follow `NIGHT_ORDER`; roles sharing a slot keep declaration order.
    #[must_use]
    pub fn build_night_steps(&self) -> Vec<NightStep> {
        let mut defs: Vec<&RoleDefinition> = RoleRegistry::global()
            .iter()
            .filter(|def| def.acts_at_night())
            .collect();
        defs.sort_by_key(|def| (def.priority_order, def.role.declaration_index()));

        defs.into_iter()
            .filter_map(|def| {
                let kind = def.night_action?;
                let actors = self.step_actors(def.role, kind);
                if actors.is_empty() || !self.step_eligible(def.role, kind) {
                    return None;
                }
                Some(NightStep::new(def.role, actors))
            })
            .collect()
    }

    fn step_actors(&self, role: Role, kind: NightActionKind) -> SmallVec<[PlayerId; 4]> {
        if let Some(holder) = self.living_holder(role) {
            return smallvec::smallvec![holder];
        }
        if kind != NightActionKind::Leader {
            return SmallVec::new();
        }
        self.players
            .iter()
            .filter(|p| p.alive && p.team() == Some(Team::Mafia))
            .map(|p| p.id)
            .collect()
    }

    fn step_eligible(&self, role: Role, kind: NightActionKind) -> bool {
        match kind {
            NightActionKind::Block
            | NightActionKind::Heal
            | NightActionKind::MafiaHeal
            | NightActionKind::Leader
            | NightActionKind::Investigate
            | NightActionKind::Silence => true,
            NightActionKind::Curse => self.holder_of(role).is_some_and(|p| !p.curse.is_locked()),
            NightActionKind::PeriodicKill => self.config.killer_acts_on(self.round),
            NightActionKind::Marksman => self.trackers.sniper_shots_used < self.config.sniper_max_shots,
            NightActionKind::PlantDevice => !self.device.is_used(),
            NightActionKind::Revive => {
                !self.trackers.revival_used && !self.revivable_players().is_empty()
            }
            NightActionKind::Recruit => self.alliance.can_recruit(),
            NightActionKind::DistributeAmmo => self.ammo.total_remaining() > 0,
            NightActionKind::DelayedReveal => !self.trackers.reveal_used,
        }
    }

    /// The step waiting for input, if any.
    #[must_use]
    pub fn current_night_step(&self) -> Option<&NightStep> {
        self.night_steps.get(self.current_step)
    }

    /// Every step of this night.
    #[must_use]
    pub fn night_steps(&self) -> &[NightStep] {
        &self.night_steps
    }

    /// All steps have been recorded or skipped.
    #[must_use]
    pub fn is_night_complete(&self) -> bool {
        self.current_step >= self.night_steps.len()
    }

    /// Record the current step's choice and advance.
    ///
    /// Returns `false`, leaving the step pending, when the input breaks a
    /// rule for that role.
    pub fn record_night_action(&mut self, target: Option<PlayerId>, extra: ActionExtra) -> bool {
        let Some(step) = self.current_night_step() else {
            return false;
        };
        let role = step.role;
        let action = NightAction { target, extra };

        if let Err(reason) = self.check_action(role, &action) {
            warn!(%role, ?target, reason, "night action rejected");
            return false;
        }

        debug!(%role, ?target, "night action recorded");
        self.complete_step(target);
        self.night_actions.insert(role, action);
        true
    }

    /// Skip the current step. The role does nothing tonight.
    pub fn skip_night_action(&mut self) -> bool {
        let Some(step) = self.current_night_step() else {
            return false;
        };
        debug!(role = %step.role, "night action skipped");
        self.complete_step(None);
        true
    }

    fn complete_step(&mut self, target: Option<PlayerId>) {
        if let Some(step) = self.night_steps.get_mut(self.current_step) {
            step.target = target;
            step.completed = true;
        }
        self.current_step += 1;
    }

    fn check_action(&self, role: Role, action: &NightAction) -> Result<(), &'static str> {
        let kind = role.definition().night_action.ok_or("role has no night action")?;

        if kind == NightActionKind::DistributeAmmo {
            return self.check_grants(action);
        }

        let target = action.target.ok_or("target required")?;
        if kind == NightActionKind::Revive {
            let revivable = self.player(target).is_some_and(|p| p.is_revivable(self.round));
            return if revivable { Ok(()) } else { Err("target cannot be revived") };
        }
        if !self.is_alive(target) {
            return Err("target must be alive");
        }

        match kind {
            NightActionKind::Block if self.trackers.prior_blocked == Some(target) => {
                Err("same player blocked last night")
            }
            NightActionKind::PlantDevice => match action.password() {
                Some(pw) if ExplosiveDevice::is_valid_password(pw) => Ok(()),
                _ => Err("password must be 1-4"),
            },
            NightActionKind::Leader => match action.leader_mode() {
                LeaderMode::Shoot => Ok(()),
                LeaderMode::ExactGuess { .. } if self.living_holder(Role::Godfather).is_some() => {
                    Ok(())
                }
                LeaderMode::ExactGuess { .. } => Err("exact guess needs a living godfather"),
                LeaderMode::Negotiate if self.negotiation_available() => Ok(()),
                LeaderMode::Negotiate => Err("negotiation unavailable"),
            },
            NightActionKind::Curse if self.player(target).is_some_and(|p| p.has_role(Role::Jack)) => {
                Err("cannot curse self")
            }
            NightActionKind::Recruit if self.alliance.contains(target) => Err("already a member"),
            _ => Ok(()),
        }
    }

    fn check_grants(&self, action: &NightAction) -> Result<(), &'static str> {
        let grants = action.grants();
        let mut blank = 0;
        let mut live = 0;
        for (i, grant) in grants.iter().enumerate() {
            if self.player(grant.holder_id).is_none() {
                return Err("unknown holder");
            }
            if grants[..i].iter().any(|g| g.holder_id == grant.holder_id) {
                return Err("one bullet per holder");
            }
            if self.ammo.assignment(grant.holder_id).is_some() {
                return Err("holder already has a bullet");
            }
            match grant.kind {
                AmmoKind::Blank => blank += 1,
                AmmoKind::Live => live += 1,
            }
        }
        if blank > self.ammo.remaining(AmmoKind::Blank)
            || live > self.ammo.remaining(AmmoKind::Live)
        {
            return Err("not enough bullets");
        }
        Ok(())
    }
}
