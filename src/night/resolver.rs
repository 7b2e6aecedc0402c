//! Night resolution.
//!
//! Resolution runs in two phases over a working copy of the recorded
//! actions:
//!
//! 1. Suppression: the block removes the blocked player's action from the
//!    copy. Nothing else has resolved yet, so recording order never matters.
//! 2. Effects: every slot of `NIGHT_ORDER` is applied in turn against the
//!    filtered copy.
//!
//! Actions resolve even if their actor dies earlier in the same night; the
//! night is simultaneous from the players' point of view.

use rustc_hash::FxHashMap;
use tracing::{debug, info};

use super::order::{NightEffect, NIGHT_ORDER};
use super::result::{
    ExactGuessReport, InvestigationOutcome, InvestigationReport, NegotiationReport,
    NightResult, RecruitmentReport, SniperReveal,
};
use crate::abilities::RecruitOutcome;
use crate::core::{DeathCause, GameState, LeaderMode, NightAction, Phase, PlayerId};
use crate::roles::{InvestigationReading, NightActionKind, Role, RoleRegistry, Team};

/// Applies one night's recorded actions to the game.
///
/// Most callers want [`GameState::resolve_night`], which also guards the
/// phase, writes history and checks for a winner.
pub struct NightResolver<'a> {
    state: &'a mut GameState,
    actions: FxHashMap<Role, NightAction>,
    result: NightResult,
}

impl<'a> NightResolver<'a> {
    /// Prepare to resolve the actions currently recorded on `state`.
    pub fn new(state: &'a mut GameState) -> Self {
        let actions = state.night_actions.clone();
        let result = NightResult::new(state.round);
        Self {
            state,
            actions,
            result,
        }
    }

    /// Run both phases and return the result.
    pub fn run(mut self) -> NightResult {
        self.suppress_blocked();
        for effect in NIGHT_ORDER {
            debug!(?effect, "resolving night slot");
            self.apply(effect);
        }
        self.result
    }

    fn apply(&mut self, effect: NightEffect) {
        match effect {
            NightEffect::DelayedKill => self.delayed_kill(),
            NightEffect::Block => self.announce_block(),
            NightEffect::Heal => self.heal(NightActionKind::Heal),
            NightEffect::MafiaHeal => self.heal(NightActionKind::MafiaHeal),
            NightEffect::Leader => self.leader(),
            NightEffect::Curse => self.curse(),
            NightEffect::PeriodicKill => self.periodic_kill(),
            NightEffect::Marksman => self.marksman(),
            NightEffect::Investigate => self.investigate(),
            NightEffect::Silence => self.silence(),
            NightEffect::PlantDevice => self.plant_device(),
            NightEffect::Revive => self.revive(),
            NightEffect::Recruit => self.recruit(),
            NightEffect::DistributeAmmo => self.distribute_ammo(),
            NightEffect::DelayedReveal => self.delayed_reveal(),
            NightEffect::CurseChain => self.curse_chain(),
            NightEffect::AllianceBookkeeping => self.alliance_bookkeeping(),
        }
    }

    // === Phase one ===

    fn suppress_blocked(&mut self) {
        let Some(blocked) = self.target(NightActionKind::Block) else {
            return;
        };
        self.result.blocked = Some(blocked);

        let Some(role) = self.state.player(blocked).and_then(|p| p.role) else {
            return;
        };
        if role.definition().night_action == Some(NightActionKind::Block) {
            return;
        }
        let Some(removed) = self.actions.remove(&role) else {
            return;
        };
        debug!(%role, player = blocked.raw(), "action suppressed by block");
        self.result.suppressed = Some(role);

        if role.definition().night_action == Some(NightActionKind::Investigate) {
            if let Some(target) = removed.target {
                self.result.investigation = Some(InvestigationReport {
                    target,
                    outcome: InvestigationOutcome::Blocked,
                });
            }
        }
    }

    // === Phase two ===

    fn delayed_kill(&mut self) {
        let Some(id) = self.state.trackers.pending_exposure_death.take() else {
            return;
        };
        if self.force_kill(id, DeathCause::Exposure) {
            self.result.delayed_kill = Some(id);
        }
    }

    fn announce_block(&mut self) {
        if let Some(blocked) = self.result.blocked {
            let name = self.state.name_of(blocked);
            self.note(format!("{name} was blocked"));
        }
    }

    fn heal(&mut self, kind: NightActionKind) {
        let Some(target) = self.target(kind) else {
            return;
        };
        if kind == NightActionKind::MafiaHeal && self.team_of(target) != Some(Team::Mafia) {
            self.note("The mafia doctor's heal has no effect on an outsider");
            return;
        }

        let healer = role_for(kind).and_then(|role| self.state.living_holder(role));
        if healer == Some(target) {
            let (used, max) = match kind {
                NightActionKind::MafiaHeal => (
                    &mut self.state.trackers.mafia_doctor_self_heals,
                    self.state.config.mafia_doctor_self_heal_max,
                ),
                _ => (
                    &mut self.state.trackers.doctor_self_heals,
                    self.state.config.doctor_self_heal_max,
                ),
            };
            if *used >= max {
                self.note("Self-heal limit reached; the heal has no effect");
                return;
            }
            *used += 1;
        }

        if let Some(player) = self.state.player_mut(target) {
            player.healed = true;
        }
    }

    fn leader(&mut self) {
        let Some(action) = self.recorded(NightActionKind::Leader) else {
            return;
        };
        let Some(target) = action.target else {
            return;
        };
        let name = self.state.name_of(target);

        match action.leader_mode() {
            LeaderMode::Shoot => {
                self.shoot(target, DeathCause::MafiaShot);
            }
            LeaderMode::ExactGuess { guessed } => {
                let correct = self.role_of(target) == Some(guessed);
                self.result.exact_guess = Some(ExactGuessReport {
                    target,
                    guessed,
                    correct,
                });
                if correct {
                    self.force_kill(target, DeathCause::ExactGuess);
                } else {
                    self.note(format!("The godfather guessed {name} wrong"));
                }
            }
            LeaderMode::Negotiate => {
                let converted = self.role_of(target) == Some(Role::Citizen);
                if converted {
                    if let Some(player) = self.state.player_mut(target) {
                        player.assign_role(Role::Mafia);
                    }
                    info!(player = target.raw(), "citizen converted to mafia");
                    self.note(format!("{name} accepted the negotiation and joined the mafia"));
                } else {
                    self.note(format!("Negotiation with {name} failed"));
                }
                self.result.negotiation = Some(NegotiationReport { target, converted });
            }
        }
    }

    fn curse(&mut self) {
        let Some(target) = self.target(NightActionKind::Curse) else {
            return;
        };
        let Some(jack) = role_for(NightActionKind::Curse).and_then(|r| self.state.living_holder(r))
        else {
            return;
        };
        let placed = self
            .state
            .player_mut(jack)
            .is_some_and(|p| p.curse.place(target));
        if !placed {
            self.note("The curse is locked and cannot be placed");
        }
    }

    fn periodic_kill(&mut self) {
        let Some(target) = self.target(NightActionKind::PeriodicKill) else {
            return;
        };
        if self.role_of(target) == Some(Role::Bodyguard) {
            let killer = self.state.holder_of(Role::Killer).map(|p| p.id);
            if let Some(killer) = killer {
                self.force_kill(killer, DeathCause::KillerBackfire);
            }
            self.result.killer_backfired = true;
            self.note("The killer attacked the bodyguard and died instead");
            return;
        }
        self.shoot(target, DeathCause::KillerStab);
    }

    fn marksman(&mut self) {
        let Some(target) = self.target(NightActionKind::Marksman) else {
            return;
        };
        self.state.trackers.sniper_shots_used += 1;

        match self.team_of(target) {
            Some(Team::Mafia) => {
                if self.shoot(target, DeathCause::SniperShot) {
                    if let Some(role) = self.role_of(target) {
                        let name = self.state.name_of(target);
                        self.note(format!("The sniper's target {name} was the {role}"));
                        self.result.sniper_reveal = Some(SniperReveal { target, role });
                    }
                }
            }
            Some(Team::Citizen) => {
                // The miss bypasses heal and shield.
                let sniper = role_for(NightActionKind::Marksman)
                    .and_then(|r| self.state.holder_of(r))
                    .map(|p| p.id);
                if let Some(sniper) = sniper {
                    self.force_kill(sniper, DeathCause::SniperMiss);
                }
            }
            Some(Team::Independent) | None => {
                self.note("The sniper's shot was wasted");
            }
        }
    }

    fn investigate(&mut self) {
        let Some(target) = self.target(NightActionKind::Investigate) else {
            if self.result.investigation.is_some() {
                self.note("The detective was blocked");
            }
            return;
        };
        let Some(role) = self.role_of(target) else {
            return;
        };
        let outcome = match role.definition().investigation {
            InvestigationReading::Positive => InvestigationOutcome::Positive,
            InvestigationReading::Negative => InvestigationOutcome::Negative,
        };
        self.result.investigation = Some(InvestigationReport { target, outcome });
    }

    fn silence(&mut self) {
        let Some(target) = self.target(NightActionKind::Silence) else {
            return;
        };
        if let Some(player) = self.state.player_mut(target) {
            player.silenced = true;
        }
        self.result.silenced = Some(target);
        let name = self.state.name_of(target);
        self.note(format!("{name} was silenced"));
    }

    fn plant_device(&mut self) {
        let Some(action) = self.recorded(NightActionKind::PlantDevice) else {
            return;
        };
        let (Some(target), Some(password)) = (action.target, action.password()) else {
            return;
        };
        if self.state.device.plant(target, password) {
            self.result.device_planted = true;
            let name = self.state.name_of(target);
            self.note(format!("A device was planted on {name}"));
        }
    }

    fn revive(&mut self) {
        let Some(target) = self.target(NightActionKind::Revive) else {
            return;
        };
        let round = self.state.round;
        if self.state.trackers.revival_used {
            return;
        }
        let Some(player) = self.state.player_mut(target) else {
            return;
        };
        if !player.is_revivable(round) {
            return;
        }
        player.revive();
        self.state.trackers.revival_used = true;
        self.result.revived = Some(target);
        info!(player = target.raw(), "player revived");
        let name = self.state.name_of(target);
        self.note(format!("{name} was brought back to life"));
    }

    fn recruit(&mut self) {
        let Some(target) = self.target(NightActionKind::Recruit) else {
            return;
        };
        let Some(role) = self.role_of(target) else {
            return;
        };
        let outcome = self.state.alliance.recruit(target, role, role.team());
        let name = self.state.name_of(target);
        match outcome {
            RecruitOutcome::Safe => self.note(format!("{name} joined the alliance")),
            RecruitOutcome::Contaminated => {
                self.note(format!("{name} was an unsafe recruit; the alliance is contaminated"));
            }
            RecruitOutcome::Rejected => self.note("The alliance cannot recruit"),
        }
        self.result.recruitment = Some(RecruitmentReport { target, outcome });
    }

    fn distribute_ammo(&mut self) {
        let Some(action) = self.recorded(NightActionKind::DistributeAmmo) else {
            return;
        };
        let round = self.state.round;
        for grant in action.grants() {
            let holder = grant.holder_id;
            if !self.state.ammo.give_bullet(holder, grant.kind, round) {
                continue;
            }
            if self.state.is_alive(holder) {
                if let Some(assignment) = self.state.ammo.assignment(holder).copied() {
                    self.result.bullets_given.push(assignment);
                }
            } else {
                self.state.ammo.revoke(holder);
                self.result.bullets_returned.push(holder);
                let name = self.state.name_of(holder);
                self.note(format!("{name} is dead; their bullet returns to stock"));
            }
        }
    }

    fn delayed_reveal(&mut self) {
        let Some(target) = self.target(NightActionKind::DelayedReveal) else {
            return;
        };
        if self.result.was_killed(target) {
            self.note("The reveal target died tonight; the ability returns");
            return;
        }
        self.state.trackers.reveal_used = true;

        match self.team_of(target) {
            Some(Team::Mafia | Team::Independent) => {
                let holder = role_for(NightActionKind::DelayedReveal)
                    .and_then(|r| self.state.living_holder(r));
                self.state.trackers.pending_reveal = Some(target);
                self.state.trackers.pending_exposure_death = holder;
                self.result.reveal_scheduled = Some(target);
                self.note("A reveal is scheduled for the morning");
            }
            Some(Team::Citizen) | None => {}
        }
    }

    fn curse_chain(&mut self) {
        let Some(holder) = self.state.curse_triggered_by(&self.result.killed) else {
            return;
        };
        if self.force_kill(holder, DeathCause::CurseLink) {
            self.result.jack_curse_triggered = true;
            let name = self.state.name_of(holder);
            self.note(format!("{name} dies with their cursed target"));
        }
    }

    fn alliance_bookkeeping(&mut self) {
        if self.state.alliance_leader_lost(&self.result.killed) {
            self.result.alliance_dissolved = true;
            self.note("The alliance lost its leader and stops recruiting");
        }
    }

    // === Kill helpers ===

    /// Ordinary lethal attack: shoot immunity, then heal, then shield.
    fn shoot(&mut self, target: PlayerId, cause: DeathCause) -> bool {
        let immune = self
            .role_of(target)
            .is_some_and(|role| role.definition().shoot_immune);
        if immune {
            let name = self.state.name_of(target);
            self.note(format!("{name} cannot be shot"));
            return false;
        }
        self.attempt_kill(target, cause)
    }

    /// Heal, then shield, then death.
    fn attempt_kill(&mut self, target: PlayerId, cause: DeathCause) -> bool {
        let name = self.state.name_of(target);
        let Some(player) = self.state.player_mut(target) else {
            return false;
        };
        if !player.alive {
            return false;
        }
        if player.healed {
            player.healed = false;
            self.result.saved.push(target);
            self.note(format!("{name} was saved by a heal"));
            return false;
        }
        if player.shield.absorb(cause) {
            self.result.shielded.push(target);
            self.note(format!("{name}'s shield absorbed the attack"));
            return false;
        }
        self.force_kill(target, cause)
    }

    /// Death with no protection consulted.
    fn force_kill(&mut self, target: PlayerId, cause: DeathCause) -> bool {
        if !self.state.mark_dead(target, cause) {
            return false;
        }
        self.result.killed.push(target);
        let name = self.state.name_of(target);
        self.note(format!("{name} died"));
        true
    }

    // === Lookups ===

    fn recorded(&self, kind: NightActionKind) -> Option<NightAction> {
        let role = role_for(kind)?;
        self.actions.get(&role).cloned()
    }

    fn target(&self, kind: NightActionKind) -> Option<PlayerId> {
        let role = role_for(kind)?;
        self.actions.get(&role).and_then(|a| a.target)
    }

    fn role_of(&self, id: PlayerId) -> Option<Role> {
        self.state.player(id).and_then(|p| p.role)
    }

    fn team_of(&self, id: PlayerId) -> Option<Team> {
        self.role_of(id).map(Role::team)
    }

    fn note(&mut self, text: impl Into<String>) {
        self.result.log.push(text.into());
    }
}

fn role_for(kind: NightActionKind) -> Option<Role> {
    RoleRegistry::global().find_by_action(kind).map(|def| def.role)
}

impl GameState {
    /// Resolve the night once.
    ///
    /// Returns `None` outside a night or if this night already resolved.
    /// Unrecorded steps count as skipped.
    pub fn resolve_night(&mut self) -> Option<NightResult> {
        if !matches!(self.phase, Phase::Night | Phase::BlindNight) || self.night_resolved {
            return None;
        }

        let mut result = NightResolver::new(self).run();

        self.trackers.last_blocked = result.blocked;
        for line in &result.log {
            self.log(line.clone());
        }
        self.night_resolved = true;
        result.winner = self.check_win_condition();

        info!(
            round = result.round,
            killed = result.killed.len(),
            saved = result.saved.len(),
            "night resolved"
        );
        Some(result)
    }
}
