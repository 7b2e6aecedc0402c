//! Game state: the aggregate that owns everything.
//!
//! `GameState` exclusively owns every `Player` (and through them each
//! `Shield` and `CurseLink`), the singleton device, alliance and ammunition
//! pool, the per-night action map, votes, and the append-only history.
//!
//! Operations are spread over several `impl GameState` blocks:
//! - `core::setup`: players, role selection, assignment, phase transitions
//! - `night::steps`: night step iteration
//! - `night::resolver`: `resolve_night`
//! - `day`: votes, morning shots, device determination, alliance
//! - `rules::win`: win evaluation

use std::collections::BTreeMap;

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::action::{HistoryEntry, LeaderMode, NightAction};
use super::config::RulesConfig;
use super::error::SnapshotError;
use super::player::{DeathCause, Player, PlayerId};
use super::rng::GameRng;
use crate::abilities::{AmmunitionPool, ExplosiveDevice, RecruitmentAlliance};
use crate::night::NightStep;
use crate::roles::{NightActionKind, Role, Team};

/// Game phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// Adding players and picking roles.
    #[default]
    Setup,
    /// Roles dealt, players looking at their cards.
    RoleReveal,
    /// Introduction day.
    BlindDay,
    /// Introduction night.
    BlindNight,
    /// A real night.
    Night,
    /// A real day.
    Day,
    /// A faction has won.
    Ended,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Exhaustible and delayed ability bookkeeping that persists across rounds.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AbilityTrackers {
    /// Sniper shots fired so far.
    #[serde(alias = "sniperShots")]
    pub sniper_shots_used: u32,
    /// Times the doctor healed themself.
    pub doctor_self_heals: u32,
    /// Times the mafia doctor healed themself.
    pub mafia_doctor_self_heals: u32,
    /// Revival has been spent.
    pub revival_used: bool,
    /// The delayed reveal has been spent.
    pub reveal_used: bool,
    /// Player to kill at the start of the next night.
    pub pending_exposure_death: Option<PlayerId>,
    /// Player to reveal next morning.
    pub pending_reveal: Option<PlayerId>,
    /// Player blocked on the most recently resolved night.
    pub last_blocked: Option<PlayerId>,
    /// Player blocked the night before that; cannot be blocked again.
    pub prior_blocked: Option<PlayerId>,
}

/// Living counts per team.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamCounts {
    /// Living mafia-team players.
    pub mafia: usize,
    /// Living citizen-team players.
    pub citizen: usize,
    /// Living independents.
    pub independent: usize,
}

impl TeamCounts {
    /// Total living players with a role.
    #[must_use]
    pub fn total(&self) -> usize {
        self.mafia + self.citizen + self.independent
    }
}

/// Knock-on effects of one or more eliminations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeathFallout {
    /// Curse holder who died because their target did.
    pub curse_victim: Option<PlayerId>,
    /// The alliance lost its leader.
    pub alliance_dissolved: bool,
}

/// The complete game.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub(crate) round: u32,
    pub(crate) phase: Phase,
    pub(crate) winner: Option<Team>,

    pub(crate) players: Vec<Player>,
    #[serde(default = "first_player_id")]
    pub(crate) next_player_id: u32,
    #[serde(alias = "roleCounts")]
    pub(crate) selected_role_counts: BTreeMap<Role, u32>,

    #[serde(default)]
    pub(crate) night_actions: FxHashMap<Role, NightAction>,
    #[serde(default)]
    pub(crate) night_steps: Vec<NightStep>,
    #[serde(default, alias = "currentStepIndex")]
    pub(crate) current_step: usize,
    #[serde(default)]
    pub(crate) night_resolved: bool,

    #[serde(default)]
    pub(crate) votes: BTreeMap<PlayerId, PlayerId>,
    #[serde(default, alias = "log")]
    pub(crate) history: Vector<HistoryEntry>,

    #[serde(default)]
    pub(crate) config: RulesConfig,
    #[serde(default, alias = "bomb")]
    pub(crate) device: ExplosiveDevice,
    #[serde(default, alias = "framason")]
    pub(crate) alliance: RecruitmentAlliance,
    #[serde(default, alias = "gunner")]
    pub(crate) ammo: AmmunitionPool,
    #[serde(default)]
    pub(crate) trackers: AbilityTrackers,

    #[serde(default = "fresh_rng")]
    pub(crate) rng: GameRng,
}

fn first_player_id() -> u32 {
    1
}

fn fresh_rng() -> GameRng {
    GameRng::new(0)
}

impl GameState {
    /// Create an empty game in the setup phase.
    #[must_use]
    pub fn new(config: RulesConfig, seed: u64) -> Self {
        Self {
            round: 0,
            phase: Phase::Setup,
            winner: None,
            players: Vec::new(),
            next_player_id: first_player_id(),
            selected_role_counts: BTreeMap::new(),
            night_actions: FxHashMap::default(),
            night_steps: Vec::new(),
            current_step: 0,
            night_resolved: false,
            votes: BTreeMap::new(),
            history: Vector::new(),
            device: ExplosiveDevice::new(),
            alliance: RecruitmentAlliance::new(config.alliance_max_size),
            ammo: AmmunitionPool::new(config.blank_bullets, config.live_bullets),
            trackers: AbilityTrackers::default(),
            rng: GameRng::new(seed),
            config,
        }
    }

    // === Accessors ===

    /// Current round (increments when a real day starts).
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Winning team, once decided.
    #[must_use]
    pub fn winner(&self) -> Option<Team> {
        self.winner
    }

    /// Rules configuration.
    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// All players in seating order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Role counts chosen during setup.
    #[must_use]
    pub fn selected_role_counts(&self) -> &BTreeMap<Role, u32> {
        &self.selected_role_counts
    }

    /// Actions recorded this night.
    #[must_use]
    pub fn night_actions(&self) -> &FxHashMap<Role, NightAction> {
        &self.night_actions
    }

    /// Votes cast today.
    #[must_use]
    pub fn votes(&self) -> &BTreeMap<PlayerId, PlayerId> {
        &self.votes
    }

    /// Event log.
    #[must_use]
    pub fn history(&self) -> &Vector<HistoryEntry> {
        &self.history
    }

    /// The explosive device.
    #[must_use]
    pub fn device(&self) -> &ExplosiveDevice {
        &self.device
    }

    /// The recruitment alliance.
    #[must_use]
    pub fn alliance(&self) -> &RecruitmentAlliance {
        &self.alliance
    }

    /// The ammunition pool.
    #[must_use]
    pub fn ammo(&self) -> &AmmunitionPool {
        &self.ammo
    }

    /// Cross-round ability bookkeeping.
    #[must_use]
    pub fn trackers(&self) -> &AbilityTrackers {
        &self.trackers
    }

    // === Queries ===

    /// Look up a player.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Whether `id` exists and is alive.
    #[must_use]
    pub fn is_alive(&self, id: PlayerId) -> bool {
        self.player(id).is_some_and(|p| p.alive)
    }

    /// Living players.
    #[must_use]
    pub fn alive_players(&self) -> Vec<&Player> {
        self.players.iter().filter(|p| p.alive).collect()
    }

    /// Dead players.
    #[must_use]
    pub fn dead_players(&self) -> Vec<&Player> {
        self.players.iter().filter(|p| !p.alive).collect()
    }

    /// Dead players the revival ability could bring back this round.
    #[must_use]
    pub fn revivable_players(&self) -> Vec<&Player> {
        self.players
            .iter()
            .filter(|p| p.is_revivable(self.round))
            .collect()
    }

    /// The player holding `role`, alive or dead.
    #[must_use]
    pub fn holder_of(&self, role: Role) -> Option<&Player> {
        self.players.iter().find(|p| p.has_role(role))
    }

    /// Id of the living player holding `role`.
    #[must_use]
    pub fn living_holder(&self, role: Role) -> Option<PlayerId> {
        self.players
            .iter()
            .find(|p| p.alive && p.has_role(role))
            .map(|p| p.id)
    }

    /// Living counts per team.
    #[must_use]
    pub fn team_counts(&self) -> TeamCounts {
        let mut counts = TeamCounts::default();
        for team in self.players.iter().filter(|p| p.alive).filter_map(Player::team) {
            match team {
                Team::Mafia => counts.mafia += 1,
                Team::Citizen => counts.citizen += 1,
                Team::Independent => counts.independent += 1,
            }
        }
        counts
    }

    /// Targets of lethal actions recorded so far this night.
    #[must_use]
    pub fn pending_kill_targets(&self) -> Vec<PlayerId> {
        let mut targets = Vec::new();
        for step in &self.night_steps {
            let Some(action) = self.night_actions.get(&step.role) else {
                continue;
            };
            let lethal = match step.role.definition().night_action {
                Some(NightActionKind::Leader) => action.leader_mode() != LeaderMode::Negotiate,
                Some(NightActionKind::PeriodicKill | NightActionKind::Marksman) => true,
                _ => false,
            };
            if let Some(target) = action.target.filter(|_| lethal) {
                if !targets.contains(&target) {
                    targets.push(target);
                }
            }
        }
        targets
    }

    /// Whether negotiation may be chosen right now.
    #[must_use]
    pub fn negotiation_available(&self) -> bool {
        self.living_holder(Role::Negotiator).is_some()
            && self.team_counts().mafia <= self.config.negotiation_threshold
    }

    // === Mutation helpers ===

    /// Append a history entry.
    pub(crate) fn log(&mut self, text: impl Into<String>) {
        let entry = HistoryEntry::new(self.round, self.phase, text);
        self.history.push_back(entry);
    }

    /// Display name, falling back to the id.
    pub(crate) fn name_of(&self, id: PlayerId) -> String {
        self.player(id)
            .map_or_else(|| id.to_string(), |p| p.display_name.clone())
    }

    /// Mark a player dead this round. No protection is consulted.
    pub(crate) fn mark_dead(&mut self, id: PlayerId, cause: DeathCause) -> bool {
        let round = self.round;
        let died = self.player_mut(id).is_some_and(|p| p.kill(round, cause));
        if died {
            info!(player = id.raw(), ?cause, round, "player eliminated");
        }
        died
    }

    /// Living curse holder whose link is triggered by any id in `killed`.
    pub(crate) fn curse_triggered_by(&self, killed: &[PlayerId]) -> Option<PlayerId> {
        self.players
            .iter()
            .filter(|p| p.alive && p.has_role(Role::Jack))
            .find(|p| killed.iter().any(|k| p.curse.is_triggered_by(*k)))
            .map(|p| p.id)
    }

    /// Deactivate the alliance if its leader is among `killed`.
    pub(crate) fn alliance_leader_lost(&mut self, killed: &[PlayerId]) -> bool {
        let lost = self.alliance.is_active()
            && self.alliance.leader().is_some_and(|l| killed.contains(&l));
        if lost {
            self.alliance.on_leader_death();
        }
        lost
    }

    /// Apply the curse chain and alliance bookkeeping after daytime deaths.
    pub(crate) fn settle_deaths(&mut self, killed: &[PlayerId]) -> DeathFallout {
        let mut fallout = DeathFallout::default();
        if let Some(holder) = self.curse_triggered_by(killed) {
            if self.mark_dead(holder, DeathCause::CurseLink) {
                let name = self.name_of(holder);
                self.log(format!("{name} dies with their cursed target"));
                fallout.curse_victim = Some(holder);
            }
        }
        let mut all: Vec<PlayerId> = killed.to_vec();
        all.extend(fallout.curse_victim);
        if self.alliance_leader_lost(&all) {
            self.log("The alliance lost its leader and stops recruiting");
            fallout.alliance_dissolved = true;
        }
        fallout
    }

    // === Snapshots ===

    /// Encode the whole game as JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a JSON snapshot, accepting older field names.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode the whole game in compact binary form.
    pub fn snapshot_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a binary snapshot.
    pub fn from_snapshot_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
