//! Structured outcome of one night's resolution.

use serde::{Deserialize, Serialize};

use crate::abilities::{AmmoAssignment, RecruitOutcome};
use crate::core::PlayerId;
use crate::roles::{Role, Team};

/// What the investigator learns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestigationOutcome {
    /// The investigator was blocked.
    Blocked,
    /// Target reads as mafia.
    Positive,
    /// Target reads as not mafia.
    Negative,
}

/// Investigation target and result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestigationReport {
    /// Who was investigated.
    pub target: PlayerId,
    /// What the investigator learns.
    pub outcome: InvestigationOutcome,
}

/// Exact-guess attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExactGuessReport {
    /// Target of the guess.
    pub target: PlayerId,
    /// Role named.
    pub guessed: Role,
    /// Whether it matched.
    pub correct: bool,
}

/// Negotiation attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NegotiationReport {
    /// Who was approached.
    pub target: PlayerId,
    /// Whether they turned.
    pub converted: bool,
}

/// Role exposed by a landed sniper shot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SniperReveal {
    /// The player hit.
    pub target: PlayerId,
    /// Their role.
    pub role: Role,
}

/// Recruitment attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecruitmentReport {
    /// Who was recruited.
    pub target: PlayerId,
    /// What happened.
    pub outcome: RecruitOutcome,
}

/// Everything that happened during one night.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NightResult {
    /// Round the night belonged to.
    pub round: u32,

    /// Everyone who died, in resolution order.
    pub killed: Vec<PlayerId>,
    /// Targets a heal saved.
    pub saved: Vec<PlayerId>,
    /// Targets a shield saved.
    pub shielded: Vec<PlayerId>,

    /// Blocked player.
    pub blocked: Option<PlayerId>,
    /// Role whose action the block removed.
    pub suppressed: Option<Role>,

    /// Player who died from a previous night's reveal.
    pub delayed_kill: Option<PlayerId>,
    /// Investigation result.
    pub investigation: Option<InvestigationReport>,
    /// Silenced player.
    pub silenced: Option<PlayerId>,
    /// Exact-guess attempt.
    pub exact_guess: Option<ExactGuessReport>,
    /// Negotiation attempt.
    pub negotiation: Option<NegotiationReport>,
    /// Role revealed by the sniper.
    pub sniper_reveal: Option<SniperReveal>,
    /// The killer attacked the protector and died.
    pub killer_backfired: bool,
    /// The device was planted.
    pub device_planted: bool,
    /// Player brought back.
    pub revived: Option<PlayerId>,
    /// Recruitment attempt.
    pub recruitment: Option<RecruitmentReport>,
    /// Bullets handed out.
    pub bullets_given: Vec<AmmoAssignment>,
    /// Holders whose bullet went straight back to stock.
    pub bullets_returned: Vec<PlayerId>,
    /// Player who will be exposed in the morning.
    pub reveal_scheduled: Option<PlayerId>,
    /// The curse holder died with their target.
    pub jack_curse_triggered: bool,
    /// The alliance lost its leader.
    pub alliance_dissolved: bool,

    /// Winner decided by this night.
    pub winner: Option<Team>,

    /// Human-readable log, also appended to history.
    pub log: Vec<String>,
}

impl NightResult {
    /// Empty result for `round`.
    #[must_use]
    pub fn new(round: u32) -> Self {
        Self {
            round,
            ..Self::default()
        }
    }

    /// Whether `id` died tonight.
    #[must_use]
    pub fn was_killed(&self, id: PlayerId) -> bool {
        self.killed.contains(&id)
    }
}
