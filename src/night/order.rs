//! The night resolution order.
//!
//! `NIGHT_ORDER` is the contract: effects resolve in exactly this sequence
//! regardless of the order the moderator recorded actions in, and an earlier
//! effect can change the outcome of a later one. Role priorities and night
//! step ordering are both derived from this table.

use serde::{Deserialize, Serialize};

use crate::roles::NightActionKind;

/// One slot of the night pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NightEffect {
    /// Death owed from a previous night's successful reveal.
    DelayedKill = 0,
    /// Suppress the blocked player's action.
    Block = 1,
    /// Citizen heal.
    Heal = 2,
    /// Mafia heal.
    MafiaHeal = 3,
    /// Leader's shoot / exact-guess / negotiate.
    Leader = 4,
    /// Curse placement.
    Curse = 5,
    /// Periodic independent kill.
    PeriodicKill = 6,
    /// Limited-ammo marksman shot.
    Marksman = 7,
    /// Investigation.
    Investigate = 8,
    /// Silence.
    Silence = 9,
    /// Device plant.
    PlantDevice = 10,
    /// Revival.
    Revive = 11,
    /// Recruitment.
    Recruit = 12,
    /// Ammunition distribution.
    DistributeAmmo = 13,
    /// Delayed reveal.
    DelayedReveal = 14,
    /// Curse holder dies if their target died.
    CurseChain = 15,
    /// Alliance stops if its leader died.
    AllianceBookkeeping = 16,
}

/// Resolution order, first to last.
pub const NIGHT_ORDER: [NightEffect; 17] = [
    NightEffect::DelayedKill,
    NightEffect::Block,
    NightEffect::Heal,
    NightEffect::MafiaHeal,
    NightEffect::Leader,
    NightEffect::Curse,
    NightEffect::PeriodicKill,
    NightEffect::Marksman,
    NightEffect::Investigate,
    NightEffect::Silence,
    NightEffect::PlantDevice,
    NightEffect::Revive,
    NightEffect::Recruit,
    NightEffect::DistributeAmmo,
    NightEffect::DelayedReveal,
    NightEffect::CurseChain,
    NightEffect::AllianceBookkeeping,
];

impl NightEffect {
    /// Slot number; lower resolves first.
    #[must_use]
    pub const fn priority(self) -> u8 {
        self as u8
    }

    /// The role action resolved in this slot, if any.
    #[must_use]
    pub const fn action(self) -> Option<NightActionKind> {
        match self {
            NightEffect::Block => Some(NightActionKind::Block),
            NightEffect::Heal => Some(NightActionKind::Heal),
            NightEffect::MafiaHeal => Some(NightActionKind::MafiaHeal),
            NightEffect::Leader => Some(NightActionKind::Leader),
            NightEffect::Curse => Some(NightActionKind::Curse),
            NightEffect::PeriodicKill => Some(NightActionKind::PeriodicKill),
            NightEffect::Marksman => Some(NightActionKind::Marksman),
            NightEffect::Investigate => Some(NightActionKind::Investigate),
            NightEffect::Silence => Some(NightActionKind::Silence),
            NightEffect::PlantDevice => Some(NightActionKind::PlantDevice),
            NightEffect::Revive => Some(NightActionKind::Revive),
            NightEffect::Recruit => Some(NightActionKind::Recruit),
            NightEffect::DistributeAmmo => Some(NightActionKind::DistributeAmmo),
            NightEffect::DelayedReveal => Some(NightActionKind::DelayedReveal),
            NightEffect::DelayedKill
            | NightEffect::CurseChain
            | NightEffect::AllianceBookkeeping => None,
        }
    }
}

impl From<NightActionKind> for NightEffect {
    fn from(kind: NightActionKind) -> Self {
        match kind {
            NightActionKind::Block => NightEffect::Block,
            NightActionKind::Heal => NightEffect::Heal,
            NightActionKind::MafiaHeal => NightEffect::MafiaHeal,
            NightActionKind::Leader => NightEffect::Leader,
            NightActionKind::Curse => NightEffect::Curse,
            NightActionKind::PeriodicKill => NightEffect::PeriodicKill,
            NightActionKind::Marksman => NightEffect::Marksman,
            NightActionKind::Investigate => NightEffect::Investigate,
            NightActionKind::Silence => NightEffect::Silence,
            NightActionKind::PlantDevice => NightEffect::PlantDevice,
            NightActionKind::Revive => NightEffect::Revive,
            NightActionKind::Recruit => NightEffect::Recruit,
            NightActionKind::DistributeAmmo => NightEffect::DistributeAmmo,
            NightActionKind::DelayedReveal => NightEffect::DelayedReveal,
        }
    }
}
