//! Player identification and per-player records.
//!
//! ## PlayerId
//!
//! Stable identifier, allocated monotonically per game starting at 1.
//!
//! ## Player
//!
//! Mutable record: role, life status, death metadata, transient night flags,
//! and the owned `Shield` and `CurseLink`.

use serde::{Deserialize, Serialize};

use crate::abilities::{CurseLink, Shield};
use crate::roles::{Role, Team};

/// Player identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Why a player died.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    /// Mafia leader's shot.
    MafiaShot,
    /// Mafia leader named the exact role.
    ExactGuess,
    /// Independent killer's stab.
    KillerStab,
    /// Killer attacked the protector and died instead.
    KillerBackfire,
    /// Sniper hit a mafia member.
    SniperShot,
    /// Sniper hit a citizen and paid for it.
    SniperMiss,
    /// Curse holder's target died.
    CurseLink,
    /// Delayed death after exposing someone.
    Exposure,
    /// Executed by vote.
    Vote,
    /// Live bullet fired in the morning.
    MorningShot,
    /// Live bullet never fired before discussion ended.
    AmmoExpiry,
    /// Explosive device.
    DeviceDetonation,
    /// Alliance recruited an unsafe member.
    AllianceContamination,
    /// Moderator removed the player.
    Moderator,
}

impl DeathCause {
    /// Causes that ignore shields entirely.
    #[must_use]
    pub const fn bypasses_shield(self) -> bool {
        matches!(
            self,
            DeathCause::Vote
                | DeathCause::ExactGuess
                | DeathCause::DeviceDetonation
                | DeathCause::AmmoExpiry
                | DeathCause::SniperMiss
        )
    }

    /// Whether a death by this cause can be undone by revival.
    #[must_use]
    pub const fn is_revivable(self) -> bool {
        !matches!(self, DeathCause::ExactGuess | DeathCause::Moderator)
    }
}

/// A participant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Stable id.
    pub id: PlayerId,

    /// Name shown to the moderator.
    #[serde(alias = "name")]
    pub display_name: String,

    /// Assigned role, `None` before assignment.
    #[serde(alias = "roleId")]
    pub role: Option<Role>,

    /// Life status.
    #[serde(alias = "isAlive")]
    pub alive: bool,

    /// Round of death; set iff `alive` is false.
    #[serde(alias = "deathNight")]
    pub death_round: Option<u32>,

    /// Cause of death; set iff `alive` is false.
    #[serde(default)]
    pub death_cause: Option<DeathCause>,

    /// Cannot speak until the next night reset.
    #[serde(default, alias = "isSilenced")]
    pub silenced: bool,

    /// Protected for the rest of this night and the next morning.
    #[serde(default, alias = "isHealed")]
    pub healed: bool,

    /// One-time protection.
    #[serde(default)]
    pub shield: Shield,

    /// Fate link (only the curse role uses it).
    #[serde(default, alias = "jackCurse")]
    pub curse: CurseLink,
}

impl Player {
    /// Create a living player with no role.
    #[must_use]
    pub fn new(id: PlayerId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            role: None,
            alive: true,
            death_round: None,
            death_cause: None,
            silenced: false,
            healed: false,
            shield: Shield::new(),
            curse: CurseLink::new(),
        }
    }

    /// Team of the assigned role.
    #[must_use]
    pub fn team(&self) -> Option<Team> {
        self.role.map(Role::team)
    }

    /// Whether the player holds `role`.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.role == Some(role)
    }

    /// Assign a role, arming the shield if the role has one.
    pub fn assign_role(&mut self, role: Role) {
        self.role = Some(role);
        if role.definition().has_shield {
            self.shield.activate();
        }
    }

    /// Mark dead. No effect on an already dead player.
    pub fn kill(&mut self, round: u32, cause: DeathCause) -> bool {
        if !self.alive {
            return false;
        }
        self.alive = false;
        self.death_round = Some(round);
        self.death_cause = Some(cause);
        self.healed = false;
        true
    }

    /// Bring back to life, clearing death metadata.
    pub fn revive(&mut self) {
        self.alive = true;
        self.death_round = None;
        self.death_cause = None;
    }

    /// Dead before `round` by a revivable cause.
    #[must_use]
    pub fn is_revivable(&self, round: u32) -> bool {
        !self.alive
            && self.death_round.is_some_and(|r| r < round)
            && self.death_cause.is_some_and(DeathCause::is_revivable)
    }

    /// Clear per-night flags.
    pub fn reset_night_flags(&mut self) {
        self.silenced = false;
        self.healed = false;
        self.curse.clear();
    }
}
