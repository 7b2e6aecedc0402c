//! One-time explosive device and its determination mini-game.
//!
//! ```text
//! None --plant--> Planted --begin_determination--> Determination
//!   Determination --guardian_guess--> Defused | ProtectorDied
//!   Determination --target_guess----> Defused | Detonated
//!   (any outcome) --clear--> None
//! ```
//!
//! The `used` flag is set by `plant` and never cleared, so the device can
//! only be planted once per game.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Lowest accepted password.
pub const MIN_PASSWORD: u8 = 1;
/// Highest accepted password.
pub const MAX_PASSWORD: u8 = 4;

/// Device lifecycle phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DevicePhase {
    /// Nothing planted.
    #[default]
    None,
    /// Planted overnight, waiting for the moderator.
    Planted,
    /// Midday guessing in progress.
    Determination,
    /// Correct password entered.
    Defused,
    /// Target guessed wrong.
    Detonated,
    /// Protector guessed wrong and died instead.
    ProtectorDied,
}

/// Result of the protector's guess.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardianOutcome {
    /// Password matched.
    Defused,
    /// Wrong password; the protector dies in place of the target.
    Wrong,
}

/// Result of the target's own guess.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetOutcome {
    /// Password matched.
    Defused,
    /// Wrong password; the target dies.
    Exploded,
}

/// The singleton explosive device.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplosiveDevice {
    #[serde(alias = "bombTarget")]
    target_id: Option<PlayerId>,
    #[serde(alias = "bombPassword")]
    password: Option<u8>,
    #[serde(alias = "bombUsed")]
    used: bool,
    phase: DevicePhase,
    #[serde(default)]
    guardian_skipped: bool,
}

impl ExplosiveDevice {
    /// Create an unplanted device.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check a password is in range.
    #[must_use]
    pub fn is_valid_password(password: u8) -> bool {
        (MIN_PASSWORD..=MAX_PASSWORD).contains(&password)
    }

    /// Plant on `target` with `password`.
    ///
    /// Fails if the device was ever planted before or the password is out
    /// of range.
    pub fn plant(&mut self, target: PlayerId, password: u8) -> bool {
        if self.used || !Self::is_valid_password(password) {
            return false;
        }
        self.target_id = Some(target);
        self.password = Some(password);
        self.used = true;
        self.phase = DevicePhase::Planted;
        self.guardian_skipped = false;
        true
    }

    /// Move a planted device into the determination phase.
    pub fn begin_determination(&mut self) -> bool {
        if self.phase != DevicePhase::Planted {
            return false;
        }
        self.phase = DevicePhase::Determination;
        true
    }

    /// Protector's guess. `None` if no guess is expected from the protector.
    pub fn guardian_guess(&mut self, guess: u8) -> Option<GuardianOutcome> {
        if self.phase != DevicePhase::Determination || self.guardian_skipped {
            return None;
        }
        if Some(guess) == self.password {
            self.phase = DevicePhase::Defused;
            Some(GuardianOutcome::Defused)
        } else {
            self.phase = DevicePhase::ProtectorDied;
            Some(GuardianOutcome::Wrong)
        }
    }

    /// Protector passes the attempt to the target.
    pub fn guardian_skip(&mut self) -> bool {
        if self.phase != DevicePhase::Determination || self.guardian_skipped {
            return false;
        }
        self.guardian_skipped = true;
        true
    }

    /// Target's guess. `None` if the device is not in determination.
    ///
    /// Whether the protector had the first attempt is the caller's concern.
    pub fn target_guess(&mut self, guess: u8) -> Option<TargetOutcome> {
        if self.phase != DevicePhase::Determination {
            return None;
        }
        if Some(guess) == self.password {
            self.phase = DevicePhase::Defused;
            Some(TargetOutcome::Defused)
        } else {
            self.phase = DevicePhase::Detonated;
            Some(TargetOutcome::Exploded)
        }
    }

    /// Reset to `None`. The used flag stays set.
    pub fn clear(&mut self) {
        self.target_id = None;
        self.password = None;
        self.phase = DevicePhase::None;
        self.guardian_skipped = false;
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> DevicePhase {
        self.phase
    }

    /// Planted target, if any.
    #[must_use]
    pub fn target(&self) -> Option<PlayerId> {
        self.target_id
    }

    /// Whether the device has ever been planted this game.
    #[must_use]
    pub fn is_used(&self) -> bool {
        self.used
    }

    /// Whether the protector passed.
    #[must_use]
    pub fn guardian_skipped(&self) -> bool {
        self.guardian_skipped
    }
}
