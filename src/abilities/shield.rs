//! One-time shield.
//!
//! A shield absorbs exactly one lethal hit, unless the cause of death is in
//! the bypass set (see `DeathCause::bypasses_shield`). Once spent it never
//! comes back.

use serde::{Deserialize, Serialize};

use crate::core::DeathCause;

/// One-time hit absorption owned by every player.
///
/// Allocated inactive for everyone; roles with `has_shield` activate it at
/// assignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shield {
    #[serde(alias = "hasShield")]
    active: bool,
    #[serde(default)]
    spent: bool,
}

impl Shield {
    /// Create an inactive shield.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the shield. No effect once it has been spent.
    pub fn activate(&mut self) {
        if !self.spent {
            self.active = true;
        }
    }

    /// Try to absorb a hit.
    ///
    /// Returns true and consumes the shield iff it is active and `cause`
    /// does not bypass shields.
    pub fn absorb(&mut self, cause: DeathCause) -> bool {
        if !self.active || cause.bypasses_shield() {
            return false;
        }
        self.active = false;
        self.spent = true;
        true
    }

    /// Whether the shield would absorb a non-bypass hit.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }
}
