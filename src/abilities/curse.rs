//! Fate link between the curse holder and one other player.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Nightly fate binding.
///
/// Every player owns one, but only the curse role ever places it. The
/// target is cleared at the start of each night; the lock survives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurseLink {
    #[serde(alias = "cursedPlayerId")]
    target_id: Option<PlayerId>,
    #[serde(default)]
    locked: bool,
}

impl CurseLink {
    /// Create an empty, unlocked link.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind to `target`, replacing any previous target.
    ///
    /// Returns false if the link is locked.
    pub fn place(&mut self, target: PlayerId) -> bool {
        if self.locked {
            return false;
        }
        self.target_id = Some(target);
        true
    }

    /// Drop the current target. Called at the start of every night.
    pub fn clear(&mut self) {
        self.target_id = None;
    }

    /// Prevent any further placement.
    pub fn lock(&mut self) {
        self.locked = true;
    }

    /// Whether placement is disabled.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Current target, if any.
    #[must_use]
    pub fn target(&self) -> Option<PlayerId> {
        self.target_id
    }

    /// True iff `killed` is the current target.
    #[must_use]
    pub fn is_triggered_by(&self, killed: PlayerId) -> bool {
        self.target_id == Some(killed)
    }
}
