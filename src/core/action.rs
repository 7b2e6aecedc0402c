//! Recorded moderator input: night actions and history entries.
//!
//! A `NightAction` is the moderator's record of what one role chose this
//! night: a target plus whatever extra data that role needs. The engine
//! trusts it as ground truth.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use super::state::Phase;
use crate::abilities::AmmoKind;
use crate::roles::Role;

/// Mode chosen by the mafia leader.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderMode {
    /// Ordinary shot, subject to heal and shield.
    Shoot,
    /// Name the target's exact role; bypasses every protection.
    ExactGuess {
        /// The role named.
        guessed: Role,
    },
    /// Try to turn a plain citizen.
    Negotiate,
}

/// One bullet the gunner wants to hand out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmmoGrant {
    /// Recipient.
    pub holder_id: PlayerId,
    /// Bullet kind.
    pub kind: AmmoKind,
}

/// Role-specific data attached to an action.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionExtra {
    /// Nothing beyond the target.
    #[default]
    None,
    /// Leader's chosen mode.
    Leader(LeaderMode),
    /// Device password.
    Password(u8),
    /// Gunner's distribution for the night.
    Ammo(Vec<AmmoGrant>),
}

/// A recorded night action.
///
/// ```
/// use mafia_engine::core::{ActionExtra, LeaderMode, NightAction, PlayerId};
/// use mafia_engine::roles::Role;
///
/// let shot = NightAction::targeting(PlayerId::new(3));
/// assert_eq!(shot.leader_mode(), LeaderMode::Shoot);
///
/// let guess = NightAction::targeting(PlayerId::new(3))
///     .with_extra(ActionExtra::Leader(LeaderMode::ExactGuess { guessed: Role::Doctor }));
/// assert!(matches!(guess.leader_mode(), LeaderMode::ExactGuess { .. }));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NightAction {
    /// Chosen target; `None` means the moderator skipped.
    #[serde(alias = "targetId")]
    pub target: Option<PlayerId>,

    /// Role-specific data.
    #[serde(default)]
    pub extra: ActionExtra,
}

impl NightAction {
    /// An action with a target and no extra data.
    #[must_use]
    pub fn targeting(target: PlayerId) -> Self {
        Self {
            target: Some(target),
            extra: ActionExtra::None,
        }
    }

    /// An action with no target.
    #[must_use]
    pub fn skipped() -> Self {
        Self::default()
    }

    /// Attach extra data (builder pattern).
    #[must_use]
    pub fn with_extra(mut self, extra: ActionExtra) -> Self {
        self.extra = extra;
        self
    }

    /// Leader mode, defaulting to a plain shot.
    #[must_use]
    pub fn leader_mode(&self) -> LeaderMode {
        match self.extra {
            ActionExtra::Leader(mode) => mode,
            _ => LeaderMode::Shoot,
        }
    }

    /// Device password, if given.
    #[must_use]
    pub fn password(&self) -> Option<u8> {
        match self.extra {
            ActionExtra::Password(p) => Some(p),
            _ => None,
        }
    }

    /// Gunner grants, empty if none.
    #[must_use]
    pub fn grants(&self) -> &[AmmoGrant] {
        match &self.extra {
            ActionExtra::Ammo(grants) => grants,
            _ => &[],
        }
    }
}

/// One line of the append-only game log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Round when it happened.
    pub round: u32,
    /// Phase when it happened.
    pub phase: Phase,
    /// Human-readable description.
    #[serde(alias = "message")]
    pub text: String,
}

impl HistoryEntry {
    /// Create a new entry.
    #[must_use]
    pub fn new(round: u32, phase: Phase, text: impl Into<String>) -> Self {
        Self {
            round,
            phase,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_fall_back() {
        let action = NightAction::targeting(PlayerId::new(1));
        assert_eq!(action.password(), None);
        assert!(action.grants().is_empty());
        assert_eq!(action.leader_mode(), LeaderMode::Shoot);
    }

    #[test]
    fn test_password_extra() {
        let action = NightAction::targeting(PlayerId::new(1)).with_extra(ActionExtra::Password(3));
        assert_eq!(action.password(), Some(3));
    }

    #[test]
    fn test_serialization() {
        let action = NightAction::targeting(PlayerId::new(4)).with_extra(ActionExtra::Leader(
            LeaderMode::ExactGuess {
                guessed: Role::Sniper,
            },
        ));

        let json = serde_json::to_string(&action).unwrap();
        let back: NightAction = serde_json::from_str(&json).unwrap();
        assert_eq!(action, back);
    }

    #[test]
    fn test_legacy_target_field() {
        let action: NightAction = serde_json::from_str(r#"{"targetId":2}"#).unwrap();
        assert_eq!(action.target, Some(PlayerId::new(2)));
        assert_eq!(action.extra, ActionExtra::None);
    }
}
