//! Error types.
//!
//! Rule-level failures (no stock, bad target, wrong phase) are reported as
//! `bool`/`Option`/outcome enums and never reach here. These types cover
//! setup validation and snapshot encoding.

use thiserror::Error;

use crate::roles::Role;

/// A reason the selected setup cannot start a game.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("at least {min} players are required, found {found}")]
    NotEnoughPlayers { min: usize, found: usize },

    #[error("{roles} roles selected for {players} players")]
    RoleCountMismatch { roles: usize, players: usize },

    #[error("{role} selected {count} times, at most {max} allowed")]
    TooManyCopies { role: Role, count: u32, max: u32 },

    #[error("at least one mafia role is required")]
    NoMafia,

    #[error("mafia would outnumber everyone else from the start")]
    MafiaMajority,

    #[error("roles can only be assigned during setup")]
    NotInSetup,
}

/// Failure to encode or decode a game snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("json snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("binary snapshot: {0}")]
    Binary(#[from] bincode::Error),
}
