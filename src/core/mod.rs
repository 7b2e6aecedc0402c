//! Core engine types: players, state, actions, RNG, configuration, errors.
//!
//! This module contains the aggregate `GameState` and the building blocks
//! it owns. Setup and phase transitions live in `setup`.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;
mod setup;
pub mod state;

pub use action::{ActionExtra, AmmoGrant, HistoryEntry, LeaderMode, NightAction};
pub use config::RulesConfig;
pub use error::{SetupError, SnapshotError};
pub use player::{DeathCause, Player, PlayerId};
pub use rng::{GameRng, GameRngState};
pub use state::{AbilityTrackers, DeathFallout, GameState, Phase, TeamCounts};
