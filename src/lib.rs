//! # mafia-engine
//!
//! A moderator-driven rules engine for a hidden-role elimination party game
//! played in alternating night and day rounds.
//!
//! ## Design Principles
//!
//! 1. **Declared Order**: Night effects resolve in the fixed `NIGHT_ORDER`
//!    table, never in the order the moderator recorded them.
//!
//! 2. **Closed Catalog**: Roles, teams and night-action kinds are closed
//!    enums. The resolver matches them exhaustively.
//!
//! 3. **Failures Are Values**: Rule failures come back as `bool`, `Option`
//!    or outcome enums. Nothing in a rules path panics or leaves the game in
//!    a half-applied state.
//!
//! ## Architecture
//!
//! - **One Aggregate**: `GameState` owns every player and ability
//!   sub-model. Operations are `impl GameState` blocks grouped by area.
//!
//! - **Two-Phase Night**: Blocking filters a working copy of the recorded
//!   actions before any other effect resolves.
//!
//! - **Snapshots**: The whole game serializes to JSON (with older field
//!   names accepted) or to compact binary.
//!
//! ## Modules
//!
//! - `core`: Player ids, players, state, actions, RNG, configuration, errors
//! - `roles`: Role catalog and immutable registry
//! - `abilities`: Shield, curse link, device, alliance, ammunition pool
//! - `night`: Priority table, step builder, resolver, results
//! - `day`: Votes, morning shots, device determination, contamination
//! - `rules`: Win-condition evaluation

pub mod core;
pub mod roles;
pub mod abilities;
pub mod night;
pub mod day;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, Player, DeathCause,
    GameRng, GameRngState,
    RulesConfig, SetupError, SnapshotError,
    ActionExtra, AmmoGrant, LeaderMode, NightAction, HistoryEntry,
    AbilityTrackers, GameState, Phase, TeamCounts,
};

pub use crate::roles::{
    Role, Team, NightActionKind, InvestigationReading,
    RoleDefinition, RoleRegistry,
};

pub use crate::abilities::{
    Shield, CurseLink,
    ExplosiveDevice, DevicePhase, GuardianOutcome, TargetOutcome,
    RecruitmentAlliance, RecruitOutcome, Contamination,
    AmmunitionPool, AmmoKind, AmmoAssignment,
};

pub use crate::night::{
    NightEffect, NIGHT_ORDER, NightStep, NightResolver, NightResult,
    InvestigationOutcome, InvestigationReport,
};

pub use crate::day::{
    EliminationOutcome, MorningShotOutcome, NeutralizedBy, ContaminationResolution,
};

pub use crate::rules::WinEvaluator;
