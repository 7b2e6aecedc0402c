//! Role system: the closed role catalog and its registry.
//!
//! ## Key Types
//!
//! - `Role`: Every role the engine knows, as a closed enum
//! - `Team`: Mafia, citizen, or independent
//! - `NightActionKind`: What a role does at night
//! - `RoleDefinition`: Static role data and flags
//! - `RoleRegistry`: Immutable lookup table, built once

pub mod definition;
pub mod registry;

pub use definition::{InvestigationReading, NightActionKind, Role, RoleDefinition, Team};
pub use registry::RoleRegistry;
