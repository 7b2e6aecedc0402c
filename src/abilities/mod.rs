//! Stateful ability sub-models.
//!
//! Each is a plain owned value: players own a `Shield` and a `CurseLink`,
//! and the game state owns the singleton `ExplosiveDevice`,
//! `RecruitmentAlliance` and `AmmunitionPool`. Failures are reported through
//! return values, never panics.

pub mod alliance;
pub mod ammo;
pub mod curse;
pub mod device;
pub mod shield;

pub use alliance::{Contamination, RecruitOutcome, RecruitmentAlliance};
pub use ammo::{AmmoAssignment, AmmoKind, AmmoStock, AmmunitionPool};
pub use curse::CurseLink;
pub use device::{DevicePhase, ExplosiveDevice, GuardianOutcome, TargetOutcome};
pub use shield::Shield;
