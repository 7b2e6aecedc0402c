//! The night pipeline.
//!
//! ## Key Types
//!
//! - `NightEffect` / `NIGHT_ORDER`: The declared resolution order
//! - `NightStep`: One role's turn to act, built when the night starts
//! - `NightResolver`: Two-phase resolution of the recorded actions
//! - `NightResult`: Structured outcome plus the human-readable log

pub mod order;
pub mod resolver;
pub mod result;
pub mod steps;

pub use order::{NightEffect, NIGHT_ORDER};
pub use resolver::NightResolver;
pub use result::{
    ExactGuessReport, InvestigationOutcome, InvestigationReport, NegotiationReport,
    NightResult, RecruitmentReport, SniperReveal,
};
pub use steps::NightStep;
