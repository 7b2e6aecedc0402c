//! Win conditions.
//!
//! `WinEvaluator` is a pure function of the living team counts.
//! `GameState::check_win_condition` applies it and freezes the game once a
//! team has won. Every elimination path calls it.

pub mod win;

pub use win::WinEvaluator;
