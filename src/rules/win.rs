//! Win-condition evaluation.

use tracing::info;

use crate::core::{GameState, Phase, TeamCounts};
use crate::roles::Team;

/// Decides whether a team has won from the living counts.
///
/// Checks run in order and the first match wins:
/// 1. no mafia and no independent alive: citizens
/// 2. mafia at least as many as everyone else: mafia
/// 3. an independent among at most two survivors, no mafia: independent
#[derive(Clone, Copy, Debug, Default)]
pub struct WinEvaluator;

impl WinEvaluator {
    /// Winning team for `counts`, if any.
    #[must_use]
    pub fn evaluate(counts: TeamCounts) -> Option<Team> {
        if counts.mafia == 0 && counts.independent == 0 {
            return Some(Team::Citizen);
        }
        if counts.mafia >= counts.citizen + counts.independent {
            return Some(Team::Mafia);
        }
        if counts.independent > 0 && counts.total() <= 2 && counts.mafia == 0 {
            return Some(Team::Independent);
        }
        None
    }
}

impl GameState {
    /// Check for a winner after an elimination.
    ///
    /// The first decision is final: it sets the winner and ends the game.
    /// Does nothing before roles are dealt.
    pub fn check_win_condition(&mut self) -> Option<Team> {
        if self.winner.is_some() {
            return self.winner;
        }
        if self.phase == Phase::Setup {
            return None;
        }
        let team = WinEvaluator::evaluate(self.team_counts())?;
        self.winner = Some(team);
        self.phase = Phase::Ended;
        info!(%team, round = self.round, "game over");
        self.log(format!("The {team} team wins"));
        Some(team)
    }
}
