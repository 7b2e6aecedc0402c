//! Voting and eliminations ordered during the day.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::{DeathCause, GameState, Phase, PlayerId};
use crate::roles::Team;

/// What an elimination did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EliminationOutcome {
    /// The target died.
    pub eliminated: bool,
    /// The target survived because votes cannot touch their role.
    pub vote_immune: bool,
    /// The curse holder died with the target.
    pub jack_curse_triggered: bool,
    /// The alliance lost its leader.
    pub alliance_dissolved: bool,
    /// Winner decided by this elimination.
    pub winner: Option<Team>,
}

impl GameState {
    /// Record `voter`'s vote, replacing any earlier one.
    pub fn cast_vote(&mut self, voter: PlayerId, target: PlayerId) -> bool {
        if self.phase != Phase::Day
            || voter == target
            || !self.is_alive(voter)
            || !self.is_alive(target)
        {
            warn!(voter = voter.raw(), target = target.raw(), "vote rejected");
            return false;
        }
        debug!(voter = voter.raw(), target = target.raw(), "vote cast");
        self.votes.insert(voter, target);
        true
    }

    /// Withdraw `voter`'s vote.
    pub fn remove_vote(&mut self, voter: PlayerId) -> bool {
        self.votes.remove(&voter).is_some()
    }

    /// Votes per target, most votes first; ties by player id.
    #[must_use]
    pub fn vote_tally(&self) -> Vec<(PlayerId, usize)> {
        let mut tally: Vec<(PlayerId, usize)> = Vec::new();
        for target in self.votes.values() {
            match tally.iter_mut().find(|(id, _)| id == target) {
                Some((_, count)) => *count += 1,
                None => tally.push((*target, 1)),
            }
        }
        tally.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        tally
    }

    /// Execute `target` by vote.
    pub fn eliminate_by_vote(&mut self, target: PlayerId) -> EliminationOutcome {
        let mut outcome = EliminationOutcome::default();
        if self.phase != Phase::Day || !self.is_alive(target) {
            return outcome;
        }

        let name = self.name_of(target);
        let immune = self
            .player(target)
            .and_then(|p| p.role)
            .is_some_and(|role| role.definition().vote_immune);
        if immune {
            outcome.vote_immune = true;
            info!(player = target.raw(), "vote-immune player survives execution");
            self.log(format!("{name} cannot be executed by vote"));
            return outcome;
        }

        self.log(format!("{name} was executed by vote"));
        self.eliminate(target, DeathCause::Vote, &mut outcome);
        self.votes.clear();
        outcome
    }

    /// Remove a player on the moderator's authority. Cannot be revived.
    pub fn eliminate_by_moderator(&mut self, target: PlayerId) -> EliminationOutcome {
        let mut outcome = EliminationOutcome::default();
        if matches!(self.phase, Phase::Setup | Phase::Ended) || !self.is_alive(target) {
            return outcome;
        }
        let name = self.name_of(target);
        self.log(format!("{name} was removed by the moderator"));
        self.eliminate(target, DeathCause::Moderator, &mut outcome);
        outcome
    }

    fn eliminate(&mut self, target: PlayerId, cause: DeathCause, outcome: &mut EliminationOutcome) {
        outcome.eliminated = self.mark_dead(target, cause);
        let fallout = self.settle_deaths(&[target]);
        outcome.jack_curse_triggered = fallout.curse_victim.is_some();
        outcome.alliance_dissolved = fallout.alliance_dissolved;
        outcome.winner = self.check_win_condition();
    }
}
