//! Morning settlement of a contaminated alliance.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{DeathCause, GameState, Phase, PlayerId};

/// Who died when the alliance was settled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContaminationResolution {
    /// Leader and members killed.
    pub dead_ids: Vec<PlayerId>,
    /// The unsafe recruit, who survives.
    pub recruit_id: PlayerId,
}

impl GameState {
    /// An unsafe recruit is waiting to be settled, whether or not the
    /// leader is still alive.
    #[must_use]
    pub fn has_framason_contamination(&self) -> bool {
        self.alliance.has_pending_contamination()
    }

    /// Kill the leader and every member still alive. The alliance is
    /// finished.
    pub fn resolve_framason_contamination(&mut self) -> Option<ContaminationResolution> {
        if self.phase != Phase::Day {
            return None;
        }
        let (doomed, recruit_id) = self.alliance.resolve_contamination()?;

        let mut dead_ids = Vec::new();
        for id in doomed {
            if self.mark_dead(id, DeathCause::AllianceContamination) {
                dead_ids.push(id);
            }
        }
        let recruit = self.name_of(recruit_id);
        info!(dead = dead_ids.len(), "alliance contamination resolved");
        self.log(format!("The alliance recruited {recruit} and was destroyed"));
        self.settle_deaths(&dead_ids);
        self.check_win_condition();

        Some(ContaminationResolution {
            dead_ids,
            recruit_id,
        })
    }

    /// Names of the leader and members, leader first.
    #[must_use]
    pub fn framason_alliance_names(&self) -> Vec<String> {
        self.alliance
            .leader()
            .into_iter()
            .chain(self.alliance.members().iter().copied())
            .map(|id| self.name_of(id))
            .collect()
    }
}
