//! Recruitment alliance.
//!
//! The alliance leader recruits one player per night. Safe recruits join;
//! the first unsafe recruit contaminates the alliance, which stops all
//! further recruitment and kills the leader and members the next morning.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::roles::{Role, Team};

/// The unsafe recruit that ruined the alliance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contamination {
    /// Who was recruited.
    pub bad_recruit_id: PlayerId,
}

/// Outcome of a recruitment attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecruitOutcome {
    /// Joined the alliance.
    Safe,
    /// Unsafe recruit; the alliance is contaminated.
    Contaminated,
    /// `can_recruit` was false or the player is already in the alliance.
    Rejected,
}

/// The singleton recruitment alliance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecruitmentAlliance {
    leader_id: Option<PlayerId>,
    members: Vec<PlayerId>,
    max_size: usize,
    #[serde(alias = "contaminated")]
    contamination: Option<Contamination>,
    active: bool,
    #[serde(default)]
    resolved: bool,
}

impl Default for RecruitmentAlliance {
    fn default() -> Self {
        Self::new(2)
    }
}

impl RecruitmentAlliance {
    /// Create an alliance with no leader yet.
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        Self {
            leader_id: None,
            members: Vec::new(),
            max_size,
            contamination: None,
            active: false,
            resolved: false,
        }
    }

    /// Install the leader and open recruitment.
    pub fn set_leader(&mut self, leader: PlayerId) {
        self.leader_id = Some(leader);
        self.members.clear();
        self.contamination = None;
        self.active = true;
        self.resolved = false;
    }

    /// Active, not contaminated, and below capacity.
    #[must_use]
    pub fn can_recruit(&self) -> bool {
        self.active && self.contamination.is_none() && self.members.len() < self.max_size
    }

    /// Whether `role` joins safely.
    #[must_use]
    pub fn is_safe_recruit(role: Role, team: Team) -> bool {
        team == Team::Citizen || role.definition().alliance_safe
    }

    /// Recruit a player.
    pub fn recruit(&mut self, id: PlayerId, role: Role, team: Team) -> RecruitOutcome {
        if !self.can_recruit() || self.contains(id) {
            return RecruitOutcome::Rejected;
        }
        if Self::is_safe_recruit(role, team) {
            self.members.push(id);
            RecruitOutcome::Safe
        } else {
            self.contamination = Some(Contamination { bad_recruit_id: id });
            RecruitOutcome::Contaminated
        }
    }

    /// Settle a contamination.
    ///
    /// Returns the leader and members to eliminate (the bad recruit is not
    /// among them) and permanently deactivates the alliance. Settles even
    /// after the leader died the same night. `None` if there is nothing
    /// pending.
    pub fn resolve_contamination(&mut self) -> Option<(Vec<PlayerId>, PlayerId)> {
        if self.resolved {
            return None;
        }
        let contamination = self.contamination?;
        let mut dead: Vec<PlayerId> = self.leader_id.into_iter().collect();
        dead.extend(self.members.iter().copied());
        self.active = false;
        self.resolved = true;
        Some((dead, contamination.bad_recruit_id))
    }

    /// Leader died; stop recruiting without touching members.
    pub fn on_leader_death(&mut self) {
        self.active = false;
    }

    /// Leader id.
    #[must_use]
    pub fn leader(&self) -> Option<PlayerId> {
        self.leader_id
    }

    /// Members in recruitment order (leader excluded).
    #[must_use]
    pub fn members(&self) -> &[PlayerId] {
        &self.members
    }

    /// Whether `id` is the leader or a member.
    #[must_use]
    pub fn contains(&self, id: PlayerId) -> bool {
        self.leader_id == Some(id) || self.members.contains(&id)
    }

    /// Pending contamination.
    #[must_use]
    pub fn contamination(&self) -> Option<Contamination> {
        self.contamination
    }

    /// A contamination is recorded and has not been settled yet.
    #[must_use]
    pub fn has_pending_contamination(&self) -> bool {
        self.contamination.is_some() && !self.resolved
    }

    /// Whether the alliance still functions.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Capacity (leader excluded).
    #[must_use]
    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alliance() -> RecruitmentAlliance {
        let mut alliance = RecruitmentAlliance::new(2);
        alliance.set_leader(PlayerId::new(1));
        alliance
    }

    #[test]
    fn test_inactive_without_leader() {
        let alliance = RecruitmentAlliance::new(2);
        assert!(!alliance.can_recruit());
    }

    #[test]
    fn test_safe_recruits_until_full() {
        let mut alliance = alliance();
        assert_eq!(
            alliance.recruit(PlayerId::new(2), Role::Citizen, Team::Citizen),
            RecruitOutcome::Safe
        );
        assert_eq!(
            alliance.recruit(PlayerId::new(3), Role::Negotiator, Team::Mafia),
            RecruitOutcome::Safe
        );
        assert!(!alliance.can_recruit());
        assert_eq!(
            alliance.recruit(PlayerId::new(4), Role::Citizen, Team::Citizen),
            RecruitOutcome::Rejected
        );
        assert_eq!(alliance.members().len(), 2);
    }

    #[test]
    fn test_contamination() {
        let mut alliance = alliance();
        alliance.recruit(PlayerId::new(2), Role::Doctor, Team::Citizen);
        assert_eq!(
            alliance.recruit(PlayerId::new(5), Role::Killer, Team::Independent),
            RecruitOutcome::Contaminated
        );
        assert_eq!(alliance.members(), &[PlayerId::new(2)]);
        assert!(!alliance.can_recruit());

        let (dead, recruit) = alliance.resolve_contamination().unwrap();
        assert_eq!(dead, vec![PlayerId::new(1), PlayerId::new(2)]);
        assert_eq!(recruit, PlayerId::new(5));
        assert!(!alliance.is_active());
        assert!(alliance.resolve_contamination().is_none());
    }

    #[test]
    fn test_leader_death_deactivates() {
        let mut alliance = alliance();
        alliance.recruit(PlayerId::new(2), Role::Citizen, Team::Citizen);
        alliance.on_leader_death();

        assert!(!alliance.can_recruit());
        assert_eq!(alliance.members(), &[PlayerId::new(2)]);
    }

    #[test]
    fn test_contamination_settles_after_leader_death() {
        let mut alliance = alliance();
        alliance.recruit(PlayerId::new(2), Role::Citizen, Team::Citizen);
        alliance.recruit(PlayerId::new(3), Role::Mafia, Team::Mafia);
        alliance.on_leader_death();
        assert!(alliance.has_pending_contamination());

        let (dead, recruit) = alliance.resolve_contamination().unwrap();
        assert_eq!(dead, vec![PlayerId::new(1), PlayerId::new(2)]);
        assert_eq!(recruit, PlayerId::new(3));
        assert!(!alliance.has_pending_contamination());
        assert!(alliance.resolve_contamination().is_none());
    }

    #[test]
    fn test_new_leader_clears_settled_contamination() {
        let mut alliance = alliance();
        alliance.recruit(PlayerId::new(3), Role::Mafia, Team::Mafia);
        alliance.resolve_contamination();

        alliance.set_leader(PlayerId::new(4));
        assert!(alliance.can_recruit());
        assert!(!alliance.has_pending_contamination());
        assert!(alliance.resolve_contamination().is_none());
    }

    #[test]
    fn test_duplicate_recruit_rejected() {
        let mut alliance = alliance();
        alliance.recruit(PlayerId::new(2), Role::Citizen, Team::Citizen);
        assert_eq!(
            alliance.recruit(PlayerId::new(2), Role::Citizen, Team::Citizen),
            RecruitOutcome::Rejected
        );
        assert_eq!(
            alliance.recruit(PlayerId::new(1), Role::Freemason, Team::Citizen),
            RecruitOutcome::Rejected
        );
    }
}
