//! Role definitions - static role data.
//!
//! `Role` is a closed enum: every role the engine knows about is listed here,
//! and the resolver matches on it exhaustively. `RoleDefinition` carries the
//! immutable properties (team, night action, flags) the rules consult.

use serde::{Deserialize, Serialize};

use crate::night::order::NightEffect;

/// Faction a role plays for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    /// The informed minority.
    Mafia,
    /// The uninformed majority.
    Citizen,
    /// Plays for itself.
    Independent,
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Team::Mafia => "mafia",
            Team::Citizen => "citizen",
            Team::Independent => "independent",
        };
        f.write_str(name)
    }
}

/// What a role does when its night step comes up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NightActionKind {
    /// Suppress another player's action for the night.
    Block,
    /// Citizen-side heal.
    Heal,
    /// Heal that only works on mafia-team targets.
    MafiaHeal,
    /// Mafia leader: shoot, exact-guess, or negotiate.
    Leader,
    /// Bind the caster's fate to a target for one night.
    Curse,
    /// Independent kill that only happens on some nights.
    PeriodicKill,
    /// Limited-ammo shot.
    Marksman,
    /// Learn whether a target reads as mafia.
    Investigate,
    /// Keep a target from speaking next day.
    Silence,
    /// Plant the one-time explosive device.
    PlantDevice,
    /// Bring a dead player back.
    Revive,
    /// Grow the recruitment alliance.
    Recruit,
    /// Hand out ammunition for the morning.
    DistributeAmmo,
    /// Expose a hostile player at the cost of one's own life.
    DelayedReveal,
}

/// Result an investigator would get for a role, before blocking is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestigationReading {
    /// Reads as mafia.
    Positive,
    /// Reads as not mafia.
    Negative,
}

/// Every role in the catalog, in registry declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Godfather,
    Matador,
    MafiaDoctor,
    Negotiator,
    Silencer,
    Bomber,
    Mafia,
    Citizen,
    Doctor,
    Detective,
    Sniper,
    Bodyguard,
    Priest,
    Freemason,
    Gunner,
    Whistleblower,
    Judge,
    Suspect,
    Jack,
    Killer,
}

impl Role {
    /// All roles in declaration order.
    pub const ALL: [Role; 20] = [
        Role::Godfather,
        Role::Matador,
        Role::MafiaDoctor,
        Role::Negotiator,
        Role::Silencer,
        Role::Bomber,
        Role::Mafia,
        Role::Citizen,
        Role::Doctor,
        Role::Detective,
        Role::Sniper,
        Role::Bodyguard,
        Role::Priest,
        Role::Freemason,
        Role::Gunner,
        Role::Whistleblower,
        Role::Judge,
        Role::Suspect,
        Role::Jack,
        Role::Killer,
    ];

    /// Position in declaration order, used to break priority ties.
    #[must_use]
    pub fn declaration_index(self) -> usize {
        self as usize
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Role::Godfather => "Godfather",
            Role::Matador => "Matador",
            Role::MafiaDoctor => "Mafia Doctor",
            Role::Negotiator => "Negotiator",
            Role::Silencer => "Silencer",
            Role::Bomber => "Bomber",
            Role::Mafia => "Mafia",
            Role::Citizen => "Citizen",
            Role::Doctor => "Doctor",
            Role::Detective => "Detective",
            Role::Sniper => "Sniper",
            Role::Bodyguard => "Bodyguard",
            Role::Priest => "Priest",
            Role::Freemason => "Freemason",
            Role::Gunner => "Gunner",
            Role::Whistleblower => "Whistleblower",
            Role::Judge => "Judge",
            Role::Suspect => "Suspect",
            Role::Jack => "Jack",
            Role::Killer => "Killer",
        }
    }

    /// Shortcut for the registry definition of this role.
    #[must_use]
    pub fn definition(self) -> &'static RoleDefinition {
        super::RoleRegistry::global().get(self)
    }

    /// Shortcut for this role's team.
    #[must_use]
    pub fn team(self) -> Team {
        self.definition().team
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Static role definition.
///
/// Built once by the registry and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDefinition {
    /// Which role this describes.
    pub role: Role,

    /// Display name.
    pub name: String,

    /// Faction.
    pub team: Team,

    /// Night action category, `None` for passive roles.
    pub night_action: Option<NightActionKind>,

    /// Resolution slot from the night order table. Passive roles sort last.
    pub priority_order: u8,

    /// Maximum copies allowed in one game.
    pub max_count: u32,

    /// At most one copy allowed.
    pub unique: bool,

    /// Starts the game with an active shield.
    pub has_shield: bool,

    /// The mafia leader's shot has no effect.
    pub shoot_immune: bool,

    /// Cannot be executed by vote.
    pub vote_immune: bool,

    /// Unaffected by a live morning shot.
    pub morning_shot_immune: bool,

    /// Joins the recruitment alliance safely despite being mafia.
    pub alliance_safe: bool,

    /// What an investigator sees.
    pub investigation: InvestigationReading,
}

impl RoleDefinition {
    /// Create a definition with defaults for the team.
    ///
    /// Unique, no flags, investigation reading derived from the team.
    #[must_use]
    pub fn new(role: Role, team: Team) -> Self {
        let investigation = match team {
            Team::Mafia => InvestigationReading::Positive,
            Team::Citizen | Team::Independent => InvestigationReading::Negative,
        };
        Self {
            role,
            name: role.name().to_string(),
            team,
            night_action: None,
            priority_order: u8::MAX,
            max_count: 1,
            unique: true,
            has_shield: false,
            shoot_immune: false,
            vote_immune: false,
            morning_shot_immune: false,
            alliance_safe: false,
            investigation,
        }
    }

    /// Give the role a night action (builder pattern).
    ///
    /// The priority is taken from the night order table, not chosen here.
    #[must_use]
    pub fn with_action(mut self, kind: NightActionKind) -> Self {
        self.night_action = Some(kind);
        self.priority_order = NightEffect::from(kind).priority();
        self
    }

    /// Allow multiple copies of the role.
    #[must_use]
    pub fn plain(mut self, max_count: u32) -> Self {
        self.unique = false;
        self.max_count = max_count;
        self
    }

    /// Start with an active shield.
    #[must_use]
    pub fn shielded(mut self) -> Self {
        self.has_shield = true;
        self
    }

    /// Immune to the leader's shot.
    #[must_use]
    pub fn shoot_immune(mut self) -> Self {
        self.shoot_immune = true;
        self
    }

    /// Immune to vote execution.
    #[must_use]
    pub fn vote_immune(mut self) -> Self {
        self.vote_immune = true;
        self
    }

    /// Immune to live morning shots.
    #[must_use]
    pub fn morning_shot_immune(mut self) -> Self {
        self.morning_shot_immune = true;
        self
    }

    /// Safe recruit for the alliance.
    #[must_use]
    pub fn alliance_safe(mut self) -> Self {
        self.alliance_safe = true;
        self
    }

    /// Override the investigation reading.
    #[must_use]
    pub fn reads_as(mut self, reading: InvestigationReading) -> Self {
        self.investigation = reading;
        self
    }

    /// Whether this role takes a step at night.
    #[must_use]
    pub fn acts_at_night(&self) -> bool {
        self.night_action.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_builder() {
        let def = RoleDefinition::new(Role::Sniper, Team::Citizen)
            .with_action(NightActionKind::Marksman)
            .shielded();

        assert_eq!(def.name, "Sniper");
        assert!(def.has_shield);
        assert!(def.unique);
        assert!(def.acts_at_night());
        assert_eq!(def.priority_order, 7);
        assert_eq!(def.investigation, InvestigationReading::Negative);
    }

    #[test]
    fn test_plain_role() {
        let def = RoleDefinition::new(Role::Mafia, Team::Mafia).plain(10);

        assert!(!def.unique);
        assert_eq!(def.max_count, 10);
        assert!(!def.acts_at_night());
        assert_eq!(def.priority_order, u8::MAX);
        assert_eq!(def.investigation, InvestigationReading::Positive);
    }

    #[test]
    fn test_declaration_index_matches_all() {
        for (i, role) in Role::ALL.iter().enumerate() {
            assert_eq!(role.declaration_index(), i);
        }
    }

    #[test]
    fn test_role_serializes_snake_case() {
        let json = serde_json::to_string(&Role::MafiaDoctor).unwrap();
        assert_eq!(json, "\"mafia_doctor\"");
        let back: Role = serde_json::from_str("\"whistleblower\"").unwrap();
        assert_eq!(back, Role::Whistleblower);
    }
}
