//! Role registry for definition lookup.
//!
//! The `RoleRegistry` holds every role definition, built once at first use
//! and shared read-only for the life of the process. It keeps declaration
//! order, which is the tie-break for night steps with equal priority.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use super::definition::{InvestigationReading, NightActionKind, Role, RoleDefinition, Team};

static GLOBAL: Lazy<RoleRegistry> = Lazy::new(RoleRegistry::standard);

/// Registry of role definitions.
///
/// ## Example
///
/// ```
/// use mafia_engine::roles::{Role, RoleRegistry, Team};
///
/// let registry = RoleRegistry::global();
/// let sniper = registry.get(Role::Sniper);
/// assert_eq!(sniper.team, Team::Citizen);
/// assert!(sniper.has_shield);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RoleRegistry {
    roles: FxHashMap<Role, RoleDefinition>,
    order: Vec<Role>,
}

impl RoleRegistry {
    /// The process-wide registry.
    #[must_use]
    pub fn global() -> &'static RoleRegistry {
        &GLOBAL
    }

    /// Build the standard role catalog.
    fn standard() -> Self {
        use InvestigationReading::{Negative, Positive};
        use NightActionKind as A;

        let mut registry = Self::default();

        registry.register(
            RoleDefinition::new(Role::Godfather, Team::Mafia)
                .with_action(A::Leader)
                .shielded()
                .morning_shot_immune()
                .reads_as(Negative),
        );
        registry.register(RoleDefinition::new(Role::Matador, Team::Mafia).with_action(A::Block));
        registry.register(
            RoleDefinition::new(Role::MafiaDoctor, Team::Mafia).with_action(A::MafiaHeal),
        );
        registry.register(RoleDefinition::new(Role::Negotiator, Team::Mafia).alliance_safe());
        registry.register(RoleDefinition::new(Role::Silencer, Team::Mafia).with_action(A::Silence));
        registry.register(
            RoleDefinition::new(Role::Bomber, Team::Mafia).with_action(A::PlantDevice),
        );
        registry.register(RoleDefinition::new(Role::Mafia, Team::Mafia).plain(10));

        registry.register(RoleDefinition::new(Role::Citizen, Team::Citizen).plain(20));
        registry.register(RoleDefinition::new(Role::Doctor, Team::Citizen).with_action(A::Heal));
        registry.register(
            RoleDefinition::new(Role::Detective, Team::Citizen).with_action(A::Investigate),
        );
        registry.register(
            RoleDefinition::new(Role::Sniper, Team::Citizen)
                .with_action(A::Marksman)
                .shielded(),
        );
        registry.register(
            RoleDefinition::new(Role::Bodyguard, Team::Citizen).morning_shot_immune(),
        );
        registry.register(RoleDefinition::new(Role::Priest, Team::Citizen).with_action(A::Revive));
        registry.register(
            RoleDefinition::new(Role::Freemason, Team::Citizen).with_action(A::Recruit),
        );
        registry.register(
            RoleDefinition::new(Role::Gunner, Team::Citizen).with_action(A::DistributeAmmo),
        );
        registry.register(
            RoleDefinition::new(Role::Whistleblower, Team::Citizen)
                .with_action(A::DelayedReveal),
        );
        registry.register(RoleDefinition::new(Role::Judge, Team::Citizen).vote_immune());
        registry.register(RoleDefinition::new(Role::Suspect, Team::Citizen).reads_as(Positive));

        registry.register(
            RoleDefinition::new(Role::Jack, Team::Independent)
                .with_action(A::Curse)
                .shoot_immune(),
        );
        registry.register(
            RoleDefinition::new(Role::Killer, Team::Independent).with_action(A::PeriodicKill),
        );

        registry
    }

    /// Register a role definition.
    ///
    /// Panics if the role is already registered. Only called while the
    /// catalog is being built.
    fn register(&mut self, def: RoleDefinition) {
        assert!(
            !self.roles.contains_key(&def.role),
            "Role {:?} already registered",
            def.role
        );
        self.order.push(def.role);
        self.roles.insert(def.role, def);
    }

    /// Get a role definition.
    ///
    /// Every `Role` variant is registered, so lookup cannot miss.
    #[must_use]
    pub fn get(&self, role: Role) -> &RoleDefinition {
        &self.roles[&role]
    }

    /// Number of registered roles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate over definitions in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &RoleDefinition> {
        self.order.iter().map(move |r| &self.roles[r])
    }

    /// Find roles on a team.
    pub fn find_by_team(&self, team: Team) -> impl Iterator<Item = &RoleDefinition> {
        self.iter().filter(move |d| d.team == team)
    }

    /// Find the role that performs a night action, if any.
    #[must_use]
    pub fn find_by_action(&self, kind: NightActionKind) -> Option<&RoleDefinition> {
        self.iter().find(|d| d.night_action == Some(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_role_registered() {
        let registry = RoleRegistry::global();
        assert_eq!(registry.len(), Role::ALL.len());
        for role in Role::ALL {
            assert_eq!(registry.get(role).role, role);
        }
    }

    #[test]
    fn test_iteration_keeps_declaration_order() {
        let roles: Vec<_> = RoleRegistry::global().iter().map(|d| d.role).collect();
        assert_eq!(roles, Role::ALL.to_vec());
    }

    #[test]
    fn test_find_by_team() {
        let independents: Vec<_> = RoleRegistry::global()
            .find_by_team(Team::Independent)
            .map(|d| d.role)
            .collect();
        assert_eq!(independents, vec![Role::Jack, Role::Killer]);
    }

    #[test]
    fn test_each_night_action_has_one_role() {
        let registry = RoleRegistry::global();
        let acting: Vec<_> = registry.iter().filter_map(|d| d.night_action).collect();
        for kind in &acting {
            assert_eq!(acting.iter().filter(|k| *k == kind).count(), 1, "{kind:?}");
        }
        assert_eq!(
            registry.find_by_action(NightActionKind::Block).map(|d| d.role),
            Some(Role::Matador)
        );
    }

    #[test]
    fn test_flags() {
        let registry = RoleRegistry::global();
        assert!(registry.get(Role::Godfather).has_shield);
        assert!(registry.get(Role::Jack).shoot_immune);
        assert!(registry.get(Role::Judge).vote_immune);
        assert!(registry.get(Role::Negotiator).alliance_safe);
        assert_eq!(
            registry.get(Role::Suspect).investigation,
            InvestigationReading::Positive
        );
        assert_eq!(
            registry.get(Role::Godfather).investigation,
            InvestigationReading::Negative
        );
    }
}
