//! Night pipeline integration tests.
//!
//! Games are built through the public setup operations, so seating is
//! shuffled; players are looked up by role.

use mafia_engine::core::{ActionExtra, DeathCause, GameState, LeaderMode, Phase, PlayerId, RulesConfig};
use mafia_engine::night::InvestigationOutcome;
use mafia_engine::roles::{Role, Team};

// =============================================================================
// Helpers
// =============================================================================

/// Deal `roles`, play the introduction round and open night 1.
fn first_night(roles: &[(Role, u32)]) -> GameState {
    let total: u32 = roles.iter().map(|(_, count)| count).sum();
    let mut state = GameState::new(RulesConfig::default(), 42);
    for i in 1..=total {
        state.add_player(format!("P{i}"));
    }
    for (role, count) in roles {
        state.set_role_count(*role, *count);
    }
    state.assign_roles().expect("valid setup");

    assert!(state.start_blind_day());
    assert!(state.start_blind_night());
    state.resolve_night().expect("blind night resolves");
    assert!(state.start_day());
    assert!(state.start_night());
    state
}

fn id(state: &GameState, role: Role) -> PlayerId {
    state.holder_of(role).expect("role dealt").id
}

/// Living players holding `role`, in seating order.
fn ids(state: &GameState, role: Role) -> Vec<PlayerId> {
    state
        .alive_players()
        .into_iter()
        .filter(|p| p.has_role(role))
        .map(|p| p.id)
        .collect()
}

/// Skip ahead to `role`'s step and record its choice.
fn act(state: &mut GameState, role: Role, target: Option<PlayerId>, extra: ActionExtra) {
    while let Some(step) = state.current_night_step() {
        if step.role == role {
            assert!(state.record_night_action(target, extra), "{role} rejected");
            return;
        }
        state.skip_night_action();
    }
    panic!("no step for {role}");
}

fn target(state: &mut GameState, role: Role, who: PlayerId) {
    act(state, role, Some(who), ActionExtra::None);
}

fn finish(state: &mut GameState) -> mafia_engine::night::NightResult {
    while state.skip_night_action() {}
    state.resolve_night().expect("night resolves")
}

// =============================================================================
// Scenarios
// =============================================================================

/// A sniper shot on a plain mafia member kills them.
#[test]
fn test_sniper_kills_mafia() {
    let mut state = first_night(&[
        (Role::Godfather, 1),
        (Role::Mafia, 1),
        (Role::Sniper, 1),
        (Role::Doctor, 1),
        (Role::Citizen, 4),
    ]);
    let mafia = id(&state, Role::Mafia);

    target(&mut state, Role::Sniper, mafia);
    let result = finish(&mut state);

    assert!(result.killed.contains(&mafia));
    assert_eq!(result.sniper_reveal.map(|r| r.role), Some(Role::Mafia));
    assert_eq!(state.trackers().sniper_shots_used, 1);
}

/// A sniper shot on a citizen kills the sniper instead.
#[test]
fn test_sniper_miss_kills_sniper() {
    let mut state = first_night(&[
        (Role::Godfather, 1),
        (Role::Mafia, 1),
        (Role::Sniper, 1),
        (Role::Doctor, 1),
        (Role::Citizen, 4),
    ]);
    let sniper = id(&state, Role::Sniper);
    let citizen = ids(&state, Role::Citizen)[0];

    target(&mut state, Role::Sniper, citizen);
    let result = finish(&mut state);

    assert_eq!(result.killed, vec![sniper]);
    assert!(state.is_alive(citizen));
    assert_eq!(
        state.player(sniper).unwrap().death_cause,
        Some(DeathCause::SniperMiss)
    );
}

/// A correct exact guess goes through both heal and shield.
#[test]
fn test_exact_guess_bypasses_heal_and_shield() {
    let mut state = first_night(&[
        (Role::Godfather, 1),
        (Role::Mafia, 1),
        (Role::Sniper, 1),
        (Role::Doctor, 1),
        (Role::Citizen, 4),
    ]);
    let sniper = id(&state, Role::Sniper);

    target(&mut state, Role::Doctor, sniper);
    act(
        &mut state,
        Role::Godfather,
        Some(sniper),
        ActionExtra::Leader(LeaderMode::ExactGuess { guessed: Role::Sniper }),
    );
    let result = finish(&mut state);

    assert!(result.killed.contains(&sniper));
    assert!(result.exact_guess.is_some_and(|g| g.correct));
    assert!(result.saved.is_empty());
    assert!(result.shielded.is_empty());
    assert!(!state.player(sniper).unwrap().is_revivable(5));
}

/// A wrong exact guess does nothing beyond the log.
#[test]
fn test_wrong_exact_guess_is_harmless() {
    let mut state = first_night(&[
        (Role::Godfather, 1),
        (Role::Mafia, 1),
        (Role::Doctor, 1),
        (Role::Citizen, 5),
    ]);
    let doctor = id(&state, Role::Doctor);

    act(
        &mut state,
        Role::Godfather,
        Some(doctor),
        ActionExtra::Leader(LeaderMode::ExactGuess { guessed: Role::Detective }),
    );
    let result = finish(&mut state);

    assert!(result.killed.is_empty());
    assert!(result.exact_guess.is_some_and(|g| !g.correct));
}

/// The shield absorbs an ordinary shot once.
#[test]
fn test_shield_absorbs_shot_once() {
    let mut state = first_night(&[
        (Role::Godfather, 1),
        (Role::Mafia, 1),
        (Role::Sniper, 1),
        (Role::Citizen, 5),
    ]);
    let sniper = id(&state, Role::Sniper);

    target(&mut state, Role::Godfather, sniper);
    let result = finish(&mut state);
    assert_eq!(result.shielded, vec![sniper]);
    assert!(state.is_alive(sniper));

    assert!(state.start_day());
    assert!(state.start_night());
    target(&mut state, Role::Godfather, sniper);
    let result = finish(&mut state);
    assert_eq!(result.killed, vec![sniper]);
}

/// The curse holder dies when their target is shot the same night.
#[test]
fn test_curse_chain() {
    let mut state = first_night(&[
        (Role::Godfather, 1),
        (Role::Mafia, 1),
        (Role::Jack, 1),
        (Role::Doctor, 1),
        (Role::Citizen, 4),
    ]);
    let jack = id(&state, Role::Jack);
    let victim = ids(&state, Role::Citizen)[0];

    target(&mut state, Role::Godfather, victim);
    target(&mut state, Role::Jack, victim);
    let result = finish(&mut state);

    assert!(result.killed.contains(&victim));
    assert!(result.killed.contains(&jack));
    assert!(result.jack_curse_triggered);
    assert_eq!(
        state.player(jack).unwrap().death_cause,
        Some(DeathCause::CurseLink)
    );
}

/// Curse links are empty at the start of every night.
#[test]
fn test_curse_cleared_each_night() {
    let mut state = first_night(&[
        (Role::Godfather, 1),
        (Role::Mafia, 1),
        (Role::Jack, 1),
        (Role::Citizen, 5),
    ]);
    let jack = id(&state, Role::Jack);
    let citizen = ids(&state, Role::Citizen)[0];

    target(&mut state, Role::Jack, citizen);
    finish(&mut state);
    assert_eq!(state.player(jack).unwrap().curse.target(), Some(citizen));

    assert!(state.start_day());
    assert!(state.start_night());
    assert_eq!(state.player(jack).unwrap().curse.target(), None);
}

// =============================================================================
// Blocking
// =============================================================================

/// The block removes the blocked player's action.
#[test]
fn test_block_suppresses_heal() {
    let mut state = first_night(&[
        (Role::Godfather, 1),
        (Role::Matador, 1),
        (Role::Doctor, 1),
        (Role::Citizen, 5),
    ]);
    let doctor = id(&state, Role::Doctor);
    let victim = ids(&state, Role::Citizen)[0];

    target(&mut state, Role::Matador, doctor);
    target(&mut state, Role::Doctor, victim);
    target(&mut state, Role::Godfather, victim);
    let result = finish(&mut state);

    assert_eq!(result.blocked, Some(doctor));
    assert_eq!(result.suppressed, Some(Role::Doctor));
    assert!(result.killed.contains(&victim));
}

/// A blocked detective learns only that they were blocked.
#[test]
fn test_blocked_investigation() {
    let mut state = first_night(&[
        (Role::Godfather, 1),
        (Role::Matador, 1),
        (Role::Detective, 1),
        (Role::Citizen, 5),
    ]);
    let detective = id(&state, Role::Detective);
    let godfather = id(&state, Role::Godfather);

    target(&mut state, Role::Matador, detective);
    target(&mut state, Role::Detective, godfather);
    let result = finish(&mut state);

    let report = result.investigation.expect("report");
    assert_eq!(report.outcome, InvestigationOutcome::Blocked);
}

/// The godfather reads negative and the suspect positive.
#[test]
fn test_investigation_false_readings() {
    let mut state = first_night(&[
        (Role::Godfather, 1),
        (Role::Mafia, 1),
        (Role::Detective, 1),
        (Role::Suspect, 1),
        (Role::Citizen, 4),
    ]);
    let godfather = id(&state, Role::Godfather);
    let suspect = id(&state, Role::Suspect);

    target(&mut state, Role::Detective, godfather);
    let result = finish(&mut state);
    assert_eq!(
        result.investigation.map(|r| r.outcome),
        Some(InvestigationOutcome::Negative)
    );

    assert!(state.start_day());
    assert!(state.start_night());
    target(&mut state, Role::Detective, suspect);
    let result = finish(&mut state);
    assert_eq!(
        result.investigation.map(|r| r.outcome),
        Some(InvestigationOutcome::Positive)
    );
}

/// The same player cannot be blocked two nights running.
#[test]
fn test_block_not_repeated() {
    let mut state = first_night(&[
        (Role::Godfather, 1),
        (Role::Matador, 1),
        (Role::Doctor, 1),
        (Role::Citizen, 5),
    ]);
    let doctor = id(&state, Role::Doctor);

    target(&mut state, Role::Matador, doctor);
    finish(&mut state);

    assert!(state.start_day());
    assert!(state.start_night());
    assert_eq!(state.current_night_step().map(|s| s.role), Some(Role::Matador));
    assert!(!state.record_night_action(Some(doctor), ActionExtra::None));
}

// =============================================================================
// Steps
// =============================================================================

/// With the godfather dead, the rest of the mafia shoot in their place.
#[test]
fn test_leader_fallback() {
    let mut state = first_night(&[
        (Role::Godfather, 1),
        (Role::Mafia, 2),
        (Role::Citizen, 5),
    ]);
    let godfather = id(&state, Role::Godfather);
    finish(&mut state);

    assert!(state.start_day());
    let outcome = state.eliminate_by_vote(godfather);
    assert!(outcome.eliminated);
    assert!(state.start_night());

    let step = state.current_night_step().expect("leader step").clone();
    assert_eq!(step.role, Role::Godfather);
    assert_eq!(step.actors.len(), 2);
    assert!(!step.has_actor(godfather));

    let guess = ActionExtra::Leader(LeaderMode::ExactGuess { guessed: Role::Citizen });
    let victim = ids(&state, Role::Citizen)[0];
    assert!(!state.record_night_action(Some(victim), guess));

    target(&mut state, Role::Godfather, victim);
    let result = finish(&mut state);
    assert_eq!(result.killed, vec![victim]);
}

/// Steps come out in table order and are the same every time.
#[test]
fn test_steps_are_ordered_and_deterministic() {
    let state = first_night(&[
        (Role::Godfather, 1),
        (Role::Matador, 1),
        (Role::Doctor, 1),
        (Role::Detective, 1),
        (Role::Sniper, 1),
        (Role::Gunner, 1),
        (Role::Citizen, 4),
    ]);
    let roles: Vec<Role> = state.night_steps().iter().map(|s| s.role).collect();
    assert_eq!(
        roles,
        vec![
            Role::Matador,
            Role::Doctor,
            Role::Godfather,
            Role::Sniper,
            Role::Detective,
            Role::Gunner,
        ]
    );
    assert_eq!(state.build_night_steps(), state.night_steps());
}

/// Blind night has no steps and kills nobody.
#[test]
fn test_blind_night_is_quiet() {
    let mut state = GameState::new(RulesConfig::default(), 1);
    for i in 1..=8 {
        state.add_player(format!("P{i}"));
    }
    state.set_role_count(Role::Godfather, 1);
    state.set_role_count(Role::Doctor, 1);
    state.set_role_count(Role::Citizen, 6);
    state.assign_roles().unwrap();

    assert!(state.start_blind_night());
    assert!(state.night_steps().is_empty());
    assert!(state.is_night_complete());
    let result = state.resolve_night().unwrap();
    assert!(result.killed.is_empty());
    assert_eq!(state.phase(), Phase::BlindNight);
}

// =============================================================================
// Win checks
// =============================================================================

/// The night that reaches parity ends the game for the mafia.
#[test]
fn test_night_kill_decides_winner() {
    let mut state = first_night(&[
        (Role::Godfather, 1),
        (Role::Mafia, 2),
        (Role::Citizen, 5),
    ]);
    finish(&mut state);
    assert!(state.start_day());
    let voted = ids(&state, Role::Citizen)[0];
    assert_eq!(state.eliminate_by_vote(voted).winner, None);

    assert!(state.start_night());
    let victim = ids(&state, Role::Citizen)[0];
    target(&mut state, Role::Godfather, victim);
    let result = finish(&mut state);

    assert_eq!(result.winner, Some(Team::Mafia));
    assert_eq!(state.winner(), Some(Team::Mafia));
    assert_eq!(state.phase(), Phase::Ended);
    assert!(!state.start_day());
}
