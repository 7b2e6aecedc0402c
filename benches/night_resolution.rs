//! Benchmarks for night resolution and snapshots.

#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use mafia_engine::{ActionExtra, GameState, PlayerId, Role, RulesConfig};

const TABLE: [Role; 12] = [
    Role::Godfather,
    Role::Matador,
    Role::Bomber,
    Role::Doctor,
    Role::Detective,
    Role::Sniper,
    Role::Bodyguard,
    Role::Freemason,
    Role::Gunner,
    Role::Jack,
    Role::Citizen,
    Role::Citizen,
];

/// A game opened on night 1 with every step left to record.
fn opened_night(seed: u64) -> GameState {
    let mut state = GameState::new(RulesConfig::default(), seed);
    for i in 1..=TABLE.len() {
        state.add_player(format!("P{i}"));
    }
    for role in TABLE {
        let count = state.selected_role_counts().get(&role).copied().unwrap_or(0);
        state.set_role_count(role, count + 1);
    }
    state.assign_roles().expect("valid setup");
    state.start_blind_day();
    state.start_blind_night();
    state.resolve_night();
    state.start_day();
    state.start_night();
    state
}

/// Record a target for every step, rotating through the living players.
fn record_all(state: &mut GameState) {
    let mut turn = 0usize;
    while let Some(step) = state.current_night_step() {
        let role = step.role;
        let alive: Vec<PlayerId> = state.alive_players().iter().map(|p| p.id).collect();
        let target = alive[turn % alive.len()];
        turn += 1;
        let extra = match role {
            Role::Bomber => ActionExtra::Password(3),
            _ => ActionExtra::None,
        };
        if !state.record_night_action(Some(target), extra) {
            state.skip_night_action();
        }
    }
}

fn bench_resolve_night(c: &mut Criterion) {
    let mut base = opened_night(42);
    record_all(&mut base);

    c.bench_function("resolve_night_12p", |b| {
        b.iter(|| {
            let mut state = base.clone();
            black_box(state.resolve_night())
        });
    });
}

fn bench_full_night(c: &mut Criterion) {
    let base = opened_night(7);

    c.bench_function("record_and_resolve_12p", |b| {
        b.iter(|| {
            let mut state = base.clone();
            record_all(&mut state);
            black_box(state.resolve_night())
        });
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let mut state = opened_night(42);
    record_all(&mut state);
    state.resolve_night();

    c.bench_function("snapshot_bytes_12p", |b| {
        b.iter(|| black_box(state.snapshot_bytes()));
    });
    c.bench_function("snapshot_json_12p", |b| {
        b.iter(|| black_box(state.to_json()));
    });
}

criterion_group!(benches, bench_resolve_night, bench_full_night, bench_snapshot);
criterion_main!(benches);
