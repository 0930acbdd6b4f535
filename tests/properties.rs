use std::f32::consts::TAU;

use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use coin_chase::{Settings, cartesian_to_polar, wrap_angle};
use coin_chase::sim::{
    Category, Direction, GameState, Placement, PlayerInput, SpawnEvent, SpawnTimer, rule, tick,
};

fn direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(vec![
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ])
}

fn category() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::ALL.to_vec())
}

proptest! {
    #[test]
    fn timer_fires_at_most_once_per_tick(
        interval in 0.1f32..5.0,
        dts in prop::collection::vec(0.0f32..10.0, 1..200),
    ) {
        let mut timer = SpawnTimer::new(Category::Coin, interval, Placement::Radial { radius: 200.0 });
        let mut model = 0.0f32;
        for dt in dts {
            model += dt;
            let expected = model >= interval;
            if expected {
                model = 0.0;
            }
            prop_assert_eq!(timer.advance(dt), expected);
            prop_assert_eq!(timer.elapsed(), model);
        }
    }

    #[test]
    fn rule_is_symmetric(a in category(), b in category()) {
        prop_assert_eq!(rule(a, b), rule(b, a));
    }

    #[test]
    fn score_only_grows_and_freezes_after_game_over(
        seed in any::<u64>(),
        steps in prop::collection::vec((direction(), 0.0f32..0.2), 1..300),
    ) {
        let settings = Settings { seed, ..Settings::default() };
        let mut state = GameState::new(settings, Vec2::ZERO);
        let mut total = 0u64;
        let mut over = false;

        for (dir, dt) in steps {
            state.set_player_input(PlayerInput::Direction(dir));
            let before = state.score();
            let report = tick(&mut state, dt);

            if over {
                prop_assert!(report.is_empty());
            }
            prop_assert!(state.score() >= before);
            total += u64::from(report.score_delta);
            prop_assert_eq!(state.score(), total);
            over = state.is_game_over();
        }
    }

    #[test]
    fn player_never_leaves_world(
        start in (-1900.0f32..1900.0, -1900.0f32..1900.0),
        steps in prop::collection::vec((direction(), 0.0f32..3.0), 1..100),
    ) {
        let settings = Settings {
            coin_interval: 1000.0,
            enemy_interval: 1000.0,
            ..Settings::default()
        };
        let mut state = GameState::new(settings, Vec2::new(start.0, start.1));
        let world = *state.world();

        for (dir, dt) in steps {
            state.set_player_input(PlayerInput::Direction(dir));
            tick(&mut state, dt);
            let bounds = state.player().bounds();
            prop_assert!(bounds.min().cmpge(world.min()).all());
            prop_assert!(bounds.max().cmple(world.max()).all());
        }
    }

    #[test]
    fn nothing_spawns_after_game_over(
        category in category(),
        x in -1000.0f32..1000.0,
        y in -1000.0f32..1000.0,
    ) {
        let mut state = GameState::new(Settings::default(), Vec2::ZERO);
        state.instantiate(SpawnEvent {
            category: Category::Enemy,
            pos: Vec2::new(10.0, 0.0),
        });
        prop_assert!(tick(&mut state, 0.0).game_over_triggered);
        let count = state.registry().len();

        let spawned = state.instantiate(SpawnEvent { category, pos: Vec2::new(x, y) });
        prop_assert!(spawned.is_none());
        prop_assert_eq!(state.registry().len(), count);
    }
}

#[test]
fn radial_placement_is_uniform_on_the_ring() {
    const SAMPLES: usize = 10_000;
    const BINS: usize = 8;

    let mut rng = Pcg32::seed_from_u64(42);
    let placement = Placement::Radial { radius: 200.0 };
    let origin = Vec2::new(-35.0, 120.0);
    let mut bins = [0usize; BINS];

    for _ in 0..SAMPLES {
        let pos = placement.place(origin, &mut rng);
        let (r, theta) = cartesian_to_polar(pos - origin);
        assert!((r - 200.0).abs() < 0.01, "sample at distance {}", r);
        let bin = ((wrap_angle(theta) / TAU) * BINS as f32) as usize;
        bins[bin.min(BINS - 1)] += 1;
    }

    let expected = SAMPLES / BINS;
    for count in bins {
        assert!(
            count.abs_diff(expected) < expected / 10,
            "bin counts not uniform: {:?}",
            bins
        );
    }
}

#[test]
fn same_row_placement_uses_both_sides() {
    let mut rng = Pcg32::seed_from_u64(7);
    let placement = Placement::SameRow { offset: 600.0 };
    let mut left = 0;
    let mut right = 0;

    for _ in 0..1000 {
        let pos = placement.place(Vec2::new(10.0, -20.0), &mut rng);
        assert_eq!(pos.y, -20.0);
        match pos.x {
            x if x == 610.0 => right += 1,
            x if x == -590.0 => left += 1,
            x => panic!("unexpected x {}", x),
        }
    }
    assert!(left > 400 && right > 400);
}
