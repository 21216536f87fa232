//! Seeded randomized checks of the cube model and engine.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use rustc_hash::FxHashSet;

use cubeplay::cube::Cube;
use cubeplay::cubelet::{home_coords, CUBELET_COUNT};
use cubeplay::engine::{Engine, EngineSettings, Phase};
use cubeplay::moves::Move;
use cubeplay::scramble::scramble;
use cubeplay::{Frame, RenderSurface};

fn settle(engine: &mut Engine) {
    for _ in 0..100_000 {
        if engine.phase() == Phase::Idle && engine.activity().is_none() {
            return;
        }
        engine.advance(Duration::from_millis(16));
    }
    panic!("engine never settled");
}

#[test]
fn test_positions_stay_unique_under_random_moves() {
    let mut rng = StdRng::seed_from_u64(0xC0BE);
    let expected: FxHashSet<_> = home_coords().collect();

    for length in [0, 1, 7, 50, 333, 1000] {
        let mut cube = Cube::solved();
        for _ in 0..length {
            let mv = *Move::ALL.choose(&mut rng).unwrap();
            cube.apply(mv);
        }
        let positions: FxHashSet<_> = cube.cubelets().iter().map(|c| c.position).collect();
        assert_eq!(positions.len(), CUBELET_COUNT, "after {length} moves");
        assert_eq!(positions, expected);
        assert!(cube.positions_are_valid());
    }
}

#[test]
fn test_every_move_is_undone_by_its_inverse_from_any_state() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..20 {
        let mut start = Cube::solved();
        start.apply_all(&scramble(&mut rng, 25));

        for mv in Move::ALL {
            let mut cube = start.clone();
            cube.apply(mv);
            cube.apply(mv.inverse());
            assert_eq!(cube, start, "{mv} then {}", mv.inverse());

            let mut cube = start.clone();
            for _ in 0..4 {
                cube.apply(mv);
            }
            assert_eq!(cube, start, "{mv} four times");
        }
    }
}

#[test]
fn test_each_move_changes_exactly_one_layer() {
    for mv in Move::ALL {
        let mut cube = Cube::solved();
        let moved = cube.apply(mv);
        assert_eq!(moved, 9);

        let solved = Cube::solved();
        for (before, after) in solved.cubelets().iter().zip(cube.cubelets()) {
            if !mv.face.contains(before.position) {
                assert_eq!(before, after, "{mv} touched a cubelet outside its layer");
            }
        }
    }
}

#[test]
fn test_shuffle_then_solve_round_trip() {
    for seed in 0..10 {
        let moves = scramble(&mut StdRng::seed_from_u64(seed), 20);
        let mut engine = Engine::new(EngineSettings::default());

        engine.shuffle(moves.clone()).unwrap();
        settle(&mut engine);
        assert_eq!(engine.history(), moves.as_slice());

        engine.solve().unwrap();
        settle(&mut engine);
        assert!(engine.cube().is_solved(), "seed {seed}");
        assert!(engine.history().is_empty());
    }
}

/// Surface that keeps what it was shown.
#[derive(Default)]
struct RecordingSurface {
    revisions: Vec<u64>,
    animated_frames: usize,
}

impl RenderSurface for RecordingSurface {
    fn draw(&mut self, frame: &Frame<'_>) {
        assert_eq!(frame.cubelets.len(), CUBELET_COUNT);
        if let Some(animation) = frame.animation {
            assert!((0.0..=1.0).contains(&animation.progress));
            self.animated_frames += 1;
        }
        self.revisions.push(frame.revision);
    }
}

#[test]
fn test_surface_sees_monotonic_revisions() {
    let mut engine = Engine::new(EngineSettings::default());
    let mut surface = RecordingSurface::default();

    engine.present(&mut surface);
    engine.turn("R".parse().unwrap()).unwrap();
    for _ in 0..30 {
        engine.present(&mut surface);
        engine.advance(Duration::from_millis(16));
    }
    engine.present(&mut surface);

    assert!(surface.animated_frames > 0);
    assert!(surface.revisions.windows(2).all(|pair| pair[0] <= pair[1]));
    assert!(surface.revisions.last() > surface.revisions.first());
}
