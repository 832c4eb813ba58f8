//! Random walk of the runners
//!
//! Every runner starts at the origin standing still. On each iteration each
//! runner, in index order, may turn onto the other axis and then takes one
//! step. Visited cells are collected into a [RoomSet] and the cell farthest
//! from the origin is kept as the boss candidate.

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::grid::{Direction, GridCell};
use crate::rng::RandomSource;

/// One random walker
#[derive(Clone, Debug, PartialEq)]
pub struct Runner {
    pub position: GridCell,
    pub direction: Direction,
    /// Chance to turn on each step
    pub turn_probability: f64,
}

impl Runner {
    pub fn new(turn_probability: f64) -> Self {
        Self {
            position: GridCell::ORIGIN,
            direction: Direction::Still,
            turn_probability,
        }
    }

    /// Maybe turn, then move. Returns whether the runner turned.
    ///
    /// Consumes one draw for the turn check and one more when turning.
    pub fn step<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> bool {
        let turned = rng.uniform01() < self.turn_probability;
        if turned {
            self.direction = self.direction.turn(rng);
        }
        self.position = self.position + self.direction;
        turned
    }
}

/// Deduplicated visited cells, in order of first visit
///
/// Always contains [GridCell::ORIGIN].
#[derive(Clone, Debug)]
pub struct RoomSet {
    order: Vec<GridCell>,
    index: FxHashSet<GridCell>,
}

impl RoomSet {
    pub(crate) fn new() -> Self {
        let mut rooms = Self {
            order: Vec::new(),
            index: FxHashSet::default(),
        };
        rooms.insert(GridCell::ORIGIN);
        rooms
    }

    /// Add cell; returns false if it was already visited.
    pub(crate) fn insert(&mut self, cell: GridCell) -> bool {
        let fresh = self.index.insert(cell);
        if fresh {
            self.order.push(cell);
        }
        fresh
    }

    pub fn contains(&self, cell: &GridCell) -> bool {
        self.index.contains(cell)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Never true, the origin is always present.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Cells in first-visit order
    pub fn iter(&self) -> impl Iterator<Item = &GridCell> {
        self.order.iter()
    }

    pub fn as_slice(&self) -> &[GridCell] {
        &self.order
    }

    /// Inclusive bounding box `(min, max)` of all cells.
    pub fn bounds(&self) -> (GridCell, GridCell) {
        self.order.iter().fold(
            (GridCell::ORIGIN, GridCell::ORIGIN),
            |(lo, hi), c| {
                (
                    GridCell::new(lo.x.min(c.x), lo.y.min(c.y)),
                    GridCell::new(hi.x.max(c.x), hi.y.max(c.y)),
                )
            },
        )
    }
}

impl PartialEq for RoomSet {
    /// Same cells, regardless of visit order.
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Serialize for RoomSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.order.serialize(serializer)
    }
}

impl<'a> IntoIterator for &'a RoomSet {
    type Item = &'a GridCell;
    type IntoIter = std::slice::Iter<'a, GridCell>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.iter()
    }
}

/// Farthest visited cell so far
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FurthestCell {
    pub cell: GridCell,
    /// Euclidean distance from the origin
    pub distance: f64,
}

impl Default for FurthestCell {
    fn default() -> Self {
        Self {
            cell: GridCell::ORIGIN,
            distance: 0.0,
        }
    }
}

impl FurthestCell {
    /// Replace with `cell` only if it is strictly farther; ties keep the
    /// earlier cell.
    fn offer(&mut self, cell: GridCell) {
        if cell.distance_sq() > self.cell.distance_sq() {
            self.cell = cell;
            self.distance = cell.distance();
        }
    }
}

/// Trace record of one runner step
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct WalkStep {
    pub iteration: usize,
    /// Index of the runner in configuration order
    pub runner: usize,
    pub turned: bool,
    /// Heading after the optional turn
    pub direction: Direction,
    /// Position after the move
    pub position: GridCell,
}

/// Result of a completed walk
#[derive(Clone, Debug)]
pub struct WalkOutcome {
    pub rooms: RoomSet,
    pub furthest: FurthestCell,
    /// All steps in draw order; empty unless the engine was traced
    pub steps: Vec<WalkStep>,
}

/// Drives a set of runners over a fixed number of iterations
pub struct WalkEngine {
    runners: Vec<Runner>,
    iterations: usize,
    trace: bool,
}

impl WalkEngine {
    /// One runner per turn probability, in the given order.
    pub fn new(turn_probabilities: &[f64], iterations: usize) -> Self {
        Self {
            runners: turn_probabilities.iter().map(|&p| Runner::new(p)).collect(),
            iterations,
            trace: false,
        }
    }

    /// Record every step into [WalkOutcome::steps].
    pub fn with_trace(mut self) -> Self {
        self.trace = true;
        self
    }

    /// Run the walk to completion, consuming the runners.
    pub fn run<R: RandomSource + ?Sized>(mut self, rng: &mut R) -> WalkOutcome {
        let mut rooms = RoomSet::new();
        let mut furthest = FurthestCell::default();
        let mut steps = Vec::new();
        // Without runners nothing moves, however many iterations are asked
        let iterations = if self.runners.is_empty() {
            0
        } else {
            self.iterations
        };

        for iteration in 0..iterations {
            for (index, runner) in self.runners.iter_mut().enumerate() {
                let turned = runner.step(rng);
                rooms.insert(runner.position);
                furthest.offer(runner.position);
                if self.trace {
                    steps.push(WalkStep {
                        iteration,
                        runner: index,
                        turned,
                        direction: runner.direction,
                        position: runner.position,
                    });
                }
            }
        }

        log::debug!(
            "walk done: {} runners, {} iterations, {} rooms, furthest {} at {:.3}",
            self.runners.len(),
            self.iterations,
            rooms.len(),
            furthest.cell,
            furthest.distance
        );
        WalkOutcome {
            rooms,
            furthest,
            steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use proptest::prelude::*;

    use super::{FurthestCell, RoomSet, Runner, WalkEngine};
    use crate::grid::{Direction, GridCell};
    use crate::rng::{DungeonRng, ScriptedRng};

    #[test]
    fn no_runners_leaves_only_origin() {
        let mut rng = ScriptedRng::new(&[]);
        let outcome = WalkEngine::new(&[], 10).run(&mut rng);
        assert_eq!(outcome.rooms.as_slice(), &[GridCell::ORIGIN]);
        assert_eq!(outcome.furthest, FurthestCell::default());
        assert!(outcome.steps.is_empty());
    }

    #[test]
    fn zero_iterations_leaves_only_origin() {
        let mut rng = ScriptedRng::new(&[]);
        let outcome = WalkEngine::new(&[0.5, 1.0], 0).run(&mut rng);
        assert_eq!(outcome.rooms.len(), 1);
        assert_eq!(outcome.furthest.distance, 0.0);
    }

    #[test]
    fn always_turning_runner_follows_signs() {
        // Turn check, then sign, per iteration
        let mut rng = ScriptedRng::new(&[0.0, 0.3, 0.0, 0.7, 0.0, 0.1, 0.0, 0.9]);
        let outcome = WalkEngine::new(&[1.0], 4).with_trace().run(&mut rng);
        assert_eq!(rng.remaining(), 0);

        let positions = outcome.steps.iter().map(|s| s.position).collect_vec();
        assert_eq!(
            positions,
            vec![
                GridCell::new(1, 0),
                GridCell::new(1, -1),
                GridCell::new(2, -1),
                GridCell::new(2, -2),
            ]
        );
        assert_eq!(
            outcome.rooms.as_slice(),
            &[
                GridCell::ORIGIN,
                GridCell::new(1, 0),
                GridCell::new(1, -1),
                GridCell::new(2, -1),
                GridCell::new(2, -2),
            ]
        );
        assert_eq!(outcome.furthest.cell, GridCell::new(2, -2));
        assert_eq!(outcome.furthest.distance, 8f64.sqrt());
    }

    #[test]
    fn never_turning_runner_stays_home() {
        let mut rng = ScriptedRng::new(&[0.5; 5]);
        let outcome = WalkEngine::new(&[0.0], 5).with_trace().run(&mut rng);
        assert_eq!(outcome.rooms.len(), 1);
        assert!(outcome.steps.iter().all(|s| s.position == GridCell::ORIGIN));
    }

    #[test]
    fn runners_draw_in_index_order() {
        // Iteration 0: runner 0 turns east, runner 1 turns west.
        // Iteration 1: neither turns.
        let mut rng = ScriptedRng::new(&[0.0, 0.1, 0.0, 0.9, 0.99, 0.99]);
        let outcome = WalkEngine::new(&[0.5, 0.5], 2).with_trace().run(&mut rng);
        let last = outcome.steps.iter().map(|s| (s.runner, s.position)).collect_vec();
        assert_eq!(
            last,
            vec![
                (0, GridCell::new(1, 0)),
                (1, GridCell::new(-1, 0)),
                (0, GridCell::new(2, 0)),
                (1, GridCell::new(-2, 0)),
            ]
        );
        // (2,0) is found before (-2,0) and wins the tie
        assert_eq!(outcome.furthest.cell, GridCell::new(2, 0));
    }

    #[test]
    fn runner_turns_then_moves() {
        let mut rng = ScriptedRng::new(&[0.0, 0.1, 0.7, 0.0, 0.1]);
        let mut runner = Runner::new(0.5);
        assert!(runner.step(&mut rng));
        assert_eq!(runner.direction, Direction::East);
        assert!(!runner.step(&mut rng));
        assert_eq!(runner.position, GridCell::new(2, 0));
        assert!(runner.step(&mut rng));
        assert_eq!(runner.direction, Direction::North);
        assert_eq!(runner.position, GridCell::new(2, 1));
    }

    #[test]
    fn revisits_are_deduplicated() {
        // East, north, west, south: a loop back to the origin
        let mut rng = ScriptedRng::new(&[0.0, 0.1, 0.0, 0.1, 0.0, 0.9, 0.0, 0.9]);
        let outcome = WalkEngine::new(&[1.0], 4).with_trace().run(&mut rng);
        let positions = outcome.steps.iter().map(|s| s.position).collect_vec();
        assert_eq!(
            positions,
            vec![
                GridCell::new(1, 0),
                GridCell::new(1, 1),
                GridCell::new(0, 1),
                GridCell::ORIGIN,
            ]
        );
        assert_eq!(outcome.rooms.len(), 4);
        assert_eq!(outcome.furthest.cell, GridCell::new(1, 1));
    }

    #[test]
    fn untraced_walk_keeps_no_steps() {
        let mut rng = ScriptedRng::new(&[0.0, 0.3, 0.0, 0.7]);
        let outcome = WalkEngine::new(&[1.0], 2).run(&mut rng);
        assert!(outcome.steps.is_empty());
        assert_eq!(outcome.rooms.len(), 3);
        assert_eq!(outcome.furthest.cell, GridCell::new(1, -1));
    }

    #[test]
    fn traced_walk_keeps_every_step() {
        let mut rng = ScriptedRng::new(&[0.9; 6]);
        let outcome = WalkEngine::new(&[0.0, 0.0], 3).with_trace().run(&mut rng);
        assert_eq!(outcome.steps.len(), 6);
        assert_eq!(outcome.steps[5].iteration, 2);
        assert_eq!(outcome.steps[5].runner, 1);
    }

    #[test]
    fn huge_iteration_count_without_runners() {
        let mut rng = ScriptedRng::new(&[]);
        let outcome = WalkEngine::new(&[], usize::MAX).with_trace().run(&mut rng);
        assert_eq!(outcome.rooms.as_slice(), &[GridCell::ORIGIN]);
        assert!(outcome.steps.is_empty());
    }

    #[test]
    fn room_set_equality_ignores_order() {
        let mut a = RoomSet::new();
        let mut b = RoomSet::new();
        a.insert(GridCell::new(1, 0));
        a.insert(GridCell::new(0, 1));
        b.insert(GridCell::new(0, 1));
        b.insert(GridCell::new(1, 0));
        assert!(!b.insert(GridCell::ORIGIN));
        assert_eq!(a, b);
        assert_ne!(a.as_slice(), b.as_slice());
    }

    #[test]
    fn bounds_cover_all_rooms() {
        let mut rooms = RoomSet::new();
        rooms.insert(GridCell::new(3, -1));
        rooms.insert(GridCell::new(-2, 4));
        assert_eq!(rooms.bounds(), (GridCell::new(-2, -1), GridCell::new(3, 4)));
    }

    proptest! {
        #[test]
        fn walk_invariants_hold(
            seed in 0i64..10_000,
            probabilities in prop::collection::vec(0.0f64..=1.0, 0..6),
            iterations in 0usize..60,
        ) {
            let mut rng = DungeonRng::new(seed);
            let outcome = WalkEngine::new(&probabilities, iterations).with_trace().run(&mut rng);

            prop_assert!(outcome.rooms.contains(&GridCell::ORIGIN));
            prop_assert!(outcome.rooms.len() <= 1 + iterations * probabilities.len());
            for cell in &outcome.rooms {
                prop_assert!(cell.distance() <= outcome.furthest.distance);
            }
            prop_assert!(outcome.rooms.contains(&outcome.furthest.cell));

            let allowed = [
                Direction::Still,
                Direction::East,
                Direction::West,
                Direction::North,
                Direction::South,
            ];
            for step in &outcome.steps {
                let (dx, dy) = step.direction.delta();
                prop_assert!(dx.abs() + dy.abs() <= 1);
                prop_assert!(allowed.contains(&step.direction));
            }

            // Consecutive turns of the same runner switch axis
            for runner in 0..probabilities.len() {
                let turns = outcome
                    .steps
                    .iter()
                    .filter(|s| s.runner == runner && s.turned)
                    .collect_vec();
                for pair in turns.windows(2) {
                    prop_assert_eq!(
                        pair[0].direction.is_horizontal(),
                        pair[1].direction.is_vertical()
                    );
                }
            }
        }

        #[test]
        fn same_seed_same_walk(
            seed in 0i64..10_000,
            probabilities in prop::collection::vec(0.0f64..=1.0, 1..5),
        ) {
            let a = WalkEngine::new(&probabilities, 30).run(&mut DungeonRng::new(seed));
            let b = WalkEngine::new(&probabilities, 30).run(&mut DungeonRng::new(seed));
            prop_assert_eq!(a.rooms.as_slice(), b.rooms.as_slice());
            prop_assert_eq!(a.furthest, b.furthest);
        }
    }
}
