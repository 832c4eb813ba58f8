//! Grid coordinates and runner directions

use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::rng::RandomSource;

/// Location of one room on the dungeon grid
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
}

impl GridCell {
    /// The start cell; always part of a dungeon.
    pub const ORIGIN: GridCell = GridCell { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance from the origin.
    ///
    /// Exact, so comparisons between cells never suffer from rounding.
    pub fn distance_sq(&self) -> i64 {
        let (x, y) = (self.x as i64, self.y as i64);
        x * x + y * y
    }

    /// Euclidean distance from the origin.
    pub fn distance(&self) -> f64 {
        (self.distance_sq() as f64).sqrt()
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add<Direction> for GridCell {
    type Output = GridCell;

    fn add(self, dir: Direction) -> GridCell {
        let (dx, dy) = dir.delta();
        GridCell::new(self.x + dx, self.y + dy)
    }
}

/// Heading of a runner: stationary, or one unit step along a single axis
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Still,
    East,
    West,
    North,
    South,
}

impl Direction {
    /// Unit step `(dx, dy)`. North is `+y`.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Still => (0, 0),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::North => (0, 1),
            Direction::South => (0, -1),
        }
    }

    /// True for [Direction::East] and [Direction::West].
    pub fn is_horizontal(&self) -> bool {
        self.delta().0 != 0
    }

    /// True for [Direction::North] and [Direction::South].
    pub fn is_vertical(&self) -> bool {
        self.delta().1 != 0
    }

    /// Turn onto the other axis, choosing the sign with one draw.
    ///
    /// A draw below 0.5 picks the positive sign. Stationary and vertical
    /// headings turn horizontal; horizontal headings turn vertical.
    pub fn turn<R: RandomSource + ?Sized>(self, rng: &mut R) -> Direction {
        let positive = rng.uniform01() < 0.5;
        match (self.is_horizontal(), positive) {
            (false, true) => Direction::East,
            (false, false) => Direction::West,
            (true, true) => Direction::North,
            (true, false) => Direction::South,
        }
    }
}
