//! Terminal rendering of generated dungeons

use std::thread;
use std::time::Duration;

use itertools::Itertools;

use crate::classify::RoomRole;
use crate::grid::GridCell;
use crate::Dungeon;

const S_START: char = '🚪';
const S_BOSS: char = '🐉';
const S_ROOM: char = '🟩';
const S_WALL: char = '🟫';
const S_RUNNER: char = '🏃';

/// Character grid covering the dungeon bounds plus a one-cell wall border.
///
/// North (`+y`) is up.
#[derive(Clone)]
struct Canvas {
    min: GridCell,
    squares: Vec<Vec<char>>,
}

impl Canvas {
    fn new(dungeon: &Dungeon) -> Self {
        let (lo, hi) = dungeon.rooms.bounds();
        let min = GridCell::new(lo.x - 1, lo.y - 1);
        let width = (hi.x - lo.x + 3) as usize;
        let height = (hi.y - lo.y + 3) as usize;
        Self {
            min,
            squares: (0..height)
                .map(|_| (0..width).map(|_| S_WALL).collect())
                .collect(),
        }
    }

    fn set(&mut self, cell: GridCell, c: char) {
        let row = self.squares.len() - 1 - (cell.y - self.min.y) as usize;
        let col = (cell.x - self.min.x) as usize;
        self.squares[row][col] = c;
    }

    fn render(&self) -> String {
        self.squares.iter().map(|row| row.iter().join("")).join("\n")
    }
}

fn role_symbol(role: RoomRole) -> char {
    match role {
        RoomRole::Start => S_START,
        RoomRole::Boss => S_BOSS,
        RoomRole::Generic(_) => S_ROOM,
    }
}

/// Emoji map of the finished dungeon.
///
/// # Examples
/// ```
/// use dungeon_runners::{render, Dungeon, DungeonConfig};
///
/// let config = DungeonConfig { seed: 1, iterations: 0, ..Default::default() };
/// let dungeon = Dungeon::generate(&config).unwrap();
/// assert_eq!(render::render_map(&dungeon), "🟫🟫🟫\n🟫🚪🟫\n🟫🟫🟫");
/// ```
pub fn render_map(dungeon: &Dungeon) -> String {
    let mut canvas = Canvas::new(dungeon);
    for placement in &dungeon.placements {
        canvas.set(placement.cell, role_symbol(placement.role));
    }
    canvas.render()
}

/// One line per room: cell, role and world position.
pub fn render_list(dungeon: &Dungeon) -> String {
    dungeon
        .placements
        .iter()
        .map(|p| {
            let role = match p.role {
                RoomRole::Start => "start".to_string(),
                RoomRole::Boss => "boss".to_string(),
                RoomRole::Generic(variant) => format!("room #{}", variant),
            };
            format!(
                "{:>10} {:<10} ({}, {}, {})",
                p.cell.to_string(),
                role,
                p.world.x,
                p.world.y,
                p.world.z
            )
        })
        .join("\n")
}

/// Frames of the walk, one per iteration, followed by the finished map.
///
/// Needs a dungeon generated with a trace; otherwise only the first and
/// last frame are produced.
pub fn walk_frames(dungeon: &Dungeon) -> Vec<String> {
    let mut frames = Vec::new();
    let mut visited = Canvas::new(dungeon);
    visited.set(GridCell::ORIGIN, S_START);
    frames.push(visited.render());

    for (_, steps) in &dungeon.steps.iter().chunk_by(|s| s.iteration) {
        let steps = steps.collect_vec();
        for step in &steps {
            if step.position != GridCell::ORIGIN {
                visited.set(step.position, S_ROOM);
            }
        }
        let mut frame = visited.clone();
        for step in &steps {
            frame.set(step.position, S_RUNNER);
        }
        frames.push(frame.render());
    }

    frames.push(render_map(dungeon));
    frames
}

/// Animate the walk on the terminal
///
/// ## Arguments
/// - `dungeon`: Generated dungeon.
/// - `step_ms`: Time step for each frame, milliseconds.
pub fn playback(dungeon: &Dungeon, step_ms: u64) {
    let frames = walk_frames(dungeon);
    for (i, frame) in frames.iter().enumerate() {
        if i > 0 {
            thread::sleep(Duration::from_millis(step_ms));
        }
        print!("\x1B[2J\x1B[1;1H");
        println!("{}", frame);
    }
}
