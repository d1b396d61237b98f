#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to i32 since grid dimensions are always small enough to fit in i32
    clippy::cast_possible_truncation,
    // Allow sign loss when going from signed to unsigned types since we validate values are non-negative before casting
    clippy::cast_sign_loss,
    // Allow potential wrapping when casting between types of same size as we validate values are in range
    clippy::cast_possible_wrap
)]

use bevy_ecs::prelude::*;
use log::{debug, trace};
use ratatui::style::Color;
use std::time::Duration;

use crate::commands::Command;
use crate::game::{COLS, GRAVITY_INTERVAL_MS, ROWS, SPAWN_X, SPAWN_Y};

const I_PATTERN: &[&[u8]] = &[&[1, 1, 1, 1]];
const O_PATTERN: &[&[u8]] = &[&[1, 1], &[1, 1]];
const T_PATTERN: &[&[u8]] = &[&[0, 1, 0], &[1, 1, 1]];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    O,
    T,
}

impl ShapeKind {
    /// The fixed catalog every falling shape is drawn from.
    pub const ALL: [ShapeKind; 3] = [ShapeKind::I, ShapeKind::O, ShapeKind::T];

    #[must_use]
    pub fn random() -> Self {
        Self::ALL[fastrand::usize(..Self::ALL.len())]
    }

    #[must_use]
    pub fn pattern(self) -> &'static [&'static [u8]] {
        match self {
            ShapeKind::I => I_PATTERN,
            ShapeKind::O => O_PATTERN,
            ShapeKind::T => T_PATTERN,
        }
    }

    /// Nonzero value written into the grid for every cell this shape covers.
    #[must_use]
    pub fn marker(self) -> u8 {
        match self {
            ShapeKind::I => 1,
            ShapeKind::O => 2,
            ShapeKind::T => 3,
        }
    }

    #[must_use]
    pub fn from_marker(marker: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.marker() == marker)
    }

    #[must_use]
    pub fn get_color(self) -> Color {
        match self {
            ShapeKind::I => Color::Cyan,
            ShapeKind::O => Color::Yellow,
            ShapeKind::T => Color::Magenta,
        }
    }
}

/// A piece footprint: rows of 0/1 cells relative to its own top-left corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    kind: ShapeKind,
    cells: Vec<Vec<u8>>,
}

impl Shape {
    #[must_use]
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            cells: kind.pattern().iter().map(|row| row.to_vec()).collect(),
        }
    }

    #[must_use]
    pub fn random() -> Self {
        Self::new(ShapeKind::random())
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[must_use]
    pub fn marker(&self) -> u8 {
        self.kind.marker()
    }

    #[must_use]
    pub fn cells(&self) -> &[Vec<u8>] {
        &self.cells
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        self.cells.iter().map(Vec::len).max().unwrap_or(0) as i32
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        self.cells.len() as i32
    }

    /// Local `(x, y)` offsets of every occupied cell.
    pub fn occupied(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, cell)| **cell != 0)
                .map(move |(x, _)| (x as i32, y as i32))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub fn spawn() -> Self {
        Self {
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Down,
}

/// Fixed-size occupancy matrix, stored as `ROWS` rows of `COLS` cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Vec<u8>>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: vec![vec![0; COLS]; ROWS],
        }
    }

    /// Builds a fresh grid holding only `shape` placed at `position`.
    ///
    /// The placement is not validated. Cells that land outside the grid are
    /// skipped, keeping bounds enforcement with the movement rules.
    #[must_use]
    pub fn render(shape: &Shape, position: Position) -> Self {
        let mut grid = Self::new();
        let marker = shape.marker();

        for (dx, dy) in shape.occupied() {
            if !grid.set(position.x + dx, position.y + dy, marker) {
                trace!(
                    "Skipping out-of-bounds cell ({}, {})",
                    position.x + dx,
                    position.y + dy
                );
            }
        }

        grid
    }

    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        if x < 0 || y < 0 {
            return None;
        }
        self.cells.get(y as usize)?.get(x as usize).copied()
    }

    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> u8 {
        self.cells[y][x]
    }

    #[must_use]
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(|cell| cell != 0)
    }

    /// Writes `marker` at `(x, y)`. Returns false when the cell is outside the grid.
    pub fn set(&mut self, x: i32, y: i32, marker: u8) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        match self
            .cells
            .get_mut(y as usize)
            .and_then(|row| row.get_mut(x as usize))
        {
            Some(cell) => {
                *cell = marker;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<u8>] {
        &self.cells
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| **cell != 0).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occupied_count() == 0
    }

    /// True when every occupied cell of `shape` at `position` lies inside the grid.
    #[must_use]
    pub fn contains(&self, position: Position, shape: &Shape) -> bool {
        shape
            .occupied()
            .all(|(dx, dy)| self.get(position.x + dx, position.y + dy).is_some())
    }

    pub fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(0);
        }
    }
}

/// Returns true when any occupied cell of `shape` at `position` overlaps a
/// nonzero grid cell. Cells outside the grid are not counted here.
#[must_use]
pub fn collides(position: Position, shape: &Shape, grid: &Grid) -> bool {
    shape
        .occupied()
        .any(|(dx, dy)| grid.is_occupied(position.x + dx, position.y + dy))
}

/// Inside the grid and not overlapping anything.
#[must_use]
pub fn fits(position: Position, shape: &Shape, grid: &Grid) -> bool {
    grid.contains(position, shape) && !collides(position, shape, grid)
}

// Settled cells used as the collision reference for the active shape
#[derive(Resource, Debug, Clone, Default)]
pub struct Board {
    pub grid: Grid,
}

impl Board {
    pub fn clear(&mut self) {
        self.grid.clear();
    }
}

// Latest rendered view of the playfield
#[derive(Resource, Debug, Clone, Default)]
pub struct Snapshot {
    pub grid: Grid,
    pub version: u64,
}

impl Snapshot {
    pub fn replace(&mut self, grid: Grid) {
        self.grid = grid;
        self.version += 1;
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub shape: Shape,
    pub position: Position,
}

impl GameState {
    #[must_use]
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            position: Position::spawn(),
        }
    }

    #[must_use]
    pub fn random() -> Self {
        Self::new(Shape::random())
    }

    /// Next position for `direction`, clamped so the footprint stays on the grid.
    #[must_use]
    pub fn candidate(&self, direction: Direction) -> Position {
        let Position { x, y } = self.position;
        match direction {
            Direction::Left => Position {
                x: (x - 1).max(0),
                y,
            },
            Direction::Right => Position {
                x: (x + 1).min(COLS as i32 - self.shape.width()),
                y,
            },
            Direction::Down => Position {
                x,
                y: (y + 1).min(ROWS as i32 - self.shape.height()),
            },
        }
    }

    /// Pure transition: the state after `command`, or `None` when it is rejected.
    #[must_use]
    pub fn transition(&self, command: Command, grid: &Grid) -> Option<Self> {
        let direction = match command {
            Command::MoveLeft => Direction::Left,
            Command::MoveRight => Direction::Right,
            Command::MoveDown | Command::Tick => Direction::Down,
            Command::Rotate => {
                trace!("Rotate has no effect");
                return None;
            }
        };

        let candidate = self.candidate(direction);
        if candidate == self.position {
            trace!("{command:?} clamped at ({}, {})", candidate.x, candidate.y);
            return None;
        }

        if !fits(candidate, &self.shape, grid) {
            debug!(
                "{command:?} blocked at ({}, {})",
                candidate.x, candidate.y
            );
            return None;
        }

        Some(Self {
            shape: self.shape.clone(),
            position: candidate,
        })
    }

    pub fn attempt_move(&mut self, direction: Direction, grid: &Grid) -> bool {
        let command = match direction {
            Direction::Left => Command::MoveLeft,
            Direction::Right => Command::MoveRight,
            Direction::Down => Command::MoveDown,
        };
        self.apply(command, grid)
    }

    // Gravity follows the same rules as a manual move down
    pub fn tick(&mut self, grid: &Grid) -> bool {
        self.apply(Command::Tick, grid)
    }

    pub fn apply(&mut self, command: Command, grid: &Grid) -> bool {
        match self.transition(command, grid) {
            Some(next) => {
                *self = next;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn render(&self) -> Grid {
        Grid::render(&self.shape, self.position)
    }
}

// Periodic gravity timer
#[derive(Resource, Debug, Clone)]
pub struct Gravity {
    interval: Duration,
    elapsed: Duration,
}

impl Default for Gravity {
    fn default() -> Self {
        Self::new(Duration::from_millis(GRAVITY_INTERVAL_MS))
    }
}

impl Gravity {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            elapsed: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval.max(Duration::from_millis(1));
    }

    /// Adds `delta` to the timer and returns how many ticks are now due.
    pub fn advance(&mut self, delta: Duration) -> u32 {
        self.elapsed += delta;
        let mut due = 0;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            due += 1;
        }
        due
    }
}
