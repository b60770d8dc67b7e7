#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Randomized maze carving that always yields a single connected region.
//!
//! Corridors are carved by a depth-first backtracker over the odd-indexed
//! lattice, producing a spanning tree of passages. Rooms are then stamped over
//! the corridors with odd-aligned corners, so every room overlaps at least one
//! lattice cell and can never be cut off from the rest of the maze.

use maze_crawl_core::CellCoord;
use rand::Rng;
use thiserror::Error;

/// Smallest width or height that leaves room for a carved interior.
pub const MIN_DIMENSION: u32 = 5;

/// Largest width or height the generator carves.
pub const MAX_DIMENSION: u32 = 1024;

const MAX_ROOM_HALF_EXTENT: u32 = 3;
const LATTICE_STEPS: [(i64, i64); 4] = [(0, -2), (2, 0), (0, 2), (-2, 0)];

/// Reasons a playable maze cannot be produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The requested dimensions leave no interior to carve.
    #[error("maze of {width}x{height} cells is below the {minimum}x{minimum} minimum")]
    DimensionsTooSmall {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
        /// Smallest supported dimension.
        minimum: u32,
    },
    /// The requested dimensions exceed what the generator carves.
    #[error("maze of {width}x{height} cells exceeds the {maximum}x{maximum} maximum")]
    DimensionsTooLarge {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
        /// Largest supported dimension.
        maximum: u32,
    },
    /// The carved maze cannot host every box and actor on distinct cells.
    #[error("maze offers {available} free cells but {required} are needed")]
    InsufficientFreeCells {
        /// Free cells needed for placement.
        required: usize,
        /// Free cells actually carved.
        available: usize,
    },
}

/// Configuration parameters required to construct the generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    room_attempts: u32,
}

impl Config {
    /// Creates a configuration that tries to stamp `room_attempts` rooms.
    #[must_use]
    pub const fn new(room_attempts: u32) -> Self {
        Self { room_attempts }
    }

    /// Number of rooms the generator tries to stamp over the corridors.
    #[must_use]
    pub const fn room_attempts(&self) -> u32 {
        self.room_attempts
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(12)
    }
}

/// Totals describing a carved maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MazeSummary {
    /// Width of the carved maze.
    pub width: u32,
    /// Height of the carved maze.
    pub height: u32,
    /// Number of cells reported as passable.
    pub passable: usize,
    /// Number of rooms that fit inside the bounds.
    pub rooms: usize,
}

/// Maze generator producing rooms joined by winding corridors.
#[derive(Clone, Copy, Debug, Default)]
pub struct MazeGenerator {
    config: Config,
}

impl MazeGenerator {
    /// Creates a generator using the supplied configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Carves a `width` x `height` maze and reports every cell to `visit`.
    ///
    /// `visit` is called exactly once per in-bounds cell, in row-major order,
    /// with `true` for walls and `false` for passable cells. The outer border
    /// is always wall.
    pub fn generate<R, F>(
        &self,
        width: u32,
        height: u32,
        rng: &mut R,
        mut visit: F,
    ) -> Result<MazeSummary, GenerationError>
    where
        R: Rng + ?Sized,
        F: FnMut(CellCoord, bool),
    {
        if width < MIN_DIMENSION || height < MIN_DIMENSION {
            return Err(GenerationError::DimensionsTooSmall {
                width,
                height,
                minimum: MIN_DIMENSION,
            });
        }
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(GenerationError::DimensionsTooLarge {
                width,
                height,
                maximum: MAX_DIMENSION,
            });
        }

        let mut canvas = Canvas::new(width, height);
        canvas.carve_corridors(rng);
        let rooms = canvas.carve_rooms(self.config.room_attempts, rng);

        let mut passable = 0;
        for row in 0..height {
            for column in 0..width {
                let open = canvas.is_open(column, row);
                if open {
                    passable += 1;
                }
                visit(CellCoord::new(column, row), !open);
            }
        }

        log::debug!("carved {width}x{height} maze: {passable} passable cells, {rooms} rooms");

        Ok(MazeSummary {
            width,
            height,
            passable,
            rooms,
        })
    }
}

#[derive(Debug)]
struct Canvas {
    width: u32,
    height: u32,
    open: Vec<bool>,
}

impl Canvas {
    fn new(width: u32, height: u32) -> Self {
        let cells = usize::try_from(u64::from(width) * u64::from(height)).unwrap_or(0);
        Self {
            width,
            height,
            open: vec![false; cells],
        }
    }

    fn index(&self, column: u32, row: u32) -> Option<usize> {
        if column >= self.width || row >= self.height {
            return None;
        }
        let width = usize::try_from(self.width).ok()?;
        let row = usize::try_from(row).ok()?;
        let column = usize::try_from(column).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }

    fn is_open(&self, column: u32, row: u32) -> bool {
        self.index(column, row)
            .and_then(|index| self.open.get(index).copied())
            .unwrap_or(false)
    }

    fn carve(&mut self, column: u32, row: u32) {
        if let Some(slot) = self
            .index(column, row)
            .and_then(|index| self.open.get_mut(index))
        {
            *slot = true;
        }
    }

    fn is_interior(&self, column: i64, row: i64) -> bool {
        column >= 1
            && row >= 1
            && column + 1 < i64::from(self.width)
            && row + 1 < i64::from(self.height)
    }

    /// Depth-first backtracker over the odd lattice; spans every lattice cell.
    fn carve_corridors<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut stack: Vec<(u32, u32)> = vec![(1, 1)];
        self.carve(1, 1);

        while let Some(&(column, row)) = stack.last() {
            let options: Vec<(u32, u32)> = LATTICE_STEPS
                .iter()
                .filter_map(|&(dx, dy)| {
                    let next_column = i64::from(column) + dx;
                    let next_row = i64::from(row) + dy;
                    if !self.is_interior(next_column, next_row) {
                        return None;
                    }
                    let next_column = u32::try_from(next_column).ok()?;
                    let next_row = u32::try_from(next_row).ok()?;
                    if self.is_open(next_column, next_row) {
                        return None;
                    }
                    Some((next_column, next_row))
                })
                .collect();

            if options.is_empty() {
                let _ = stack.pop();
                continue;
            }

            let (next_column, next_row) = options[rng.gen_range(0..options.len())];
            self.carve((column + next_column) / 2, (row + next_row) / 2);
            self.carve(next_column, next_row);
            stack.push((next_column, next_row));
        }
    }

    /// Stamps odd-sized rooms on odd origins; returns how many fit.
    fn carve_rooms<R: Rng + ?Sized>(&mut self, attempts: u32, rng: &mut R) -> usize {
        let mut rooms = 0;
        for _ in 0..attempts {
            let room_width = 2 * rng.gen_range(1..=MAX_ROOM_HALF_EXTENT) + 1;
            let room_height = 2 * rng.gen_range(1..=MAX_ROOM_HALF_EXTENT) + 1;
            if room_width + 2 > self.width || room_height + 2 > self.height {
                continue;
            }

            let column_slots = (self.width - 2 - room_width) / 2 + 1;
            let row_slots = (self.height - 2 - room_height) / 2 + 1;
            let left = 1 + 2 * rng.gen_range(0..column_slots);
            let top = 1 + 2 * rng.gen_range(0..row_slots);

            for row in top..top + room_height {
                for column in left..left + room_width {
                    self.carve(column, row);
                }
            }
            rooms += 1;
        }
        rooms
    }
}
