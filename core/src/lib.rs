#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Crawl engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and the turn-taking actors. Actors submit [`Command`]
//! values describing desired mutations, the world executes those commands via
//! its `apply` entry point, and then broadcasts [`Event`] values for the game
//! controller to react to. Nothing in this crate touches presentation.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Moves the world out of generation and into active play.
    BeginPlay,
    /// Requests that the player step one cell in the provided direction.
    MovePlayer {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Requests that the player search the cell it currently occupies.
    SearchBox,
    /// Requests that the pursuer step one cell in the provided direction.
    StepPursuer {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Reports that the pursuer reached the player.
    CatchPlayer,
    /// Ends the game at the player's request.
    Abort,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Confirms that the player moved between two cells.
    PlayerMoved {
        /// Cell the player occupied before moving.
        from: CellCoord,
        /// Cell the player occupies after the move.
        to: CellCoord,
    },
    /// Reports that a full box was searched and is now empty.
    BoxEmptied {
        /// Cell holding the searched box.
        cell: CellCoord,
    },
    /// Reports that a search turned up nothing: no box, or one already emptied.
    NothingFound {
        /// Cell that was searched.
        cell: CellCoord,
    },
    /// Reports that the player searched the box holding the goal item.
    GoalFound {
        /// Cell holding the goal item.
        cell: CellCoord,
    },
    /// Confirms that the pursuer moved between two cells.
    PursuerAdvanced {
        /// Cell the pursuer occupied before moving.
        from: CellCoord,
        /// Cell the pursuer occupies after the move.
        to: CellCoord,
    },
    /// Reports that the pursuer caught the player.
    PlayerCaught {
        /// Cell the player occupied when caught.
        cell: CellCoord,
    },
    /// Announces that the game entered a new state.
    StateChanged {
        /// State that became active after processing the command.
        state: GameState,
    },
}

/// Lifecycle of a single game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// The maze is being carved and actors placed.
    Generating,
    /// Turns are being scheduled.
    Playing,
    /// The player found the goal item.
    Won,
    /// The pursuer caught the player.
    Lost,
    /// The player abandoned the game.
    Quit,
}

impl GameState {
    /// Reports whether no further turns may be scheduled in this state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost | Self::Quit)
    }
}

/// Contents of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// Impassable rock.
    Wall,
    /// Open floor.
    Clear,
    /// Floor holding an unsearched box.
    Box,
    /// Floor holding a box that was already searched.
    EmptyBox,
}

impl CellKind {
    /// Reports whether actors may occupy a cell of this kind.
    #[must_use]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Wall)
    }
}

/// Identifies the two actors taking turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActorKind {
    /// Human-controlled actor.
    Player,
    /// Autonomous adversary chasing the player.
    Pursuer,
}

/// Compass directions accepted as player input.
///
/// Only the four orthogonal directions move anything; the grid is
/// 4-connected, so diagonals resolve to no offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Toward decreasing rows.
    North,
    /// Diagonal between north and east.
    NorthEast,
    /// Toward increasing columns.
    East,
    /// Diagonal between south and east.
    SouthEast,
    /// Toward increasing rows.
    South,
    /// Diagonal between south and west.
    SouthWest,
    /// Toward decreasing columns.
    West,
    /// Diagonal between north and west.
    NorthWest,
}

impl Direction {
    /// The four directions that connect neighbouring cells.
    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Column and row offset of a step in this direction, if it is orthogonal.
    #[must_use]
    pub const fn orthogonal_offset(self) -> Option<(i32, i32)> {
        match self {
            Self::North => Some((0, -1)),
            Self::East => Some((1, 0)),
            Self::South => Some((0, 1)),
            Self::West => Some((-1, 0)),
            Self::NorthEast | Self::SouthEast | Self::SouthWest | Self::NorthWest => None,
        }
    }

    /// Orthogonal direction leading from `from` to the adjacent cell `to`.
    #[must_use]
    pub fn between(from: CellCoord, to: CellCoord) -> Option<Direction> {
        let column_diff = from.column().abs_diff(to.column());
        let row_diff = from.row().abs_diff(to.row());
        if column_diff + row_diff != 1 {
            return None;
        }

        if column_diff == 1 {
            if to.column() > from.column() {
                Some(Self::East)
            } else {
                Some(Self::West)
            }
        } else if to.row() > from.row() {
            Some(Self::South)
        } else {
            Some(Self::North)
        }
    }
}

/// Discrete signal delivered to the player while it awaits its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerInput {
    /// Attempt a step in the given direction.
    Move(Direction),
    /// Search the current cell for the goal item.
    Search,
    /// Abandon the game.
    Quit,
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Neighbouring cell one step away in an orthogonal direction.
    ///
    /// Returns `None` for diagonal directions and for steps that would leave
    /// the non-negative coordinate space.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<CellCoord> {
        let (dx, dy) = direction.orthogonal_offset()?;
        let column = self.column.checked_add_signed(dx)?;
        let row = self.row.checked_add_signed(dy)?;
        Some(Self::new(column, row))
    }

    /// Iterator over the orthogonal neighbours that exist in coordinate space.
    pub fn neighbors(self) -> impl Iterator<Item = CellCoord> {
        Direction::ORTHOGONAL
            .into_iter()
            .filter_map(move |direction| self.step(direction))
    }
}

/// Source of the randomness consumed by actors during play.
///
/// Tests substitute scripted implementations so that the pursuer's movement
/// roll and the flavour text choice become deterministic.
pub trait Dice {
    /// Returns `true` with the provided probability.
    fn chance(&mut self, probability: f64) -> bool;

    /// Returns an index drawn uniformly from `0..len`, or zero when `len` is zero.
    fn pick(&mut self, len: usize) -> usize;
}

/// [`Dice`] backed by any `rand` generator.
#[derive(Clone, Debug)]
pub struct RngDice<R> {
    rng: R,
}

impl<R> RngDice<R> {
    /// Wraps the provided generator.
    #[must_use]
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Dice for RngDice<R> {
    fn chance(&mut self, probability: f64) -> bool {
        if probability.is_nan() {
            return false;
        }
        self.rng.gen_bool(probability.clamp(0.0, 1.0))
    }

    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }
}

#[cfg(test)]
mod tests {
    use super::{CellCoord, Dice, Direction, GameState, RngDice};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = CellCoord::new(1, 1);
        let destination = CellCoord::new(4, 3);
        assert_eq!(origin.manhattan_distance(destination), 5);
        assert_eq!(destination.manhattan_distance(origin), 5);
    }

    #[test]
    fn diagonal_steps_resolve_to_nothing() {
        let origin = CellCoord::new(3, 3);
        assert_eq!(origin.step(Direction::NorthEast), None);
        assert_eq!(origin.step(Direction::SouthWest), None);
        assert_eq!(origin.step(Direction::North), Some(CellCoord::new(3, 2)));
        assert_eq!(origin.step(Direction::West), Some(CellCoord::new(2, 3)));
    }

    #[test]
    fn steps_never_underflow() {
        let corner = CellCoord::new(0, 0);
        assert_eq!(corner.step(Direction::North), None);
        assert_eq!(corner.step(Direction::West), None);
        assert_eq!(corner.neighbors().count(), 2);
    }

    #[test]
    fn direction_between_neighbors() {
        let origin = CellCoord::new(3, 3);
        assert_eq!(
            Direction::between(origin, CellCoord::new(3, 2)),
            Some(Direction::North)
        );
        assert_eq!(
            Direction::between(origin, CellCoord::new(4, 3)),
            Some(Direction::East)
        );
        assert_eq!(
            Direction::between(origin, CellCoord::new(3, 4)),
            Some(Direction::South)
        );
        assert_eq!(
            Direction::between(origin, CellCoord::new(2, 3)),
            Some(Direction::West)
        );
        assert_eq!(Direction::between(origin, origin), None);
        assert_eq!(Direction::between(origin, CellCoord::new(4, 4)), None);
    }

    #[test]
    fn terminal_states() {
        assert!(!GameState::Generating.is_terminal());
        assert!(!GameState::Playing.is_terminal());
        assert!(GameState::Won.is_terminal());
        assert!(GameState::Lost.is_terminal());
        assert!(GameState::Quit.is_terminal());
    }

    #[test]
    fn rng_dice_clamps_probabilities() {
        let mut dice = RngDice::new(ChaCha8Rng::seed_from_u64(7));
        for _ in 0..32 {
            assert!(dice.chance(1.5));
            assert!(!dice.chance(-0.5));
            assert!(!dice.chance(f64::NAN));
        }
    }

    #[test]
    fn rng_dice_picks_within_bounds() {
        let mut dice = RngDice::new(ChaCha8Rng::seed_from_u64(11));
        assert_eq!(dice.pick(0), 0);
        for _ in 0..64 {
            assert!(dice.pick(5) < 5);
        }
    }
}
