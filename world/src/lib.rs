#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Maze Crawl.

pub mod grid;
pub mod navigation;

use maze_crawl_core::{CellCoord, CellKind, Command, Event, GameState};
use thiserror::Error;

pub use grid::Grid;

/// Starting cells chosen for the actors and the goal item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Cell the player starts on.
    pub player: CellCoord,
    /// Cell the pursuer starts on.
    pub pursuer: CellCoord,
    /// Cell of the box hiding the goal item.
    pub goal: CellCoord,
}

/// Reasons a world cannot be assembled from a grid and placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum WorldError {
    /// An actor would start on a cell it cannot occupy.
    #[error("start cell ({}, {}) is not passable", .cell.column(), .cell.row())]
    ImpassableStart {
        /// Offending start cell.
        cell: CellCoord,
    },
    /// The goal item was not placed on an unsearched box.
    #[error("goal cell ({}, {}) does not hold a box", .cell.column(), .cell.row())]
    GoalNotBox {
        /// Offending goal cell.
        cell: CellCoord,
    },
    /// Two of the player, pursuer and goal share a cell.
    #[error("player, pursuer and goal must start on distinct cells")]
    OverlappingPlacement,
}

/// Represents the authoritative Maze Crawl world state.
#[derive(Clone, Debug)]
pub struct World {
    grid: Grid,
    player: CellCoord,
    pursuer: CellCoord,
    goal: CellCoord,
    state: GameState,
}

impl World {
    /// Assembles a world in the [`GameState::Generating`] state.
    ///
    /// The goal must sit on a box and the three placements must be distinct
    /// passable cells.
    pub fn new(grid: Grid, placement: Placement) -> Result<Self, WorldError> {
        for cell in [placement.player, placement.pursuer] {
            if !grid.is_passable(cell) {
                return Err(WorldError::ImpassableStart { cell });
            }
        }

        if grid.kind(placement.goal) != Some(CellKind::Box) {
            return Err(WorldError::GoalNotBox {
                cell: placement.goal,
            });
        }

        if placement.player == placement.pursuer
            || placement.player == placement.goal
            || placement.pursuer == placement.goal
        {
            return Err(WorldError::OverlappingPlacement);
        }

        Ok(Self {
            grid,
            player: placement.player,
            pursuer: placement.pursuer,
            goal: placement.goal,
            state: GameState::Generating,
        })
    }

    fn transition(&mut self, state: GameState, out_events: &mut Vec<Event>) {
        log::info!("game state {:?} -> {:?}", self.state, state);
        self.state = state;
        out_events.push(Event::StateChanged { state });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Commands that are not legal in the current state produce no events.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    if command == Command::BeginPlay {
        if world.state == GameState::Generating {
            world.transition(GameState::Playing, out_events);
        }
        return;
    }

    if world.state != GameState::Playing {
        log::debug!("ignoring {command:?} while {:?}", world.state);
        return;
    }

    match command {
        Command::BeginPlay => {}
        Command::MovePlayer { direction } => {
            let from = world.player;
            match from.step(direction) {
                Some(to) if world.grid.is_passable(to) => {
                    world.player = to;
                    out_events.push(Event::PlayerMoved { from, to });
                }
                _ => log::debug!("rejected player move {direction:?} from {from:?}"),
            }
        }
        Command::SearchBox => {
            let cell = world.player;
            if cell == world.goal {
                out_events.push(Event::GoalFound { cell });
                world.transition(GameState::Won, out_events);
            } else if world.grid.empty_box(cell) {
                out_events.push(Event::BoxEmptied { cell });
            } else {
                out_events.push(Event::NothingFound { cell });
            }
        }
        Command::StepPursuer { direction } => {
            let from = world.pursuer;
            match from.step(direction) {
                Some(to) if world.grid.is_passable(to) => {
                    world.pursuer = to;
                    out_events.push(Event::PursuerAdvanced { from, to });
                }
                _ => log::debug!("rejected pursuer step {direction:?} from {from:?}"),
            }
        }
        Command::CatchPlayer => {
            if world.pursuer.manhattan_distance(world.player) <= 1 {
                out_events.push(Event::PlayerCaught { cell: world.player });
                world.transition(GameState::Lost, out_events);
            } else {
                log::debug!(
                    "rejected catch: pursuer {:?} is not next to player {:?}",
                    world.pursuer,
                    world.player
                );
            }
        }
        Command::Abort => world.transition(GameState::Quit, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use maze_crawl_core::{CellCoord, CellKind, GameState};

    use super::{Grid, World};

    /// Provides read-only access to the grid.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Cell currently occupied by the player.
    #[must_use]
    pub fn player_cell(world: &World) -> CellCoord {
        world.player
    }

    /// Cell currently occupied by the pursuer.
    #[must_use]
    pub fn pursuer_cell(world: &World) -> CellCoord {
        world.pursuer
    }

    /// Cell of the box hiding the goal item.
    #[must_use]
    pub fn goal_cell(world: &World) -> CellCoord {
        world.goal
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn game_state(world: &World) -> GameState {
        world.state
    }

    /// Contents of the provided cell.
    #[must_use]
    pub fn cell_kind(world: &World, cell: CellCoord) -> Option<CellKind> {
        world.grid.kind(cell)
    }

    /// Reports whether an actor may occupy the provided cell.
    #[must_use]
    pub fn is_passable(world: &World, cell: CellCoord) -> bool {
        world.grid.is_passable(cell)
    }

    /// Reports whether the provided cell is a wall.
    #[must_use]
    pub fn is_wall(world: &World, cell: CellCoord) -> bool {
        world.grid.is_wall(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_crawl_core::Direction;

    fn corridor_world() -> World {
        let mut grid = Grid::walled(7, 5);
        assert!(grid.place_box(CellCoord::new(5, 3)));
        assert!(grid.place_box(CellCoord::new(2, 1)));
        World::new(
            grid,
            Placement {
                player: CellCoord::new(1, 1),
                pursuer: CellCoord::new(5, 1),
                goal: CellCoord::new(5, 3),
            },
        )
        .expect("valid placement")
    }

    fn playing_world() -> World {
        let mut world = corridor_world();
        let mut events = Vec::new();
        apply(&mut world, Command::BeginPlay, &mut events);
        assert_eq!(
            events,
            vec![Event::StateChanged {
                state: GameState::Playing
            }]
        );
        world
    }

    #[test]
    fn new_rejects_goal_without_box() {
        let grid = Grid::walled(5, 5);
        let result = World::new(
            grid,
            Placement {
                player: CellCoord::new(1, 1),
                pursuer: CellCoord::new(3, 3),
                goal: CellCoord::new(2, 2),
            },
        );
        assert_eq!(
            result.err(),
            Some(WorldError::GoalNotBox {
                cell: CellCoord::new(2, 2)
            })
        );
    }

    #[test]
    fn new_rejects_overlapping_starts() {
        let mut grid = Grid::walled(5, 5);
        assert!(grid.place_box(CellCoord::new(2, 2)));
        let result = World::new(
            grid,
            Placement {
                player: CellCoord::new(1, 1),
                pursuer: CellCoord::new(1, 1),
                goal: CellCoord::new(2, 2),
            },
        );
        assert_eq!(result.err(), Some(WorldError::OverlappingPlacement));
    }

    #[test]
    fn new_rejects_wall_starts() {
        let mut grid = Grid::walled(5, 5);
        assert!(grid.place_box(CellCoord::new(2, 2)));
        let result = World::new(
            grid,
            Placement {
                player: CellCoord::new(0, 1),
                pursuer: CellCoord::new(1, 1),
                goal: CellCoord::new(2, 2),
            },
        );
        assert_eq!(
            result.err(),
            Some(WorldError::ImpassableStart {
                cell: CellCoord::new(0, 1)
            })
        );
    }

    #[test]
    fn commands_are_ignored_before_play_begins() {
        let mut world = corridor_world();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::MovePlayer {
                direction: Direction::East,
            },
            &mut events,
        );
        assert!(events.is_empty());
        assert_eq!(query::player_cell(&world), CellCoord::new(1, 1));
    }

    #[test]
    fn player_moves_onto_passable_cells_only() {
        let mut world = playing_world();
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::MovePlayer {
                direction: Direction::North,
            },
            &mut events,
        );
        assert!(events.is_empty());
        assert_eq!(query::player_cell(&world), CellCoord::new(1, 1));

        apply(
            &mut world,
            Command::MovePlayer {
                direction: Direction::East,
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::PlayerMoved {
                from: CellCoord::new(1, 1),
                to: CellCoord::new(2, 1),
            }]
        );
    }

    #[test]
    fn diagonal_moves_are_rejected() {
        let mut world = playing_world();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::MovePlayer {
                direction: Direction::SouthEast,
            },
            &mut events,
        );
        assert!(events.is_empty());
        assert_eq!(query::player_cell(&world), CellCoord::new(1, 1));
    }

    #[test]
    fn searching_empties_boxes_once() {
        let mut world = playing_world();
        let mut events = Vec::new();
        let box_cell = CellCoord::new(2, 1);

        apply(
            &mut world,
            Command::MovePlayer {
                direction: Direction::East,
            },
            &mut events,
        );
        events.clear();

        apply(&mut world, Command::SearchBox, &mut events);
        apply(&mut world, Command::SearchBox, &mut events);
        apply(&mut world, Command::SearchBox, &mut events);

        assert_eq!(
            events,
            vec![
                Event::BoxEmptied { cell: box_cell },
                Event::NothingFound { cell: box_cell },
                Event::NothingFound { cell: box_cell },
            ]
        );
        assert_eq!(query::cell_kind(&world, box_cell), Some(CellKind::EmptyBox));
    }

    #[test]
    fn searching_bare_floor_finds_nothing() {
        let mut world = playing_world();
        let mut events = Vec::new();
        apply(&mut world, Command::SearchBox, &mut events);
        assert_eq!(
            events,
            vec![Event::NothingFound {
                cell: CellCoord::new(1, 1)
            }]
        );
        assert_eq!(
            query::cell_kind(&world, CellCoord::new(1, 1)),
            Some(CellKind::Clear)
        );
    }

    #[test]
    fn catch_requires_adjacency() {
        let mut world = playing_world();
        let mut events = Vec::new();

        apply(&mut world, Command::CatchPlayer, &mut events);
        assert!(events.is_empty());
        assert_eq!(query::game_state(&world), GameState::Playing);

        for _ in 0..3 {
            apply(
                &mut world,
                Command::StepPursuer {
                    direction: Direction::West,
                },
                &mut events,
            );
        }
        events.clear();

        apply(&mut world, Command::CatchPlayer, &mut events);
        assert_eq!(
            events,
            vec![
                Event::PlayerCaught {
                    cell: CellCoord::new(1, 1)
                },
                Event::StateChanged {
                    state: GameState::Lost
                },
            ]
        );
    }

    #[test]
    fn terminal_state_freezes_world() {
        let mut world = playing_world();
        let mut events = Vec::new();

        apply(&mut world, Command::Abort, &mut events);
        assert_eq!(
            events,
            vec![Event::StateChanged {
                state: GameState::Quit
            }]
        );
        events.clear();

        apply(
            &mut world,
            Command::MovePlayer {
                direction: Direction::East,
            },
            &mut events,
        );
        apply(&mut world, Command::Abort, &mut events);
        apply(&mut world, Command::BeginPlay, &mut events);
        assert!(events.is_empty());
        assert_eq!(query::game_state(&world), GameState::Quit);
        assert_eq!(query::player_cell(&world), CellCoord::new(1, 1));
    }
}
