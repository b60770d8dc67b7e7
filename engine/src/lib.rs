#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Game controller for Maze Crawl.
//!
//! A [`Game`] owns the world, both actors, and the turn scheduler. It turns
//! player input into scheduler steps, applies the commands actors emit, and
//! routes the resulting events to the frontend as redraws, notices, and
//! lifecycle notifications. Nothing else touches presentation.

mod config;
pub mod notices;
mod placement;
mod viewport;

pub use config::{ConfigError, GameConfig, MAX_VIEWPORT_DIMENSION};
pub use viewport::Viewport;

use std::error::Error as StdError;

use maze_crawl_core::{Command, Dice, Event, GameState, PlayerInput};
use maze_crawl_rendering::{ColorHint, ControlAffordances, Frontend, Glyph};
use maze_crawl_system_maze_generation::{Config as GeneratorConfig, GenerationError, MazeGenerator};
use maze_crawl_system_player::Player;
use maze_crawl_system_pursuit::Pursuer;
use maze_crawl_system_scheduler::{Actor, TurnProgress, TurnScheduler};
use maze_crawl_world::{self as world, query, Grid, World, WorldError};
use rand::Rng;
use thiserror::Error;

/// Failures surfaced to the embedder.
#[derive(Debug, Error)]
pub enum GameError {
    /// The configuration cannot describe a playable game.
    #[error("invalid game configuration")]
    Config(#[from] ConfigError),
    /// No playable maze could be produced.
    #[error("maze generation failed")]
    Generation(#[from] GenerationError),
    /// The world could not be assembled from the placement.
    #[error("invalid world layout")]
    World(#[from] WorldError),
    /// A frontend sink reported a failure.
    #[error("frontend failed to present the game")]
    Presentation(#[source] Box<dyn StdError + Send + Sync + 'static>),
    /// Input arrived before [`Game::start`] was called.
    #[error("the game has not been started")]
    NotStarted,
}

impl From<anyhow::Error> for GameError {
    fn from(error: anyhow::Error) -> Self {
        Self::Presentation(error.into())
    }
}

/// Where the game stands after processing a start or an input signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// The player is waiting for the next input signal.
    AwaitingInput,
    /// The game reached a terminal state and ignores further input.
    Finished(GameState),
}

/// Turn-based dungeon crawl bound to a dice source and a frontend.
#[derive(Debug)]
pub struct Game<D, F> {
    config: GameConfig,
    world: World,
    scheduler: TurnScheduler,
    player: Player,
    pursuer: Pursuer,
    dice: D,
    frontend: F,
    controls: ControlAffordances,
}

impl<D, F> Game<D, F>
where
    D: Dice,
    F: Frontend,
{
    /// Carves a maze, scatters boxes and actors, and prepares a game.
    ///
    /// `rng` drives generation and placement only; `dice` drives play. The
    /// game stays in [`GameState::Generating`] until [`Game::start`] is called.
    pub fn generate<R>(
        config: GameConfig,
        rng: &mut R,
        dice: D,
        frontend: F,
    ) -> Result<Self, GameError>
    where
        R: Rng + ?Sized,
    {
        config.validate()?;

        let generator = MazeGenerator::new(GeneratorConfig::new(config.room_attempts));
        let mut grid = Grid::new(config.map_width, config.map_height);
        let mut free_cells = Vec::new();
        let summary = generator.generate(
            config.map_width,
            config.map_height,
            rng,
            |cell, is_wall| {
                grid.record(cell, is_wall);
                if !is_wall {
                    free_cells.push(cell);
                }
            },
        )?;

        let placement = placement::scatter(&mut grid, &mut free_cells, config.box_count, rng)?;
        log::info!(
            "generated {}x{} maze with {} passable cells and {} rooms; player at {:?}, pursuer at {:?}",
            summary.width,
            summary.height,
            summary.passable,
            summary.rooms,
            placement.player,
            placement.pursuer,
        );

        let world = World::new(grid, placement)?;
        Self::from_world(config, world, dice, frontend)
    }

    /// Prepares a game around an explicitly assembled world.
    pub fn from_world(
        config: GameConfig,
        world: World,
        dice: D,
        frontend: F,
    ) -> Result<Self, GameError> {
        config.validate()?;
        let pursuer = Pursuer::new(config.pursuer_advance_chance);
        Ok(Self {
            config,
            world,
            scheduler: TurnScheduler::new(),
            player: Player::new(),
            pursuer,
            dice,
            frontend,
            controls: ControlAffordances::ALL,
        })
    }

    /// Enters play: shows the opening notices, draws the first frame, and
    /// runs turns until the player is asked for input.
    ///
    /// Calling `start` again after play began changes nothing.
    pub fn start(&mut self) -> Result<Step, GameError> {
        if query::game_state(&self.world) != GameState::Generating {
            return Ok(self.step_status());
        }

        self.execute(vec![Command::BeginPlay])?;
        for text in notices::OPENING {
            self.frontend.message(text)?;
        }
        self.redraw()?;
        self.publish_controls()?;
        self.run()
    }

    /// Delivers an input signal to the player and runs turns until the player
    /// waits again or the game ends.
    ///
    /// Signals arriving after the game ended are ignored.
    pub fn submit(&mut self, input: PlayerInput) -> Result<Step, GameError> {
        let state = query::game_state(&self.world);
        if state == GameState::Generating {
            return Err(GameError::NotStarted);
        }
        if state.is_terminal() {
            log::debug!("ignoring {input:?} after the game ended in {state:?}");
            return Ok(Step::Finished(state));
        }

        self.player.receive(input);
        self.run()
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> GameState {
        query::game_state(&self.world)
    }

    /// Read-only view of the authoritative world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Configuration the game was created with.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Directional controls published after the latest accepted move.
    #[must_use]
    pub fn controls(&self) -> ControlAffordances {
        self.controls
    }

    /// Frontend the game presents through.
    #[must_use]
    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    /// Mutable access to the frontend.
    pub fn frontend_mut(&mut self) -> &mut F {
        &mut self.frontend
    }

    /// Consumes the game and returns its frontend.
    #[must_use]
    pub fn into_frontend(self) -> F {
        self.frontend
    }

    fn step_status(&self) -> Step {
        let state = query::game_state(&self.world);
        if state.is_terminal() {
            Step::Finished(state)
        } else {
            Step::AwaitingInput
        }
    }

    fn run(&mut self) -> Result<Step, GameError> {
        loop {
            let state = query::game_state(&self.world);
            if state.is_terminal() {
                return Ok(Step::Finished(state));
            }

            let mut commands = Vec::new();
            let outcome = {
                let mut actors: [&mut dyn Actor; 2] = [&mut self.player, &mut self.pursuer];
                self.scheduler
                    .step(&mut actors, &self.world, &mut self.dice, &mut commands)
            };
            self.execute(commands)?;

            let awaiting = outcome.map_or(true, |outcome| {
                outcome.progress == TurnProgress::AwaitingInput
            });
            if awaiting && !query::game_state(&self.world).is_terminal() {
                return Ok(Step::AwaitingInput);
            }
        }
    }

    fn execute(&mut self, commands: Vec<Command>) -> Result<(), GameError> {
        for command in commands {
            let mut events = Vec::new();
            world::apply(&mut self.world, command, &mut events);
            for event in events {
                self.react(event)?;
            }
        }
        Ok(())
    }

    fn react(&mut self, event: Event) -> Result<(), GameError> {
        match event {
            Event::PlayerMoved { .. } => {
                self.redraw()?;
                self.publish_controls()?;
            }
            Event::PursuerAdvanced { .. } => self.redraw()?,
            Event::BoxEmptied { .. } => {
                let index = self.dice.pick(notices::EMPTY_BOX_FLAVOR.len());
                let text = notices::EMPTY_BOX_FLAVOR
                    .get(index)
                    .copied()
                    .unwrap_or(notices::EMPTY);
                self.frontend.message(text)?;
            }
            Event::NothingFound { .. } => self.frontend.message(notices::EMPTY)?,
            Event::GoalFound { .. } => self.frontend.alert(notices::WINNER)?,
            Event::PlayerCaught { .. } => self.frontend.alert(notices::DEATH)?,
            Event::StateChanged { state } => match state {
                GameState::Won | GameState::Lost => self.frontend.quit()?,
                GameState::Quit => {
                    self.frontend.message(notices::QUIT)?;
                    self.frontend.quit()?;
                }
                GameState::Generating | GameState::Playing => {}
            },
        }
        Ok(())
    }

    fn redraw(&mut self) -> Result<(), GameError> {
        let grid = query::grid(&self.world);
        let player = query::player_cell(&self.world);
        let pursuer = query::pursuer_cell(&self.world);
        let viewport = Viewport::centered_on(
            player,
            self.config.viewport_width,
            self.config.viewport_height,
            grid.width(),
            grid.height(),
        );

        self.frontend
            .begin_frame(self.config.viewport_width, self.config.viewport_height)?;
        for (position, cell) in viewport.cells() {
            let (glyph, hint) = Glyph::for_cell(grid.kind(cell));
            self.frontend.draw(position, glyph, hint)?;
        }
        if let Some(position) = viewport.to_screen(player) {
            self.frontend.draw(position, Glyph::Player, ColorHint::Player)?;
        }
        if let Some(position) = viewport.to_screen(pursuer) {
            self.frontend
                .draw(position, Glyph::Pursuer, ColorHint::Pursuer)?;
        }
        self.frontend.present()?;
        Ok(())
    }

    fn publish_controls(&mut self) -> Result<(), GameError> {
        let player = query::player_cell(&self.world);
        let world = &self.world;
        self.controls = ControlAffordances::from_walls(|direction| {
            player
                .step(direction)
                .is_some_and(|cell| query::is_wall(world, cell))
        });
        self.frontend.update_controls(self.controls)?;
        Ok(())
    }
}
