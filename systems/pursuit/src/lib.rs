#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Autonomous pursuer that chases the player along shortest paths.

use maze_crawl_core::{ActorKind, Command, Dice, Direction};
use maze_crawl_system_scheduler::{Actor, TurnProgress};
use maze_crawl_world::{navigation::shortest_path, query, World};

/// Probability that the pursuer advances on a turn when none is configured.
pub const DEFAULT_ADVANCE_CHANCE: f64 = 0.5;

/// Pure system that plans one step toward the player per turn.
///
/// Movement is a biased random walk: each turn the pursuer advances along the
/// shortest path with the configured probability and otherwise waits. A player
/// one step away is always caught, whatever the roll.
#[derive(Clone, Copy, Debug)]
pub struct Pursuer {
    advance_chance: f64,
}

impl Pursuer {
    /// Creates a pursuer that advances with the provided probability.
    #[must_use]
    pub const fn new(advance_chance: f64) -> Self {
        Self { advance_chance }
    }

    /// Probability of advancing on a turn where the player is out of reach.
    #[must_use]
    pub const fn advance_chance(&self) -> f64 {
        self.advance_chance
    }
}

impl Default for Pursuer {
    fn default() -> Self {
        Self::new(DEFAULT_ADVANCE_CHANCE)
    }
}

impl Actor for Pursuer {
    fn kind(&self) -> ActorKind {
        ActorKind::Pursuer
    }

    fn take_turn(
        &mut self,
        world: &World,
        dice: &mut dyn Dice,
        out: &mut Vec<Command>,
    ) -> TurnProgress {
        let from = query::pursuer_cell(world);
        let target = query::player_cell(world);
        let path = shortest_path(from, target, |cell| query::is_passable(world, cell));

        // The path includes the pursuer's own cell; one remaining step means contact.
        if path.len() <= 2 && path.last() == Some(&target) {
            out.push(Command::CatchPlayer);
            return TurnProgress::Completed;
        }

        let Some(&next) = path.get(1) else {
            log::debug!("pursuer at {from:?} has no route to {target:?}");
            return TurnProgress::Completed;
        };

        if dice.chance(self.advance_chance) {
            if let Some(direction) = Direction::between(from, next) {
                out.push(Command::StepPursuer { direction });
            }
        }

        TurnProgress::Completed
    }
}
