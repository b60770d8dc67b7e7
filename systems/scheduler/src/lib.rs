#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Round-robin turn scheduling for the actors of a dungeon crawl.
//!
//! The scheduler owns no actors. Callers hand it the ordered actor list on
//! every step, which keeps actor state outside the scheduler and lets the
//! world be borrowed immutably while actors decide.

use maze_crawl_core::{ActorKind, Command, Dice};
use maze_crawl_world::World;

/// Outcome of offering an actor its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnProgress {
    /// The actor needs external input before its turn can finish.
    AwaitingInput,
    /// The actor finished its turn; the next actor acts on the next step.
    Completed,
}

/// Participant that takes turns in a fixed rotation.
pub trait Actor {
    /// Identifies the actor for logging and rendering.
    fn kind(&self) -> ActorKind;

    /// Decides what the actor does this turn, appending commands to `out`.
    ///
    /// Actors only read the world. The commands they emit are applied by the
    /// caller before the next actor is asked to act.
    fn take_turn(
        &mut self,
        world: &World,
        dice: &mut dyn Dice,
        out: &mut Vec<Command>,
    ) -> TurnProgress;
}

/// Turn taken by one actor during [`TurnScheduler::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Actor that was offered the turn.
    pub actor: ActorKind,
    /// Whether the actor finished its turn.
    pub progress: TurnProgress,
}

/// Offers turns to actors in order, cycling back to the first after the last.
#[derive(Clone, Copy, Debug, Default)]
pub struct TurnScheduler {
    cursor: usize,
    rounds: u64,
}

impl TurnScheduler {
    /// Creates a scheduler that starts with the first actor.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cursor: 0,
            rounds: 0,
        }
    }

    /// Index of the actor that will be offered the next turn.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of completed full rotations.
    #[must_use]
    pub const fn rounds(&self) -> u64 {
        self.rounds
    }

    /// Offers the turn to the current actor.
    ///
    /// The rotation only advances when the actor completes its turn, so an
    /// actor awaiting input is offered the same turn again on the next step.
    /// Returns `None` when no actors were supplied.
    pub fn step(
        &mut self,
        actors: &mut [&mut dyn Actor],
        world: &World,
        dice: &mut dyn Dice,
        out: &mut Vec<Command>,
    ) -> Option<TurnOutcome> {
        if actors.is_empty() {
            return None;
        }
        if self.cursor >= actors.len() {
            self.cursor = 0;
        }

        let actor = &mut actors[self.cursor];
        let kind = actor.kind();
        let progress = actor.take_turn(world, dice, out);

        if progress == TurnProgress::Completed {
            self.cursor += 1;
            if self.cursor == actors.len() {
                self.cursor = 0;
                self.rounds += 1;
            }
            log::trace!("{kind:?} completed its turn");
        }

        Some(TurnOutcome {
            actor: kind,
            progress,
        })
    }
}
