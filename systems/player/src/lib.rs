#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Externally driven player actor.
//!
//! The player never decides on its own. Input signals are queued with
//! [`Player::receive`] and consumed on the player's next turn; without a
//! pending signal the turn reports [`TurnProgress::AwaitingInput`].

use maze_crawl_core::{ActorKind, Command, Dice, PlayerInput};
use maze_crawl_system_scheduler::{Actor, TurnProgress};
use maze_crawl_world::{query, World};

/// Actor that translates input signals into commands.
#[derive(Debug, Default)]
pub struct Player {
    pending: Option<PlayerInput>,
}

impl Player {
    /// Creates a player with no pending input.
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Queues an input signal for the next turn, replacing any unconsumed one.
    pub fn receive(&mut self, input: PlayerInput) {
        if let Some(previous) = self.pending.replace(input) {
            log::debug!("dropping unconsumed input {previous:?}");
        }
    }

    /// Reports whether an input signal is waiting to be consumed.
    #[must_use]
    pub const fn has_pending_input(&self) -> bool {
        self.pending.is_some()
    }
}

impl Actor for Player {
    fn kind(&self) -> ActorKind {
        ActorKind::Player
    }

    fn take_turn(
        &mut self,
        world: &World,
        _dice: &mut dyn Dice,
        out: &mut Vec<Command>,
    ) -> TurnProgress {
        let Some(input) = self.pending.take() else {
            return TurnProgress::AwaitingInput;
        };

        match input {
            PlayerInput::Move(direction) => {
                let from = query::player_cell(world);
                match from.step(direction) {
                    Some(to) if query::is_passable(world, to) => {
                        out.push(Command::MovePlayer { direction });
                        TurnProgress::Completed
                    }
                    _ => {
                        log::debug!("discarding move {direction:?} from {from:?}");
                        TurnProgress::AwaitingInput
                    }
                }
            }
            PlayerInput::Search => {
                out.push(Command::SearchBox);
                TurnProgress::AwaitingInput
            }
            PlayerInput::Quit => {
                out.push(Command::Abort);
                TurnProgress::Completed
            }
        }
    }
}
