use std::collections::HashMap;

use anyhow::{bail, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use maze_crawl_core::{Direction, PlayerInput};

/// Translates key presses into player input signals.
#[derive(Debug, Default)]
pub(crate) struct KeyMap {
    custom: HashMap<char, PlayerInput>,
}

impl KeyMap {
    /// Builds a key map from configured bindings of single characters.
    pub(crate) fn from_bindings(bindings: &HashMap<String, PlayerInput>) -> Result<Self> {
        let mut custom = HashMap::with_capacity(bindings.len());
        for (key, input) in bindings {
            let mut chars = key.chars();
            let (Some(symbol), None) = (chars.next(), chars.next()) else {
                bail!("key binding {key:?} must be a single character");
            };
            let _ = custom.insert(symbol.to_ascii_lowercase(), *input);
        }
        Ok(Self { custom })
    }

    /// Input signal bound to the key, if any.
    ///
    /// Configured bindings take precedence over the built-in ones; key
    /// releases and repeats are ignored.
    pub(crate) fn translate(&self, key: KeyEvent) -> Option<PlayerInput> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(PlayerInput::Quit);
        }

        if let KeyCode::Char(symbol) = key.code {
            if let Some(input) = self.custom.get(&symbol.to_ascii_lowercase()) {
                return Some(*input);
            }
        }

        let direction = match key.code {
            KeyCode::Up => Direction::North,
            KeyCode::Right => Direction::East,
            KeyCode::Down => Direction::South,
            KeyCode::Left => Direction::West,
            KeyCode::PageUp => Direction::NorthEast,
            KeyCode::PageDown => Direction::SouthEast,
            KeyCode::End => Direction::SouthWest,
            KeyCode::Home => Direction::NorthWest,
            KeyCode::Char(' ') => return Some(PlayerInput::Search),
            KeyCode::Esc => return Some(PlayerInput::Quit),
            KeyCode::Char(symbol) => match symbol.to_ascii_lowercase() {
                'w' | 'k' | '8' => Direction::North,
                '9' => Direction::NorthEast,
                'd' | 'l' | '6' => Direction::East,
                '3' => Direction::SouthEast,
                's' | 'j' | '2' => Direction::South,
                '1' => Direction::SouthWest,
                'a' | 'h' | '4' => Direction::West,
                '7' => Direction::NorthWest,
                'q' => return Some(PlayerInput::Quit),
                _ => return None,
            },
            _ => return None,
        };

        Some(PlayerInput::Move(direction))
    }
}
