//! Tunable parameters of a game.

use serde::Deserialize;
use thiserror::Error;

/// Largest viewport width or height a game draws.
pub const MAX_VIEWPORT_DIMENSION: u32 = 256;

/// Parameters fixed for the lifetime of a game.
///
/// Every field falls back to its default when omitted from a configuration
/// file.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Columns of the generated map.
    pub map_width: u32,
    /// Rows of the generated map.
    pub map_height: u32,
    /// Columns of the window drawn around the player.
    pub viewport_width: u32,
    /// Rows of the window drawn around the player.
    pub viewport_height: u32,
    /// Boxes scattered over the map; the first one hides the goal item.
    pub box_count: usize,
    /// Probability that the pursuer advances on a turn.
    pub pursuer_advance_chance: f64,
    /// Rooms the maze generator tries to stamp over its corridors.
    pub room_attempts: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            map_width: 80,
            map_height: 25,
            viewport_width: 40,
            viewport_height: 20,
            box_count: 10,
            pursuer_advance_chance: 0.5,
            room_attempts: 12,
        }
    }
}

impl GameConfig {
    /// Rejects parameters that cannot describe a playable game.
    ///
    /// Map dimensions are checked by the maze generator.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.viewport_width == 0 || self.viewport_height == 0 {
            return Err(ConfigError::EmptyViewport {
                width: self.viewport_width,
                height: self.viewport_height,
            });
        }
        if self.viewport_width > MAX_VIEWPORT_DIMENSION
            || self.viewport_height > MAX_VIEWPORT_DIMENSION
        {
            return Err(ConfigError::ViewportTooLarge {
                width: self.viewport_width,
                height: self.viewport_height,
                maximum: MAX_VIEWPORT_DIMENSION,
            });
        }

        if self.box_count == 0 {
            return Err(ConfigError::NoBoxes);
        }

        if !(0.0..=1.0).contains(&self.pursuer_advance_chance) {
            return Err(ConfigError::AdvanceChanceOutOfRange {
                chance: self.pursuer_advance_chance,
            });
        }

        Ok(())
    }
}

/// Reasons a configuration is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// The viewport would show no cells.
    #[error("viewport of {width}x{height} cells shows nothing")]
    EmptyViewport {
        /// Configured viewport width.
        width: u32,
        /// Configured viewport height.
        height: u32,
    },
    /// The viewport exceeds the largest window a game draws.
    #[error("viewport of {width}x{height} cells exceeds the {maximum}x{maximum} maximum")]
    ViewportTooLarge {
        /// Configured viewport width.
        width: u32,
        /// Configured viewport height.
        height: u32,
        /// Largest supported dimension.
        maximum: u32,
    },
    /// At least one box is needed to hide the goal item.
    #[error("at least one box is required to hide the goal item")]
    NoBoxes,
    /// The pursuer's advance probability lies outside `0.0..=1.0`.
    #[error("pursuer advance chance {chance} is not a probability")]
    AdvanceChanceOutOfRange {
        /// Configured probability.
        chance: f64,
    },
}
