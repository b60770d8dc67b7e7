use std::{collections::HashMap, fs, path::Path};

use anyhow::{Context, Result};
use maze_crawl_core::PlayerInput;
use maze_crawl_engine::GameConfig;
use serde::Deserialize;

/// Contents of the optional TOML settings file.
///
/// ```toml
/// [game]
/// map_width = 60
/// box_count = 6
///
/// [keys]
/// x = "search"
/// u = { move = "north_east" }
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    /// Game parameters; omitted fields keep their defaults.
    pub(crate) game: GameConfig,
    /// Extra single-character key bindings layered over the built-in ones.
    pub(crate) keys: HashMap<String, PlayerInput>,
}

impl Settings {
    /// Loads settings from `path`, or returns the defaults when no file is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        Self::parse(&text)
            .with_context(|| format!("failed to parse settings file {}", path.display()))
    }

    fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Replaces map dimensions with the values given on the command line.
    pub(crate) fn override_dimensions(&mut self, width: Option<u32>, height: Option<u32>) {
        if let Some(width) = width {
            self.game.map_width = width;
        }
        if let Some(height) = height {
            self.game.map_height = height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_crawl_core::Direction;

    #[test]
    fn empty_file_yields_defaults() {
        let settings = Settings::parse("").expect("empty TOML is valid");
        assert_eq!(settings.game, GameConfig::default());
        assert!(settings.keys.is_empty());
    }

    #[test]
    fn partial_game_table_keeps_remaining_defaults() {
        let settings = Settings::parse(
            r#"
            [game]
            map_width = 60
            pursuer_advance_chance = 0.25
            "#,
        )
        .expect("valid settings");

        assert_eq!(settings.game.map_width, 60);
        assert_eq!(settings.game.map_height, 25);
        assert!((settings.game.pursuer_advance_chance - 0.25).abs() < f64::EPSILON);
        assert_eq!(settings.game.box_count, 10);
    }

    #[test]
    fn key_bindings_parse_inputs() {
        let settings = Settings::parse(
            r#"
            [keys]
            x = "search"
            u = { move = "north_east" }
            "#,
        )
        .expect("valid settings");

        assert_eq!(settings.keys.get("x"), Some(&PlayerInput::Search));
        assert_eq!(
            settings.keys.get("u"),
            Some(&PlayerInput::Move(Direction::NorthEast))
        );
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert!(Settings::parse("[game]\nmap_width = \"wide\"").is_err());
    }

    #[test]
    fn command_line_dimensions_win() {
        let mut settings = Settings::default();
        settings.override_dimensions(Some(30), None);
        assert_eq!(settings.game.map_width, 30);
        assert_eq!(settings.game.map_height, 25);
    }
}
