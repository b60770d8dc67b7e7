#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared presentation contracts for Maze Crawl adapters.
//!
//! The game controller never talks to a terminal directly. It draws glyphs,
//! shows notices and announces the end of the game through the sink traits
//! defined here, which adapters implement.

use anyhow::{bail, Result as AnyResult};
use maze_crawl_core::{CellKind, Direction};

/// RGB color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    /// Red channel intensity.
    pub red: u8,
    /// Green channel intensity.
    pub green: u8,
    /// Blue channel intensity.
    pub blue: u8,
}

impl Color {
    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

/// Named color class attached to every drawn glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorHint {
    /// Impassable wall cells.
    Wall,
    /// Floor cells and the boxes lying on them.
    Clear,
    /// The player's glyph.
    Player,
    /// The pursuer's glyph.
    Pursuer,
}

impl ColorHint {
    /// Stable lowercase name of the hint.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wall => "wall",
            Self::Clear => "clear",
            Self::Player => "player",
            Self::Pursuer => "pursuer",
        }
    }

    /// Default palette entry for the hint.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Wall => Color::from_rgb_u8(120, 110, 100),
            Self::Clear => Color::from_rgb_u8(200, 200, 200),
            Self::Player => Color::from_rgb_u8(90, 200, 255),
            Self::Pursuer => Color::from_rgb_u8(230, 70, 60),
        }
    }
}

/// Symbol drawn for a single screen cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Glyph {
    /// Impassable wall.
    Wall,
    /// Empty floor.
    Clear,
    /// Box that has not been searched.
    Box,
    /// Box that was searched and found empty.
    EmptyBox,
    /// The player.
    Player,
    /// The pursuer.
    Pursuer,
    /// Cell that is neither floor nor wall.
    Void,
}

impl Glyph {
    /// Glyph and color hint used to draw a cell of the provided kind.
    ///
    /// `None` stands for cells the grid knows nothing about.
    #[must_use]
    pub const fn for_cell(kind: Option<CellKind>) -> (Self, ColorHint) {
        match kind {
            Some(CellKind::Wall) => (Self::Wall, ColorHint::Wall),
            Some(CellKind::Clear) => (Self::Clear, ColorHint::Clear),
            Some(CellKind::Box) => (Self::Box, ColorHint::Clear),
            Some(CellKind::EmptyBox) => (Self::EmptyBox, ColorHint::Clear),
            None => (Self::Void, ColorHint::Clear),
        }
    }

    /// Character printed for the glyph.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Wall => '▦',
            Self::Clear | Self::Void => ' ',
            Self::Box => '▣',
            Self::EmptyBox => '□',
            Self::Player => '⚇',
            Self::Pursuer => '⨻',
        }
    }
}

/// Position inside the viewport, relative to its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScreenCoord {
    column: u32,
    row: u32,
}

impl ScreenCoord {
    /// Creates a new viewport position.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column inside the viewport.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row inside the viewport.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Directional controls the embedding interface should offer.
///
/// A direction is enabled unless the neighbouring cell is a wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ControlAffordances {
    /// Whether stepping north is allowed.
    pub north: bool,
    /// Whether stepping east is allowed.
    pub east: bool,
    /// Whether stepping south is allowed.
    pub south: bool,
    /// Whether stepping west is allowed.
    pub west: bool,
}

impl ControlAffordances {
    /// Affordances with every direction enabled.
    pub const ALL: Self = Self {
        north: true,
        east: true,
        south: true,
        west: true,
    };

    /// Computes affordances from a predicate reporting walls in each direction.
    pub fn from_walls<F>(mut is_wall: F) -> Self
    where
        F: FnMut(Direction) -> bool,
    {
        Self {
            north: !is_wall(Direction::North),
            east: !is_wall(Direction::East),
            south: !is_wall(Direction::South),
            west: !is_wall(Direction::West),
        }
    }

    /// Reports whether the control for `direction` is enabled.
    ///
    /// Diagonal controls are never enabled.
    #[must_use]
    pub const fn is_enabled(&self, direction: Direction) -> bool {
        match direction {
            Direction::North => self.north,
            Direction::East => self.east,
            Direction::South => self.south,
            Direction::West => self.west,
            Direction::NorthEast
            | Direction::SouthEast
            | Direction::SouthWest
            | Direction::NorthWest => false,
        }
    }
}

/// Receives the glyphs of the visible window.
pub trait RenderSink {
    /// Starts a new frame of the provided viewport size.
    fn begin_frame(&mut self, width: u32, height: u32) -> AnyResult<()>;

    /// Draws a glyph at a viewport position.
    fn draw(&mut self, position: ScreenCoord, glyph: Glyph, hint: ColorHint) -> AnyResult<()>;

    /// Finishes the frame started by [`RenderSink::begin_frame`].
    fn present(&mut self) -> AnyResult<()>;

    /// Publishes which directional controls should be enabled.
    fn update_controls(&mut self, affordances: ControlAffordances) -> AnyResult<()>;
}

/// Receives player-visible text.
pub trait NoticeSink {
    /// Shows transient status text.
    fn message(&mut self, text: &str) -> AnyResult<()>;

    /// Shows important text and returns once it has been acknowledged.
    fn alert(&mut self, text: &str) -> AnyResult<()>;
}

/// Receives lifecycle notifications from the game.
pub trait LifecycleSink {
    /// Signals that the game ended and will accept no further input.
    fn quit(&mut self) -> AnyResult<()>;
}

/// Everything the game controller needs from an embedding environment.
pub trait Frontend: RenderSink + NoticeSink + LifecycleSink {}

impl<T> Frontend for T where T: RenderSink + NoticeSink + LifecycleSink {}

/// Interaction recorded by [`HeadlessFrontend`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FrontendCall {
    /// A frame of the given viewport size was started.
    BeginFrame {
        /// Viewport width in cells.
        width: u32,
        /// Viewport height in cells.
        height: u32,
    },
    /// A glyph was drawn.
    Draw {
        /// Viewport position of the glyph.
        position: ScreenCoord,
        /// Glyph that was drawn.
        glyph: Glyph,
        /// Color hint attached to the glyph.
        hint: ColorHint,
    },
    /// The current frame was presented.
    Present,
    /// The control affordances changed.
    Controls(ControlAffordances),
    /// A transient message was shown.
    Message(String),
    /// An alert was shown and acknowledged.
    Alert(String),
    /// The game announced its end.
    Quit,
}

/// Frontend that records every call instead of presenting anything.
#[derive(Clone, Debug, Default)]
pub struct HeadlessFrontend {
    calls: Vec<FrontendCall>,
    fail_alerts: bool,
}

impl HeadlessFrontend {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a recorder whose alerts fail, as a closed display would.
    #[must_use]
    pub fn with_failing_alerts() -> Self {
        Self {
            calls: Vec::new(),
            fail_alerts: true,
        }
    }

    /// Every recorded call in order.
    #[must_use]
    pub fn calls(&self) -> &[FrontendCall] {
        &self.calls
    }

    /// Texts passed to [`NoticeSink::message`], in order.
    #[must_use]
    pub fn messages(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                FrontendCall::Message(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Texts passed to [`NoticeSink::alert`], in order.
    #[must_use]
    pub fn alerts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                FrontendCall::Alert(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of [`LifecycleSink::quit`] notifications received.
    #[must_use]
    pub fn quit_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, FrontendCall::Quit))
            .count()
    }

    /// Number of frames presented.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, FrontendCall::Present))
            .count()
    }

    /// Draw calls of the most recently started frame.
    #[must_use]
    pub fn last_frame(&self) -> Vec<(ScreenCoord, Glyph, ColorHint)> {
        let start = self
            .calls
            .iter()
            .rposition(|call| matches!(call, FrontendCall::BeginFrame { .. }))
            .map_or(0, |index| index + 1);
        self.calls[start..]
            .iter()
            .filter_map(|call| match call {
                FrontendCall::Draw {
                    position,
                    glyph,
                    hint,
                } => Some((*position, *glyph, *hint)),
                _ => None,
            })
            .collect()
    }

    /// Most recently published control affordances.
    #[must_use]
    pub fn last_controls(&self) -> Option<ControlAffordances> {
        self.calls.iter().rev().find_map(|call| match call {
            FrontendCall::Controls(affordances) => Some(*affordances),
            _ => None,
        })
    }

    /// Forgets every recorded call.
    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl RenderSink for HeadlessFrontend {
    fn begin_frame(&mut self, width: u32, height: u32) -> AnyResult<()> {
        self.calls.push(FrontendCall::BeginFrame { width, height });
        Ok(())
    }

    fn draw(&mut self, position: ScreenCoord, glyph: Glyph, hint: ColorHint) -> AnyResult<()> {
        self.calls.push(FrontendCall::Draw {
            position,
            glyph,
            hint,
        });
        Ok(())
    }

    fn present(&mut self) -> AnyResult<()> {
        self.calls.push(FrontendCall::Present);
        Ok(())
    }

    fn update_controls(&mut self, affordances: ControlAffordances) -> AnyResult<()> {
        self.calls.push(FrontendCall::Controls(affordances));
        Ok(())
    }
}

impl NoticeSink for HeadlessFrontend {
    fn message(&mut self, text: &str) -> AnyResult<()> {
        self.calls.push(FrontendCall::Message(text.to_owned()));
        Ok(())
    }

    fn alert(&mut self, text: &str) -> AnyResult<()> {
        if self.fail_alerts {
            bail!("alert display is unavailable");
        }
        self.calls.push(FrontendCall::Alert(text.to_owned()));
        Ok(())
    }
}

impl LifecycleSink for HeadlessFrontend {
    fn quit(&mut self) -> AnyResult<()> {
        self.calls.push(FrontendCall::Quit);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_symbols_match_cell_kinds() {
        assert_eq!(Glyph::for_cell(Some(CellKind::Wall)), (Glyph::Wall, ColorHint::Wall));
        assert_eq!(Glyph::for_cell(Some(CellKind::Box)).0.symbol(), '▣');
        assert_eq!(Glyph::for_cell(Some(CellKind::EmptyBox)).0.symbol(), '□');
        assert_eq!(Glyph::for_cell(None).0.symbol(), ' ');
        assert_eq!(Glyph::Player.symbol(), '⚇');
        assert_eq!(Glyph::Pursuer.symbol(), '⨻');
    }

    #[test]
    fn color_hints_have_stable_names() {
        let names: Vec<&str> = [
            ColorHint::Wall,
            ColorHint::Clear,
            ColorHint::Player,
            ColorHint::Pursuer,
        ]
        .into_iter()
        .map(ColorHint::name)
        .collect();
        assert_eq!(names, ["wall", "clear", "player", "pursuer"]);
    }

    #[test]
    fn affordances_disable_walled_directions() {
        let affordances = ControlAffordances::from_walls(|direction| {
            matches!(direction, Direction::North | Direction::West)
        });

        assert!(!affordances.is_enabled(Direction::North));
        assert!(affordances.is_enabled(Direction::East));
        assert!(affordances.is_enabled(Direction::South));
        assert!(!affordances.is_enabled(Direction::West));
        assert!(!ControlAffordances::ALL.is_enabled(Direction::NorthEast));
    }

    #[test]
    fn headless_frontend_tracks_last_frame() {
        let mut frontend = HeadlessFrontend::new();
        frontend.begin_frame(2, 1).expect("recording never fails");
        frontend
            .draw(ScreenCoord::new(0, 0), Glyph::Wall, ColorHint::Wall)
            .expect("recording never fails");
        frontend.present().expect("recording never fails");
        frontend.begin_frame(2, 1).expect("recording never fails");
        frontend
            .draw(ScreenCoord::new(1, 0), Glyph::Player, ColorHint::Player)
            .expect("recording never fails");
        frontend.present().expect("recording never fails");

        assert_eq!(
            frontend.last_frame(),
            vec![(ScreenCoord::new(1, 0), Glyph::Player, ColorHint::Player)]
        );
        assert_eq!(frontend.frame_count(), 2);
    }

    #[test]
    fn failing_alerts_surface_errors() {
        let mut frontend = HeadlessFrontend::with_failing_alerts();
        assert!(frontend.alert("boom").is_err());
        assert!(frontend.alerts().is_empty());
        frontend.message("still fine").expect("messages succeed");
        assert_eq!(frontend.messages(), ["still fine"]);
    }
}
