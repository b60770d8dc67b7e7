use std::{
    collections::VecDeque,
    io::{self, Write},
};

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use maze_crawl_core::Direction;
use maze_crawl_rendering::{
    ColorHint, ControlAffordances, Glyph, LifecycleSink, NoticeSink, RenderSink, ScreenCoord,
};

const MESSAGE_LINES: usize = 8;
const ALERT_PROMPT: &str = "[press any key]";

/// Puts the terminal into raw alternate-screen mode until dropped.
#[derive(Debug)]
pub(crate) struct TerminalGuard;

impl TerminalGuard {
    pub(crate) fn enter() -> Result<Self> {
        terminal::enable_raw_mode().context("failed to enable raw terminal mode")?;
        execute!(io::stdout(), EnterAlternateScreen, Hide, Clear(ClearType::All))
            .context("failed to enter the alternate screen")?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(error) = execute!(io::stdout(), Show, LeaveAlternateScreen) {
            tracing::warn!(%error, "failed to leave the alternate screen");
        }
        if let Err(error) = terminal::disable_raw_mode() {
            tracing::warn!(%error, "failed to disable raw terminal mode");
        }
    }
}

/// Blocks until the next key press and returns it.
pub(crate) fn next_key_press() -> Result<KeyEvent> {
    loop {
        if let Event::Key(key) = event::read().context("failed to read terminal input")? {
            if key.kind == KeyEventKind::Press {
                return Ok(key);
            }
        }
    }
}

fn acknowledge_with_key() -> Result<()> {
    let _ = next_key_press()?;
    Ok(())
}

/// Frontend drawing the game with crossterm.
///
/// The viewport occupies the top of the screen, followed by a line showing
/// the available directions and a scrolling log of recent notices.
pub(crate) struct TerminalFrontend<W: Write> {
    writer: W,
    frame_height: u16,
    log: VecDeque<String>,
    acknowledge: fn() -> Result<()>,
    finished: bool,
}

impl<W: Write> TerminalFrontend<W> {
    /// Creates a frontend whose alerts wait for a key press.
    pub(crate) fn new(writer: W) -> Self {
        Self::with_acknowledge(writer, acknowledge_with_key)
    }

    fn with_acknowledge(writer: W, acknowledge: fn() -> Result<()>) -> Self {
        Self {
            writer,
            frame_height: 0,
            log: VecDeque::with_capacity(MESSAGE_LINES),
            acknowledge,
            finished: false,
        }
    }

    /// Reports whether the game announced its end.
    pub(crate) fn is_finished(&self) -> bool {
        self.finished
    }

    fn push_lines(&mut self, text: &str) {
        for line in text.lines() {
            if self.log.len() == MESSAGE_LINES {
                let _ = self.log.pop_front();
            }
            self.log.push_back(line.to_owned());
        }
    }

    fn render_log(&mut self) -> Result<()> {
        let top = self.frame_height.saturating_add(2);
        for offset in 0..MESSAGE_LINES {
            let row = top.saturating_add(u16::try_from(offset).unwrap_or(u16::MAX));
            let line = self.log.get(offset).map_or("", String::as_str);
            queue!(
                self.writer,
                MoveTo(0, row),
                Clear(ClearType::CurrentLine),
                Print(line)
            )?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

fn palette(hint: ColorHint) -> Color {
    let color = hint.color();
    Color::Rgb {
        r: color.red,
        g: color.green,
        b: color.blue,
    }
}

fn screen_position(position: ScreenCoord) -> Result<(u16, u16)> {
    let column = u16::try_from(position.column()).context("viewport column exceeds terminal")?;
    let row = u16::try_from(position.row()).context("viewport row exceeds terminal")?;
    Ok((column, row))
}

impl<W: Write> RenderSink for TerminalFrontend<W> {
    fn begin_frame(&mut self, _width: u32, height: u32) -> Result<()> {
        self.frame_height = u16::try_from(height).context("viewport taller than terminal")?;
        Ok(())
    }

    fn draw(&mut self, position: ScreenCoord, glyph: Glyph, hint: ColorHint) -> Result<()> {
        let (column, row) = screen_position(position)?;
        queue!(
            self.writer,
            MoveTo(column, row),
            SetForegroundColor(palette(hint)),
            Print(glyph.symbol())
        )?;
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        queue!(self.writer, ResetColor)?;
        self.writer.flush()?;
        Ok(())
    }

    fn update_controls(&mut self, affordances: ControlAffordances) -> Result<()> {
        let arrows: String = [
            (Direction::North, '↑'),
            (Direction::East, '→'),
            (Direction::South, '↓'),
            (Direction::West, '←'),
        ]
        .into_iter()
        .map(|(direction, arrow)| {
            if affordances.is_enabled(direction) {
                arrow
            } else {
                '·'
            }
        })
        .collect();
        queue!(
            self.writer,
            MoveTo(0, self.frame_height),
            Clear(ClearType::CurrentLine),
            Print(format!("moves: {arrows}"))
        )?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> NoticeSink for TerminalFrontend<W> {
    fn message(&mut self, text: &str) -> Result<()> {
        tracing::debug!(text, "message");
        self.push_lines(text);
        self.render_log()
    }

    fn alert(&mut self, text: &str) -> Result<()> {
        tracing::info!(text, "alert");
        self.push_lines(text);
        self.push_lines(ALERT_PROMPT);
        self.render_log()?;
        (self.acknowledge)()
    }
}

impl<W: Write> LifecycleSink for TerminalFrontend<W> {
    fn quit(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}
