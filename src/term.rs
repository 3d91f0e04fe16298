//! Plain terminal front end.
//!
//! The board is drawn as text: two columns per cell, colored with the
//! piece's color. [`render_lines`] builds the text and is independent of
//! the terminal; [`TerminalRenderer`] owns raw mode and writes the frame.

use std::io::{self, Stdout, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::core::GameSnapshot;
use crate::driver::format_mm_ss;
use crate::types::{Cell, GamePhase, BOARD_WIDTH};

const FILLED: &str = "[]";
const EMPTY: &str = " .";

/// One row of output: text segments with the cell they belong to
pub type Line = Vec<(String, Cell)>;

/// Frame for `snapshot`: the board with a border, then a status panel.
pub fn render_lines(snapshot: &GameSnapshot, remaining_ms: Option<u64>) -> Vec<Line> {
    let board = snapshot.render_board();
    let border = format!("+{}+", "-".repeat(BOARD_WIDTH as usize * 2));

    let mut lines: Vec<Line> = Vec::with_capacity(board.height() as usize + 8);
    lines.push(vec![(border.clone(), None)]);
    for row in board.rows() {
        let mut line: Line = vec![("|".to_string(), None)];
        for &cell in row {
            let text = if cell.is_some() { FILLED } else { EMPTY };
            line.push((text.to_string(), cell));
        }
        line.push(("|".to_string(), None));
        lines.push(line);
    }
    lines.push(vec![(border, None)]);

    let status = match snapshot.phase() {
        GamePhase::NotStarted => "Press Enter to start",
        GamePhase::Playing => "",
        GamePhase::Paused => "PAUSED (p to resume)",
        GamePhase::GameOver => "GAME OVER (Enter for a new game)",
    };
    let text = |s: String| vec![(s, None)];
    lines.push(text(format!("Score: {}", snapshot.score)));
    lines.push(text(format!("Level: {}  Lines: {}", snapshot.level, snapshot.lines)));
    lines.push(vec![
        ("Next: ".to_string(), None),
        (snapshot.next.kind.as_str().to_string(), Some(snapshot.next.kind)),
    ]);
    if let Some(ms) = remaining_ms {
        lines.push(text(format!("Time: {}", format_mm_ss(ms))));
    }
    lines.push(text(status.to_string()));
    lines
}

/// `#RRGGBB` to a terminal color
fn hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

pub struct TerminalRenderer {
    stdout: Stdout,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self { stdout: io::stdout() }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.queue(terminal::DisableLineWrap)?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(terminal::EnableLineWrap)?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn draw(&mut self, lines: &[Line]) -> Result<()> {
        self.stdout
            .queue(terminal::Clear(terminal::ClearType::All))?;
        for (y, line) in lines.iter().enumerate() {
            self.stdout.queue(cursor::MoveTo(0, y as u16))?;
            for (text, cell) in line {
                match (*cell).and_then(|kind| hex_color(kind.color_hex())) {
                    Some(color) => {
                        self.stdout.queue(SetForegroundColor(color))?;
                        self.stdout.queue(Print(text))?;
                        self.stdout.queue(ResetColor)?;
                    }
                    None => {
                        self.stdout.queue(Print(text))?;
                    }
                }
            }
        }
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color() {
        assert_eq!(
            hex_color("#F0A000"),
            Some(Color::Rgb {
                r: 0xF0,
                g: 0xA0,
                b: 0x00
            })
        );
        assert_eq!(hex_color("transparent"), None);
        assert_eq!(hex_color("#FFF"), None);
    }
}
