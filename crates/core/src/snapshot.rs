//! Snapshot module - owned, read-only copies of the game state

use crate::board::Board;
use crate::pieces::Tetromino;
use crate::placement::place;
use crate::types::{GamePhase, Position};

/// Read-only copy of the game state handed to consumers (UI, analytics,
/// multiplayer peers).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: Board,
    pub current: Tetromino,
    pub next: Tetromino,
    pub position: Position,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    /// Rows removed by the most recent lock
    pub lines_cleared: u32,
    pub game_over: bool,
    pub paused: bool,
    pub started: bool,
}

impl GameSnapshot {
    pub fn phase(&self) -> GamePhase {
        GamePhase::from_flags(self.started, self.paused, self.game_over)
    }

    pub fn playable(&self) -> bool {
        self.phase() == GamePhase::Playing
    }

    /// Board with the falling piece drawn in, for display.
    ///
    /// Before the first start and after game over only the settled board is
    /// shown; the piece that failed to spawn overlaps it.
    pub fn render_board(&self) -> Board {
        if self.started && !self.game_over {
            place(&self.board, &self.current, self.position)
        } else {
            self.board.clone()
        }
    }
}
