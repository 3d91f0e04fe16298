//! Protocol module - JSON shapes for snapshots and events
//!
//! These are what leaves the process: snapshots for multiplayer peers and
//! events for analytics and the event log. Field names follow the camelCase
//! convention peers already use; event types are snake_case names.

use serde::{Deserialize, Serialize};

use blocktris_core::{GameSnapshot, Tetromino};

use crate::types::{cell_color, Cell, GameEvent};

/// One board cell: `type` is the piece letter, or null when empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellMessage {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub color: String,
}

impl From<Cell> for CellMessage {
    fn from(cell: Cell) -> Self {
        Self {
            kind: cell.map(|kind| kind.as_str().to_string()),
            color: cell_color(cell).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub color: String,
    pub shape: Vec<Vec<u8>>,
}

impl From<&Tetromino> for PieceMessage {
    fn from(piece: &Tetromino) -> Self {
        Self {
            kind: piece.kind.as_str().to_string(),
            color: piece.color().to_string(),
            shape: piece.shape.rows().map(|row| row.to_vec()).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionMessage {
    pub x: i8,
    pub y: i8,
}

/// Full game state as sent to peers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMessage {
    /// Rows top to bottom
    pub board: Vec<Vec<CellMessage>>,
    pub current_piece: PieceMessage,
    pub next_piece: PieceMessage,
    pub position: PositionMessage,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub lines_cleared: u32,
    pub game_over: bool,
    pub is_paused: bool,
    pub game_started: bool,
    pub phase: String,
}

impl From<&GameSnapshot> for SnapshotMessage {
    fn from(snapshot: &GameSnapshot) -> Self {
        Self {
            board: snapshot
                .board
                .rows()
                .map(|row| row.iter().map(|&cell| CellMessage::from(cell)).collect())
                .collect(),
            current_piece: PieceMessage::from(&snapshot.current),
            next_piece: PieceMessage::from(&snapshot.next),
            position: PositionMessage {
                x: snapshot.position.x,
                y: snapshot.position.y,
            },
            score: snapshot.score,
            level: snapshot.level,
            lines: snapshot.lines,
            lines_cleared: snapshot.lines_cleared,
            game_over: snapshot.game_over,
            is_paused: snapshot.paused,
            game_started: snapshot.started,
            phase: snapshot.phase().as_str().to_string(),
        }
    }
}

/// Game event as reported to analytics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventMessage {
    NewGame,
    GameStart { level: u32 },
    GamePause,
    GameResume,
    ScoreUpdate { score: u32, increase: u32, level: u32 },
    RowClear { count: u32, lines: u32, level: u32 },
    LevelUp { level: u32, lines: u32 },
    GameOver { score: u32, level: u32, lines: u32 },
    TimeUp { score: u32, level: u32, lines: u32 },
}

impl From<GameEvent> for EventMessage {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::NewGame => EventMessage::NewGame,
            GameEvent::GameStarted { level } => EventMessage::GameStart { level },
            GameEvent::Paused => EventMessage::GamePause,
            GameEvent::Resumed => EventMessage::GameResume,
            GameEvent::ScoreUpdated {
                score,
                increase,
                level,
            } => EventMessage::ScoreUpdate {
                score,
                increase,
                level,
            },
            GameEvent::RowsCleared { count, lines, level } => {
                EventMessage::RowClear { count, lines, level }
            }
            GameEvent::LevelUp { level, lines } => EventMessage::LevelUp { level, lines },
            GameEvent::GameOver {
                score,
                level,
                lines,
            } => EventMessage::GameOver {
                score,
                level,
                lines,
            },
            GameEvent::TimeUp {
                score,
                level,
                lines,
            } => EventMessage::TimeUp {
                score,
                level,
                lines,
            },
        }
    }
}
