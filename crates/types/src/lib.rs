//! Shared types and constants for the falling-block engine.
//!
//! Everything here is plain data with no external dependencies, so the same
//! definitions can be used by the core rules, the input layer, the timing
//! driver and any consumer of game snapshots.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn position**: (4, 0) for every piece
//!
//! # Timing and Scoring
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_SPEED_MS` | 1000 | Auto-drop interval at level 1 |
//! | `SPEED_STEP_MS` | 100 | Interval reduction per level |
//! | `MIN_SPEED_MS` | 100 | Fastest auto-drop interval |
//! | `LINES_PER_LEVEL` | 10 | Cleared lines needed per level |
//! | `HARD_DROP_POINTS` | 2 | Flat bonus for a hard drop |
//! | `INPUT_GUARD_MS` | 50 | Key re-entrancy window |
//!
//! # Examples
//!
//! ```
//! use blocktris_types::{Direction, GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(PieceKind::O.color_hex(), "#F0F000");
//! assert_eq!(GameAction::HardDrop.direction(), Some(Direction::Drop));
//! assert_eq!((BOARD_WIDTH, BOARD_HEIGHT), (10, 20));
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Auto-drop interval at level 1
pub const INITIAL_SPEED_MS: u32 = 1000;

/// Auto-drop interval reduction per level above 1
pub const SPEED_STEP_MS: u32 = 100;

/// Floor for the auto-drop interval
pub const MIN_SPEED_MS: u32 = 100;

/// Cleared lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Points for clearing N lines on a single lock, before the level multiplier.
///
/// Index = lines cleared (0-4): single 100, double 300, triple 500, tetris 800.
pub const LINE_POINTS: [u32; 5] = [0, 100, 300, 500, 800];

/// Flat bonus awarded when a hard drop is performed
pub const HARD_DROP_POINTS: u32 = 2;

/// Window after an accepted key press during which further key events are dropped
pub const INPUT_GUARD_MS: u32 = 50;

/// Color reported for an empty cell
pub const EMPTY_CELL_COLOR: &str = "transparent";

/// Spawn position of every new piece: horizontally centered, top row.
pub const SPAWN_POSITION: Position = Position {
    x: (BOARD_WIDTH / 2) as i8 - 1,
    y: 0,
};


/// The seven tetromino kinds
///
/// Each kind has a fixed shape and color:
/// - **I**: Cyan, 4x4 bar
/// - **J**: Blue
/// - **L**: Orange
/// - **O**: Yellow, 2x2 square
/// - **S**: Green
/// - **T**: Purple
/// - **Z**: Red
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// Every kind, in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blocktris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("Z"), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Upper-case single-letter name
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }

    /// Display color as a `#RRGGBB` string
    pub fn color_hex(&self) -> &'static str {
        match self {
            PieceKind::I => "#00F0F0",
            PieceKind::J => "#0000F0",
            PieceKind::L => "#F0A000",
            PieceKind::O => "#F0F000",
            PieceKind::S => "#00F000",
            PieceKind::T => "#A000F0",
            PieceKind::Z => "#F00000",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Occupied by a locked block of that kind (and its color)
pub type Cell = Option<PieceKind>;

/// Color of a cell; empty cells are transparent.
pub fn cell_color(cell: Cell) -> &'static str {
    match cell {
        Some(kind) => kind.color_hex(),
        None => EMPTY_CELL_COLOR,
    }
}

/// Board-space offset of a piece's shape-matrix origin (top-left of its box).
///
/// `y` grows downward and may be negative while a piece pokes above the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

impl Position {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Position shifted by `(dx, dy)`
    pub const fn offset(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Movement requested for the falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    /// One row down; locks the piece when blocked
    Down,
    /// Hard drop to the lowest valid row, then lock
    Drop,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Drop => "drop",
        }
    }
}

/// Discrete actions accepted by the game, from keyboard or UI callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (locks when blocked)
    SoftDrop,
    /// Drop piece to the lowest valid row and lock it
    HardDrop,
    /// Rotate piece 90° clockwise with wall kicks
    Rotate,
    /// Toggle pause; accepted in every phase
    Pause,
    /// Start a fresh game
    NewGame,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blocktris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
    /// assert_eq!(GameAction::from_str("ROTATE"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotate" => Some(GameAction::Rotate),
            "pause" => Some(GameAction::Pause),
            "newgame" => Some(GameAction::NewGame),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::Pause => "pause",
            GameAction::NewGame => "newGame",
        }
    }

    /// Movement direction for the four movement actions
    pub fn direction(&self) -> Option<Direction> {
        match self {
            GameAction::MoveLeft => Some(Direction::Left),
            GameAction::MoveRight => Some(Direction::Right),
            GameAction::SoftDrop => Some(Direction::Down),
            GameAction::HardDrop => Some(Direction::Drop),
            _ => None,
        }
    }
}

/// Lifecycle phase derived from the state flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    NotStarted,
    Playing,
    Paused,
    GameOver,
}

impl GamePhase {
    /// Game over wins over pause; nothing is playing before the first start.
    pub fn from_flags(started: bool, paused: bool, game_over: bool) -> Self {
        if !started {
            GamePhase::NotStarted
        } else if game_over {
            GamePhase::GameOver
        } else if paused {
            GamePhase::Paused
        } else {
            GamePhase::Playing
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::NotStarted => "not_started",
            GamePhase::Playing => "playing",
            GamePhase::Paused => "paused",
            GamePhase::GameOver => "game_over",
        }
    }
}

/// Observable state transitions, queued by the state machine for consumers
/// such as analytics. Each variant carries the fields relevant at the moment
/// of the transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// State replaced by a fresh, not-yet-started game
    NewGame,
    /// A game began
    GameStarted { level: u32 },
    Paused,
    Resumed,
    /// Score increased during one operation
    ScoreUpdated { score: u32, increase: u32, level: u32 },
    /// One lock completed `count` rows
    RowsCleared { count: u32, lines: u32, level: u32 },
    LevelUp { level: u32, lines: u32 },
    GameOver { score: u32, level: u32, lines: u32 },
    /// A timed match ran out of time
    TimeUp { score: u32, level: u32, lines: u32 },
}

impl GameEvent {
    /// Analytics event name
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::NewGame => "new_game",
            GameEvent::GameStarted { .. } => "game_start",
            GameEvent::Paused => "game_pause",
            GameEvent::Resumed => "game_resume",
            GameEvent::ScoreUpdated { .. } => "score_update",
            GameEvent::RowsCleared { .. } => "row_clear",
            GameEvent::LevelUp { .. } => "level_up",
            GameEvent::GameOver { .. } => "game_over",
            GameEvent::TimeUp { .. } => "time_up",
        }
    }
}
