//! Game state module - the state machine that owns a game
//!
//! Ties together the board, the piece catalog, placement rules and scoring.
//! Every mutation goes through one of the operations below; each one reads
//! the current state, computes the next one and commits it in a single step.
//!
//! Phases: `NotStarted -> Playing <-> Paused`, `Playing -> GameOver`, and
//! back to `NotStarted` only through [`GameState::reset_game`].

use std::mem;

use crate::board::Board;
use crate::pieces::Tetromino;
use crate::placement::{can_place, drop_position, place, rotate_with_kicks};
use crate::rng::PieceGenerator;
use crate::scoring::{level_for_lines, line_clear_points};
use crate::snapshot::GameSnapshot;
use crate::types::{
    Direction, GameAction, GameEvent, GamePhase, Position, HARD_DROP_POINTS, SPAWN_POSITION,
};

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    current: Tetromino,
    next: Tetromino,
    position: Position,
    score: u32,
    level: u32,
    lines: u32,
    /// Rows removed by the most recent lock
    lines_cleared: u32,
    game_over: bool,
    paused: bool,
    started: bool,
    generator: PieceGenerator,
    /// Transitions not yet taken by a consumer
    events: Vec<GameEvent>,
}

impl GameState {
    /// New, not-yet-started game drawing pieces uniformly from `seed`
    pub fn new(seed: u32) -> Self {
        Self::with_generator(PieceGenerator::uniform(seed))
    }

    pub fn with_generator(mut generator: PieceGenerator) -> Self {
        let current = generator.next_piece();
        let next = generator.next_piece();
        Self {
            board: Board::new(),
            current,
            next,
            position: SPAWN_POSITION,
            score: 0,
            level: 1,
            lines: 0,
            lines_cleared: 0,
            game_over: false,
            paused: false,
            started: false,
            generator,
            events: Vec::new(),
        }
    }

    /// Replace every gameplay field with a fresh game on `board`.
    ///
    /// The generator keeps its position so the piece sequence continues.
    fn renew(&mut self, board: Board, started: bool) {
        self.board = board;
        self.current = self.generator.next_piece();
        self.next = self.generator.next_piece();
        self.position = SPAWN_POSITION;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.lines_cleared = 0;
        self.game_over = false;
        self.paused = false;
        self.started = started;
    }

    /// Start a fresh game with two new pieces
    pub fn start_game(&mut self) -> bool {
        self.start_with_board(Board::new())
    }

    /// Start a fresh game on a prepared board (puzzle setups, resuming a
    /// synced position). Ends immediately if the first piece cannot spawn.
    pub fn start_with_board(&mut self, board: Board) -> bool {
        self.renew(board, true);
        self.events.push(GameEvent::GameStarted { level: self.level });
        if !can_place(&self.board, &self.current, self.position) {
            self.game_over = true;
            self.push_game_over();
        }
        true
    }

    /// Fresh state without starting (back to the pre-game screen)
    pub fn reset_game(&mut self) -> bool {
        self.renew(Board::new(), false);
        self.events.push(GameEvent::NewGame);
        true
    }

    /// Flip the pause flag. Accepted in every phase.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.events.push(if self.paused {
            GameEvent::Paused
        } else {
            GameEvent::Resumed
        });
        true
    }

    /// Pause because a timed match ran out. No-op before start or after
    /// game over.
    pub fn finish_match(&mut self) -> bool {
        if !self.started || self.game_over {
            return false;
        }
        self.paused = true;
        self.events.push(GameEvent::TimeUp {
            score: self.score,
            level: self.level,
            lines: self.lines,
        });
        true
    }

    /// Move the falling piece.
    ///
    /// - `Left`/`Right`: shift one column when the target fits.
    /// - `Down`: shift one row; when blocked, the piece locks.
    /// - `Drop`: fall to the lowest valid row, score the hard-drop bonus and
    ///   lock, all in this one call.
    ///
    /// Returns false when the game is not playable or a sideways move is
    /// blocked.
    pub fn move_piece(&mut self, direction: Direction) -> bool {
        if !self.is_playable() {
            return false;
        }
        let score_before = self.score;

        let accepted = match direction {
            Direction::Left => self.try_shift(-1, 0),
            Direction::Right => self.try_shift(1, 0),
            Direction::Down => {
                if !self.try_shift(0, 1) {
                    self.lock_piece();
                }
                true
            }
            Direction::Drop => {
                self.position = drop_position(&self.board, &self.current, self.position);
                self.score = self.score.saturating_add(HARD_DROP_POINTS);
                self.lock_piece();
                true
            }
        };

        if self.score > score_before {
            self.events.push(GameEvent::ScoreUpdated {
                score: self.score,
                increase: self.score - score_before,
                level: self.level,
            });
        }
        if self.game_over {
            self.push_game_over();
        }
        accepted
    }

    /// Rotate clockwise with the kick search. The piece and position are
    /// unchanged when every candidate collides.
    pub fn rotate(&mut self) -> bool {
        if !self.is_playable() {
            return false;
        }
        match rotate_with_kicks(&self.board, &self.current, self.position) {
            Some((rotated, position)) => {
                self.current = rotated;
                self.position = position;
                true
            }
            None => false,
        }
    }

    /// Apply a discrete action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft
            | GameAction::MoveRight
            | GameAction::SoftDrop
            | GameAction::HardDrop => match action.direction() {
                Some(direction) => self.move_piece(direction),
                None => false,
            },
            GameAction::Rotate => self.rotate(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::NewGame => self.start_game(),
        }
    }

    fn try_shift(&mut self, dx: i8, dy: i8) -> bool {
        let target = self.position.offset(dx, dy);
        if can_place(&self.board, &self.current, target) {
            self.position = target;
            true
        } else {
            false
        }
    }

    /// Commit the falling piece, clear rows, score, and bring in the next
    /// piece. Sets `game_over` when the new piece cannot spawn.
    fn lock_piece(&mut self) {
        let placed = place(&self.board, &self.current, self.position);
        let (cleared, count) = placed.clear_lines();

        self.score = self
            .score
            .saturating_add(line_clear_points(count, self.level));
        let lines = self.lines + count as u32;
        let level = level_for_lines(lines);

        if count > 0 {
            self.events.push(GameEvent::RowsCleared {
                count: count as u32,
                lines,
                level,
            });
        }
        if level > self.level {
            self.events.push(GameEvent::LevelUp { level, lines });
        }

        self.board = cleared;
        self.lines = lines;
        self.level = level;
        self.lines_cleared = count as u32;

        self.current = self.next;
        self.next = self.generator.next_piece();
        self.position = SPAWN_POSITION;

        if !can_place(&self.board, &self.current, self.position) {
            self.game_over = true;
        }
    }

    fn push_game_over(&mut self) {
        self.events.push(GameEvent::GameOver {
            score: self.score,
            level: self.level,
            lines: self.lines,
        });
    }

    pub fn is_playable(&self) -> bool {
        self.started && !self.paused && !self.game_over
    }

    pub fn phase(&self) -> GamePhase {
        GamePhase::from_flags(self.started, self.paused, self.game_over)
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> &Tetromino {
        &self.current
    }

    pub fn next(&self) -> &Tetromino {
        &self.next
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn seed(&self) -> Option<u32> {
        self.generator.seed()
    }

    /// Board with the falling piece drawn in, for display
    pub fn render_board(&self) -> Board {
        self.snapshot().render_board()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.clone(),
            current: self.current,
            next: self.next,
            position: self.position,
            score: self.score,
            level: self.level,
            lines: self.lines,
            lines_cleared: self.lines_cleared,
            game_over: self.game_over,
            paused: self.paused,
            started: self.started,
        }
    }

    /// Transitions queued since the last call
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take and clear the queued transitions
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.events)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PieceKind, BOARD_HEIGHT};

    fn started(kinds: &[PieceKind]) -> GameState {
        let mut state = GameState::with_generator(PieceGenerator::cycle(kinds));
        state.start_game();
        state.take_events();
        state
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);
        assert!(!state.started);
        assert!(!state.paused);
        assert!(!state.game_over);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.lines, 0);
        assert_eq!(state.position, SPAWN_POSITION);
        assert!(state.board.is_empty());
        assert_eq!(state.phase(), GamePhase::NotStarted);
    }

    #[test]
    fn test_moves_ignored_before_start() {
        let mut state = GameState::new(1);
        assert!(!state.move_piece(Direction::Left));
        assert!(!state.rotate());
        assert_eq!(state.position, SPAWN_POSITION);
    }

    #[test]
    fn test_start_draws_continuing_sequence() {
        let mut state = GameState::with_generator(PieceGenerator::cycle(&[
            PieceKind::I,
            PieceKind::T,
            PieceKind::S,
            PieceKind::Z,
        ]));
        assert_eq!(state.current.kind, PieceKind::I);
        assert_eq!(state.next.kind, PieceKind::T);

        state.start_game();
        assert_eq!(state.current.kind, PieceKind::S);
        assert_eq!(state.next.kind, PieceKind::Z);
        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(
            state.take_events(),
            vec![GameEvent::GameStarted { level: 1 }]
        );
    }

    #[test]
    fn test_soft_drop_locks_when_blocked() {
        let mut state = started(&[PieceKind::O, PieceKind::T]);
        // O at x=4 falls to y=18
        for _ in 0..18 {
            assert!(state.move_piece(Direction::Down));
        }
        assert_eq!(state.position, Position::new(4, 18));
        assert!(state.board.is_empty());

        assert!(state.move_piece(Direction::Down));
        assert_eq!(state.board.occupied_count(), 4);
        assert!(state.board.is_occupied(4, 19));
        assert!(state.board.is_occupied(5, 18));
        assert_eq!(state.position, SPAWN_POSITION);
        assert_eq!(state.current.kind, PieceKind::T);
        assert_eq!(state.lines_cleared, 0);
    }

    #[test]
    fn test_hard_drop_scores_and_locks() {
        let mut state = started(&[PieceKind::T]);
        assert!(state.move_piece(Direction::Drop));
        assert_eq!(state.score, HARD_DROP_POINTS);
        assert!(state.board.is_occupied(5, (BOARD_HEIGHT - 1) as i8));
        assert_eq!(state.position, SPAWN_POSITION);
        assert_eq!(
            state.take_events(),
            vec![GameEvent::ScoreUpdated {
                score: 2,
                increase: 2,
                level: 1
            }]
        );
    }

    #[test]
    fn test_lock_scores_by_level_before_lock() {
        let mut state = started(&[PieceKind::I]);
        // Nine lines already, level 1; bottom row missing x = 0..=3
        state.lines = 9;
        for x in 4..10 {
            state.board.set(x, 19, Some(PieceKind::Z));
        }
        state.move_piece(Direction::Left);
        state.move_piece(Direction::Left);
        state.move_piece(Direction::Left);
        state.move_piece(Direction::Left);
        assert_eq!(state.position.x, 0);

        state.move_piece(Direction::Drop);
        assert_eq!(state.lines, 10);
        assert_eq!(state.level, 2);
        assert_eq!(state.lines_cleared, 1);
        // 100 * level 1 + hard drop
        assert_eq!(state.score, 100 + HARD_DROP_POINTS);
        assert!(state.board.is_empty());

        assert_eq!(
            state.take_events(),
            vec![
                GameEvent::RowsCleared {
                    count: 1,
                    lines: 10,
                    level: 2
                },
                GameEvent::LevelUp {
                    level: 2,
                    lines: 10
                },
                GameEvent::ScoreUpdated {
                    score: 102,
                    increase: 102,
                    level: 2
                },
            ]
        );
    }

    #[test]
    fn test_game_over_when_spawn_blocked() {
        let mut state = started(&[PieceKind::O]);
        // Stack O pieces in the spawn columns until the spawn is blocked
        let mut drops = 0;
        while !state.game_over {
            state.move_piece(Direction::Drop);
            drops += 1;
            assert!(drops <= 10);
        }
        assert_eq!(drops, 10);
        assert_eq!(state.phase(), GamePhase::GameOver);
        let events = state.take_events();
        assert!(matches!(events.last(), Some(GameEvent::GameOver { .. })));
    }

    #[test]
    fn test_game_over_is_terminal() {
        let mut state = started(&[PieceKind::O]);
        while !state.game_over {
            state.move_piece(Direction::Drop);
        }
        let before = state.snapshot();
        for direction in [Direction::Left, Direction::Right, Direction::Down, Direction::Drop] {
            assert!(!state.move_piece(direction));
        }
        assert!(!state.rotate());
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_pause_blocks_moves() {
        let mut state = started(&[PieceKind::T]);
        assert!(state.toggle_pause());
        assert!(!state.move_piece(Direction::Left));
        assert!(!state.rotate());
        assert_eq!(state.position, SPAWN_POSITION);
        assert!(state.toggle_pause());
        assert!(state.move_piece(Direction::Left));
        assert_eq!(
            state.take_events(),
            vec![GameEvent::Paused, GameEvent::Resumed]
        );
    }

    #[test]
    fn test_reset_returns_to_not_started() {
        let mut state = started(&[PieceKind::T]);
        state.move_piece(Direction::Drop);
        state.reset_game();
        assert_eq!(state.phase(), GamePhase::NotStarted);
        assert_eq!(state.score, 0);
        assert!(state.board.is_empty());
        assert_eq!(state.take_events().last(), Some(&GameEvent::NewGame));
    }

    #[test]
    fn test_finish_match_pauses() {
        let mut state = started(&[PieceKind::T]);
        assert!(state.finish_match());
        assert!(state.paused);
        assert_eq!(
            state.take_events(),
            vec![GameEvent::TimeUp {
                score: 0,
                level: 1,
                lines: 0
            }]
        );

        let mut idle = GameState::new(3);
        assert!(!idle.finish_match());
    }

    #[test]
    fn test_start_with_blocked_board_ends_immediately() {
        let mut board = Board::new();
        for x in 0..10 {
            board.set(x, 0, Some(PieceKind::Z));
            board.set(x, 1, Some(PieceKind::Z));
        }
        let mut state = GameState::with_generator(PieceGenerator::cycle(&[PieceKind::O]));
        state.start_with_board(board);
        assert!(state.game_over);
    }

    #[test]
    fn test_render_board_does_not_touch_board() {
        let state = started(&[PieceKind::T]);
        let shown = state.render_board();
        assert_eq!(shown.occupied_count(), 4);
        assert!(state.board.is_empty());
    }
}
