//! Board module - the 10x20 playfield
//!
//! Cells live in a flat row-major array (`y * WIDTH + x`), row 0 at the top.
//! Operations that produce a new board return an owned copy, so a board handed
//! out earlier is never changed behind its holder's back.

use crate::types::{cell_color, Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// The game board - 10 columns x 20 rows
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Cell at (x, y), or `None` when out of range
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Write a cell; returns false when (x, y) is out of range
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// In range and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Display color of (x, y); out-of-range reads as empty
    pub fn color_at(&self, x: i8, y: i8) -> &'static str {
        cell_color(self.get(x, y).flatten())
    }

    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * WIDTH;
        &self.cells[start..start + WIDTH]
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(WIDTH)
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        y < HEIGHT && self.row(y).iter().all(|cell| cell.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_none())
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Remove every complete row and return the compacted board with the
    /// number of rows removed.
    ///
    /// Rows are scanned bottom to top; incomplete rows keep their relative
    /// order and settle toward the bottom, and the vacated rows at the top
    /// are empty. `self` is left untouched.
    pub fn clear_lines(&self) -> (Board, usize) {
        let mut out = Board::new();
        let mut cleared = 0usize;
        let mut write_y = HEIGHT;

        for read_y in (0..HEIGHT).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
                continue;
            }
            write_y -= 1;
            let src = read_y * WIDTH;
            let dst = write_y * WIDTH;
            out.cells[dst..dst + WIDTH].copy_from_slice(&self.cells[src..src + WIDTH]);
        }

        (out, cleared)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Build a board from text rows (top to bottom), `.` for empty and a
    /// piece letter for a filled cell. Missing rows at the top are empty.
    #[cfg(test)]
    pub fn from_rows(rows: &[&str]) -> Self {
        use crate::types::PieceKind;

        assert!(rows.len() <= HEIGHT);
        let mut board = Board::new();
        let top = HEIGHT - rows.len();
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), WIDTH, "row {i} must be {WIDTH} wide");
            for (x, ch) in row.chars().enumerate() {
                if ch != '.' {
                    let kind = PieceKind::from_str(&ch.to_string()).unwrap_or(PieceKind::I);
                    board.set(x as i8, (top + i) as i8, Some(kind));
                }
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
