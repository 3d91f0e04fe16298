//! Pieces module - the tetromino catalog
//!
//! Each kind is an N x N matrix of 0/1 markers (N = 2, 3 or 4) plus the
//! kind's color. Pieces are `Copy` values; rotating returns a new piece.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// Offset of a filled cell relative to the matrix origin, as (x, y)
pub type MinoOffset = (i8, i8);

/// Largest matrix side in the catalog
const MAX_SIZE: usize = 4;

/// Square shape matrix, stored padded to 4x4
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    cells: [[u8; MAX_SIZE]; MAX_SIZE],
}

impl Shape {
    /// `rows[y][x]`, only the top-left `size` x `size` block is used.
    pub const fn new(size: u8, rows: [[u8; MAX_SIZE]; MAX_SIZE]) -> Self {
        Self { size, cells: rows }
    }

    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Marker at row `y`, column `x`
    pub fn at(&self, x: usize, y: usize) -> u8 {
        self.cells[y][x]
    }

    /// Rows of the N x N matrix
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        let n = self.size();
        self.cells[..n].iter().map(move |row| &row[..n])
    }

    /// 90° clockwise: `new[x][N-1-y] = old[y][x]`
    pub fn rotated_cw(&self) -> Self {
        let n = self.size();
        let mut out = [[0u8; MAX_SIZE]; MAX_SIZE];
        for y in 0..n {
            for x in 0..n {
                out[x][n - 1 - y] = self.cells[y][x];
            }
        }
        Self {
            size: self.size,
            cells: out,
        }
    }

    /// Offsets of every filled cell, row by row
    pub fn minos(&self) -> ArrayVec<MinoOffset, 16> {
        let n = self.size();
        let mut out = ArrayVec::new();
        for y in 0..n {
            for x in 0..n {
                if self.cells[y][x] != 0 {
                    out.push((x as i8, y as i8));
                }
            }
        }
        out
    }
}

const I_SHAPE: Shape = Shape::new(4, [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]);
const J_SHAPE: Shape = Shape::new(3, [[1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
const L_SHAPE: Shape = Shape::new(3, [[0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
const O_SHAPE: Shape = Shape::new(2, [[1, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
const S_SHAPE: Shape = Shape::new(3, [[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
const T_SHAPE: Shape = Shape::new(3, [[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
const Z_SHAPE: Shape = Shape::new(3, [[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);

/// Spawn-orientation shape of a kind
pub fn spawn_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::Z => Z_SHAPE,
    }
}

/// A piece: its kind (which fixes the color) and current shape matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub shape: Shape,
}

impl Tetromino {
    /// Catalog piece in spawn orientation
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: spawn_shape(kind),
        }
    }

    pub fn color(&self) -> &'static str {
        self.kind.color_hex()
    }

    pub fn minos(&self) -> ArrayVec<MinoOffset, 16> {
        self.shape.minos()
    }

    /// The piece turned 90° clockwise. The O piece is its own rotation.
    ///
    /// Board validity is not checked here; see
    /// [`rotate_with_kicks`](crate::placement::rotate_with_kicks).
    pub fn rotated(&self) -> Self {
        if self.kind == PieceKind::O {
            return *self;
        }
        Self {
            kind: self.kind,
            shape: self.shape.rotated_cw(),
        }
    }
}

/// Catalog lookup
pub fn tetromino(kind: PieceKind) -> Tetromino {
    Tetromino::new(kind)
}
