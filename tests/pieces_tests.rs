//! Piece catalog and placement tests

use blocktris::core::{can_place, drop_position, place, rotate_with_kicks, tetromino, Board, Tetromino};
use blocktris::types::{PieceKind, Position, BOARD_HEIGHT, BOARD_WIDTH};

fn orientations(kind: PieceKind) -> Vec<Tetromino> {
    let mut out = vec![tetromino(kind)];
    for _ in 0..3 {
        let last = out[out.len() - 1];
        out.push(last.rotated());
    }
    out
}

#[test]
fn test_piece_colors() {
    let expected = [
        (PieceKind::I, "#00F0F0"),
        (PieceKind::J, "#0000F0"),
        (PieceKind::L, "#F0A000"),
        (PieceKind::O, "#F0F000"),
        (PieceKind::S, "#00F000"),
        (PieceKind::T, "#A000F0"),
        (PieceKind::Z, "#F00000"),
    ];
    for (kind, color) in expected {
        assert_eq!(tetromino(kind).color(), color);
    }
}

#[test]
fn test_o_rotation_is_fixed_point() {
    let o = tetromino(PieceKind::O);
    assert_eq!(o.rotated(), o);
}

#[test]
fn test_rotation_order_four() {
    for kind in PieceKind::ALL {
        let piece = tetromino(kind);
        let turned = piece.rotated().rotated().rotated().rotated();
        assert_eq!(turned, piece, "{kind:?}");
        if kind != PieceKind::O {
            assert_ne!(piece.rotated(), piece, "{kind:?}");
        }
    }
}

#[test]
fn test_rotation_keeps_four_minos() {
    for kind in PieceKind::ALL {
        for piece in orientations(kind) {
            assert_eq!(piece.minos().len(), 4);
        }
    }
}

#[test]
fn test_placed_piece_blocks_itself() {
    // Wherever a piece fits, placing it makes the same spot invalid unless
    // the piece is entirely above the board.
    let board = Board::new();
    for kind in PieceKind::ALL {
        for piece in orientations(kind) {
            for y in -4..BOARD_HEIGHT as i8 {
                for x in -3..BOARD_WIDTH as i8 {
                    let pos = Position::new(x, y);
                    if !can_place(&board, &piece, pos) {
                        continue;
                    }
                    let placed = place(&board, &piece, pos);
                    let above = piece.minos().iter().all(|&(_, dy)| y + dy < 0);
                    assert_eq!(
                        can_place(&placed, &piece, pos),
                        above,
                        "{kind:?} at ({x}, {y})"
                    );
                }
            }
        }
    }
}

#[test]
fn test_place_writes_kind() {
    let board = Board::new();
    let piece = tetromino(PieceKind::L);
    let placed = place(&board, &piece, Position::new(0, 0));
    // L: ..X / XXX
    assert_eq!(placed.get(2, 0), Some(Some(PieceKind::L)));
    for x in 0..3 {
        assert_eq!(placed.get(x, 1), Some(Some(PieceKind::L)));
    }
    assert_eq!(placed.occupied_count(), 4);
    assert!(board.is_empty());
}

#[test]
fn test_rotation_in_open_space_keeps_position() {
    let board = Board::new();
    let piece = tetromino(PieceKind::T);
    let pos = Position::new(4, 8);
    let (rotated, at) = rotate_with_kicks(&board, &piece, pos).unwrap();
    assert_eq!(at, pos);
    assert_eq!(rotated, piece.rotated());
}

#[test]
fn test_rotation_kicks_off_right_wall() {
    let board = Board::new();
    // Vertical I in board column 9 (matrix column 2)
    let vertical = tetromino(PieceKind::I).rotated();
    let pos = Position::new(7, 5);
    assert!(can_place(&board, &vertical, pos));

    let (_, at) = rotate_with_kicks(&board, &vertical, pos).unwrap();
    // Horizontal I spans x..x+3: in place and (+1,0) overhang, (-1,0) fits
    assert_eq!(at, Position::new(6, 5));
}

#[test]
fn test_drop_position_stops_on_stack() {
    let mut board = Board::new();
    for x in 0..10 {
        board.set(x, 15, Some(PieceKind::Z));
    }
    let piece = tetromino(PieceKind::O);
    let landed = drop_position(&board, &piece, Position::new(4, 0));
    assert_eq!(landed, Position::new(4, 13));
    // Already resting: stays put
    assert_eq!(drop_position(&board, &piece, landed), landed);
}
