use log::error;

use super::board::{Board, Color, Position};
use super::state::GameState;
use super::validator::{is_legal_move_in, ValidationMode};

/// Whether `color`'s king is attacked on `board`.
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    match board.find_king(color) {
        Some(king) => is_square_attacked(board, king, color.opponent()),
        None => {
            error!("No {} king on the board; treating it as not in check", color);
            false
        }
    }
}

/// Whether any `attacker` piece could move onto `target`.
pub fn is_square_attacked(board: &Board, target: Position, attacker: Color) -> bool {
    // Neutral state: no castling, no en passant, attacker to move.
    let scan = GameState::from_board(*board, attacker);
    board
        .pieces()
        .filter(|(_, piece)| piece.color == attacker)
        .any(|(from, _)| is_legal_move_in(&scan, from, target, attacker, ValidationMode::ThreatScan))
}
