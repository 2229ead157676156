use super::board::{Board, Color, Piece, PieceKind, Position};
use super::castling::can_castle;
use super::check::is_king_in_check;
use super::state::{CastlingSide, GameState};
use super::transition::relocate;

/// How a legality query is being asked.
///
/// `ThreatScan` only answers "does this piece attack that square": it skips
/// the turn check and the own-king test, and never considers castling.
/// Check detection always asks in this mode, which is what keeps castling
/// legality (which asks about check) from recursing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    Normal,
    ThreatScan,
}

/// Full legality of moving the piece on `from` to `to` for `color`.
pub fn is_legal_move(state: &GameState, from: Position, to: Position, color: Color) -> bool {
    is_legal_move_in(state, from, to, color, ValidationMode::Normal)
}

pub fn is_legal_move_in(
    state: &GameState,
    from: Position,
    to: Position,
    color: Color,
    mode: ValidationMode,
) -> bool {
    if !from.is_valid() || !to.is_valid() {
        return false;
    }

    let piece = match state.board.get(from) {
        Some(piece) => piece,
        None => return false,
    };
    if piece.color != color {
        return false;
    }
    if mode == ValidationMode::Normal && piece.color != state.current_turn {
        return false;
    }
    if let Some(target) = state.board.get(to) {
        if target.color == piece.color {
            return false;
        }
    }

    if !is_piece_move(state, from, to, piece, mode) {
        return false;
    }

    match mode {
        ValidationMode::ThreatScan => true,
        ValidationMode::Normal => {
            let mut scratch = state.board;
            relocate(&mut scratch, from, to, state.en_passant_target);
            !is_king_in_check(&scratch, piece.color)
        }
    }
}

/// Movement rules of the piece itself, ignoring own-king safety.
fn is_piece_move(
    state: &GameState,
    from: Position,
    to: Position,
    piece: Piece,
    mode: ValidationMode,
) -> bool {
    let board = &state.board;
    match piece.kind {
        PieceKind::Pawn => is_pawn_move(state, from, to, piece.color),
        PieceKind::Rook => is_rook_move(board, from, to),
        PieceKind::Knight => is_knight_move(from, to),
        PieceKind::Bishop => is_bishop_move(board, from, to),
        PieceKind::Queen => is_rook_move(board, from, to) || is_bishop_move(board, from, to),
        PieceKind::King => is_king_move(state, from, to, piece.color, mode),
    }
}

fn deltas(from: Position, to: Position) -> (i8, i8) {
    (to.row as i8 - from.row as i8, to.col as i8 - from.col as i8)
}

fn is_pawn_move(state: &GameState, from: Position, to: Position, color: Color) -> bool {
    let board = &state.board;
    let direction = color.pawn_direction();
    let (d_row, d_col) = deltas(from, to);

    if d_col == 0 && d_row == direction {
        return board.is_empty_at(to);
    }

    if d_col == 0 && d_row == 2 * direction && from.row == color.pawn_start_row() {
        let jumped = match from.offset(direction, 0) {
            Some(pos) => pos,
            None => return false,
        };
        return board.is_empty_at(jumped) && board.is_empty_at(to);
    }

    if d_col.abs() == 1 && d_row == direction {
        return match board.get(to) {
            Some(target) => target.color != color,
            None => state.en_passant_target == Some(to),
        };
    }

    false
}

fn is_rook_move(board: &Board, from: Position, to: Position) -> bool {
    if from.row != to.row && from.col != to.col {
        return false;
    }
    board.is_path_clear(from, to)
}

fn is_bishop_move(board: &Board, from: Position, to: Position) -> bool {
    let (d_row, d_col) = deltas(from, to);
    if d_row == 0 || d_row.abs() != d_col.abs() {
        return false;
    }
    board.is_path_clear(from, to)
}

fn is_knight_move(from: Position, to: Position) -> bool {
    let (d_row, d_col) = deltas(from, to);
    matches!((d_row.abs(), d_col.abs()), (1, 2) | (2, 1))
}

fn is_king_move(
    state: &GameState,
    from: Position,
    to: Position,
    color: Color,
    mode: ValidationMode,
) -> bool {
    let (d_row, d_col) = deltas(from, to);

    if d_row.abs() <= 1 && d_col.abs() <= 1 {
        return true;
    }

    if d_row == 0 && d_col.abs() == 2 {
        return match mode {
            ValidationMode::ThreatScan => false,
            ValidationMode::Normal => {
                can_castle(state, color, CastlingSide::from_king_move(from, to))
            }
        };
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::state::initial_state;

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col)
    }

    fn place(board: &mut Board, at: Position, kind: PieceKind, color: Color) {
        board.set(at, Some(Piece::new(kind, color)));
    }

    #[test]
    fn opening_pawn_moves() {
        let state = initial_state();
        assert!(is_legal_move(&state, pos(6, 4), pos(5, 4), Color::White));
        assert!(is_legal_move(&state, pos(6, 4), pos(4, 4), Color::White));
        assert!(!is_legal_move(&state, pos(6, 4), pos(3, 4), Color::White));
        // no diagonal step onto an empty square
        assert!(!is_legal_move(&state, pos(6, 4), pos(5, 5), Color::White));
    }

    #[test]
    fn wrong_color_or_turn_is_rejected() {
        let state = initial_state();
        // white piece, black acting
        assert!(!is_legal_move(&state, pos(6, 4), pos(5, 4), Color::Black));
        // black piece on white's turn
        assert!(!is_legal_move(&state, pos(1, 4), pos(2, 4), Color::Black));
        // empty origin
        assert!(!is_legal_move(&state, pos(4, 4), pos(3, 4), Color::White));
    }

    #[test]
    fn threat_scan_ignores_turn() {
        let state = initial_state();
        assert!(is_legal_move_in(
            &state,
            pos(1, 4),
            pos(2, 4),
            Color::Black,
            ValidationMode::ThreatScan
        ));
    }

    #[test]
    fn pieces_cannot_land_on_their_own_side() {
        let state = initial_state();
        assert!(!is_legal_move(&state, pos(7, 0), pos(6, 0), Color::White));
        assert!(!is_legal_move(&state, pos(7, 4), pos(7, 3), Color::White));
    }

    #[test]
    fn knight_jumps_over_pieces() {
        let state = initial_state();
        assert!(is_legal_move(&state, pos(7, 6), pos(5, 5), Color::White));
        assert!(is_legal_move(&state, pos(7, 6), pos(5, 7), Color::White));
        assert!(!is_legal_move(&state, pos(7, 6), pos(5, 6), Color::White));
    }

    #[test]
    fn sliders_are_blocked() {
        let state = initial_state();
        assert!(!is_legal_move(&state, pos(7, 2), pos(5, 4), Color::White));
        assert!(!is_legal_move(&state, pos(7, 3), pos(4, 3), Color::White));
    }

    #[test]
    fn pinned_piece_cannot_expose_king() {
        let mut board = Board::empty();
        place(&mut board, pos(7, 4), PieceKind::King, Color::White);
        place(&mut board, pos(6, 4), PieceKind::Rook, Color::White);
        place(&mut board, pos(0, 4), PieceKind::Rook, Color::Black);
        place(&mut board, pos(0, 0), PieceKind::King, Color::Black);
        let state = GameState::from_board(board, Color::White);

        // sliding along the pin is fine, stepping off it is not
        assert!(is_legal_move(&state, pos(6, 4), pos(3, 4), Color::White));
        assert!(is_legal_move(&state, pos(6, 4), pos(0, 4), Color::White));
        assert!(!is_legal_move(&state, pos(6, 4), pos(6, 0), Color::White));
    }

    #[test]
    fn king_cannot_step_into_attack() {
        let mut board = Board::empty();
        place(&mut board, pos(7, 4), PieceKind::King, Color::White);
        place(&mut board, pos(0, 3), PieceKind::Rook, Color::Black);
        place(&mut board, pos(0, 7), PieceKind::King, Color::Black);
        let state = GameState::from_board(board, Color::White);

        assert!(!is_legal_move(&state, pos(7, 4), pos(7, 3), Color::White));
        assert!(is_legal_move(&state, pos(7, 4), pos(7, 5), Color::White));
    }

    #[test]
    fn en_passant_needs_exact_target() {
        let mut board = Board::empty();
        place(&mut board, pos(7, 4), PieceKind::King, Color::White);
        place(&mut board, pos(0, 4), PieceKind::King, Color::Black);
        place(&mut board, pos(3, 4), PieceKind::Pawn, Color::White);
        place(&mut board, pos(3, 3), PieceKind::Pawn, Color::Black);
        let mut state = GameState::from_board(board, Color::White);

        assert!(!is_legal_move(&state, pos(3, 4), pos(2, 3), Color::White));
        state.en_passant_target = Some(pos(2, 3));
        assert!(is_legal_move(&state, pos(3, 4), pos(2, 3), Color::White));
        // the other diagonal is still an empty square
        assert!(!is_legal_move(&state, pos(3, 4), pos(2, 5), Color::White));
    }

    #[test]
    fn en_passant_cannot_uncover_rank_attack() {
        // king and enemy rook share the rank with both pawns between them
        let mut board = Board::empty();
        place(&mut board, pos(3, 0), PieceKind::King, Color::White);
        place(&mut board, pos(3, 1), PieceKind::Pawn, Color::White);
        place(&mut board, pos(3, 2), PieceKind::Pawn, Color::Black);
        place(&mut board, pos(3, 7), PieceKind::Rook, Color::Black);
        place(&mut board, pos(0, 4), PieceKind::King, Color::Black);
        let mut state = GameState::from_board(board, Color::White);
        state.en_passant_target = Some(pos(2, 2));

        assert!(!is_legal_move(&state, pos(3, 1), pos(2, 2), Color::White));
    }

    #[test]
    fn king_castle_branch_is_off_in_threat_scan() {
        let mut board = Board::initial();
        board.set(pos(7, 5), None);
        board.set(pos(7, 6), None);
        let state = GameState::from_board(board, Color::White);

        assert!(is_legal_move(&state, pos(7, 4), pos(7, 6), Color::White));
        assert!(!is_legal_move_in(
            &state,
            pos(7, 4),
            pos(7, 6),
            Color::White,
            ValidationMode::ThreatScan
        ));
    }

    #[test]
    fn off_board_squares_are_rejected() {
        let state = initial_state();
        assert!(!is_legal_move(&state, pos(6, 4), pos(8, 4), Color::White));
        assert!(!is_legal_move(&state, pos(9, 9), pos(5, 4), Color::White));
    }
}
