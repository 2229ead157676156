use super::board::{Color, Piece, PieceKind, Position};
use super::check::is_king_in_check;
use super::state::{CastlingSide, GameState};

/// Whether `color` may castle towards `side` in `state`.
///
/// The king's transit and landing squares must not be attacked. The rook's
/// own transit square (b1/b8 on the queenside) only has to be empty.
pub fn can_castle(state: &GameState, color: Color, side: CastlingSide) -> bool {
    let board = &state.board;
    let row = color.home_row();
    let king_home = Position::new(row, 4);
    let rook_home = Position::new(row, side.rook_col());
    let king = Piece::new(PieceKind::King, color);

    if state.castling.king_moved(color) || state.castling.rook_moved(color, side) {
        return false;
    }
    if board.get(king_home) != Some(king)
        || board.get(rook_home) != Some(Piece::new(PieceKind::Rook, color))
    {
        return false;
    }
    if !board.is_path_clear(king_home, rook_home) {
        return false;
    }
    if is_king_in_check(board, color) {
        return false;
    }

    let step: i8 = match side {
        CastlingSide::Kingside => 1,
        CastlingSide::Queenside => -1,
    };
    for distance in [step, 2 * step] {
        let square = match king_home.offset(0, distance) {
            Some(square) => square,
            None => return false,
        };
        let mut scratch = *board;
        scratch.set(king_home, None);
        scratch.set(square, Some(king));
        if is_king_in_check(&scratch, color) {
            return false;
        }
    }

    true
}
