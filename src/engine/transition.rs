use chrono::Utc;
use log::error;

use super::board::{Board, Piece, PieceKind, Position, Promotion};
use super::check::is_king_in_check;
use super::game_over::has_legal_moves;
use super::state::{CastlingRights, CastlingSide, GameState, MoveRecord};

/// What moving a piece did to the board besides relocating it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Displacement {
    pub captured: Option<Piece>,
    pub is_en_passant: bool,
    pub is_castling: bool,
}

/// Move the piece on `from` to `to`, removing an en-passant victim and
/// carrying the rook along when a king castles. No promotion, no flags.
pub(crate) fn relocate(
    board: &mut Board,
    from: Position,
    to: Position,
    en_passant_target: Option<Position>,
) -> Displacement {
    let piece = match board.take(from) {
        Some(piece) => piece,
        None => return Displacement::default(),
    };
    let mut displacement = Displacement {
        captured: board.get(to),
        ..Displacement::default()
    };

    if piece.kind == PieceKind::Pawn && en_passant_target == Some(to) {
        if let Some(victim) = to.offset(-piece.color.pawn_direction(), 0) {
            displacement.captured = board.take(victim);
            displacement.is_en_passant = true;
        }
    }

    if piece.kind == PieceKind::King && (to.col as i8 - from.col as i8).abs() == 2 {
        let side = CastlingSide::from_king_move(from, to);
        let rook = board.take(Position::new(from.row, side.rook_col()));
        board.set(Position::new(from.row, side.rook_target_col()), rook);
        displacement.is_castling = true;
    }

    board.set(to, Some(piece));
    displacement
}

/// Apply an already validated move, stamping the record with the current time.
pub fn apply_move(
    state: &GameState,
    from: Position,
    to: Position,
    promotion: Option<Promotion>,
) -> GameState {
    apply_move_at(state, from, to, promotion, Utc::now().timestamp_millis())
}

/// Same as [`apply_move`] with an explicit record timestamp, so identical
/// inputs always give an identical state.
pub fn apply_move_at(
    state: &GameState,
    from: Position,
    to: Position,
    promotion: Option<Promotion>,
    timestamp: i64,
) -> GameState {
    let piece = match state.board.get(from) {
        Some(piece) if to.is_valid() => piece,
        _ => {
            error!("apply_move called without a piece to move from {} to {}", from, to);
            return state.clone();
        }
    };

    let mut board = state.board;
    let displacement = relocate(&mut board, from, to, state.en_passant_target);

    let mut promoted = None;
    if piece.kind == PieceKind::Pawn && to.row == piece.color.promotion_row() {
        let kind = PieceKind::from(promotion.unwrap_or_default());
        board.set(to, Some(Piece::new(kind, piece.color)));
        promoted = Some(kind);
    }

    let en_passant_target = if piece.kind == PieceKind::Pawn && from.row.abs_diff(to.row) == 2 {
        Some(Position::new((from.row + to.row) / 2, from.col))
    } else {
        None
    };

    let mut move_history = state.move_history.clone();
    move_history.push(MoveRecord {
        from,
        to,
        piece,
        captured: displacement.captured,
        is_en_passant: displacement.is_en_passant,
        is_castling: displacement.is_castling,
        promotion: promoted,
        timestamp,
    });

    let castling = updated_rights(state.castling, piece, from, to, displacement.captured);
    let side_to_move = piece.color.opponent();

    let mut next = GameState {
        board,
        current_turn: side_to_move,
        move_history,
        is_check: is_king_in_check(&board, side_to_move),
        is_checkmate: false,
        is_stalemate: false,
        castling,
        en_passant_target,
    };

    let can_reply = has_legal_moves(&next, side_to_move);
    next.is_checkmate = next.is_check && !can_reply;
    next.is_stalemate = !next.is_check && !can_reply;
    next
}

fn updated_rights(
    mut rights: CastlingRights,
    piece: Piece,
    from: Position,
    to: Position,
    captured: Option<Piece>,
) -> CastlingRights {
    match piece.kind {
        PieceKind::King if from == Position::new(piece.color.home_row(), 4) => {
            rights.mark_king_moved(piece.color);
        }
        PieceKind::Rook => {
            if let Some((color, side)) = CastlingRights::corner(from) {
                if color == piece.color {
                    rights.mark_rook_moved(color, side);
                }
            }
        }
        _ => {}
    }

    // A rook taken on its corner can never castle again either.
    if let Some(Piece { kind: PieceKind::Rook, color }) = captured {
        if let Some((corner_color, side)) = CastlingRights::corner(to) {
            if corner_color == color {
                rights.mark_rook_moved(color, side);
            }
        }
    }

    rights
}
