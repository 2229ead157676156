use super::board::{Color, Position};
use super::state::GameState;
use super::validator::is_legal_move;

/// Whether `color` has at least one legal move. Stops at the first one found.
pub fn has_legal_moves(state: &GameState, color: Color) -> bool {
    state
        .board
        .pieces()
        .filter(|(_, piece)| piece.color == color)
        .any(|(from, _)| Position::all().any(|to| is_legal_move(state, from, to, color)))
}

/// Squares the piece on `from` can legally move to, for highlighting.
pub fn legal_destinations(state: &GameState, from: Position) -> Vec<Position> {
    match state.board.get(from) {
        Some(piece) => Position::all()
            .filter(|&to| is_legal_move(state, from, to, piece.color))
            .collect(),
        None => Vec::new(),
    }
}

/// Every legal `(from, to)` pair for the side to move. A promotion counts once.
pub fn legal_moves(state: &GameState) -> Vec<(Position, Position)> {
    let color = state.current_turn;
    state
        .board
        .pieces()
        .filter(|(_, piece)| piece.color == color)
        .flat_map(|(from, _)| {
            Position::all()
                .filter(move |&to| is_legal_move(state, from, to, color))
                .map(move |to| (from, to))
        })
        .collect()
}
