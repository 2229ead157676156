use chess_rooms::engine::{apply_move_at, GameState, Position};

/// Algebraic square name to board position, e.g. `e2` is row 6 col 4.
#[allow(dead_code)]
pub fn sq(name: &str) -> Position {
    let bytes = name.as_bytes();
    assert_eq!(bytes.len(), 2, "bad square {}", name);
    let col = bytes[0] - b'a';
    let rank = bytes[1] - b'0';
    Position::new(8 - rank, col)
}

/// Apply a sequence of `from-to` moves, asserting each one is legal first.
#[allow(dead_code)]
pub fn play(state: &GameState, moves: &[&str]) -> GameState {
    let mut state = state.clone();
    for (index, mv) in moves.iter().enumerate() {
        let (from, to) = mv.split_once('-').expect("moves look like e2-e4");
        let (from, to) = (sq(from), sq(to));
        assert!(
            chess_rooms::engine::is_legal_move(&state, from, to, state.current_turn),
            "move {} ({}) rejected",
            index + 1,
            mv
        );
        state = apply_move_at(&state, from, to, None, index as i64);
    }
    state
}
