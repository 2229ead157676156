use crate::engine::{GameState, Winner};

/// Get the game status as a string
pub fn get_game_status(state: &GameState) -> String {
    if let Some(outcome) = state.outcome() {
        match outcome.winner {
            Winner::White => "white_wins".to_string(),
            Winner::Black => "black_wins".to_string(),
            Winner::Draw => "draw".to_string(),
        }
    } else if state.is_check {
        "check".to_string()
    } else {
        format!("{}_turn", state.current_turn)
    }
}
