//! Chess rules: board primitives, move legality, check detection and the
//! state transition that produces each new game snapshot.

pub mod board;
pub mod castling;
pub mod check;
pub mod fen;
pub mod game_over;
pub mod state;
pub mod transition;
pub mod validator;

pub use board::{Board, Color, Piece, PieceKind, Position, Promotion};
pub use castling::can_castle;
pub use check::{is_king_in_check, is_square_attacked};
pub use game_over::{has_legal_moves, legal_destinations, legal_moves};
pub use state::{
    initial_state, CastlingRights, CastlingSide, GameOutcome, GameOverReason, GameState,
    MoveRecord, Winner,
};
pub use transition::{apply_move, apply_move_at};
pub use validator::{is_legal_move, is_legal_move_in, ValidationMode};
