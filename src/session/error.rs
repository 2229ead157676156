//! Errors reported back to the player whose request failed.
//!
//! None of these change any room: the request is dropped and the player may
//! retry with corrected input.

use crate::engine::{PieceKind, Position};

use super::RoomId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The connection is not seated in any room
    #[error("Not in a room")]
    NotInRoom,

    #[error("Room not found: {room_id}")]
    RoomNotFound { room_id: RoomId },

    #[error("Room is full: {room_id}")]
    RoomFull { room_id: RoomId },

    #[error("Already seated in room {room_id}")]
    AlreadyInRoom { room_id: RoomId },

    #[error("Square is off the board: {position}")]
    OffBoard { position: Position },

    /// Rejected by the move validator
    #[error("Invalid move: {from} to {to}")]
    IllegalMove { from: Position, to: Position },

    #[error("Cannot promote to {kind:?}")]
    InvalidPromotion { kind: PieceKind },
}

pub type SessionResult<T> = Result<T, SessionError>;
