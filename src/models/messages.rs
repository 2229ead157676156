use actix::Message;
use serde::{Deserialize, Serialize};

use crate::engine::{GameOverReason, GameState, PieceKind, Position, Winner};
use crate::session::{Player, PlayerId, Room, RoomId};

/// Message sent from client to server
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    #[serde(rename_all = "camelCase")]
    CreateRoom { player_name: String },
    #[serde(rename_all = "camelCase")]
    JoinRoom { room_id: RoomId, player_name: String },
    MakeMove {
        from: Position,
        to: Position,
        #[serde(default)]
        promotion: Option<PieceKind>,
    },
    LeaveRoom,
    GetMoves { from: Position },
}

/// Message sent from server to client
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    #[serde(rename_all = "camelCase")]
    RoomCreated { room_id: RoomId },
    RoomJoined { success: bool, room: Option<Room> },
    PlayerJoined { player: Player },
    #[serde(rename = "gameState")]
    StateUpdate {
        state: GameState,
        fen: String,
        status: String,
    },
    #[serde(rename_all = "camelCase")]
    PlayerLeft { player_id: PlayerId },
    GameOver { winner: Winner, reason: GameOverReason },
    AvailableMoves { from: Position, moves: Vec<Position> },
    Error { message: String },
}

impl ServerMessage {
    pub fn error(message: impl Into<String>) -> Self {
        ServerMessage::Error {
            message: message.into(),
        }
    }

    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ServerMessage::RoomCreated { .. } => "roomCreated",
            ServerMessage::RoomJoined { .. } => "roomJoined",
            ServerMessage::PlayerJoined { .. } => "playerJoined",
            ServerMessage::StateUpdate { .. } => "gameState",
            ServerMessage::PlayerLeft { .. } => "playerLeft",
            ServerMessage::GameOver { .. } => "gameOver",
            ServerMessage::AvailableMoves { .. } => "availableMoves",
            ServerMessage::Error { .. } => "error",
        }
    }
}

/// Serialized frame queued for one connection
#[derive(Message)]
#[rtype(result = "()")]
pub struct ChessWebSocketMessage(pub String);
