use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::{Color, GameState};

pub type RoomId = String;
pub type PlayerId = String;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub color: Color,
    pub name: String,
}

/// A game table with at most two seated players.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,
    /// White first whenever white is seated.
    pub players: Vec<Player>,
    pub game_state: GameState,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
}

impl Room {
    pub fn new(id: RoomId, creator_id: &str, creator_name: &str) -> Self {
        Room {
            id,
            players: vec![Player {
                id: creator_id.to_string(),
                color: Color::White,
                name: creator_name.to_string(),
            }],
            game_state: GameState::initial(),
            created_at: Utc::now().timestamp_millis(),
        }
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|player| player.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// The color a newcomer would get: white if that seat is free, else black.
    pub fn vacant_color(&self) -> Option<Color> {
        [Color::White, Color::Black]
            .into_iter()
            .find(|color| self.players.iter().all(|player| player.color != *color))
    }

    /// Seat a player, keeping white ahead of black in the list.
    pub fn seat(&mut self, player: Player) {
        match player.color {
            Color::White => self.players.insert(0, player),
            Color::Black => self.players.push(player),
        }
    }

    /// Remove a player, returning them if they were seated here.
    pub fn unseat(&mut self, id: &str) -> Option<Player> {
        let index = self.players.iter().position(|player| player.id == id)?;
        Some(self.players.remove(index))
    }

    pub fn member_ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|player| player.id.clone()).collect()
    }
}

/// Random uppercase alphanumeric room code.
pub fn random_room_code(length: usize) -> RoomId {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(|byte| char::from(byte).to_ascii_uppercase())
        .collect()
}
