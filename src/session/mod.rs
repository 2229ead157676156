//! Room registry: seats players, runs their moves through the engine and
//! decides who hears about the result.
//!
//! The manager never touches a socket. Every operation returns the
//! [`Delivery`] list the transport must send, in order.

pub mod error;
pub mod room;

use log::{info, warn};
use std::collections::HashMap;

use crate::engine::{
    apply_move, is_legal_move, legal_destinations, Color, PieceKind, Position, Promotion,
};
use crate::game::get_game_status;
use crate::models::ServerMessage;

pub use error::{SessionError, SessionResult};
pub use room::{random_room_code, Player, PlayerId, Room, RoomId};

/// Where a connected player sits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    pub room_id: RoomId,
    pub color: Color,
}

/// One outbound message and the players that should receive it.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub recipients: Vec<PlayerId>,
    pub message: ServerMessage,
}

impl Delivery {
    pub fn to(player: &str, message: ServerMessage) -> Self {
        Delivery {
            recipients: vec![player.to_string()],
            message,
        }
    }

    pub fn to_room(room: &Room, message: ServerMessage) -> Self {
        Delivery {
            recipients: room.member_ids(),
            message,
        }
    }
}

pub struct SessionManager {
    rooms: HashMap<RoomId, Room>,
    seats: HashMap<PlayerId, Seat>,
    room_code_length: usize,
}

impl SessionManager {
    pub fn new(room_code_length: usize) -> Self {
        SessionManager {
            rooms: HashMap::new(),
            seats: HashMap::new(),
            room_code_length: room_code_length.max(1),
        }
    }

    pub fn room(&self, room_id: &str) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn seat(&self, player_id: &str) -> Option<&Seat> {
        self.seats.get(player_id)
    }

    fn unused_room_id(&self) -> RoomId {
        loop {
            let candidate = random_room_code(self.room_code_length);
            if !self.rooms.contains_key(&candidate) {
                return candidate;
            }
            warn!("Room id {} already taken, drawing another", candidate);
        }
    }

    /// Open a room with the requester seated as white. A player already
    /// seated elsewhere leaves that room first.
    pub fn create_room(&mut self, player_id: &str, player_name: &str) -> (RoomId, Vec<Delivery>) {
        let mut deliveries = self.leave_room(player_id);

        let room_id = self.unused_room_id();
        let room = Room::new(room_id.clone(), player_id, player_name);
        self.rooms.insert(room_id.clone(), room);
        self.seats.insert(
            player_id.to_string(),
            Seat {
                room_id: room_id.clone(),
                color: Color::White,
            },
        );
        info!("Room {} created by {} ({})", room_id, player_name, player_id);

        deliveries.push(Delivery::to(
            player_id,
            ServerMessage::RoomCreated {
                room_id: room_id.clone(),
            },
        ));
        (room_id, deliveries)
    }

    /// Take the free seat in `room_id`. The room hears `playerJoined` and the
    /// current state; the joiner also gets the room snapshot.
    pub fn join_room(
        &mut self,
        player_id: &str,
        room_id: &str,
        player_name: &str,
    ) -> SessionResult<(Room, Vec<Delivery>)> {
        let color = {
            let room = self.rooms.get(room_id).ok_or_else(|| SessionError::RoomNotFound {
                room_id: room_id.to_string(),
            })?;
            if room.player(player_id).is_some() {
                return Err(SessionError::AlreadyInRoom {
                    room_id: room_id.to_string(),
                });
            }
            room.vacant_color().ok_or_else(|| SessionError::RoomFull {
                room_id: room_id.to_string(),
            })?
        };

        let mut deliveries = self.leave_room(player_id);

        let room = self
            .rooms
            .get_mut(room_id)
            .ok_or_else(|| SessionError::RoomNotFound {
                room_id: room_id.to_string(),
            })?;
        let player = Player {
            id: player_id.to_string(),
            color,
            name: player_name.to_string(),
        };
        room.seat(player.clone());
        self.seats.insert(
            player_id.to_string(),
            Seat {
                room_id: room_id.to_string(),
                color,
            },
        );
        info!("{} ({}) joined room {} as {}", player_name, player_id, room_id, color);

        let room = room.clone();
        deliveries.push(Delivery::to_room(&room, ServerMessage::PlayerJoined { player }));
        deliveries.push(Delivery::to_room(&room, state_message(&room)));
        deliveries.push(Delivery::to(
            player_id,
            ServerMessage::RoomJoined {
                success: true,
                room: Some(room.clone()),
            },
        ));
        Ok((room, deliveries))
    }

    /// Validate and apply a move for the requester's seat color.
    pub fn make_move(
        &mut self,
        player_id: &str,
        from: Position,
        to: Position,
        promotion: Option<PieceKind>,
    ) -> SessionResult<Vec<Delivery>> {
        let seat = self.seats.get(player_id).ok_or(SessionError::NotInRoom)?;
        on_board(from)?;
        on_board(to)?;
        let room = self
            .rooms
            .get_mut(&seat.room_id)
            .ok_or_else(|| SessionError::RoomNotFound {
                room_id: seat.room_id.clone(),
            })?;

        let promotion = promotion
            .map(|kind| {
                Promotion::try_from(kind).map_err(|kind| SessionError::InvalidPromotion { kind })
            })
            .transpose()?;

        if !is_legal_move(&room.game_state, from, to, seat.color) {
            warn!(
                "Rejected move {} -> {} by {} in room {}",
                from, to, player_id, room.id
            );
            return Err(SessionError::IllegalMove { from, to });
        }

        room.game_state = apply_move(&room.game_state, from, to, promotion);
        info!(
            "Room {}: {} played {} -> {}",
            room.id, seat.color, from, to
        );

        let mut deliveries = vec![Delivery::to_room(room, state_message(room))];
        if let Some(outcome) = room.game_state.outcome() {
            info!(
                "Room {}: game over, winner {:?} by {:?}",
                room.id, outcome.winner, outcome.reason
            );
            deliveries.push(Delivery::to_room(
                room,
                ServerMessage::GameOver {
                    winner: outcome.winner,
                    reason: outcome.reason,
                },
            ));
        }
        Ok(deliveries)
    }

    /// Legal destinations for the piece on `from` in the requester's room.
    pub fn available_moves(&self, player_id: &str, from: Position) -> SessionResult<Delivery> {
        let seat = self.seats.get(player_id).ok_or(SessionError::NotInRoom)?;
        on_board(from)?;
        let room = self
            .rooms
            .get(&seat.room_id)
            .ok_or_else(|| SessionError::RoomNotFound {
                room_id: seat.room_id.clone(),
            })?;
        let moves = legal_destinations(&room.game_state, from);
        Ok(Delivery::to(
            player_id,
            ServerMessage::AvailableMoves { from, moves },
        ))
    }

    /// Vacate the requester's seat. Deletes the room once nobody is left,
    /// otherwise tells the remaining player. A player with no seat is a no-op.
    pub fn leave_room(&mut self, player_id: &str) -> Vec<Delivery> {
        let seat = match self.seats.remove(player_id) {
            Some(seat) => seat,
            None => return Vec::new(),
        };
        let room = match self.rooms.get_mut(&seat.room_id) {
            Some(room) => room,
            None => return Vec::new(),
        };

        room.unseat(player_id);
        info!("{} left room {}", player_id, seat.room_id);

        if room.is_empty() {
            self.rooms.remove(&seat.room_id);
            info!("Room {} deleted", seat.room_id);
            Vec::new()
        } else {
            vec![Delivery::to_room(
                room,
                ServerMessage::PlayerLeft {
                    player_id: player_id.to_string(),
                },
            )]
        }
    }

    /// A dropped connection is handled exactly like an explicit leave.
    pub fn disconnect(&mut self, player_id: &str) -> Vec<Delivery> {
        self.leave_room(player_id)
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        SessionManager::new(6)
    }
}

fn on_board(position: Position) -> SessionResult<()> {
    if position.is_valid() {
        Ok(())
    } else {
        Err(SessionError::OffBoard { position })
    }
}

fn state_message(room: &Room) -> ServerMessage {
    ServerMessage::StateUpdate {
        state: room.game_state.clone(),
        fen: room.game_state.to_fen(),
        status: get_game_status(&room.game_state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{GameOverReason, Winner};

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col)
    }

    fn kinds(deliveries: &[Delivery]) -> Vec<&'static str> {
        deliveries.iter().map(|d| d.message.kind()).collect()
    }

    /// Manager with "white" and "black" seated in one room.
    fn full_room() -> (SessionManager, RoomId) {
        let mut manager = SessionManager::default();
        let (room_id, _) = manager.create_room("white", "Ada");
        manager.join_room("black", &room_id, "Bob").unwrap();
        (manager, room_id)
    }

    #[test]
    fn create_seats_creator_as_white() {
        let mut manager = SessionManager::default();
        let (room_id, deliveries) = manager.create_room("p1", "Ada");

        assert_eq!(room_id.len(), 6);
        assert_eq!(kinds(&deliveries), vec!["roomCreated"]);
        assert_eq!(deliveries[0].recipients, vec!["p1".to_string()]);
        assert_eq!(
            manager.seat("p1"),
            Some(&Seat {
                room_id: room_id.clone(),
                color: Color::White
            })
        );
        assert_eq!(manager.room_count(), 1);
    }

    #[test]
    fn join_seats_black_and_broadcasts() {
        let mut manager = SessionManager::default();
        let (room_id, _) = manager.create_room("p1", "Ada");
        let (room, deliveries) = manager.join_room("p2", &room_id, "Bob").unwrap();

        assert_eq!(room.players.len(), 2);
        assert_eq!(room.players[1].color, Color::Black);
        assert_eq!(
            kinds(&deliveries),
            vec!["playerJoined", "gameState", "roomJoined"]
        );
        assert_eq!(
            deliveries[0].recipients,
            vec!["p1".to_string(), "p2".to_string()]
        );
        assert_eq!(deliveries[2].recipients, vec!["p2".to_string()]);
    }

    #[test]
    fn join_unknown_room_fails() {
        let mut manager = SessionManager::default();
        let err = manager.join_room("p1", "NOPE00", "Ada").unwrap_err();
        assert_eq!(
            err,
            SessionError::RoomNotFound {
                room_id: "NOPE00".to_string()
            }
        );
        assert_eq!(manager.seat("p1"), None);
    }

    #[test]
    fn join_full_room_fails_without_changes() {
        let (mut manager, room_id) = full_room();
        let before = manager.room(&room_id).cloned();

        let err = manager.join_room("p3", &room_id, "Cy").unwrap_err();
        assert_eq!(err, SessionError::RoomFull { room_id: room_id.clone() });
        assert_eq!(manager.room(&room_id).cloned(), before);
        assert_eq!(manager.seat("p3"), None);
    }

    #[test]
    fn joining_own_room_is_refused() {
        let mut manager = SessionManager::default();
        let (room_id, _) = manager.create_room("p1", "Ada");
        assert!(matches!(
            manager.join_room("p1", &room_id, "Ada"),
            Err(SessionError::AlreadyInRoom { .. })
        ));
        assert_eq!(manager.room(&room_id).unwrap().players.len(), 1);
    }

    #[test]
    fn move_requires_a_seat() {
        let mut manager = SessionManager::default();
        let err = manager
            .make_move("ghost", pos(6, 4), pos(4, 4), None)
            .unwrap_err();
        assert_eq!(err, SessionError::NotInRoom);
    }

    #[test]
    fn off_board_squares_are_refused_cleanly() {
        let (mut manager, room_id) = full_room();

        let err = manager
            .make_move("white", pos(6, 4), pos(4, 200), None)
            .unwrap_err();
        assert_eq!(err, SessionError::OffBoard { position: pos(4, 200) });
        assert_eq!(err.to_string(), "Square is off the board: 4,200");

        let err = manager
            .make_move("white", pos(255, 4), pos(4, 4), None)
            .unwrap_err();
        assert_eq!(err, SessionError::OffBoard { position: pos(255, 4) });

        let err = manager.available_moves("white", pos(6, 160)).unwrap_err();
        assert_eq!(err.to_string(), "Square is off the board: 6,160");

        let state = &manager.room(&room_id).unwrap().game_state;
        assert_eq!(state.current_turn, Color::White);
        assert!(state.move_history.is_empty());
    }

    #[test]
    fn accepted_move_is_broadcast() {
        let (mut manager, room_id) = full_room();
        let deliveries = manager
            .make_move("white", pos(6, 4), pos(4, 4), None)
            .unwrap();

        assert_eq!(kinds(&deliveries), vec!["gameState"]);
        assert_eq!(deliveries[0].recipients.len(), 2);
        let state = &manager.room(&room_id).unwrap().game_state;
        assert_eq!(state.current_turn, Color::Black);
        assert_eq!(state.move_history.len(), 1);
    }

    #[test]
    fn moving_the_opponents_pieces_is_rejected() {
        let (mut manager, room_id) = full_room();
        // black tries to move before white
        let err = manager
            .make_move("black", pos(1, 4), pos(3, 4), None)
            .unwrap_err();
        assert_eq!(
            err,
            SessionError::IllegalMove {
                from: pos(1, 4),
                to: pos(3, 4)
            }
        );
        // white tries to move a black pawn on its own turn
        assert!(manager
            .make_move("white", pos(1, 4), pos(3, 4), None)
            .is_err());
        assert!(manager
            .room(&room_id)
            .unwrap()
            .game_state
            .move_history
            .is_empty());
    }

    #[test]
    fn king_cannot_be_a_promotion_choice() {
        let (mut manager, _) = full_room();
        let err = manager
            .make_move("white", pos(6, 4), pos(4, 4), Some(PieceKind::King))
            .unwrap_err();
        assert_eq!(
            err,
            SessionError::InvalidPromotion {
                kind: PieceKind::King
            }
        );
    }

    #[test]
    fn fools_mate_announces_game_over() {
        let (mut manager, room_id) = full_room();
        manager.make_move("white", pos(6, 5), pos(5, 5), None).unwrap();
        manager.make_move("black", pos(1, 4), pos(3, 4), None).unwrap();
        manager.make_move("white", pos(6, 6), pos(4, 6), None).unwrap();
        let deliveries = manager
            .make_move("black", pos(0, 3), pos(4, 7), None)
            .unwrap();

        assert_eq!(kinds(&deliveries), vec!["gameState", "gameOver"]);
        assert_eq!(
            deliveries[1].message,
            ServerMessage::GameOver {
                winner: Winner::Black,
                reason: GameOverReason::Checkmate
            }
        );
        // the room survives the end of the game
        assert!(manager.room(&room_id).unwrap().game_state.is_checkmate);
    }

    #[test]
    fn leaving_notifies_the_other_player() {
        let (mut manager, room_id) = full_room();
        let deliveries = manager.leave_room("black");

        assert_eq!(kinds(&deliveries), vec!["playerLeft"]);
        assert_eq!(deliveries[0].recipients, vec!["white".to_string()]);
        assert_eq!(manager.room(&room_id).unwrap().players.len(), 1);
        assert_eq!(manager.seat("black"), None);
    }

    #[test]
    fn last_player_out_deletes_the_room() {
        let (mut manager, room_id) = full_room();
        manager.leave_room("white");
        let deliveries = manager.disconnect("black");

        assert!(deliveries.is_empty());
        assert!(manager.room(&room_id).is_none());
        assert_eq!(manager.room_count(), 0);
    }

    #[test]
    fn freed_seat_keeps_its_color() {
        let (mut manager, room_id) = full_room();
        manager.leave_room("white");
        let (room, _) = manager.join_room("newcomer", &room_id, "Cy").unwrap();

        assert_eq!(room.players[0].id, "newcomer");
        assert_eq!(room.players[0].color, Color::White);
        assert_eq!(manager.seat("newcomer").unwrap().color, Color::White);
    }

    #[test]
    fn leaving_without_a_seat_is_silent() {
        let mut manager = SessionManager::default();
        assert!(manager.leave_room("nobody").is_empty());
    }

    #[test]
    fn creating_again_leaves_the_old_room() {
        let mut manager = SessionManager::default();
        let (first, _) = manager.create_room("p1", "Ada");
        let (second, _) = manager.create_room("p1", "Ada");

        assert_ne!(first, second);
        assert!(manager.room(&first).is_none());
        assert_eq!(manager.seat("p1").unwrap().room_id, second);
    }

    #[test]
    fn available_moves_for_a_seated_player() {
        let (manager, _) = full_room();
        let delivery = manager.available_moves("white", pos(7, 6)).unwrap();
        match delivery.message {
            ServerMessage::AvailableMoves { from, mut moves } => {
                moves.sort();
                assert_eq!(from, pos(7, 6));
                assert_eq!(moves, vec![pos(5, 5), pos(5, 7)]);
            }
            other => panic!("unexpected message {:?}", other),
        }
        assert_eq!(
            manager.available_moves("ghost", pos(7, 6)).unwrap_err(),
            SessionError::NotInRoom
        );
    }
}
