use actix_web_actors::ws;
use log::warn;

use crate::engine::{PieceKind, Position};
use crate::models::ServerMessage;
use crate::websocket::handler::ChessWebSocket;

// Each handler keeps the session lock until its deliveries are queued, so
// broadcasts for a room go out in the order the moves were applied.
impl ChessWebSocket {
    pub fn handle_create(&mut self, player_name: &str) {
        let mut sessions = self.app_state.sessions.lock();
        let (_, deliveries) = sessions.create_room(&self.id, player_name);
        self.app_state.deliver(deliveries);
    }

    pub fn handle_join(
        &mut self,
        room_id: &str,
        player_name: &str,
        ctx: &mut ws::WebsocketContext<Self>,
    ) {
        let mut sessions = self.app_state.sessions.lock();
        match sessions.join_room(&self.id, room_id, player_name) {
            Ok((_, deliveries)) => self.app_state.deliver(deliveries),
            Err(e) => {
                warn!("Player {} cannot join room {}: {}", self.id, room_id, e);
                self.send(
                    &ServerMessage::RoomJoined {
                        success: false,
                        room: None,
                    },
                    ctx,
                );
                self.send_error(e.to_string(), ctx);
            }
        }
    }

    pub fn handle_move(
        &mut self,
        from: Position,
        to: Position,
        promotion: Option<PieceKind>,
        ctx: &mut ws::WebsocketContext<Self>,
    ) {
        let mut sessions = self.app_state.sessions.lock();
        match sessions.make_move(&self.id, from, to, promotion) {
            Ok(deliveries) => self.app_state.deliver(deliveries),
            Err(e) => self.send_error(e.to_string(), ctx),
        }
    }

    pub fn handle_get_moves(&mut self, from: Position, ctx: &mut ws::WebsocketContext<Self>) {
        let sessions = self.app_state.sessions.lock();
        match sessions.available_moves(&self.id, from) {
            Ok(delivery) => self.app_state.deliver(vec![delivery]),
            Err(e) => self.send_error(e.to_string(), ctx),
        }
    }

    pub fn handle_leave(&mut self) {
        let mut sessions = self.app_state.sessions.lock();
        let deliveries = sessions.leave_room(&self.id);
        self.app_state.deliver(deliveries);
    }
}
