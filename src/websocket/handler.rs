use actix::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use log::{info, warn};
use uuid::Uuid;

use crate::models::{ChessWebSocketMessage, ClientMessage, ServerMessage};
use crate::session::PlayerId;
use crate::state::AppState;

/// WebSocket handler for one player connection
pub struct ChessWebSocket {
    pub id: PlayerId,
    pub app_state: web::Data<AppState>,
}

impl ChessWebSocket {
    pub fn new(app_state: web::Data<AppState>) -> Self {
        ChessWebSocket {
            id: Uuid::new_v4().to_string(),
            app_state,
        }
    }

    /// Send a message straight to this connection
    pub fn send(&self, message: &ServerMessage, ctx: &mut ws::WebsocketContext<Self>) {
        match serde_json::to_string(message) {
            Ok(frame) => ctx.text(frame),
            Err(e) => warn!("Failed to serialize {}: {}", message.kind(), e),
        }
    }

    pub fn send_error(&self, message: impl Into<String>, ctx: &mut ws::WebsocketContext<Self>) {
        self.send(&ServerMessage::error(message), ctx);
    }
}

impl Actor for ChessWebSocket {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        // Register the actor so deliveries can find it
        let total_connections = {
            let mut connections = self.app_state.connections.lock();
            connections.insert(self.id.clone(), ctx.address());
            connections.len()
        };
        info!("WebSocket connection started: {}", self.id);
        info!("Total active connections: {}", total_connections);
    }

    fn stopping(&mut self, _: &mut Self::Context) -> Running {
        {
            let mut sessions = self.app_state.sessions.lock();
            let deliveries = sessions.disconnect(&self.id);
            self.app_state.deliver(deliveries);
        }

        let total_connections = {
            let mut connections = self.app_state.connections.lock();
            connections.remove(&self.id);
            connections.len()
        };
        info!("WebSocket connection closed: {}", self.id);
        info!("Total active connections: {}", total_connections);

        Running::Stop
    }
}

impl Handler<ChessWebSocketMessage> for ChessWebSocket {
    type Result = ();

    fn handle(&mut self, msg: ChessWebSocketMessage, ctx: &mut Self::Context) {
        ctx.text(msg.0);
    }
}

// WebSocket message handler
impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for ChessWebSocket {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(msg)) => {
                ctx.pong(&msg);
            }
            Ok(ws::Message::Pong(_)) => {}
            Ok(ws::Message::Text(text)) => {
                match serde_json::from_str::<ClientMessage>(text.as_ref()) {
                    Ok(client_msg) => {
                        info!("Received from {}: {:?}", self.id, client_msg);
                        self.handle_message(client_msg, ctx);
                    }
                    Err(e) => {
                        warn!("Error parsing client message: {}", e);
                        self.send_error(format!("Invalid message format: {}", e), ctx);
                    }
                }
            }
            Ok(ws::Message::Binary(_)) => {
                warn!("Binary messages are not supported");
                self.send_error("Binary messages are not supported", ctx);
            }
            Ok(ws::Message::Close(reason)) => {
                info!("Connection closed: {:?}", reason);
                ctx.close(reason);
                ctx.stop();
            }
            _ => {
                ctx.stop();
            }
        }
    }
}

impl ChessWebSocket {
    pub fn handle_message(&mut self, msg: ClientMessage, ctx: &mut ws::WebsocketContext<Self>) {
        match msg {
            ClientMessage::CreateRoom { player_name } => self.handle_create(&player_name),
            ClientMessage::JoinRoom {
                room_id,
                player_name,
            } => self.handle_join(&room_id, &player_name, ctx),
            ClientMessage::MakeMove {
                from,
                to,
                promotion,
            } => self.handle_move(from, to, promotion, ctx),
            ClientMessage::LeaveRoom => self.handle_leave(),
            ClientMessage::GetMoves { from } => self.handle_get_moves(from, ctx),
        }
    }
}

// WebSocket connection handler
pub async fn ws_index(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let socket = ChessWebSocket::new(app_state);
    info!("New WebSocket connection: {}", socket.id);
    ws::start(socket, &req, stream)
}
