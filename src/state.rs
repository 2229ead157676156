use actix::Addr;
use log::{debug, warn};
use parking_lot::Mutex;
use std::collections::HashMap;

use crate::models::ChessWebSocketMessage;
use crate::session::{Delivery, PlayerId, SessionManager};
use crate::websocket::ChessWebSocket;

/// Application state shared between connections
pub struct AppState {
    /// Single writer for every room: hold this lock for the whole request,
    /// including sending its deliveries.
    pub sessions: Mutex<SessionManager>,
    pub connections: Mutex<HashMap<PlayerId, Addr<ChessWebSocket>>>,
}

impl AppState {
    pub fn new(room_code_length: usize) -> Self {
        AppState {
            sessions: Mutex::new(SessionManager::new(room_code_length)),
            connections: Mutex::new(HashMap::new()),
        }
    }

    /// Queue each delivery on its recipients' mailboxes.
    pub fn deliver(&self, deliveries: Vec<Delivery>) {
        if deliveries.is_empty() {
            return;
        }
        let connections = self.connections.lock();
        for delivery in deliveries {
            let frame = match serde_json::to_string(&delivery.message) {
                Ok(frame) => frame,
                Err(e) => {
                    warn!("Failed to serialize {}: {}", delivery.message.kind(), e);
                    continue;
                }
            };
            for recipient in &delivery.recipients {
                match connections.get(recipient) {
                    Some(addr) => {
                        debug!("Sending {} to {}", delivery.message.kind(), recipient);
                        addr.do_send(ChessWebSocketMessage(frame.clone()));
                    }
                    None => debug!("Connection {} not found", recipient),
                }
            }
        }
    }
}
