use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::state::AppState;

/// HTTP handler for the index page
pub async fn index() -> impl Responder {
    HttpResponse::Ok().body("Chess Rooms")
}

/// Liveness probe with the number of open rooms
pub async fn health(app_state: web::Data<AppState>) -> impl Responder {
    let rooms = app_state.sessions.lock().room_count();
    HttpResponse::Ok().json(json!({ "status": "ok", "rooms": rooms }))
}

/// Configure the HTTP routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/ws").route(web::get().to(crate::websocket::ws_index)))
        .service(web::resource("/health").route(web::get().to(health)))
        .service(web::resource("/").route(web::get().to(index)));
}
