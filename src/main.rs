use actix_web::{web, App, HttpServer};
use clap::Parser;
use log::info;

use chess_rooms::config::Config;
use chess_rooms::routes::configure_routes;
use chess_rooms::state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = Config::parse();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting chess rooms server at http://{}:{}", config.host, config.port);

    // Create shared application state
    let app_state = web::Data::new(AppState::new(config.room_code_length as usize));

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .configure(configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
