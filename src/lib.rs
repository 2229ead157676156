pub mod config;
pub mod engine;
pub mod game;
pub mod models;
pub mod routes;
pub mod session;
pub mod state;
pub mod websocket;
