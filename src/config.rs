use clap::Parser;

/// Two-player chess rooms over WebSocket.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Address to bind the HTTP server to
    #[arg(long, env = "CHESS_HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, env = "CHESS_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Length of generated room codes
    #[arg(
        long,
        env = "CHESS_ROOM_CODE_LENGTH",
        default_value_t = 6,
        value_parser = clap::value_parser!(u8).range(4..=16)
    )]
    pub room_code_length: u8,
}
