//! Room-based chat server with per-room broadcast.
//!
//! Clients connect to `/ws/chat/{room_id}` and every message they post is
//! persisted, then fanned out to all connections in the same room.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin irori-server
//! ```

use clap::Parser;

use irori::Config;
use irori::logger::setup_logger;

#[tokio::main]
async fn main() {
    let config = Config::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), "info");

    // Run the server
    if let Err(e) = irori::run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
