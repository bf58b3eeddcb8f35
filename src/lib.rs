//! Room-based chat backend library.
//!
//! Clients join a room over a WebSocket connection, post messages, and
//! receive every message posted to that room. Rooms and messages are stored
//! in SQLite; a small REST API lists and creates them out of band.

pub mod config;
pub mod domain;
pub mod hub;
pub mod infrastructure;
pub mod logger;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::Config;
pub use ui::run;
