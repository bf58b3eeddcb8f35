//! Runtime configuration.
//!
//! Everything externally supplied lives here: the listen address, the
//! database connection string, and the allowed CORS origins. The broadcast
//! layer itself has no configuration; it is in-process only.

use clap::Parser;

/// Command line configuration for the chat server.
#[derive(Debug, Clone, Parser)]
#[command(name = "irori-server", version, about = "Room-based chat backend")]
pub struct Config {
    /// Address the HTTP/WebSocket listener binds to.
    #[arg(long, default_value = "0.0.0.0:8000")]
    pub bind_addr: String,

    /// SQLite database URL. The file is created if it does not exist.
    #[arg(long, default_value = "sqlite:irori.db")]
    pub database_url: String,

    /// Allowed CORS origin, repeatable. When no origin is given the server
    /// answers any origin (development posture).
    #[arg(long = "allow-origin", value_name = "ORIGIN")]
    pub allowed_origins: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        // テスト項目: 引数なしでデフォルト値が使われる
        // when (操作):
        let config = Config::parse_from(["irori-server"]);

        // then (期待する結果):
        assert_eq!(config.bind_addr, "0.0.0.0:8000");
        assert_eq!(config.database_url, "sqlite:irori.db");
        assert!(config.allowed_origins.is_empty());
    }

    #[test]
    fn test_config_repeated_origins() {
        // テスト項目: --allow-origin は繰り返し指定できる
        // when (操作):
        let config = Config::parse_from([
            "irori-server",
            "--allow-origin",
            "http://localhost:3000",
            "--allow-origin",
            "https://chat.example.com",
        ]);

        // then (期待する結果):
        assert_eq!(
            config.allowed_origins,
            vec!["http://localhost:3000", "https://chat.example.com"]
        );
    }
}
