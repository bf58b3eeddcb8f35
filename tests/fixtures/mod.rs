//! Test server fixture.
//!
//! Spawns the real server on a dedicated port with an isolated in-memory
//! database (shared-cache, named per port so parallel tests never collide).

use std::time::Duration;

use irori::Config;

pub struct TestServer {
    port: u16,
}

impl TestServer {
    /// Spawn the server on `port`. Await [`ready`](Self::ready) before
    /// sending requests.
    pub fn start(port: u16) -> Self {
        let config = Config {
            bind_addr: format!("127.0.0.1:{port}"),
            database_url: format!("sqlite:file:testdb-{port}?mode=memory&cache=shared"),
            allowed_origins: Vec::new(),
        };

        tokio::spawn(async move {
            if let Err(e) = irori::run(config).await {
                panic!("test server failed: {e}");
            }
        });

        Self { port }
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn ws_url(&self, room_id: i64) -> String {
        format!("ws://127.0.0.1:{}/ws/chat/{}", self.port, room_id)
    }

    /// Wait until the listener accepts TCP connections.
    pub async fn ready(&self) {
        for _ in 0..100 {
            if tokio::net::TcpStream::connect(("127.0.0.1", self.port))
                .await
                .is_ok()
            {
                return;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("test server did not start on port {}", self.port);
    }
}
