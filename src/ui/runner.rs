//! Server assembly: wiring, router and lifecycle.

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::get;
use thiserror::Error;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::domain::RepositoryError;
use crate::hub::RoomHub;
use crate::infrastructure::SqliteChatRepository;
use crate::ui::state::AppState;
use crate::ui::{handler, signal};

/// Failure to bring the server up or keep it running.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("record store initialization failed: {0}")]
    Store(#[from] RepositoryError),

    #[error("allowed origin '{0}' is not a valid header value")]
    InvalidOrigin(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Run the chat server until the process is told to shut down.
///
/// Builds the record store and the broadcast hub once, injects both into the
/// router state, then serves HTTP and WebSocket traffic from one listener.
pub async fn run(config: Config) -> Result<(), ServerError> {
    let repository = SqliteChatRepository::connect(&config.database_url).await?;
    let state = Arc::new(AppState {
        repository: Arc::new(repository),
        hub: Arc::new(RoomHub::new()),
    });

    let app = router(state).layer(cors_layer(&config)?).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(signal::shutdown_signal())
        .await?;
    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(handler::health_check))
        .route(
            "/api/rooms",
            get(handler::list_rooms).post(handler::create_room),
        )
        .route(
            "/api/rooms/{room_id}/messages",
            get(handler::list_messages).post(handler::create_message),
        )
        .route("/ws/chat/{room_id}", get(handler::websocket_handler))
        .with_state(state)
}

fn cors_layer(config: &Config) -> Result<CorsLayer, ServerError> {
    if config.allowed_origins.is_empty() {
        // Development posture: no origin list configured, answer anyone.
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|_| ServerError::InvalidOrigin(origin.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any))
}
