//! REST API endpoint handlers.
//!
//! Stateless request/response CRUD over rooms and messages, disjoint from
//! the live WebSocket path: messages created here are persisted but not
//! broadcast.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::domain::{MessageContent, RoomName, UserName};
use crate::infrastructure::dto::http::{
    CreateMessageRequest, CreateRoomRequest, MessageDto, RoomDto,
};
use crate::ui::error::ApiError;
use crate::ui::state::AppState;

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// `GET /api/rooms` — all rooms in insertion order.
pub async fn list_rooms(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RoomDto>>, ApiError> {
    let rooms = state.repository.list_rooms().await?;
    Ok(Json(rooms.iter().map(RoomDto::from).collect()))
}

/// `POST /api/rooms` — create a room with a unique name.
pub async fn create_room(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateRoomRequest>,
) -> Result<(StatusCode, Json<RoomDto>), ApiError> {
    let name = RoomName::try_from(body.name)?;
    let room = state.repository.create_room(&name).await?;
    Ok((StatusCode::CREATED, Json(RoomDto::from(&room))))
}

/// `GET /api/rooms/{room_id}/messages` — messages ordered by timestamp
/// ascending.
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<i64>,
) -> Result<Json<Vec<MessageDto>>, ApiError> {
    let messages = state.repository.list_messages(room_id).await?;
    Ok(Json(messages.iter().map(MessageDto::from).collect()))
}

/// `POST /api/rooms/{room_id}/messages` — persist a message in an existing
/// room. The room id comes from the route; a nonexistent room is a 404 with
/// no side effects.
pub async fn create_message(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<i64>,
    Json(body): Json<CreateMessageRequest>,
) -> Result<(StatusCode, Json<MessageDto>), ApiError> {
    let user = match body.user {
        Some(name) => UserName::try_from(name)?,
        None => UserName::anonymous(),
    };
    let content = MessageContent::try_from(body.content)?;

    let message = state
        .repository
        .create_message(room_id, &user, &content)
        .await?;
    Ok((StatusCode::CREATED, Json(MessageDto::from(&message))))
}
