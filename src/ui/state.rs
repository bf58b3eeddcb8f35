//! Shared application state.

use std::sync::Arc;

use crate::domain::ChatRepository;
use crate::hub::RoomHub;

/// State handed to every handler: the record store and the broadcast hub.
///
/// Both are constructed once in [`run`](crate::ui::run) and injected here;
/// nothing in the crate reaches for them as globals.
pub struct AppState {
    /// Repository（データアクセス層の抽象化）
    pub repository: Arc<dyn ChatRepository>,
    /// Per-room broadcast registry, in-process only
    pub hub: Arc<RoomHub>,
}
