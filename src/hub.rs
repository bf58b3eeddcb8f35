//! Room registry / broadcast hub.
//!
//! Process-wide, in-memory fan-out of payloads to every connection currently
//! joined to a room group. Membership is ephemeral: entries exist only while
//! a connection is open, and nothing here is persisted or visible to other
//! processes. The hub is constructed once at startup and handed to every
//! connection handler through [`crate::ui::state::AppState`].

use std::collections::HashMap;

use tokio::sync::Mutex;
use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

/// Opaque handle identifying one live connection inside the hub.
pub type ConnectionId = Uuid;

/// Group identifier for a room, namespaced so other group kinds could share
/// the hub.
pub fn room_group(room_id: i64) -> String {
    format!("chat_{room_id}")
}

/// In-memory mapping from group id to the connections joined to it.
///
/// Every operation takes the membership lock, so join/leave/broadcast are
/// safe under concurrent invocation from arbitrarily many connection tasks.
/// Delivery is a non-blocking push into each member's unbounded channel; the
/// per-connection send task drains it onto the socket.
#[derive(Debug, Default)]
pub struct RoomHub {
    groups: Mutex<HashMap<String, HashMap<ConnectionId, UnboundedSender<String>>>>,
}

impl RoomHub {
    /// Create an empty hub.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection to a group. Subsequent broadcasts to the group reach
    /// this sender. Joining again with the same id is idempotent.
    pub async fn join(&self, group: &str, connection_id: ConnectionId, sender: UnboundedSender<String>) {
        let mut groups = self.groups.lock().await;
        groups
            .entry(group.to_owned())
            .or_default()
            .insert(connection_id, sender);
    }

    /// Remove a connection from a group; no-op if absent. The group slot is
    /// dropped once its member set is empty.
    pub async fn leave(&self, group: &str, connection_id: ConnectionId) {
        let mut groups = self.groups.lock().await;
        if let Some(members) = groups.get_mut(group) {
            members.remove(&connection_id);
            if members.is_empty() {
                groups.remove(group);
            }
        }
    }

    /// Deliver `payload` to every member of the group at call time, the
    /// originating connection included.
    ///
    /// A member whose receiving side is gone must not break delivery to the
    /// rest: the failed send is isolated and the dead entry removed, so
    /// membership heals itself. Returns the number of successful deliveries.
    pub async fn broadcast(&self, group: &str, payload: &str) -> usize {
        let mut groups = self.groups.lock().await;
        let Some(members) = groups.get_mut(group) else {
            return 0;
        };

        let mut delivered = 0;
        let mut dead = Vec::new();
        for (connection_id, sender) in members.iter() {
            if sender.send(payload.to_owned()).is_ok() {
                delivered += 1;
            } else {
                dead.push(*connection_id);
            }
        }

        for connection_id in dead {
            tracing::debug!("pruning dead connection {connection_id} from {group}");
            members.remove(&connection_id);
        }
        if members.is_empty() {
            groups.remove(group);
        }

        delivered
    }

    /// Number of connections currently joined to a group.
    pub async fn member_count(&self, group: &str) -> usize {
        let groups = self.groups.lock().await;
        groups.get(group).map_or(0, HashMap::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_broadcast_reaches_all_members_including_sender() {
        // テスト項目: ブロードキャストは送信元を含む全メンバーに届く（エコーバック）
        // given (前提条件):
        let hub = RoomHub::new();
        let group = room_group(5);
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        hub.join(&group, Uuid::new_v4(), tx_a).await;
        hub.join(&group, Uuid::new_v4(), tx_b).await;

        // when (操作):
        let delivered = hub.broadcast(&group, "hello").await;

        // then (期待する結果):
        assert_eq!(delivered, 2);
        assert_eq!(rx_a.recv().await.unwrap(), "hello");
        assert_eq!(rx_b.recv().await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_join_is_idempotent() {
        // テスト項目: 同じ接続 ID で二重に join してもメンバーは増えない
        // given (前提条件):
        let hub = RoomHub::new();
        let group = room_group(1);
        let connection_id = Uuid::new_v4();
        let (tx, _rx) = mpsc::unbounded_channel();

        // when (操作):
        hub.join(&group, connection_id, tx.clone()).await;
        hub.join(&group, connection_id, tx).await;

        // then (期待する結果):
        assert_eq!(hub.member_count(&group).await, 1);
    }

    #[tokio::test]
    async fn test_leave_stops_delivery() {
        // テスト項目: 退出した接続には以降のブロードキャストが届かない
        // given (前提条件):
        let hub = RoomHub::new();
        let group = room_group(2);
        let left_id = Uuid::new_v4();
        let (tx_left, mut rx_left) = mpsc::unbounded_channel();
        let (tx_stay, mut rx_stay) = mpsc::unbounded_channel();
        hub.join(&group, left_id, tx_left).await;
        hub.join(&group, Uuid::new_v4(), tx_stay).await;

        // when (操作):
        hub.leave(&group, left_id).await;
        let delivered = hub.broadcast(&group, "after leave").await;

        // then (期待する結果):
        assert_eq!(delivered, 1);
        assert_eq!(rx_stay.recv().await.unwrap(), "after leave");
        assert!(rx_left.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_leave_unknown_connection_is_noop() {
        // テスト項目: 存在しない接続の leave は no-op
        // given (前提条件):
        let hub = RoomHub::new();
        let group = room_group(3);
        let (tx, _rx) = mpsc::unbounded_channel();
        hub.join(&group, Uuid::new_v4(), tx).await;

        // when (操作):
        hub.leave(&group, Uuid::new_v4()).await;

        // then (期待する結果):
        assert_eq!(hub.member_count(&group).await, 1);
    }

    #[tokio::test]
    async fn test_broadcast_prunes_dead_connections() {
        // テスト項目: 受信側が落ちた接続は配送を妨げず、グループから取り除かれる
        // given (前提条件):
        let hub = RoomHub::new();
        let group = room_group(4);
        let (tx_dead, rx_dead) = mpsc::unbounded_channel();
        let (tx_live, mut rx_live) = mpsc::unbounded_channel();
        hub.join(&group, Uuid::new_v4(), tx_dead).await;
        hub.join(&group, Uuid::new_v4(), tx_live).await;
        drop(rx_dead);

        // when (操作):
        let delivered = hub.broadcast(&group, "still flowing").await;

        // then (期待する結果):
        assert_eq!(delivered, 1);
        assert_eq!(rx_live.recv().await.unwrap(), "still flowing");
        assert_eq!(hub.member_count(&group).await, 1);
    }

    #[tokio::test]
    async fn test_broadcast_to_unknown_group_delivers_nothing() {
        // テスト項目: 誰も居ないグループへのブロードキャストは 0 件配送
        // given (前提条件):
        let hub = RoomHub::new();

        // when (操作):
        let delivered = hub.broadcast(&room_group(99), "into the void").await;

        // then (期待する結果):
        assert_eq!(delivered, 0);
    }

    #[tokio::test]
    async fn test_empty_group_slot_is_dropped() {
        // テスト項目: 最後のメンバーが退出したグループは空になる
        // given (前提条件):
        let hub = RoomHub::new();
        let group = room_group(6);
        let connection_id = Uuid::new_v4();
        let (tx, _rx) = mpsc::unbounded_channel();
        hub.join(&group, connection_id, tx).await;

        // when (操作):
        hub.leave(&group, connection_id).await;

        // then (期待する結果):
        assert_eq!(hub.member_count(&group).await, 0);
    }

    #[tokio::test]
    async fn test_groups_are_isolated() {
        // テスト項目: あるルームへのブロードキャストは他ルームに漏れない
        // given (前提条件):
        let hub = RoomHub::new();
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        hub.join(&room_group(1), Uuid::new_v4(), tx_a).await;
        hub.join(&room_group(2), Uuid::new_v4(), tx_b).await;

        // when (操作):
        let delivered = hub.broadcast(&room_group(1), "room one only").await;

        // then (期待する結果):
        assert_eq!(delivered, 1);
        assert_eq!(rx_a.recv().await.unwrap(), "room one only");
        assert!(rx_b.try_recv().is_err());
    }
}
