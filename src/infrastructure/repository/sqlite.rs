//! SQLite Chat Repository 実装
//!
//! ドメイン層が定義する ChatRepository trait の具体的な実装。
//! sqlx の SQLite プールを永続ストレージとして使用します。
//!
//! 作成系の操作は明示的なトランザクション境界を持ちます：
//! INSERT と読み戻しを 1 トランザクションにまとめ、失敗時には何も
//! 書き込まれません（ブロードキャストは永続化成功後にのみ行われるため、
//! ここでの失敗は配送側に波及しません）。

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use sqlx::error::ErrorKind;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::domain::{
    ChatRepository, Message, MessageContent, RepositoryError, Room, RoomName, UserName,
};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS rooms (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS messages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    room_id INTEGER NOT NULL REFERENCES rooms(id) ON DELETE CASCADE,
    user TEXT NOT NULL,
    content TEXT NOT NULL,
    timestamp TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_messages_room_timestamp
    ON messages (room_id, timestamp);
"#;

#[derive(Debug, sqlx::FromRow)]
struct RoomRow {
    id: i64,
    name: String,
    created_at: DateTime<Utc>,
}

impl From<RoomRow> for Room {
    fn from(row: RoomRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MessageRow {
    id: i64,
    room_id: i64,
    user: String,
    content: String,
    timestamp: DateTime<Utc>,
}

impl From<MessageRow> for Message {
    fn from(row: MessageRow) -> Self {
        Self {
            id: row.id,
            room_id: row.room_id,
            user: row.user,
            content: row.content,
            timestamp: row.timestamp,
        }
    }
}

/// SQLite-backed record store for rooms and messages.
pub struct SqliteChatRepository {
    pool: SqlitePool,
}

impl SqliteChatRepository {
    /// Wrap an existing pool. Call [`migrate`](Self::migrate) before use.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url`, creating the database file if needed, and
    /// bootstrap the schema.
    pub async fn connect(database_url: &str) -> Result<Self, RepositoryError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(8)
            .connect_with(options)
            .await?;

        let repository = Self::new(pool);
        repository.migrate().await?;
        Ok(repository)
    }

    /// Create the tables if they do not exist yet.
    pub async fn migrate(&self) -> Result<(), RepositoryError> {
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    async fn fetch_room(&self, room_id: i64) -> Result<Option<Room>, RepositoryError> {
        let row = sqlx::query_as::<_, RoomRow>(
            "SELECT id, name, created_at FROM rooms WHERE id = ?",
        )
        .bind(room_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Room::from))
    }
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .is_some_and(|db| matches!(db.kind(), ErrorKind::UniqueViolation))
}

#[async_trait]
impl ChatRepository for SqliteChatRepository {
    async fn create_room(&self, name: &RoomName) -> Result<Room, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let insert = sqlx::query("INSERT INTO rooms (name, created_at) VALUES (?, ?)")
            .bind(name.as_str())
            .bind(Utc::now())
            .execute(&mut *tx)
            .await;
        let insert = match insert {
            Ok(result) => result,
            Err(e) if is_unique_violation(&e) => {
                return Err(RepositoryError::DuplicateRoomName(name.as_str().to_owned()));
            }
            Err(e) => return Err(e.into()),
        };

        let row = sqlx::query_as::<_, RoomRow>(
            "SELECT id, name, created_at FROM rooms WHERE id = ?",
        )
        .bind(insert.last_insert_rowid())
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        tracing::debug!("created room {} ('{}')", row.id, row.name);
        Ok(row.into())
    }

    async fn get_or_create_room(&self, room_id: i64) -> Result<Room, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        if let Some(row) = sqlx::query_as::<_, RoomRow>(
            "SELECT id, name, created_at FROM rooms WHERE id = ?",
        )
        .bind(room_id)
        .fetch_optional(&mut *tx)
        .await?
        {
            return Ok(row.into());
        }

        let insert = sqlx::query("INSERT INTO rooms (id, name, created_at) VALUES (?, ?, ?)")
            .bind(room_id)
            .bind(format!("room-{room_id}"))
            .bind(Utc::now())
            .execute(&mut *tx)
            .await;
        match insert {
            Ok(_) => {
                let row = sqlx::query_as::<_, RoomRow>(
                    "SELECT id, name, created_at FROM rooms WHERE id = ?",
                )
                .bind(room_id)
                .fetch_one(&mut *tx)
                .await?;
                tx.commit().await?;
                tracing::debug!("implicitly created room {room_id}");
                Ok(row.into())
            }
            // Lost a create race: another connection inserted the room
            // between our select and insert. The row exists now.
            Err(e) if is_unique_violation(&e) => {
                drop(tx);
                self.fetch_room(room_id)
                    .await?
                    .ok_or(RepositoryError::RoomNotFound(room_id))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn list_rooms(&self) -> Result<Vec<Room>, RepositoryError> {
        let rows = sqlx::query_as::<_, RoomRow>(
            "SELECT id, name, created_at FROM rooms ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Room::from).collect())
    }

    async fn create_message(
        &self,
        room_id: i64,
        user: &UserName,
        content: &MessageContent,
    ) -> Result<Message, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let room_exists =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM rooms WHERE id = ?")
                .bind(room_id)
                .fetch_one(&mut *tx)
                .await?;
        if room_exists == 0 {
            return Err(RepositoryError::RoomNotFound(room_id));
        }

        let insert = sqlx::query(
            "INSERT INTO messages (room_id, user, content, timestamp) VALUES (?, ?, ?, ?)",
        )
        .bind(room_id)
        .bind(user.as_str())
        .bind(content.as_str())
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        let row = sqlx::query_as::<_, MessageRow>(
            "SELECT id, room_id, user, content, timestamp FROM messages WHERE id = ?",
        )
        .bind(insert.last_insert_rowid())
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(row.into())
    }

    async fn list_messages(&self, room_id: i64) -> Result<Vec<Message>, RepositoryError> {
        if self.fetch_room(room_id).await?.is_none() {
            return Err(RepositoryError::RoomNotFound(room_id));
        }

        let rows = sqlx::query_as::<_, MessageRow>(
            "SELECT id, room_id, user, content, timestamp FROM messages \
             WHERE room_id = ? ORDER BY timestamp ASC, id ASC",
        )
        .bind(room_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Message::from).collect())
    }
}
