//! Database operations for chat threads and messages

use chrono::Utc;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::simulation::MessageStatus;

use super::types::{ChatThread, Message, MessageDirection, MessageType};

fn message_from_row(row: &sqlx::postgres::PgRow) -> Message {
    Message {
        id: row.get("id"),
        thread_id: row.get("thread_id"),
        direction: MessageDirection::from_str(row.get::<String, _>("direction").as_str())
            .unwrap_or(MessageDirection::Outbound),
        content: row.get("content"),
        message_type: MessageType::from_str(row.get::<String, _>("type").as_str())
            .unwrap_or(MessageType::Text),
        status: MessageStatus::from_str(row.get::<String, _>("status").as_str())
            .unwrap_or(MessageStatus::Sent),
        timestamp: row.get("timestamp"),
    }
}

/// Get the thread between a user and a contact, creating it on demand.
pub async fn get_or_create_thread(
    pool: &PgPool,
    user_id: Uuid,
    contact_id: Uuid,
) -> Result<Uuid, sqlx::Error> {
    let existing = sqlx::query(
        r#"
        SELECT id FROM chat_threads
        WHERE user_id = $1 AND contact_id = $2
        "#,
    )
    .bind(user_id)
    .bind(contact_id)
    .fetch_optional(pool)
    .await?;

    if let Some(row) = existing {
        return Ok(row.get("id"));
    }

    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO chat_threads (id, user_id, contact_id, last_message, unread_count, updated_at)
        VALUES ($1, $2, $3, NULL, 0, $4)
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(contact_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(id)
}

/// Get a user's chat threads, newest first, enriched with contact info.
pub async fn get_threads_for_user(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
) -> Result<Vec<ChatThread>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT t.id, t.user_id, t.contact_id, t.last_message, t.unread_count, t.updated_at,
               c.name AS contact_name, c.phone AS contact_phone
        FROM chat_threads t
        INNER JOIN contacts c ON c.id = t.contact_id
        WHERE t.user_id = $1
        ORDER BY t.updated_at DESC
        LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| ChatThread {
            id: row.get("id"),
            user_id: row.get("user_id"),
            contact_id: row.get("contact_id"),
            contact_name: row.get("contact_name"),
            contact_phone: row.get("contact_phone"),
            last_message: row.get("last_message"),
            unread_count: row.get("unread_count"),
            updated_at: row.get("updated_at"),
        })
        .collect())
}

/// Get messages in a thread in send order.
pub async fn get_messages_for_thread(
    pool: &PgPool,
    thread_id: Uuid,
    limit: i64,
) -> Result<Vec<Message>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, thread_id, direction, content, type, status, timestamp
        FROM messages
        WHERE thread_id = $1
        ORDER BY timestamp ASC
        LIMIT $2
        "#,
    )
    .bind(thread_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(message_from_row).collect())
}

/// Get a single message by id.
pub async fn get_message(pool: &PgPool, message_id: Uuid) -> Result<Option<Message>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, thread_id, direction, content, type, status, timestamp
        FROM messages
        WHERE id = $1
        "#,
    )
    .bind(message_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(message_from_row))
}

/// Insert a message.
pub async fn create_message(
    pool: &PgPool,
    thread_id: Uuid,
    direction: MessageDirection,
    content: &str,
    message_type: MessageType,
    status: MessageStatus,
) -> Result<Message, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO messages (id, thread_id, direction, content, type, status, timestamp)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(id)
    .bind(thread_id)
    .bind(direction.as_str())
    .bind(content)
    .bind(message_type.as_str())
    .bind(status.as_str())
    .bind(now)
    .execute(pool)
    .await?;

    Ok(Message {
        id,
        thread_id,
        direction,
        content: content.to_string(),
        message_type,
        status,
        timestamp: now,
    })
}

/// Refresh a thread's last-message snapshot; optionally bump the unread
/// counter (inbound messages only).
pub async fn update_thread_snapshot(
    pool: &PgPool,
    thread_id: Uuid,
    last_message: &str,
    bump_unread: bool,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE chat_threads
        SET last_message = $2,
            updated_at = $3,
            unread_count = unread_count + CASE WHEN $4 THEN 1 ELSE 0 END
        WHERE id = $1
        "#,
    )
    .bind(thread_id)
    .bind(last_message)
    .bind(Utc::now())
    .bind(bump_unread)
    .execute(pool)
    .await?;

    Ok(())
}

/// Set a message's status. Returns the number of rows affected.
pub async fn set_message_status(
    pool: &PgPool,
    message_id: Uuid,
    status: MessageStatus,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE messages SET status = $1 WHERE id = $2
        "#,
    )
    .bind(status.as_str())
    .bind(message_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
