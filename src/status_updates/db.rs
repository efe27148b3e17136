//! Database operations for status updates

use chrono::{Duration, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::types::{MediaType, StatusUpdate};

const STATUS_TTL_HOURS: i64 = 24;

fn status_from_row(row: &sqlx::postgres::PgRow) -> StatusUpdate {
    StatusUpdate {
        id: row.get("id"),
        user_id: row.get("user_id"),
        contact_name: row.get("contact_name"),
        contact_phone: row.get("contact_phone"),
        content: row.get("content"),
        media_url: row.get("media_url"),
        media_type: MediaType::from_str(row.get::<String, _>("media_type").as_str())
            .unwrap_or_default(),
        created_at: row.get("created_at"),
        expires_at: row.get("expires_at"),
        viewers: row.get("viewers"),
    }
}

/// Create a status update expiring 24 hours from now.
pub async fn create_status(
    pool: &PgPool,
    user_id: Uuid,
    contact_name: &str,
    contact_phone: &str,
    content: &str,
    media_url: Option<&str>,
    media_type: MediaType,
) -> Result<StatusUpdate, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();
    let expires_at = now + Duration::hours(STATUS_TTL_HOURS);

    sqlx::query(
        r#"
        INSERT INTO status_updates (id, user_id, contact_name, contact_phone, content,
                                    media_url, media_type, created_at, expires_at, viewers)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, '{}')
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(contact_name)
    .bind(contact_phone)
    .bind(content)
    .bind(media_url)
    .bind(media_type.as_str())
    .bind(now)
    .bind(expires_at)
    .execute(pool)
    .await?;

    Ok(StatusUpdate {
        id,
        user_id,
        contact_name: contact_name.to_string(),
        contact_phone: contact_phone.to_string(),
        content: content.to_string(),
        media_url: media_url.map(|s| s.to_string()),
        media_type,
        created_at: now,
        expires_at,
        viewers: Vec::new(),
    })
}

/// All non-expired statuses, newest first.
pub async fn get_active_statuses(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<StatusUpdate>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, user_id, contact_name, contact_phone, content,
               media_url, media_type, created_at, expires_at, viewers
        FROM status_updates
        WHERE expires_at > $1
        ORDER BY created_at DESC
        LIMIT $2
        "#,
    )
    .bind(Utc::now())
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(status_from_row).collect())
}

/// Get a single status, expired or not.
pub async fn get_status(
    pool: &PgPool,
    status_id: Uuid,
) -> Result<Option<StatusUpdate>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, user_id, contact_name, contact_phone, content,
               media_url, media_type, created_at, expires_at, viewers
        FROM status_updates
        WHERE id = $1
        "#,
    )
    .bind(status_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(status_from_row))
}

/// Record that a user viewed a status. Adding the same viewer twice is a
/// no-op.
pub async fn add_viewer(
    pool: &PgPool,
    status_id: Uuid,
    viewer_id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE status_updates
        SET viewers = array_append(viewers, $2)
        WHERE id = $1 AND NOT (viewers @> ARRAY[$2]::UUID[])
        "#,
    )
    .bind(status_id)
    .bind(viewer_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete a status owned by a user. Returns the number of rows removed.
pub async fn delete_status(
    pool: &PgPool,
    status_id: Uuid,
    user_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM status_updates
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(status_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
