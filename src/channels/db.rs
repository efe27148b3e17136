//! Database operations for broadcast channels

use chrono::Utc;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::types::{Channel, ChannelMessage};

fn channel_from_row(row: &sqlx::postgres::PgRow) -> Channel {
    Channel {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        avatar_url: row.get("avatar_url"),
        creator_id: row.get("creator_id"),
        followers_count: row.get("followers_count"),
        verified: row.get("verified"),
        created_at: row.get("created_at"),
    }
}

fn message_from_row(row: &sqlx::postgres::PgRow) -> ChannelMessage {
    ChannelMessage {
        id: row.get("id"),
        channel_id: row.get("channel_id"),
        content: row.get("content"),
        media_url: row.get("media_url"),
        created_at: row.get("created_at"),
    }
}

/// Create a channel.
pub async fn create_channel(
    pool: &PgPool,
    creator_id: Uuid,
    name: &str,
    description: Option<&str>,
    avatar_url: Option<&str>,
) -> Result<Channel, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO channels (id, name, description, avatar_url, creator_id,
                              followers_count, verified, created_at)
        VALUES ($1, $2, $3, $4, $5, 0, FALSE, $6)
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(description)
    .bind(avatar_url)
    .bind(creator_id)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(Channel {
        id,
        name: name.to_string(),
        description: description.map(|s| s.to_string()),
        avatar_url: avatar_url.map(|s| s.to_string()),
        creator_id,
        followers_count: 0,
        verified: false,
        created_at: now,
    })
}

/// Check whether a creator already has a channel with this name.
pub async fn channel_name_exists(
    pool: &PgPool,
    creator_id: Uuid,
    name: &str,
) -> Result<bool, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM channels WHERE creator_id = $1 AND name = $2
        ) AS found
        "#,
    )
    .bind(creator_id)
    .bind(name)
    .fetch_one(pool)
    .await?;

    Ok(row.get("found"))
}

/// List channels for discovery, most followed first. An optional search
/// term filters by name, case-insensitively.
pub async fn list_channels(
    pool: &PgPool,
    search: Option<&str>,
    limit: i64,
) -> Result<Vec<Channel>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, name, description, avatar_url, creator_id,
               followers_count, verified, created_at
        FROM channels
        WHERE $1::TEXT IS NULL OR name ILIKE '%' || $1 || '%'
        ORDER BY followers_count DESC
        LIMIT $2
        "#,
    )
    .bind(search)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(channel_from_row).collect())
}

/// List the channels a user follows.
pub async fn get_followed_channels(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<Channel>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT ch.id, ch.name, ch.description, ch.avatar_url, ch.creator_id,
               ch.followers_count, ch.verified, ch.created_at
        FROM channels ch
        INNER JOIN channel_followers f ON f.channel_id = ch.id
        WHERE f.user_id = $1
        ORDER BY ch.followers_count DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(channel_from_row).collect())
}

/// Ids of every channel the user follows.
pub async fn get_followed_channel_ids(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<Uuid>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT channel_id FROM channel_followers WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(|row| row.get("channel_id")).collect())
}

/// Get a single channel.
pub async fn get_channel(
    pool: &PgPool,
    channel_id: Uuid,
) -> Result<Option<Channel>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, name, description, avatar_url, creator_id,
               followers_count, verified, created_at
        FROM channels
        WHERE id = $1
        "#,
    )
    .bind(channel_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(channel_from_row))
}

/// Whether a user follows a channel.
pub async fn is_following(
    pool: &PgPool,
    channel_id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM channel_followers WHERE channel_id = $1 AND user_id = $2
        ) AS found
        "#,
    )
    .bind(channel_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(row.get("found"))
}

/// Record a follow and bump the channel's follower count.
pub async fn add_follower(
    pool: &PgPool,
    channel_id: Uuid,
    user_id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO channel_followers (channel_id, user_id, joined_at)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(channel_id)
    .bind(user_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        UPDATE channels SET followers_count = followers_count + 1 WHERE id = $1
        "#,
    )
    .bind(channel_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Remove a follow. Returns the number of rows removed; the follower count
/// is only decremented when a row was actually deleted.
pub async fn remove_follower(
    pool: &PgPool,
    channel_id: Uuid,
    user_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM channel_followers WHERE channel_id = $1 AND user_id = $2
        "#,
    )
    .bind(channel_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() > 0 {
        sqlx::query(
            r#"
            UPDATE channels
            SET followers_count = GREATEST(followers_count - 1, 0)
            WHERE id = $1
            "#,
        )
        .bind(channel_id)
        .execute(pool)
        .await?;
    }

    Ok(result.rows_affected())
}

/// Insert a channel post.
pub async fn create_channel_message(
    pool: &PgPool,
    channel_id: Uuid,
    content: &str,
    media_url: Option<&str>,
) -> Result<ChannelMessage, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO channel_messages (id, channel_id, content, media_url, created_at)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(id)
    .bind(channel_id)
    .bind(content)
    .bind(media_url)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(ChannelMessage {
        id,
        channel_id,
        content: content.to_string(),
        media_url: media_url.map(|s| s.to_string()),
        created_at: now,
    })
}

/// Get the latest posts in a channel, returned in chronological order.
pub async fn get_channel_messages(
    pool: &PgPool,
    channel_id: Uuid,
    limit: i64,
) -> Result<Vec<ChannelMessage>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, channel_id, content, media_url, created_at
        FROM channel_messages
        WHERE channel_id = $1
        ORDER BY created_at DESC
        LIMIT $2
        "#,
    )
    .bind(channel_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    let mut messages: Vec<ChannelMessage> = rows.iter().map(message_from_row).collect();
    messages.reverse();
    Ok(messages)
}

/// Delete a channel; followers and posts cascade via foreign keys.
pub async fn delete_channel(pool: &PgPool, channel_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        DELETE FROM channels WHERE id = $1
        "#,
    )
    .bind(channel_id)
    .execute(pool)
    .await?;

    Ok(())
}
