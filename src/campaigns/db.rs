//! Database operations for campaigns

use chrono::Utc;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::simulation::MessageStatus;

use super::types::{Campaign, CampaignContact, CampaignStatus};

fn campaign_from_row(row: &sqlx::postgres::PgRow) -> Campaign {
    Campaign {
        id: row.get("id"),
        user_id: row.get("user_id"),
        name: row.get("name"),
        template_id: row.get("template_id"),
        status: CampaignStatus::from_str(row.get::<String, _>("status").as_str())
            .unwrap_or(CampaignStatus::Active),
        total_contacts: row.get("total_contacts"),
        delivered_count: row.get("delivered_count"),
        read_count: row.get("read_count"),
        contact_ids: row.get("contact_ids"),
        message_ids: row.get("message_ids"),
        created_at: row.get("created_at"),
    }
}

/// Insert a freshly launched campaign (`active`, counters at zero).
pub async fn create_campaign(
    pool: &PgPool,
    user_id: Uuid,
    name: &str,
    template_id: Option<&str>,
    contact_ids: &[Uuid],
    message_ids: &[Uuid],
) -> Result<Campaign, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO campaigns (id, user_id, name, template_id, status, total_contacts,
                               delivered_count, read_count, contact_ids, message_ids, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, 0, 0, $7, $8, $9)
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(name)
    .bind(template_id)
    .bind(CampaignStatus::Active.as_str())
    .bind(contact_ids.len() as i32)
    .bind(contact_ids)
    .bind(message_ids)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(Campaign {
        id,
        user_id,
        name: name.to_string(),
        template_id: template_id.map(|s| s.to_string()),
        status: CampaignStatus::Active,
        total_contacts: contact_ids.len() as i32,
        delivered_count: 0,
        read_count: 0,
        contact_ids: contact_ids.to_vec(),
        message_ids: message_ids.to_vec(),
        created_at: now,
    })
}

/// Get a user's campaigns, newest first.
pub async fn get_campaigns_for_user(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
) -> Result<Vec<Campaign>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, user_id, name, template_id, status, total_contacts,
               delivered_count, read_count, contact_ids, message_ids, created_at
        FROM campaigns
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(campaign_from_row).collect())
}

/// Get a campaign owned by a user.
pub async fn get_campaign(
    pool: &PgPool,
    campaign_id: Uuid,
    user_id: Uuid,
) -> Result<Option<Campaign>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, user_id, name, template_id, status, total_contacts,
               delivered_count, read_count, contact_ids, message_ids, created_at
        FROM campaigns
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(campaign_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(campaign_from_row))
}

/// Count how many of the given messages are in any of the given statuses.
pub async fn count_messages_with_status(
    pool: &PgPool,
    message_ids: &[Uuid],
    statuses: &[MessageStatus],
) -> Result<i64, sqlx::Error> {
    let status_strings: Vec<String> =
        statuses.iter().map(|s| s.as_str().to_string()).collect();

    let row = sqlx::query(
        r#"
        SELECT COUNT(*) AS count
        FROM messages
        WHERE id = ANY($1) AND status = ANY($2)
        "#,
    )
    .bind(message_ids)
    .bind(&status_strings)
    .fetch_one(pool)
    .await?;

    Ok(row.get("count"))
}

/// List campaign recipients with the status of the message sent to each.
pub async fn get_campaign_contacts(
    pool: &PgPool,
    message_ids: &[Uuid],
) -> Result<Vec<CampaignContact>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT c.id AS contact_id, c.name, c.phone, m.status, m.timestamp
        FROM messages m
        INNER JOIN chat_threads t ON t.id = m.thread_id
        INNER JOIN contacts c ON c.id = t.contact_id
        WHERE m.id = ANY($1)
        ORDER BY m.timestamp ASC
        "#,
    )
    .bind(message_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| CampaignContact {
            contact_id: row.get("contact_id"),
            name: row.get("name"),
            phone: row.get("phone"),
            message_status: MessageStatus::from_str(row.get::<String, _>("status").as_str())
                .unwrap_or(MessageStatus::Sent),
            sent_at: row.get("timestamp"),
        })
        .collect())
}
