//! Store contract consumed by the delivery simulators
//!
//! The simulators never hold a global database handle; they are handed a
//! `DeliveryStore` at construction time. The production implementation is
//! `SqlDeliveryStore` over the shared `PgPool`; tests inject an in-memory
//! store that records status history.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use thiserror::Error;
use uuid::Uuid;

use crate::campaigns::types::CampaignStatus;

use super::status::MessageStatus;

/// Errors surfaced by a delivery store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// The slice of a campaign the simulator needs: its status and the ordered
/// list of message ids (insertion order = send order).
#[derive(Debug, Clone)]
pub struct CampaignDelivery {
    pub id: Uuid,
    pub status: CampaignStatus,
    pub message_ids: Vec<Uuid>,
}

/// Data-access contract for the simulation engine.
///
/// Every update is a single atomic point-write; an update matching zero
/// rows returns `Ok(0)` rather than an error.
#[async_trait]
pub trait DeliveryStore: Send + Sync {
    /// Load the campaign fields the simulator needs, or `None` if absent.
    async fn campaign(&self, campaign_id: Uuid) -> Result<Option<CampaignDelivery>, StoreError>;

    /// Set a message's status. Returns the number of rows affected.
    async fn update_message_status(
        &self,
        message_id: Uuid,
        status: MessageStatus,
    ) -> Result<u64, StoreError>;

    /// Atomically bump a campaign's delivered counter.
    async fn increment_delivered(&self, campaign_id: Uuid) -> Result<u64, StoreError>;

    /// Atomically bump a campaign's read counter.
    async fn increment_read(&self, campaign_id: Uuid) -> Result<u64, StoreError>;

    /// Set a campaign's status. Returns the number of rows affected.
    async fn set_campaign_status(
        &self,
        campaign_id: Uuid,
        status: CampaignStatus,
    ) -> Result<u64, StoreError>;
}

/// `DeliveryStore` backed by the PostgreSQL pool.
pub struct SqlDeliveryStore {
    pool: PgPool,
}

impl SqlDeliveryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeliveryStore for SqlDeliveryStore {
    async fn campaign(&self, campaign_id: Uuid) -> Result<Option<CampaignDelivery>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, status, message_ids
            FROM campaigns
            WHERE id = $1
            "#,
        )
        .bind(campaign_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| CampaignDelivery {
            id: r.get("id"),
            status: CampaignStatus::from_str(r.get::<String, _>("status").as_str())
                .unwrap_or(CampaignStatus::Active),
            message_ids: r.get("message_ids"),
        }))
    }

    async fn update_message_status(
        &self,
        message_id: Uuid,
        status: MessageStatus,
    ) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE messages SET status = $1 WHERE id = $2
            "#,
        )
        .bind(status.as_str())
        .bind(message_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn increment_delivered(&self, campaign_id: Uuid) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE campaigns SET delivered_count = delivered_count + 1 WHERE id = $1
            "#,
        )
        .bind(campaign_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn increment_read(&self, campaign_id: Uuid) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE campaigns SET read_count = read_count + 1 WHERE id = $1
            "#,
        )
        .bind(campaign_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn set_campaign_status(
        &self,
        campaign_id: Uuid,
        status: CampaignStatus,
    ) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE campaigns SET status = $1 WHERE id = $2
            "#,
        )
        .bind(status.as_str())
        .bind(campaign_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
