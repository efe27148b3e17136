//! Campaign endpoints: launch, list, stats, recipients

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::chat;
use crate::chat::types::{MessageDirection, MessageType};
use crate::contacts;
use crate::contacts::types::ContactSource;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::server::state::AppState;
use crate::sheets;
use crate::simulation::MessageStatus;
use crate::templates;

use super::db;
use super::types::{Campaign, CampaignContact, CampaignStats, CreateCampaignRequest};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}

/// Launch a campaign: pull recipients from a published sheet, send one
/// message per recipient, then hand the message batch to the simulator.
pub async fn create_campaign(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<CreateCampaignRequest>,
) -> Result<(StatusCode, Json<Campaign>), ApiError> {
    let pool = state.db()?;

    if request.name.trim().is_empty() {
        return Err(ApiError::bad_request("Campaign name is required"));
    }

    let sheet = state
        .sheets
        .fetch(&request.sheet_url, request.gid.as_deref())
        .await?;
    if sheet.rows.is_empty() {
        return Err(ApiError::bad_request("No data found in the sheet"));
    }

    let template = request
        .template_id
        .as_deref()
        .and_then(templates::catalog::get);

    let mut contact_ids = Vec::new();
    let mut message_ids = Vec::new();

    for row in &sheet.rows {
        let Some((name, phone)) = sheets::client::contact_fields(row) else {
            continue;
        };

        let contact = match contacts::db::get_contact_by_phone(pool, user.user_id, &phone).await? {
            Some(existing) => existing,
            None => {
                let tags = vec!["campaign".to_string(), request.name.clone()];
                contacts::db::create_contact(
                    pool,
                    user.user_id,
                    &name,
                    &phone,
                    None,
                    &tags,
                    ContactSource::Sheet,
                )
                .await?
            }
        };

        let thread_id = chat::db::get_or_create_thread(pool, user.user_id, contact.id).await?;

        let (content, message_type) = match template {
            Some(template) => {
                let mut values = vec![name.clone()];
                values.extend(request.template_parameters.iter().cloned());
                (templates::render(template.content, &values), MessageType::Template)
            }
            None => (
                format!(
                    "Hello {}! This is a message from {} campaign.",
                    name, request.name
                ),
                MessageType::Text,
            ),
        };

        let message = chat::db::create_message(
            pool,
            thread_id,
            MessageDirection::Outbound,
            &content,
            message_type,
            MessageStatus::Sent,
        )
        .await?;
        chat::db::update_thread_snapshot(pool, thread_id, &content, false).await?;

        contact_ids.push(contact.id);
        message_ids.push(message.id);
    }

    if message_ids.is_empty() {
        return Err(ApiError::bad_request(
            "No rows with a phone number found in the sheet",
        ));
    }

    let campaign = db::create_campaign(
        pool,
        user.user_id,
        request.name.trim(),
        request.template_id.as_deref(),
        &contact_ids,
        &message_ids,
    )
    .await?;

    tracing::info!(
        campaign_id = %campaign.id,
        recipients = campaign.total_contacts,
        "campaign launched"
    );

    if let Some(simulation) = &state.simulation {
        simulation.spawn_campaign_simulation(campaign.id);
    }

    Ok((StatusCode::CREATED, Json(campaign)))
}

/// List the user's campaigns, newest first.
pub async fn get_campaigns(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Campaign>>, ApiError> {
    let pool = state.db()?;
    let limit = query.limit.unwrap_or(50).clamp(1, 100);
    let campaigns = db::get_campaigns_for_user(pool, user.user_id, limit).await?;
    Ok(Json(campaigns))
}

/// Get a single campaign.
pub async fn get_campaign(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(campaign_id): Path<Uuid>,
) -> Result<Json<Campaign>, ApiError> {
    let pool = state.db()?;
    let campaign = db::get_campaign(pool, campaign_id, user.user_id)
        .await?
        .ok_or(ApiError::NotFound("campaign"))?;
    Ok(Json(campaign))
}

/// Delivery funnel for a campaign, computed from live message statuses.
pub async fn get_campaign_stats(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(campaign_id): Path<Uuid>,
) -> Result<Json<CampaignStats>, ApiError> {
    let pool = state.db()?;
    let campaign = db::get_campaign(pool, campaign_id, user.user_id)
        .await?
        .ok_or(ApiError::NotFound("campaign"))?;

    let delivered_count = db::count_messages_with_status(
        pool,
        &campaign.message_ids,
        &[MessageStatus::Delivered, MessageStatus::Read],
    )
    .await?;
    let read_count =
        db::count_messages_with_status(pool, &campaign.message_ids, &[MessageStatus::Read])
            .await?;
    let failed_count =
        db::count_messages_with_status(pool, &campaign.message_ids, &[MessageStatus::Failed])
            .await?;

    Ok(Json(CampaignStats {
        campaign_id: campaign.id,
        total_contacts: campaign.total_contacts,
        sent_count: campaign.message_ids.len() as i64,
        delivered_count,
        read_count,
        failed_count,
    }))
}

/// Per-recipient delivery status for a campaign.
pub async fn get_campaign_contacts(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(campaign_id): Path<Uuid>,
) -> Result<Json<Vec<CampaignContact>>, ApiError> {
    let pool = state.db()?;
    let campaign = db::get_campaign(pool, campaign_id, user.user_id)
        .await?
        .ok_or(ApiError::NotFound("campaign"))?;
    let contacts = db::get_campaign_contacts(pool, &campaign.message_ids).await?;
    Ok(Json(contacts))
}
