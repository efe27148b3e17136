//! Chat HTTP handlers
//!
//! Sending a message creates the thread on demand, refreshes the thread
//! snapshot, then fires two background tasks: the deterministic two-phase
//! delivery simulation and the keyword auto-reply bot. Neither is awaited
//! by the request.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::contacts::db as contacts_db;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::server::state::AppState;
use crate::simulation::MessageStatus;
use crate::templates;

use super::autoreply;
use super::db;
use super::types::{
    ChatThread, Message, MessageDirection, SendMessageRequest, SendTemplateRequest,
    UpdateMessageStatusRequest,
};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}

/// Get all chat threads for the current user.
pub async fn get_chat_threads(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ChatThread>>, ApiError> {
    let pool = state.db()?;
    let limit = query.limit.unwrap_or(50).min(100);

    let threads = db::get_threads_for_user(pool, user.user_id, limit).await?;
    Ok(Json(threads))
}

/// Get all messages in the thread with a contact.
pub async fn get_thread_messages(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(contact_id): Path<Uuid>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Message>>, ApiError> {
    let pool = state.db()?;
    let limit = query.limit.unwrap_or(100).min(500);

    let thread_id = db::get_or_create_thread(pool, user.user_id, contact_id).await?;
    let messages = db::get_messages_for_thread(pool, thread_id, limit).await?;
    Ok(Json(messages))
}

/// Send a message to a contact.
pub async fn send_message(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    let message = send_to_contact(
        &state,
        user.user_id,
        request.contact_id,
        request.content,
        request.message_type,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(message)))
}

/// Send a template message to a contact.
pub async fn send_template_message(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<SendTemplateRequest>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    let template = templates::catalog::get(&request.template_id)
        .ok_or(ApiError::NotFound("template"))?;

    let content = templates::render(&template.content, &request.parameters);

    let message = send_to_contact(
        &state,
        user.user_id,
        request.contact_id,
        content,
        super::types::MessageType::Template,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(message)))
}

/// Shared send path for plain and template messages.
async fn send_to_contact(
    state: &AppState,
    user_id: Uuid,
    contact_id: Uuid,
    content: String,
    message_type: super::types::MessageType,
) -> Result<Message, ApiError> {
    let pool = state.db()?;

    // The contact must exist and belong to the sender.
    contacts_db::get_contact(pool, contact_id, user_id)
        .await?
        .ok_or(ApiError::NotFound("contact"))?;

    let thread_id = db::get_or_create_thread(pool, user_id, contact_id).await?;

    let message = db::create_message(
        pool,
        thread_id,
        MessageDirection::Outbound,
        &content,
        message_type,
        MessageStatus::Sent,
    )
    .await?;

    db::update_thread_snapshot(pool, thread_id, &content, false).await?;

    autoreply::spawn_auto_reply(pool.clone(), thread_id, content);
    if let Some(simulation) = &state.simulation {
        simulation.spawn_chat_message_simulation(message.id);
    }

    Ok(message)
}

/// Manually correct a message's status.
///
/// Validates the transition against the state machine; this is the only
/// caller allowed to set `failed`.
pub async fn update_message_status(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Path(message_id): Path<Uuid>,
    Json(request): Json<UpdateMessageStatusRequest>,
) -> Result<Json<Message>, ApiError> {
    let pool = state.db()?;

    let message = db::get_message(pool, message_id)
        .await?
        .ok_or(ApiError::NotFound("message"))?;

    if !message.status.can_transition_to(request.status) {
        return Err(ApiError::conflict(format!(
            "cannot transition message from {} to {}",
            message.status, request.status
        )));
    }

    db::set_message_status(pool, message_id, request.status).await?;

    Ok(Json(Message {
        status: request.status,
        ..message
    }))
}
