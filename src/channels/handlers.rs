//! Broadcast channel endpoints

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::server::state::AppState;

use super::db;
use super::types::{
    Channel, ChannelMessage, ChannelView, CreateChannelRequest, PostChannelMessageRequest,
};

#[derive(Debug, Deserialize)]
pub struct DiscoveryQuery {
    pub search: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct MessagesQuery {
    pub limit: Option<i64>,
}

/// Create a broadcast channel. Channel names are unique per creator.
pub async fn create_channel(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<CreateChannelRequest>,
) -> Result<(StatusCode, Json<Channel>), ApiError> {
    let pool = state.db()?;

    if request.name.trim().is_empty() {
        return Err(ApiError::bad_request("Channel name is required"));
    }

    if db::channel_name_exists(pool, user.user_id, &request.name).await? {
        return Err(ApiError::bad_request(
            "You already have a channel with this name",
        ));
    }

    let channel = db::create_channel(
        pool,
        user.user_id,
        &request.name,
        request.description.as_deref(),
        request.avatar_url.as_deref(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(channel)))
}

/// Discover channels, most followed first.
pub async fn get_channels(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<DiscoveryQuery>,
) -> Result<Json<Vec<ChannelView>>, ApiError> {
    let pool = state.db()?;
    let limit = query.limit.unwrap_or(50).clamp(1, 100);

    let channels = db::list_channels(pool, query.search.as_deref(), limit).await?;
    let followed = db::get_followed_channel_ids(pool, user.user_id).await?;

    let views = channels
        .into_iter()
        .map(|channel| ChannelView {
            is_following: followed.contains(&channel.id),
            is_creator: channel.creator_id == user.user_id,
            channel,
        })
        .collect();

    Ok(Json(views))
}

/// Channels the user follows.
pub async fn get_following_channels(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<ChannelView>>, ApiError> {
    let pool = state.db()?;
    let channels = db::get_followed_channels(pool, user.user_id).await?;

    let views = channels
        .into_iter()
        .map(|channel| ChannelView {
            is_following: true,
            is_creator: channel.creator_id == user.user_id,
            channel,
        })
        .collect();

    Ok(Json(views))
}

/// Get a single channel with the caller's follow status.
pub async fn get_channel(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(channel_id): Path<Uuid>,
) -> Result<Json<ChannelView>, ApiError> {
    let pool = state.db()?;
    let channel = db::get_channel(pool, channel_id)
        .await?
        .ok_or(ApiError::NotFound("channel"))?;
    let is_following = db::is_following(pool, channel_id, user.user_id).await?;

    Ok(Json(ChannelView {
        is_following,
        is_creator: channel.creator_id == user.user_id,
        channel,
    }))
}

/// Follow a channel. Following twice is a no-op.
pub async fn follow_channel(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(channel_id): Path<Uuid>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let pool = state.db()?;

    db::get_channel(pool, channel_id)
        .await?
        .ok_or(ApiError::NotFound("channel"))?;

    if db::is_following(pool, channel_id, user.user_id).await? {
        return Ok((
            StatusCode::CREATED,
            Json(json!({"message": "Already following this channel"})),
        ));
    }

    db::add_follower(pool, channel_id, user.user_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({"message": "Successfully followed channel"})),
    ))
}

/// Unfollow a channel.
pub async fn unfollow_channel(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(channel_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let pool = state.db()?;

    let removed = db::remove_follower(pool, channel_id, user.user_id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound("channel follow"));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Post to a channel. Creator only.
pub async fn post_channel_message(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(channel_id): Path<Uuid>,
    Json(request): Json<PostChannelMessageRequest>,
) -> Result<(StatusCode, Json<ChannelMessage>), ApiError> {
    let pool = state.db()?;

    let channel = db::get_channel(pool, channel_id)
        .await?
        .ok_or(ApiError::NotFound("channel"))?;
    if channel.creator_id != user.user_id {
        return Err(ApiError::forbidden(
            "Only the channel creator can post messages",
        ));
    }

    let message = db::create_channel_message(
        pool,
        channel_id,
        &request.content,
        request.media_url.as_deref(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(message)))
}

/// Latest channel posts, oldest first.
pub async fn get_channel_messages(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Path(channel_id): Path<Uuid>,
    Query(query): Query<MessagesQuery>,
) -> Result<Json<Vec<ChannelMessage>>, ApiError> {
    let pool = state.db()?;
    let limit = query.limit.unwrap_or(100).clamp(1, 500);

    db::get_channel(pool, channel_id)
        .await?
        .ok_or(ApiError::NotFound("channel"))?;

    let messages = db::get_channel_messages(pool, channel_id, limit).await?;
    Ok(Json(messages))
}

/// Delete a channel and everything in it. Creator only.
pub async fn delete_channel(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(channel_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let pool = state.db()?;

    let channel = db::get_channel(pool, channel_id)
        .await?
        .ok_or(ApiError::NotFound("channel"))?;
    if channel.creator_id != user.user_id {
        return Err(ApiError::forbidden(
            "Only the channel creator can delete the channel",
        ));
    }

    db::delete_channel(pool, channel_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
