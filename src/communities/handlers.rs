//! Community and group endpoints

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::server::state::AppState;

use super::db;
use super::types::{
    Community, CommunityView, CreateCommunityRequest, CreateGroupRequest, Group, GroupMessage,
    MemberRole, SendGroupMessageRequest,
};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct MessagesQuery {
    pub limit: Option<i64>,
}

/// Create a community. An announcement group is created alongside it and
/// the creator becomes admin of both.
pub async fn create_community(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<CreateCommunityRequest>,
) -> Result<(StatusCode, Json<Community>), ApiError> {
    let pool = state.db()?;

    if request.name.trim().is_empty() {
        return Err(ApiError::bad_request("Community name is required"));
    }

    let community = db::create_community(
        pool,
        user.user_id,
        request.name.trim(),
        request.description.as_deref(),
        request.icon_url.as_deref(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(community)))
}

/// Communities the user belongs to, each with its groups.
pub async fn get_communities(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<CommunityView>>, ApiError> {
    let pool = state.db()?;
    let limit = query.limit.unwrap_or(50).clamp(1, 100);

    let memberships = db::get_communities_for_user(pool, user.user_id, limit).await?;

    let mut views = Vec::with_capacity(memberships.len());
    for (community, role) in memberships {
        let groups = db::get_groups_for_community(pool, community.id).await?;
        views.push(CommunityView {
            groups,
            is_member: true,
            is_admin: role == MemberRole::Admin,
            community,
        });
    }

    Ok(Json(views))
}

/// Get a single community with its groups and the caller's membership.
pub async fn get_community(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(community_id): Path<Uuid>,
) -> Result<Json<CommunityView>, ApiError> {
    let pool = state.db()?;

    let community = db::get_community(pool, community_id)
        .await?
        .ok_or(ApiError::NotFound("community"))?;
    let groups = db::get_groups_for_community(pool, community_id).await?;
    let role = db::get_community_role(pool, community_id, user.user_id).await?;

    Ok(Json(CommunityView {
        groups,
        is_member: role.is_some(),
        is_admin: role == Some(MemberRole::Admin),
        community,
    }))
}

/// Create a group within a community. Members only.
pub async fn create_group(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(community_id): Path<Uuid>,
    Json(request): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<Group>), ApiError> {
    let pool = state.db()?;

    db::get_community(pool, community_id)
        .await?
        .ok_or(ApiError::NotFound("community"))?;

    if db::get_community_role(pool, community_id, user.user_id)
        .await?
        .is_none()
    {
        return Err(ApiError::forbidden(
            "You must be a member of the community to create groups",
        ));
    }

    let group = db::create_group(
        pool,
        community_id,
        user.user_id,
        &request.name,
        request.description.as_deref(),
        request.icon_url.as_deref(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(group)))
}

/// Join a community. New members are also added to the announcement group.
pub async fn join_community(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(community_id): Path<Uuid>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let pool = state.db()?;

    let community = db::get_community(pool, community_id)
        .await?
        .ok_or(ApiError::NotFound("community"))?;

    if db::get_community_role(pool, community_id, user.user_id)
        .await?
        .is_some()
    {
        return Ok((
            StatusCode::CREATED,
            Json(json!({"message": "Already a member of this community"})),
        ));
    }

    db::add_community_member(pool, community_id, user.user_id, MemberRole::Member).await?;
    if !db::is_group_member(pool, community.announcement_group_id, user.user_id).await? {
        db::add_group_member(
            pool,
            community.announcement_group_id,
            user.user_id,
            MemberRole::Member,
        )
        .await?;
    }

    Ok((
        StatusCode::CREATED,
        Json(json!({"message": "Successfully joined community"})),
    ))
}

/// Join a group. Requires membership in the group's community.
pub async fn join_group(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(group_id): Path<Uuid>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let pool = state.db()?;

    let group = db::get_group(pool, group_id)
        .await?
        .ok_or(ApiError::NotFound("group"))?;

    if db::get_community_role(pool, group.community_id, user.user_id)
        .await?
        .is_none()
    {
        return Err(ApiError::forbidden(
            "You must be a member of the community to join this group",
        ));
    }

    if db::is_group_member(pool, group_id, user.user_id).await? {
        return Ok((
            StatusCode::CREATED,
            Json(json!({"message": "Already a member of this group"})),
        ));
    }

    db::add_group_member(pool, group_id, user.user_id, MemberRole::Member).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({"message": "Successfully joined group"})),
    ))
}

/// Send a message to a group. Members only.
pub async fn send_group_message(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(group_id): Path<Uuid>,
    Json(request): Json<SendGroupMessageRequest>,
) -> Result<(StatusCode, Json<GroupMessage>), ApiError> {
    let pool = state.db()?;

    db::get_group(pool, group_id)
        .await?
        .ok_or(ApiError::NotFound("group"))?;

    if !db::is_group_member(pool, group_id, user.user_id).await? {
        return Err(ApiError::forbidden(
            "You must be a member of this group to send messages",
        ));
    }

    let sender = auth::users::get_user_by_id(pool, user.user_id)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    let message = db::create_group_message(
        pool,
        group_id,
        user.user_id,
        &sender.name,
        &request.content,
        request.media_url.as_deref(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(message)))
}

/// Latest group messages, oldest first. Members only.
pub async fn get_group_messages(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(group_id): Path<Uuid>,
    Query(query): Query<MessagesQuery>,
) -> Result<Json<Vec<GroupMessage>>, ApiError> {
    let pool = state.db()?;
    let limit = query.limit.unwrap_or(100).clamp(1, 500);

    db::get_group(pool, group_id)
        .await?
        .ok_or(ApiError::NotFound("group"))?;

    if !db::is_group_member(pool, group_id, user.user_id).await? {
        return Err(ApiError::forbidden(
            "You must be a member of this group to view messages",
        ));
    }

    let messages = db::get_group_messages(pool, group_id, limit).await?;
    Ok(Json(messages))
}
