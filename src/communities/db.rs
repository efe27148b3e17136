//! Database operations for communities, groups, and group messages

use chrono::Utc;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::types::{Community, Group, GroupMessage, MemberRole};

fn community_from_row(row: &sqlx::postgres::PgRow) -> Community {
    Community {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        icon_url: row.get("icon_url"),
        creator_id: row.get("creator_id"),
        announcement_group_id: row.get("announcement_group_id"),
        members_count: row.get("members_count"),
        created_at: row.get("created_at"),
    }
}

fn group_from_row(row: &sqlx::postgres::PgRow) -> Group {
    Group {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        icon_url: row.get("icon_url"),
        community_id: row.get("community_id"),
        creator_id: row.get("creator_id"),
        members_count: row.get("members_count"),
        created_at: row.get("created_at"),
    }
}

fn group_message_from_row(row: &sqlx::postgres::PgRow) -> GroupMessage {
    GroupMessage {
        id: row.get("id"),
        group_id: row.get("group_id"),
        user_id: row.get("user_id"),
        user_name: row.get("user_name"),
        content: row.get("content"),
        media_url: row.get("media_url"),
        created_at: row.get("created_at"),
    }
}

/// Create a community together with its announcement group, with the
/// creator as admin of both. Runs in a transaction.
pub async fn create_community(
    pool: &PgPool,
    creator_id: Uuid,
    name: &str,
    description: Option<&str>,
    icon_url: Option<&str>,
) -> Result<Community, sqlx::Error> {
    let community_id = Uuid::new_v4();
    let group_id = Uuid::new_v4();
    let now = Utc::now();

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO communities (id, name, description, icon_url, creator_id,
                                 announcement_group_id, members_count, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, 1, $7)
        "#,
    )
    .bind(community_id)
    .bind(name)
    .bind(description)
    .bind(icon_url)
    .bind(creator_id)
    .bind(group_id)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    let group_name = format!("{name} Announcements");
    sqlx::query(
        r#"
        INSERT INTO groups (id, name, description, icon_url, community_id,
                            creator_id, members_count, created_at)
        VALUES ($1, $2, 'Community announcements', $3, $4, $5, 1, $6)
        "#,
    )
    .bind(group_id)
    .bind(&group_name)
    .bind(icon_url)
    .bind(community_id)
    .bind(creator_id)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO community_members (community_id, user_id, role, joined_at)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(community_id)
    .bind(creator_id)
    .bind(MemberRole::Admin.as_str())
    .bind(now)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO group_members (group_id, user_id, role, joined_at)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(group_id)
    .bind(creator_id)
    .bind(MemberRole::Admin.as_str())
    .bind(now)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(Community {
        id: community_id,
        name: name.to_string(),
        description: description.map(|s| s.to_string()),
        icon_url: icon_url.map(|s| s.to_string()),
        creator_id,
        announcement_group_id: group_id,
        members_count: 1,
        created_at: now,
    })
}

/// Communities the user belongs to, paired with their role in each.
pub async fn get_communities_for_user(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
) -> Result<Vec<(Community, MemberRole)>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT co.id, co.name, co.description, co.icon_url, co.creator_id,
               co.announcement_group_id, co.members_count, co.created_at,
               m.role
        FROM communities co
        INNER JOIN community_members m ON m.community_id = co.id
        WHERE m.user_id = $1
        ORDER BY co.created_at DESC
        LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| {
            let role = MemberRole::from_str(row.get::<String, _>("role").as_str())
                .unwrap_or(MemberRole::Member);
            (community_from_row(row), role)
        })
        .collect())
}

/// Get a single community.
pub async fn get_community(
    pool: &PgPool,
    community_id: Uuid,
) -> Result<Option<Community>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, name, description, icon_url, creator_id,
               announcement_group_id, members_count, created_at
        FROM communities
        WHERE id = $1
        "#,
    )
    .bind(community_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(community_from_row))
}

/// All groups in a community, oldest first.
pub async fn get_groups_for_community(
    pool: &PgPool,
    community_id: Uuid,
) -> Result<Vec<Group>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, name, description, icon_url, community_id,
               creator_id, members_count, created_at
        FROM groups
        WHERE community_id = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(community_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(group_from_row).collect())
}

/// The user's role in a community, if they are a member.
pub async fn get_community_role(
    pool: &PgPool,
    community_id: Uuid,
    user_id: Uuid,
) -> Result<Option<MemberRole>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT role FROM community_members
        WHERE community_id = $1 AND user_id = $2
        "#,
    )
    .bind(community_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.and_then(|row| MemberRole::from_str(row.get::<String, _>("role").as_str())))
}

/// Add a community member and bump the member count. The caller checks
/// for existing membership first.
pub async fn add_community_member(
    pool: &PgPool,
    community_id: Uuid,
    user_id: Uuid,
    role: MemberRole,
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO community_members (community_id, user_id, role, joined_at)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(community_id)
    .bind(user_id)
    .bind(role.as_str())
    .bind(Utc::now())
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        UPDATE communities SET members_count = members_count + 1 WHERE id = $1
        "#,
    )
    .bind(community_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await
}

/// Create a group inside a community with the creator as admin.
pub async fn create_group(
    pool: &PgPool,
    community_id: Uuid,
    creator_id: Uuid,
    name: &str,
    description: Option<&str>,
    icon_url: Option<&str>,
) -> Result<Group, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO groups (id, name, description, icon_url, community_id,
                            creator_id, members_count, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, 1, $7)
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(description)
    .bind(icon_url)
    .bind(community_id)
    .bind(creator_id)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO group_members (group_id, user_id, role, joined_at)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(id)
    .bind(creator_id)
    .bind(MemberRole::Admin.as_str())
    .bind(now)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(Group {
        id,
        name: name.to_string(),
        description: description.map(|s| s.to_string()),
        icon_url: icon_url.map(|s| s.to_string()),
        community_id,
        creator_id,
        members_count: 1,
        created_at: now,
    })
}

/// Get a single group.
pub async fn get_group(pool: &PgPool, group_id: Uuid) -> Result<Option<Group>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, name, description, icon_url, community_id,
               creator_id, members_count, created_at
        FROM groups
        WHERE id = $1
        "#,
    )
    .bind(group_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(group_from_row))
}

/// Whether a user is a member of a group.
pub async fn is_group_member(
    pool: &PgPool,
    group_id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM group_members WHERE group_id = $1 AND user_id = $2
        ) AS found
        "#,
    )
    .bind(group_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(row.get("found"))
}

/// Add a group member and bump the member count.
pub async fn add_group_member(
    pool: &PgPool,
    group_id: Uuid,
    user_id: Uuid,
    role: MemberRole,
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO group_members (group_id, user_id, role, joined_at)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(group_id)
    .bind(user_id)
    .bind(role.as_str())
    .bind(Utc::now())
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        UPDATE groups SET members_count = members_count + 1 WHERE id = $1
        "#,
    )
    .bind(group_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await
}

/// Insert a group message.
pub async fn create_group_message(
    pool: &PgPool,
    group_id: Uuid,
    user_id: Uuid,
    user_name: &str,
    content: &str,
    media_url: Option<&str>,
) -> Result<GroupMessage, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO group_messages (id, group_id, user_id, user_name, content, media_url, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(id)
    .bind(group_id)
    .bind(user_id)
    .bind(user_name)
    .bind(content)
    .bind(media_url)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(GroupMessage {
        id,
        group_id,
        user_id,
        user_name: user_name.to_string(),
        content: content.to_string(),
        media_url: media_url.map(|s| s.to_string()),
        created_at: now,
    })
}

/// Latest group messages, returned in chronological order.
pub async fn get_group_messages(
    pool: &PgPool,
    group_id: Uuid,
    limit: i64,
) -> Result<Vec<GroupMessage>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, group_id, user_id, user_name, content, media_url, created_at
        FROM group_messages
        WHERE group_id = $1
        ORDER BY created_at DESC
        LIMIT $2
        "#,
    )
    .bind(group_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    let mut messages: Vec<GroupMessage> = rows.iter().map(group_message_from_row).collect();
    messages.reverse();
    Ok(messages)
}
