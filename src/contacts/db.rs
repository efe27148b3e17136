//! Database operations for contacts

use chrono::Utc;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::types::{Contact, ContactSource};

fn contact_from_row(row: &sqlx::postgres::PgRow) -> Contact {
    Contact {
        id: row.get("id"),
        user_id: row.get("user_id"),
        name: row.get("name"),
        phone: row.get("phone"),
        email: row.get("email"),
        tags: row.get("tags"),
        source: ContactSource::from_str(row.get::<String, _>("source").as_str())
            .unwrap_or(ContactSource::Manual),
        created_at: row.get("created_at"),
    }
}

/// Create a contact for a user.
pub async fn create_contact(
    pool: &PgPool,
    user_id: Uuid,
    name: &str,
    phone: &str,
    email: Option<&str>,
    tags: &[String],
    source: ContactSource,
) -> Result<Contact, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO contacts (id, user_id, name, phone, email, tags, source, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(name)
    .bind(phone)
    .bind(email)
    .bind(tags)
    .bind(source.as_str())
    .bind(now)
    .execute(pool)
    .await?;

    Ok(Contact {
        id,
        user_id,
        name: name.to_string(),
        phone: phone.to_string(),
        email: email.map(|s| s.to_string()),
        tags: tags.to_vec(),
        source,
        created_at: now,
    })
}

/// Get all contacts for a user, ordered by name.
pub async fn get_contacts_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<Contact>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, user_id, name, phone, email, tags, source, created_at
        FROM contacts
        WHERE user_id = $1
        ORDER BY name ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(contact_from_row).collect())
}

/// Get a single contact owned by a user.
pub async fn get_contact(
    pool: &PgPool,
    contact_id: Uuid,
    user_id: Uuid,
) -> Result<Option<Contact>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, user_id, name, phone, email, tags, source, created_at
        FROM contacts
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(contact_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(contact_from_row))
}

/// Find a user's contact by phone number.
pub async fn get_contact_by_phone(
    pool: &PgPool,
    user_id: Uuid,
    phone: &str,
) -> Result<Option<Contact>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, user_id, name, phone, email, tags, source, created_at
        FROM contacts
        WHERE user_id = $1 AND phone = $2
        "#,
    )
    .bind(user_id)
    .bind(phone)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(contact_from_row))
}

/// Update the provided fields of a contact. Returns the updated contact,
/// or `None` if the contact does not exist or belongs to another user.
pub async fn update_contact(
    pool: &PgPool,
    contact_id: Uuid,
    user_id: Uuid,
    name: Option<&str>,
    phone: Option<&str>,
    email: Option<&str>,
    tags: Option<&[String]>,
) -> Result<Option<Contact>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        UPDATE contacts
        SET name = COALESCE($3, name),
            phone = COALESCE($4, phone),
            email = COALESCE($5, email),
            tags = COALESCE($6, tags)
        WHERE id = $1 AND user_id = $2
        RETURNING id, user_id, name, phone, email, tags, source, created_at
        "#,
    )
    .bind(contact_id)
    .bind(user_id)
    .bind(name)
    .bind(phone)
    .bind(email)
    .bind(tags)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(contact_from_row))
}

/// Delete a contact. Returns the number of rows removed.
pub async fn delete_contact(
    pool: &PgPool,
    contact_id: Uuid,
    user_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM contacts
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(contact_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
