//! Database operations for the business profile

use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::users::User;

use super::types::UpdateProfileRequest;

/// Apply a partial profile update and return the updated user, or `None`
/// if the user does not exist.
pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    update: &UpdateProfileRequest,
) -> Result<Option<User>, sqlx::Error> {
    let row = sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET name = COALESCE($2, name),
            phone = COALESCE($3, phone),
            business_name = COALESCE($4, business_name),
            business_address = COALESCE($5, business_address),
            website = COALESCE($6, website),
            business_hours = COALESCE($7, business_hours),
            business_description = COALESCE($8, business_description),
            about = COALESCE($9, about)
        WHERE id = $1
        RETURNING id, name, email, password_hash, phone, business_name, business_address,
                  website, business_hours, business_description, about, created_at
        "#,
    )
    .bind(user_id)
    .bind(update.name.as_deref())
    .bind(update.phone.as_deref())
    .bind(update.business_name.as_deref())
    .bind(update.business_address.as_deref())
    .bind(update.website.as_deref())
    .bind(update.business_hours.as_deref())
    .bind(update.business_description.as_deref())
    .bind(update.about.as_deref())
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
