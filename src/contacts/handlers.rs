//! Contact HTTP handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::server::state::AppState;
use crate::sheets::contact_fields;

use super::db;
use super::types::{
    Contact, ContactSource, CreateContactRequest, ImportContactsRequest, ImportContactsResponse,
    UpdateContactRequest,
};

/// Create a contact manually.
pub async fn create_contact(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<CreateContactRequest>,
) -> Result<(StatusCode, Json<Contact>), ApiError> {
    let pool = state.db()?;

    if request.phone.trim().is_empty() {
        return Err(ApiError::bad_request("phone is required"));
    }

    if db::get_contact_by_phone(pool, user.user_id, &request.phone)
        .await?
        .is_some()
    {
        return Err(ApiError::conflict(
            "contact with this phone number already exists",
        ));
    }

    let contact = db::create_contact(
        pool,
        user.user_id,
        &request.name,
        &request.phone,
        request.email.as_deref(),
        &request.tags,
        ContactSource::Manual,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(contact)))
}

/// Get all contacts for the current user.
pub async fn get_contacts(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<Contact>>, ApiError> {
    let pool = state.db()?;
    let contacts = db::get_contacts_for_user(pool, user.user_id).await?;
    Ok(Json(contacts))
}

/// Update a contact.
pub async fn update_contact(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(contact_id): Path<Uuid>,
    Json(request): Json<UpdateContactRequest>,
) -> Result<Json<Contact>, ApiError> {
    let pool = state.db()?;

    let contact = db::update_contact(
        pool,
        contact_id,
        user.user_id,
        request.name.as_deref(),
        request.phone.as_deref(),
        request.email.as_deref(),
        request.tags.as_deref(),
    )
    .await?
    .ok_or(ApiError::NotFound("contact"))?;

    Ok(Json(contact))
}

/// Delete a contact.
pub async fn delete_contact(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(contact_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let pool = state.db()?;

    let removed = db::delete_contact(pool, contact_id, user.user_id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound("contact"));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Import contacts from a shared spreadsheet.
///
/// Rows without a phone number are skipped; rows whose phone already
/// exists for this user are skipped as duplicates.
pub async fn import_contacts(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<ImportContactsRequest>,
) -> Result<(StatusCode, Json<ImportContactsResponse>), ApiError> {
    let pool = state.db()?;

    let sheet = state
        .sheets
        .fetch(&request.sheet_url, request.gid.as_deref())
        .await?;

    let mut imported = Vec::new();
    let mut skipped = 0usize;

    for row in &sheet.rows {
        let Some((name, phone)) = contact_fields(row) else {
            skipped += 1;
            continue;
        };

        if db::get_contact_by_phone(pool, user.user_id, &phone)
            .await?
            .is_some()
        {
            skipped += 1;
            continue;
        }

        let contact = db::create_contact(
            pool,
            user.user_id,
            &name,
            &phone,
            None,
            &["import".to_string()],
            ContactSource::Import,
        )
        .await?;
        imported.push(contact);
    }

    tracing::info!(
        user_id = %user.user_id,
        imported = imported.len(),
        skipped,
        "imported contacts from sheet"
    );

    Ok((
        StatusCode::CREATED,
        Json(ImportContactsResponse {
            imported: imported.len(),
            skipped,
            contacts: imported,
        }),
    ))
}
