//! Records list, detail, and delete.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Serialize;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::MedicalRecord;
use crate::session::Session;

#[derive(Serialize)]
pub struct RecordsResponse {
    pub records: Vec<MedicalRecord>,
}

/// `GET /api/records` — the user's records, newest first.
pub async fn list(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<Session>,
) -> Result<Json<RecordsResponse>, ApiError> {
    let store = ctx.core.store();
    let records = crate::records::list_for_owner(store.as_ref(), session.user_id).await?;
    Ok(Json(RecordsResponse { records }))
}

/// `GET /api/records/:id`
pub async fn detail(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<Json<MedicalRecord>, ApiError> {
    let store = ctx.core.store();
    let record = crate::records::fetch(store.as_ref(), session.user_id, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Record not found".into()))?;
    Ok(Json(record))
}

/// `DELETE /api/records/:id`
pub async fn remove(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let store = ctx.core.store();
    // Ownership check before the delete: the row must be the caller's.
    crate::records::fetch(store.as_ref(), session.user_id, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Record not found".into()))?;

    crate::records::remove(store.as_ref(), id).await?;
    tracing::info!(record_id = %id, "record deleted");
    Ok(StatusCode::NO_CONTENT)
}
