//! Upload start, status, and reset.

use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::RecordKind;
use crate::session::Session;
use crate::upload::{UploadError, UploadMachine, UploadSnapshot};

#[derive(Deserialize)]
pub struct StartUploadRequest {
    pub file_type: String,
}

#[derive(Serialize)]
pub struct StartUploadResponse {
    pub upload_id: Uuid,
    pub record_id: Uuid,
    pub status: &'static str,
}

/// `POST /api/records/upload`
///
/// The record creation is awaited so a store failure surfaces to the
/// caller immediately; the stage sequence and the completion writes run
/// in a background task, observable via the status endpoint.
pub async fn start(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<Session>,
    Json(req): Json<StartUploadRequest>,
) -> Result<Json<StartUploadResponse>, ApiError> {
    let kind = RecordKind::from_str(req.file_type.trim())
        .map_err(|_| ApiError::BadRequest(format!("Unsupported file type: {}", req.file_type)))?;

    let machine = Arc::new(UploadMachine::new(ctx.core.store(), ctx.core.clock()));
    let record_id = match machine.begin(&session, kind).await {
        Ok(record_id) => record_id,
        Err(UploadError::Store(message)) => return Err(ApiError::UploadFailed(message)),
        Err(UploadError::AlreadyInFlight) => {
            return Err(ApiError::BadRequest("An upload is already in progress".into()))
        }
    };

    let upload_id = ctx.core.register_upload(session.user_id, machine.clone())?;

    let worker = machine.clone();
    let worker_session = session.clone();
    tokio::spawn(async move {
        worker.process(&worker_session, record_id).await;
    });

    Ok(Json(StartUploadResponse {
        upload_id,
        record_id,
        status: "processing",
    }))
}

/// `GET /api/uploads/:id` — current machine snapshot.
pub async fn status(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<Json<UploadSnapshot>, ApiError> {
    let handle = owned_handle(&ctx, &session, &id)?;
    Ok(Json(handle.machine.snapshot()))
}

/// `POST /api/uploads/:id/reset` — back to idle after completion
/// ("Upload Another").
pub async fn reset(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<Json<UploadSnapshot>, ApiError> {
    let handle = owned_handle(&ctx, &session, &id)?;
    handle.machine.reset();
    Ok(Json(handle.machine.snapshot()))
}

fn owned_handle(
    ctx: &ApiContext,
    session: &Session,
    id: &Uuid,
) -> Result<crate::core_state::UploadHandle, ApiError> {
    ctx.core
        .upload_handle(id)?
        .filter(|handle| handle.owner == session.user_id)
        .ok_or_else(|| ApiError::NotFound("Upload not found".into()))
}
