//! Health timeline endpoint.

use axum::extract::State;
use axum::{Extension, Json};
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::TimelineEvent;
use crate::session::Session;

#[derive(Serialize)]
pub struct TimelineResponse {
    pub events: Vec<TimelineEvent>,
}

/// `GET /api/timeline` — the user's events, most recent first.
pub async fn list(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<Session>,
) -> Result<Json<TimelineResponse>, ApiError> {
    let store = ctx.core.store();
    let events = crate::timeline::list_for_owner(store.as_ref(), session.user_id).await?;
    Ok(Json(TimelineResponse { events }))
}
