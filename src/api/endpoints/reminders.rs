//! Care reminders endpoint.

use axum::extract::State;
use axum::{Extension, Json};
use serde::Serialize;

use crate::api::types::ApiContext;
use crate::models::Reminder;
use crate::session::Session;

#[derive(Serialize)]
pub struct RemindersResponse {
    pub reminders: Vec<Reminder>,
}

/// `GET /api/reminders` — stored reminders plus the built-in demo pair.
/// Degrades to the demo pair alone on a store failure.
pub async fn list(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<Session>,
) -> Json<RemindersResponse> {
    let store = ctx.core.store();
    let reminders = crate::reminders::list_for_owner(store.as_ref(), session.user_id).await;
    Json(RemindersResponse { reminders })
}
