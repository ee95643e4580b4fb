//! Dashboard endpoint: profile summary plus per-section counts.

use axum::extract::State;
use axum::{Extension, Json};
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::AccountTier;
use crate::session::Session;

#[derive(Serialize)]
pub struct DashboardStats {
    pub records: usize,
    pub timeline_events: usize,
    pub reminders: usize,
}

/// Free-tier storage banner shown on the dashboard.
#[derive(Serialize)]
pub struct StorageNotice {
    pub headline: &'static str,
    pub detail: &'static str,
}

#[derive(Serialize)]
pub struct DashboardResponse {
    pub email: String,
    pub account_type: AccountTier,
    pub premium: bool,
    pub stats: DashboardStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_notice: Option<StorageNotice>,
}

/// `GET /api/dashboard`
pub async fn view(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<Session>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let store = ctx.core.store();

    let records = crate::records::list_for_owner(store.as_ref(), session.user_id)
        .await?
        .len();
    let timeline_events = crate::timeline::list_for_owner(store.as_ref(), session.user_id)
        .await?
        .len();
    let reminders = crate::reminders::list_for_owner(store.as_ref(), session.user_id)
        .await
        .len();

    let premium = session.tier.is_premium();
    let storage_notice = (!premium).then_some(StorageNotice {
        headline: "Your records are safely stored free for 5 years",
        detail: "After 5 years you can continue storage for ₹299/year",
    });

    Ok(Json(DashboardResponse {
        email: session.email,
        account_type: session.tier,
        premium,
        stats: DashboardStats {
            records,
            timeline_events,
            reminders,
        },
        storage_notice,
    }))
}
