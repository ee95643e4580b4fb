//! AI health analysis endpoint.

use axum::{Extension, Json};

use crate::analysis::{view_for, AnalysisView};
use crate::session::Session;

/// `GET /api/analysis` — the locked upsell view for basic accounts, the
/// personalized report for premium. No report is generated for basic
/// accounts.
pub async fn view(Extension(session): Extension<Session>) -> Json<AnalysisView> {
    Json(view_for(session.tier))
}
