//! Share-with-doctor endpoint.

use axum::{Extension, Json};
use serde::Serialize;

use crate::session::Session;

#[derive(Serialize)]
pub struct ShareLinkResponse {
    pub share_link: &'static str,
}

/// `POST /api/share/link` — generate the shareable link for the user's
/// records. Demo mode: the link is a fixed placeholder.
pub async fn generate(Extension(session): Extension<Session>) -> Json<ShareLinkResponse> {
    tracing::info!(user = %session.email, "share link generated");
    Json(ShareLinkResponse {
        share_link: "https://healthrecord.demo/share/abc123xyz",
    })
}
