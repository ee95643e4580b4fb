//! Sign-in, sign-out, and the demo-mode account pages.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::middleware::auth::bearer_token;
use crate::api::types::ApiContext;
use crate::models::AccountTier;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub email: String,
    pub account_type: AccountTier,
}

/// `POST /api/auth/login`
pub async fn login(
    State(ctx): State<ApiContext>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let email = req.email.trim();
    if email.is_empty() || req.password.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Please enter both email and password.".into(),
        ));
    }

    let (token, session) = ctx.core.sign_in(email, &req.password).await?;
    Ok(Json(LoginResponse {
        token,
        email: session.email,
        account_type: session.tier,
    }))
}

/// `POST /api/auth/logout` — revokes the presented bearer token.
pub async fn logout(State(ctx): State<ApiContext>, headers: HeaderMap) -> StatusCode {
    if let Some(token) = bearer_token(&headers) {
        ctx.core.sign_out(token);
    }
    StatusCode::NO_CONTENT
}

#[derive(Deserialize)]
pub struct SignupRequest {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct DemoNotice {
    pub message: &'static str,
}

/// `POST /api/auth/signup` — account creation is not available in demo
/// mode; the directory holds only the two fixed demo accounts.
pub async fn signup(Json(req): Json<SignupRequest>) -> Result<Json<DemoNotice>, ApiError> {
    if req.full_name.trim().is_empty()
        || req.phone.trim().is_empty()
        || req.email.trim().is_empty()
        || req.password.trim().is_empty()
    {
        return Err(ApiError::BadRequest("All fields are required.".into()));
    }

    Ok(Json(DemoNotice {
        message: "Account creation is disabled in demo mode. Sign in with a demo account.",
    }))
}

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// `POST /api/auth/forgot-password` — demo mode: pretends to send the
/// reset link.
pub async fn forgot_password(
    Json(req): Json<ForgotPasswordRequest>,
) -> Result<Json<DemoNotice>, ApiError> {
    if req.email.trim().is_empty() {
        return Err(ApiError::BadRequest("Please enter your email.".into()));
    }

    Ok(Json(DemoNotice {
        message: "Password reset link sent to your email (Demo Mode)",
    }))
}
