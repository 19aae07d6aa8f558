use axum::{Extension, Json, extract::State, http::StatusCode};
use serde_json::{Value, json};
use tracing::info;

use crate::AppState;
use crate::auth::jwt::{claims_for, create_token};
use crate::middleware::auth::AuthUser;
use crate::models::{AuthResponse, LoginRequest};

/// Start a session for a user authenticated upstream.
///
/// Issues a bearer token and seeds the activity record, so the idle
/// window opens at login time.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), (StatusCode, Json<Value>)> {
    // Validate input
    if payload.user_id.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "user_id is required"
            })),
        ));
    }

    let claims = claims_for(&payload.user_id, state.config.auth.token_expiration_secs);
    let token = create_token(&claims).map_err(|_| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Failed to create token"
            })),
        )
    })?;

    state.tracker.on_authenticate(&payload.user_id).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": format!("Session store unavailable: {}", e)
            })),
        )
    })?;

    info!("Session started for user {}", payload.user_id);

    Ok((
        StatusCode::OK,
        Json(AuthResponse {
            token,
            user_id: payload.user_id,
        }),
    ))
}

/// Explicit logout: drops the activity record for the current user.
///
/// The auth middleware resolves who the current user is; an activity
/// record must never outlive its session.
pub async fn logout(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    state.tracker.on_logout(&auth_user.claims.sub).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": format!("Session store unavailable: {}", e)
            })),
        )
    })?;

    info!("Session ended for user {}", auth_user.claims.sub);

    Ok((
        StatusCode::OK,
        Json(json!({
            "status": "logged_out"
        })),
    ))
}
