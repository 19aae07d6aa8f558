// Idle guard: enforces the tracker's verdict on every protected request

use axum::{
    Json,
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{error, info};

use super::auth::AuthUser;
use crate::AppState;
use crate::session::Verdict;

/// Where the client is sent after an idle-triggered logout.
pub const IDLE_REDIRECT_PATH: &str = "/login?idle=1";

/// Check the current user's activity record before the request proceeds.
///
/// Must run after [`auth_middleware`](super::auth::auth_middleware) so
/// the user id is already resolved. On an idle verdict the request is
/// stopped here: the tracker has dropped the activity record and the
/// client is redirected to the login path with the idle indicator.
pub async fn idle_guard(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    let user = request.extensions().get::<AuthUser>().cloned().ok_or_else(|| {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Unauthorized"
            })),
        )
            .into_response()
    })?;

    let verdict = state.tracker.check_activity(&user.claims.sub).await.map_err(|e| {
        error!("Activity check failed for user {}: {}", user.claims.sub, e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Session store unavailable"
            })),
        )
            .into_response()
    })?;

    match verdict {
        Verdict::Allow => Ok(next.run(request).await),
        Verdict::ForceLogout => {
            info!("Forcing logout for idle user {}", user.claims.sub);
            Err((
                StatusCode::SEE_OTHER,
                [(header::LOCATION, IDLE_REDIRECT_PATH)],
                Json(json!({
                    "error": "session_idle",
                    "message": state.tracker.idle_message(),
                })),
            )
                .into_response())
        }
    }
}
