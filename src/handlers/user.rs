use axum::{Extension, Json, http::StatusCode};
use serde_json::{Value, json};

use crate::middleware::auth::AuthUser;

/// Sample protected resource; reaching it means the session is live.
pub async fn get_profile(Extension(auth_user): Extension<AuthUser>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "user_id": auth_user.claims.sub,
        })),
    )
}
