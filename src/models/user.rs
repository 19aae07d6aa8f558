use serde::{Deserialize, Serialize};

/// Start-session request for a user whose credentials were already
/// verified upstream; this service only manages the session tier.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // User ID
    pub exp: usize,  // Expiration time
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user_id: String,
}
