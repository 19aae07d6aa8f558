use axum::{
    extract::Request,
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::Response,
};

use crate::auth::jwt::validate_token;
use crate::models::Claims;

// Extension to store claims in request
#[derive(Clone)]
pub struct AuthUser {
    pub claims: Claims,
}

pub async fn auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // Extract the bearer token from the Authorization header
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(StatusCode::UNAUTHORIZED)?;

    // Validate the token
    let claims = validate_token(token).map_err(|_| StatusCode::UNAUTHORIZED)?;

    // Add the claims to the request extensions
    request.extensions_mut().insert(AuthUser { claims });

    Ok(next.run(request).await)
}
