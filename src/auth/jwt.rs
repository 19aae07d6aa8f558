use crate::models::Claims;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::env;

const DEFAULT_SECRET: &str = "insecure-dev-secret-change-this-in-production";

fn get_secret() -> String {
    env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_SECRET.to_string())
}

/// Build claims for a freshly started session.
pub fn claims_for(user_id: &str, ttl_secs: i64) -> Claims {
    Claims {
        sub: user_id.to_string(),
        exp: (Utc::now().timestamp() + ttl_secs) as usize,
    }
}

pub fn create_token(claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
    let secret = get_secret();
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

pub fn validate_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let secret = get_secret();
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}
