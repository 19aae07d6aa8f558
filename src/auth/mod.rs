pub mod jwt;

pub use jwt::{claims_for, create_token, validate_token};
