use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SecurityConfig;

pub const ADMIN_ROLE: &str = "admin";

/// Longest token lifetime handed out, whatever the config asks for
pub const MAX_TOKEN_HOURS: u64 = 24 * 366;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn admin(username: impl Into<String>, expiry_hours: u64) -> Self {
        let now = Utc::now();
        let hours = expiry_hours.min(MAX_TOKEN_HOURS) as i64;
        let exp = (now + Duration::hours(hours)).timestamp();

        Self {
            sub: username.into(),
            role: ADMIN_ROLE.to_string(),
            iat: now.timestamp(),
            exp,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }

    /// Seconds between issue and expiry
    pub fn lifetime_secs(&self) -> u64 {
        u64::try_from(self.exp - self.iat).unwrap_or(0)
    }
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),

    #[error("JWT secret not configured")]
    InvalidSecret,
}

pub fn generate_jwt(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key)
        .map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

pub fn validate_jwt(token: &str, secret: &str) -> Result<Claims, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let token_data = decode::<Claims>(token, &decoding_key, &Validation::default())
        .map_err(|e| JwtError::InvalidToken(e.to_string()))?;

    Ok(token_data.claims)
}

/// Both halves of the admin pair must match
pub fn check_credentials(security: &SecurityConfig, username: &str, password: &str) -> bool {
    !security.admin_password.is_empty()
        && username == security.admin_username
        && password == security.admin_password
}

#[cfg(test)]
mod tests {
    use super::*;

    fn security() -> SecurityConfig {
        SecurityConfig {
            cors_origins: vec!["*".to_string()],
            admin_username: "UbertAngel".to_string(),
            admin_password: "SpiritEmbassy12345678".to_string(),
            jwt_secret: "test-secret".to_string(),
            jwt_expiry_hours: 1,
        }
    }

    #[test]
    fn token_round_trips_claims() {
        let claims = Claims::admin("UbertAngel", 1);
        let token = generate_jwt(&claims, "test-secret").unwrap();
        let decoded = validate_jwt(&token, "test-secret").unwrap();
        assert_eq!(decoded.sub, "UbertAngel");
        assert!(decoded.is_admin());
        assert!(decoded.exp > decoded.iat);
    }

    #[test]
    fn oversized_expiry_is_capped() {
        let claims = Claims::admin("a", u64::MAX);
        assert_eq!(claims.lifetime_secs(), MAX_TOKEN_HOURS * 3600);
        assert!(generate_jwt(&claims, "test-secret").is_ok());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = generate_jwt(&Claims::admin("a", 1), "one").unwrap();
        assert!(matches!(validate_jwt(&token, "two"), Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn empty_secret_refuses_to_sign() {
        assert!(matches!(
            generate_jwt(&Claims::admin("a", 1), ""),
            Err(JwtError::InvalidSecret)
        ));
    }

    #[test]
    fn credentials_must_both_match() {
        let security = security();
        assert!(check_credentials(&security, "UbertAngel", "SpiritEmbassy12345678"));
        assert!(!check_credentials(&security, "UbertAngel", "wrong"));
        assert!(!check_credentials(&security, "ubertangel", "SpiritEmbassy12345678"));
    }
}
