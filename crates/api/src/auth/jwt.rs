//! JWT access-token generation and validation.
//!
//! Access tokens are HS256-signed JWTs carrying a [`Claims`] payload. The
//! dashboard holds a single token per session; there is no refresh-token
//! rotation in this deployment.

use alinea_core::types::DbId;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject, the user's internal database id.
    pub sub: DbId,
    /// The user's email, for display without a lookup.
    pub email: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4) for audit.
    pub jti: String,
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Access token lifetime in hours (default: 8, one clinic workday).
    pub access_token_expiry_hours: i64,
}

/// Default access token expiry in hours.
const DEFAULT_ACCESS_EXPIRY_HOURS: i64 = 8;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                   | Required | Default |
    /// |---------------------------|----------|---------|
    /// | `JWT_SECRET`              | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_HOURS` | no       | `8`     |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let access_token_expiry_hours: i64 = std::env::var("JWT_ACCESS_EXPIRY_HOURS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_HOURS.to_string())
            .parse()
            .expect("JWT_ACCESS_EXPIRY_HOURS must be a valid i64");

        Self {
            secret,
            access_token_expiry_hours,
        }
    }
}

/// Generate an HS256 access token for the given user.
pub fn generate_access_token(
    user_id: DbId,
    email: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let exp = now + config.access_token_expiry_hours * 3600;

    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        exp,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Validates the signature, expiration, and issued-at claims automatically.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}
