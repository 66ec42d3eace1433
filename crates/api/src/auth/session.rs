//! Session token verification.
//!
//! Sessions are issued by the hosted auth service as HS256-signed JWTs. The
//! server never creates sessions for real users; it only verifies the token
//! the client presents and reads the user id from `sub`.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use pilakon_core::types::UserId;
use serde::{Deserialize, Serialize};

/// Audience claim carried by tokens of signed-in users.
pub const DEFAULT_AUDIENCE: &str = "authenticated";

/// Name of the cookie that can carry the access token instead of the
/// `Authorization` header.
pub const ACCESS_TOKEN_COOKIE: &str = "sb-access-token";

/// JWT claims read from a session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject: the auth service's user id.
    pub sub: UserId,
    /// Audience, `"authenticated"` for signed-in users.
    pub aud: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Configuration for session token validation.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// HMAC-SHA256 secret shared with the auth service.
    pub jwt_secret: String,
    /// Required `aud` claim.
    pub audience: String,
}

impl SessionConfig {
    /// Load session configuration from environment variables.
    ///
    /// | Env Var                 | Required | Default         |
    /// |-------------------------|----------|-----------------|
    /// | `SUPABASE_JWT_SECRET`   | **yes**  | --              |
    /// | `SUPABASE_JWT_AUDIENCE` | no       | `authenticated` |
    ///
    /// # Panics
    ///
    /// Panics if `SUPABASE_JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let jwt_secret = std::env::var("SUPABASE_JWT_SECRET")
            .expect("SUPABASE_JWT_SECRET must be set in the environment");
        assert!(!jwt_secret.is_empty(), "SUPABASE_JWT_SECRET must not be empty");

        let audience =
            std::env::var("SUPABASE_JWT_AUDIENCE").unwrap_or_else(|_| DEFAULT_AUDIENCE.into());

        Self {
            jwt_secret,
            audience,
        }
    }
}

/// Validate and decode a session token, returning the embedded [`Claims`].
///
/// Checks the signature, expiration and audience.
pub fn validate_token(
    token: &str,
    config: &SessionConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[config.audience.as_str()]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}

/// Sign a session token for `user_id` valid for `ttl_secs` seconds.
///
/// Used by local tooling and tests; production tokens come from the auth
/// service.
pub fn issue_token(
    user_id: UserId,
    email: Option<&str>,
    ttl_secs: i64,
    config: &SessionConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        aud: config.audience.clone(),
        exp: now + ttl_secs,
        iat: now,
        email: email.map(str::to_string),
        role: Some(DEFAULT_AUDIENCE.to_string()),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
}
