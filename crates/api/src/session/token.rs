//! Signed session tokens.
//!
//! The session payload is the *current image* reference, carried as an
//! HS256-signed JWT. The signature is what makes the cookie trustworthy;
//! the payload itself is readable by the client.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use picture_core::types::DbId;
use picture_db::models::image::Image;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The record a session is currently attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionImage {
    pub id: DbId,
    pub category: String,
}

impl From<&Image> for SessionImage {
    fn from(image: &Image) -> Self {
        Self {
            id: image.id,
            category: image.category.clone(),
        }
    }
}

/// JWT claims stored in the session cookie.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    /// The current image.
    pub image: SessionImage,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier.
    pub jti: String,
}

/// Sign a session token for `image`, valid for `max_age_days`.
pub fn issue_token(
    image: &SessionImage,
    secret: &str,
    max_age_days: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = SessionClaims {
        image: image.clone(),
        exp: now + max_age_days * 24 * 60 * 60,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Validate a session token's signature and expiry and return its claims.
pub fn validate_token(
    token: &str,
    secret: &str,
) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
    let token_data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}
