use crate::error::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tokens expire five hours after issuance.
const TOKEN_TTL_HOURS: i64 = 5;

/// Claims carried by an identity token: the user id, expiry, and issued-at.
/// Nothing else goes in, keeping the token surface minimal.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: i64,
    pub iat: i64,
}

/// Issues and verifies signed, stateless identity tokens.
///
/// Holds the signing keys derived from the process-wide secret, which is
/// loaded once at startup and never rotated during the process lifetime.
/// Verification is a pure function of (token, keys, current time); no issued
/// token is ever stored server-side.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Signs a token asserting `user_id`'s identity for the next five hours.
    pub fn issue(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
            iat: now.timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("failed to sign token: {}", e)))
    }

    /// Verifies signature and expiry, returning the embedded claims.
    ///
    /// Malformed token, bad signature, and expiry all collapse into the same
    /// `Unauthorized` so a caller cannot learn which check failed.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(AppError::from)
    }
}
