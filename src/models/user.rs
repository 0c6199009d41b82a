use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user. The password exists only as a bcrypt digest from the
/// moment of registration onward, and this struct is never serialized onto
/// the wire, so the digest cannot leak through a response body.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
