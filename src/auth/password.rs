use crate::error::AppError;
use bcrypt::{hash, verify};

/// Matches the work factor the password scheme was designed around; bcrypt
/// embeds it (and the per-call random salt) in the digest, so it can be
/// raised later without invalidating existing digests.
const BCRYPT_COST: u32 = 10;

/// Produces a salted one-way digest of `password`. Two calls with the same
/// plaintext yield different digests; both verify.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, BCRYPT_COST).map_err(AppError::from)
}

/// Checks `password` against a stored digest. A malformed digest is a
/// verification failure, not an error: login must answer yes or no, never
/// crash on bad stored data.
pub fn verify_password(password: &str, digest: &str) -> bool {
    verify(password, digest).unwrap_or(false)
}
