pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenService};

/// Payload for registering a new account. Both fields are required and must
/// be non-empty; there are no further format rules.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Please enter all fields"))]
    pub username: String,
    #[validate(length(min = 1, message = "Please enter all fields"))]
    pub password: String,
}

/// Payload for logging in.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Please enter all fields"))]
    pub username: String,
    #[validate(length(min = 1, message = "Please enter all fields"))]
    pub password: String,
}

/// Response for both successful registration and successful login: a signed
/// token the client presents on every task request.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
}
