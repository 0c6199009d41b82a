use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::auth::token::Claims;
use crate::error::AppError;

/// Extracts the authenticated caller's identity from request extensions.
///
/// Intended for routes behind `AuthMiddleware`, which validates the token and
/// inserts the decoded claims. If the claims are missing (middleware not
/// applied, or misconfigured routing), this fails with the same generic 401
/// rather than letting an unauthenticated request through.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser(pub Uuid);

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>() {
            Some(claims) => ready(Ok(AuthenticatedUser(claims.sub))),
            None => ready(Err(AppError::Unauthorized.into())),
        }
    }
}
