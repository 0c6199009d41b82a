use crate::{
    auth::{
        hash_password, verify_password, AuthResponse, LoginRequest, RegisterRequest, TokenService,
    },
    error::AppError,
    models::Task,
    store::{CredentialStore, TaskStore},
};
use actix_web::{post, web, HttpResponse, Responder};
use log::error;
use validator::Validate;

/// Register a new user.
///
/// Creates the account, seeds the four onboarding tasks, and returns a token
/// so the client is logged in without a second round trip.
#[post("/register")]
pub async fn register(
    users: web::Data<dyn CredentialStore>,
    tasks: web::Data<dyn TaskStore>,
    tokens: web::Data<TokenService>,
    payload: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    if users.find_by_username(&payload.username).await?.is_some() {
        return Err(AppError::BadRequest("User already exists".into()));
    }

    let password_hash = hash_password(&payload.password)?;
    let user = users.create(&payload.username, &password_hash).await?;

    // The onboarding checklist is a convenience. If seeding fails the
    // account already exists with its password persisted, so log and move on
    // rather than failing the registration.
    if let Err(err) = tasks.create_many(Task::onboarding_for(user.id)).await {
        error!("failed to seed onboarding tasks for user {}: {}", user.id, err);
    }

    let token = tokens.issue(user.id)?;
    Ok(HttpResponse::Created().json(AuthResponse { token }))
}

/// Authenticate an existing user and return a fresh token.
#[post("/login")]
pub async fn login(
    users: web::Data<dyn CredentialStore>,
    tokens: web::Data<TokenService>,
    payload: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    // Unknown username and wrong password produce the identical error, so a
    // caller cannot probe which usernames exist.
    let user = users
        .find_by_username(&payload.username)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !verify_password(&payload.password, &user.password_hash) {
        return Err(AppError::InvalidCredentials);
    }

    let token = tokens.issue(user.id)?;
    Ok(HttpResponse::Ok().json(AuthResponse { token }))
}
