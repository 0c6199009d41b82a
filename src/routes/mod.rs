pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::web;

use crate::auth::{AuthMiddleware, TokenService};

/// Configures the API routes. Registration and login live outside the auth
/// gate; everything under `/tasks` is wrapped by `AuthMiddleware`.
pub fn config(tokens: TokenService) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.service(
            web::scope("/auth")
                .service(auth::register)
                .service(auth::login),
        )
        .service(
            web::scope("/tasks")
                .wrap(AuthMiddleware::new(tokens))
                .service(tasks::list_tasks)
                .service(tasks::create_task)
                .service(tasks::update_task)
                .service(tasks::delete_task),
        );
    }
}
