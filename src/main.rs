use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use sqlx::PgPool;
use std::sync::Arc;

use missionboard::auth::TokenService;
use missionboard::config::Config;
use missionboard::routes;
use missionboard::store::postgres::{PgCredentialStore, PgTaskStore};
use missionboard::store::{CredentialStore, TaskStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let pool = PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    let users: Arc<dyn CredentialStore> = Arc::new(PgCredentialStore::new(pool.clone()));
    let tasks: Arc<dyn TaskStore> = Arc::new(PgTaskStore::new(pool));
    let users = web::Data::from(users);
    let tasks = web::Data::from(tasks);

    let tokens = TokenService::new(&config.jwt_secret);
    let tokens_data = web::Data::new(tokens.clone());

    let allowed_origin = config.allowed_origin.clone();
    let bind_addr = (config.server_host.clone(), config.server_port);

    log::info!("Starting missionboard server at {}", config.server_url());
    HttpServer::new(move || {
        let cors = match &allowed_origin {
            Some(origin) => Cors::default()
                .allowed_origin(origin)
                .allow_any_method()
                .allow_any_header()
                .max_age(3600),
            // No origin configured: permissive, for local development.
            None => Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600),
        };

        App::new()
            .app_data(users.clone())
            .app_data(tasks.clone())
            .app_data(tokens_data.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .service(routes::health::health)
            .service(web::scope("/api").configure(routes::config(tokens.clone())))
    })
    .bind(bind_addr)?
    .run()
    .await
}
