use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{test, web, App};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use missionboard::auth::{Claims, TokenService};
use missionboard::routes;
use missionboard::store::memory::{MemoryCredentialStore, MemoryTaskStore};
use missionboard::store::{CredentialStore, TaskStore};

const TEST_SECRET: &str = "integration-test-secret";

fn stores() -> (web::Data<dyn CredentialStore>, web::Data<dyn TaskStore>) {
    let users: Arc<dyn CredentialStore> = Arc::new(MemoryCredentialStore::default());
    let tasks: Arc<dyn TaskStore> = Arc::new(MemoryTaskStore::default());
    (web::Data::from(users), web::Data::from(tasks))
}

macro_rules! test_app {
    () => {{
        let (users, tasks) = stores();
        let tokens = TokenService::new(TEST_SECRET);
        test::init_service(
            App::new()
                .app_data(users)
                .app_data(tasks)
                .app_data(web::Data::new(tokens.clone()))
                .wrap(
                    Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header()
                        .max_age(3600),
                )
                .wrap(Logger::default())
                .service(routes::health::health)
                .service(web::scope("/api").configure(routes::config(tokens))),
        )
        .await
    }};
}

#[actix_rt::test]
async fn test_register_and_login_flow() {
    let app = test_app!();

    // Register a new user; the response carries a token.
    let register_payload = json!({ "username": "alice", "password": "pw123" });
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(&register_payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    assert_eq!(
        status,
        actix_web::http::StatusCode::CREATED,
        "Registration failed. Body: {:?}",
        String::from_utf8_lossy(&body)
    );
    let register_response: missionboard::auth::AuthResponse =
        serde_json::from_slice(&body).expect("Failed to parse registration response");
    assert!(!register_response.token.is_empty());

    // Registering the same username again fails.
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(&register_payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "User already exists");

    // Duplicate registration fails regardless of the password offered.
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(&json!({ "username": "alice", "password": "another-pw" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);

    // Login with the same credentials succeeds and yields a token.
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(&json!({ "username": "alice", "password": "pw123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
    let login_response: missionboard::auth::AuthResponse = test::read_body_json(resp).await;
    assert!(!login_response.token.is_empty());

    // The login token resolves to the right identity: it sees alice's tasks.
    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .append_header(("Authorization", format!("Bearer {}", login_response.token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
}

#[actix_rt::test]
async fn test_register_seeds_four_onboarding_tasks() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(&json!({ "username": "alice", "password": "pw123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);
    let auth: missionboard::auth::AuthResponse = test::read_body_json(resp).await;

    // The register token is immediately usable and the list holds exactly
    // the four seeded tasks.
    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .append_header(("Authorization", format!("Bearer {}", auth.token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::OK);

    let tasks: Vec<serde_json::Value> = test::read_body_json(resp).await;
    assert_eq!(tasks.len(), 4);

    let texts: Vec<&str> = tasks
        .iter()
        .map(|t| t["text"].as_str().unwrap())
        .collect();
    assert!(texts.contains(&"Connect to command console"));
    assert!(texts.contains(&"Add new mission targets"));
    assert!(texts.contains(&"Neutralize a target"));
    assert!(texts.contains(&"Edit a target"));

    // A second user's seeding does not leak into alice's list.
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(&json!({ "username": "bob", "password": "pw456" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .append_header(("Authorization", format!("Bearer {}", auth.token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let tasks: Vec<serde_json::Value> = test::read_body_json(resp).await;
    assert_eq!(tasks.len(), 4);
}

#[actix_rt::test]
async fn test_register_rejects_missing_or_empty_fields() {
    let app = test_app!();

    let test_cases = vec![
        (json!({ "password": "pw123" }), "missing username"),
        (json!({ "username": "alice" }), "missing password"),
        (json!({ "username": "", "password": "pw123" }), "empty username"),
        (json!({ "username": "alice", "password": "" }), "empty password"),
    ];

    for (payload, description) in test_cases {
        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(
            resp.status(),
            actix_web::http::StatusCode::BAD_REQUEST,
            "Test case failed: {}",
            description
        );
    }
}

#[actix_rt::test]
async fn test_login_failures_are_indistinguishable() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(&json!({ "username": "alice", "password": "pw123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);

    // Wrong password.
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(&json!({ "username": "alice", "password": "wrongpw" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let wrong_password_status = resp.status();
    let wrong_password_body: serde_json::Value = test::read_body_json(resp).await;

    // Nonexistent username.
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(&json!({ "username": "nobody", "password": "pw123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let unknown_user_status = resp.status();
    let unknown_user_body: serde_json::Value = test::read_body_json(resp).await;

    // Same status, same body: the response must not reveal whether the
    // username exists.
    assert_eq!(wrong_password_status, actix_web::http::StatusCode::BAD_REQUEST);
    assert_eq!(unknown_user_status, wrong_password_status);
    assert_eq!(wrong_password_body["message"], "Invalid credentials");
    assert_eq!(unknown_user_body, wrong_password_body);
}

#[actix_rt::test]
async fn test_auth_gate_rejects_bad_tokens_uniformly() {
    let app = test_app!();

    // Missing header.
    let req = test::TestRequest::get().uri("/api/tasks").to_request();
    let resp = test::call_service(&app, req).await;
    let missing_status = resp.status();
    let missing_body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(missing_status, actix_web::http::StatusCode::UNAUTHORIZED);

    // Malformed token.
    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .append_header(("Authorization", "Bearer not.a.jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let malformed_status = resp.status();
    let malformed_body: serde_json::Value = test::read_body_json(resp).await;

    // Token signed with a different secret.
    let foreign = TokenService::new("some-other-secret")
        .issue(Uuid::new_v4())
        .unwrap();
    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .append_header(("Authorization", format!("Bearer {}", foreign)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let tampered_status = resp.status();
    let tampered_body: serde_json::Value = test::read_body_json(resp).await;

    // Token signed with the right secret but already expired.
    let now = Utc::now();
    let expired_claims = Claims {
        sub: Uuid::new_v4(),
        exp: (now - Duration::hours(2)).timestamp(),
        iat: (now - Duration::hours(7)).timestamp(),
    };
    let expired = encode(
        &Header::default(),
        &expired_claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap();
    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .append_header(("Authorization", format!("Bearer {}", expired)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let expired_status = resp.status();
    let expired_body: serde_json::Value = test::read_body_json(resp).await;

    // All four failure modes produce the same status and the same body, so
    // a caller cannot learn which check failed.
    for (status, body, description) in [
        (malformed_status, &malformed_body, "malformed token"),
        (tampered_status, &tampered_body, "bad signature"),
        (expired_status, &expired_body, "expired token"),
    ] {
        assert_eq!(
            status,
            actix_web::http::StatusCode::UNAUTHORIZED,
            "Test case failed: {}",
            description
        );
        assert_eq!(body, &missing_body, "Test case failed: {}", description);
    }
}
