//! Shared fixtures for the gateway integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use chrono::Utc;
use sg_api::AppState;
use sg_core::{Clock, InMemoryRevocationRepository, InMemoryUserRepository, ManualClock};
use sg_shared::{AuthConfig, JwtConfig, PasswordConfig, RevocationConfig};

pub type TestState = AppState<InMemoryRevocationRepository, InMemoryUserRepository>;

pub const TEST_PASSWORD: &str = "Passw0rd!";

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub clock: Arc<ManualClock>,
    pub revocations: Arc<InMemoryRevocationRepository>,
    pub users: Arc<InMemoryUserRepository>,
}

pub fn auth_config() -> AuthConfig {
    AuthConfig {
        jwt: JwtConfig::new("gateway-test-secret"),
        revocation: RevocationConfig::default(),
        // Lowest cost the config accepts
        password: PasswordConfig { bcrypt_cost: 10 },
    }
}

pub fn test_context() -> TestContext {
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let revocations = Arc::new(InMemoryRevocationRepository::new());
    let users = Arc::new(InMemoryUserRepository::new());
    let shared_clock: Arc<dyn Clock> = clock.clone();

    let state = AppState::with_clock(
        revocations.clone(),
        users.clone(),
        &auth_config(),
        shared_clock,
    )
    .expect("test services");

    TestContext {
        state: web::Data::new(state),
        clock,
        revocations,
        users,
    }
}

pub fn registration(email: &str) -> serde_json::Value {
    serde_json::json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": email,
        "password": TEST_PASSWORD,
        "confirmPassword": TEST_PASSWORD
    })
}

macro_rules! init_app {
    ($ctx:expr) => {
        actix_web::test::init_service(sg_api::create_app(
            $ctx.state.clone(),
            sg_shared::Environment::Development,
            &sg_api::CorsConfig::default(),
        ))
        .await
    };
}

/// Registers `$email` and logs in, yielding the `data` object of the login
/// response
macro_rules! register_and_login {
    ($app:expr, $email:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri("/auth/register")
            .set_json(common::registration($email))
            .to_request();
        let resp = actix_web::test::call_service(&$app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);

        let req = actix_web::test::TestRequest::post()
            .uri("/auth/login")
            .set_json(serde_json::json!({
                "email": $email,
                "password": common::TEST_PASSWORD
            }))
            .to_request();
        let resp = actix_web::test::call_service(&$app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::OK);

        let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
        body["data"].clone()
    }};
}
