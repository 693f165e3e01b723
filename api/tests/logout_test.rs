//! Integration tests for the logout endpoint

#[macro_use]
mod common;

use actix_web::{
    http::{header, StatusCode},
    test,
};
use chrono::Duration;
use sg_shared::error_codes;

#[actix_web::test]
async fn test_logout_revokes_both_tokens() {
    let ctx = common::test_context();
    let app = init_app!(ctx);
    let tokens = register_and_login!(app, "ada@example.com");
    let access = tokens["access_token"].as_str().unwrap().to_string();
    let refresh = tokens["refresh_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/auth/logout")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", access)))
        .insert_header(("Refresh-Token", refresh.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["refresh_revoked"], true);
    assert_eq!(ctx.revocations.len().await, 2);

    let req = test::TestRequest::get()
        .uri("/auth/me")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", access)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], error_codes::TOKEN_REVOKED);

    let req = test::TestRequest::post()
        .uri("/auth/refresh")
        .set_json(serde_json::json!({ "refresh_token": refresh }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], error_codes::TOKEN_REVOKED);
}

#[actix_web::test]
async fn test_logout_without_refresh_header() {
    let ctx = common::test_context();
    let app = init_app!(ctx);
    let tokens = register_and_login!(app, "ada@example.com");
    let access = tokens["access_token"].as_str().unwrap().to_string();
    let refresh = tokens["refresh_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/auth/logout")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", access)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["refresh_revoked"], false);
    assert_eq!(ctx.revocations.len().await, 1);

    // The refresh token was never revoked
    let req = test::TestRequest::post()
        .uri("/auth/refresh")
        .set_json(serde_json::json!({ "refresh_token": refresh }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_logout_requires_authentication() {
    let ctx = common::test_context();
    let app = init_app!(ctx);

    let req = test::TestRequest::post().uri("/auth/logout").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(ctx.revocations.is_empty().await);
}

#[actix_web::test]
async fn test_second_logout_is_rejected() {
    let ctx = common::test_context();
    let app = init_app!(ctx);
    let tokens = register_and_login!(app, "ada@example.com");
    let access = tokens["access_token"].as_str().unwrap().to_string();

    for expected in [StatusCode::OK, StatusCode::UNAUTHORIZED] {
        let req = test::TestRequest::post()
            .uri("/auth/logout")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", access)))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), expected);
    }
}

#[actix_web::test]
async fn test_revoked_refresh_token_recovers_after_sweep() {
    let ctx = common::test_context();
    let app = init_app!(ctx);
    let tokens = register_and_login!(app, "ada@example.com");
    let access = tokens["access_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/auth/logout")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", access)))
        .insert_header(("Refresh-Token", tokens["refresh_token"].as_str().unwrap()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    // Both windows close; the refresh token has also reached its own expiry
    ctx.clock.advance(Duration::minutes(61));
    let swept = ctx.state.token_service.sweep_revocations().await.unwrap();

    assert_eq!(swept, 2);
    assert!(ctx.revocations.is_empty().await);
}

#[actix_web::test]
async fn test_state_rejects_empty_revocation_window() {
    let mut config = common::auth_config();
    config.revocation.access_token_minutes = 0;

    let state = sg_api::AppState::new(
        std::sync::Arc::new(sg_core::InMemoryRevocationRepository::new()),
        std::sync::Arc::new(sg_core::InMemoryUserRepository::new()),
        &config,
    );

    assert!(matches!(
        state,
        Err(sg_core::errors::DomainError::Internal { .. })
    ));
}
