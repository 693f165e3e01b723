//! JWT authentication middleware for protecting API endpoints.
//!
//! The middleware extracts the bearer token from the `Authorization` header,
//! validates it as an access token through the [`AccessTokenVerifier`]
//! registered in app data, and injects an [`AuthContext`] into the request
//! extensions. Rejections are answered directly with the JSON error envelope.

use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::{header::AUTHORIZATION, StatusCode},
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use sg_core::{
    errors::DomainResult,
    repositories::{RevocationRepository, UserRepository},
    AccessClaims, TokenService,
};
use sg_shared::error_codes;

use crate::handlers::error::{error_response, handle_domain_error};

/// Authenticated caller, injected into request extensions
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: u64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Token id of the access token
    pub jti: String,
    /// The raw access token, needed to revoke it on logout
    pub token: String,
}

impl AuthContext {
    pub fn from_claims(claims: AccessClaims, token: String) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email,
            first_name: claims.first_name,
            last_name: claims.last_name,
            jti: claims.jti,
            token,
        }
    }
}

/// Object-safe view of the token engine used by the middleware
#[async_trait]
pub trait AccessTokenVerifier: Send + Sync {
    async fn verify_access_token(&self, token: &str) -> DomainResult<AccessClaims>;
}

#[async_trait]
impl<R, U> AccessTokenVerifier for TokenService<R, U>
where
    R: RevocationRepository + 'static,
    U: UserRepository + 'static,
{
    async fn verify_access_token(&self, token: &str) -> DomainResult<AccessClaims> {
        self.validate_access_token(token).await
    }
}

/// App data type holding the verifier
pub type VerifierData = web::Data<Arc<dyn AccessTokenVerifier>>;

/// JWT authentication middleware factory
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtAuth;

impl JwtAuth {
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let Some(token) = extract_bearer_token(&req) else {
                tracing::debug!(path = %req.path(), "Missing bearer token");
                let response = error_response(
                    StatusCode::UNAUTHORIZED,
                    "Missing or invalid Authorization header",
                    error_codes::UNAUTHORIZED,
                );
                return Ok(req.into_response(response).map_into_right_body());
            };

            let Some(verifier) = req.app_data::<VerifierData>().cloned() else {
                tracing::error!("JwtAuth used without an AccessTokenVerifier in app data");
                let response = error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    error_codes::INTERNAL_ERROR,
                );
                return Ok(req.into_response(response).map_into_right_body());
            };

            match verifier.verify_access_token(&token).await {
                Ok(claims) => {
                    req.extensions_mut()
                        .insert(AuthContext::from_claims(claims, token));
                }
                Err(error) => {
                    let response = handle_domain_error(&error);
                    return Ok(req.into_response(response).map_into_right_body());
                }
            }

            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req.extensions().get::<AuthContext>().cloned().ok_or_else(|| {
            let response = error_response(
                StatusCode::UNAUTHORIZED,
                "Authentication required",
                error_codes::UNAUTHORIZED,
            );
            InternalError::from_response("Authentication required", response).into()
        });

        ready(result)
    }
}
