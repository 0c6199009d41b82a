use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::ResponseError,
    http::header,
    Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::token::TokenService;
use crate::error::AppError;

/// The auth gate: wraps every task endpoint, verifies the bearer token, and
/// injects the resolved claims into request extensions for handlers to pick
/// up via the `AuthenticatedUser` extractor.
///
/// Missing header and failed verification both produce the same generic 401.
/// The gate never touches the stores.
pub struct AuthMiddleware {
    tokens: TokenService,
}

impl AuthMiddleware {
    pub fn new(tokens: TokenService) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            tokens: self.tokens.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    tokens: TokenService,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let bearer = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        // Rejections are returned as ready responses (not service-level
        // errors) so they surface identically under the real server and the
        // in-process test harness; the body still comes from `AppError`'s
        // `ResponseError` impl.
        let reject = |req: ServiceRequest, app_err: AppError| {
            let (req, _payload) = req.into_parts();
            let res = app_err.error_response().map_into_right_body();
            Box::pin(async move { Ok(ServiceResponse::new(req, res)) })
        };

        match bearer {
            Some(token) => match self.tokens.verify(token) {
                Ok(claims) => {
                    req.extensions_mut().insert(claims);
                    let fut = self.service.call(req);
                    Box::pin(async move { fut.await.map(|res| res.map_into_left_body()) })
                }
                Err(app_err) => reject(req, app_err),
            },
            None => reject(req, AppError::Unauthorized),
        }
    }
}
