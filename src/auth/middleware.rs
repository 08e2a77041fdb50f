//! Session middleware for Axum

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use super::{Principal, SharedSessionResolver};

/// State shared by the session middleware
#[derive(Clone)]
pub struct AuthState {
    pub resolver: SharedSessionResolver,
}

/// Require a resolved session.
///
/// Rejects with 401 before the handler runs. On success the [`Principal`] is
/// available to handlers through `Extension<Principal>`.
pub async fn require_session(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    match auth_state.resolver.resolve(request.headers()).await {
        Ok(Some(principal)) => {
            tracing::Span::current().record("user_id", principal.user_id.as_str());
            request.extensions_mut().insert::<Principal>(principal);
            next.run(request).await
        }
        Ok(None) => unauthorized(),
        Err(e) => {
            error!(error = %e, "Session resolution failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal server error" })),
            )
                .into_response()
        }
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "Unauthorized" })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{http::HeaderMap, middleware, routing::get, Extension, Router};
    use tower::ServiceExt;

    use crate::auth::SessionResolver;
    use crate::shared::{DomainError, DomainResult};

    struct Fixed(Option<&'static str>);

    #[async_trait]
    impl SessionResolver for Fixed {
        async fn resolve(&self, _headers: &HeaderMap) -> DomainResult<Option<Principal>> {
            Ok(self.0.map(Principal::new))
        }
    }

    struct Broken;

    #[async_trait]
    impl SessionResolver for Broken {
        async fn resolve(&self, _headers: &HeaderMap) -> DomainResult<Option<Principal>> {
            Err(DomainError::Configuration("auth service down".into()))
        }
    }

    fn app(resolver: SharedSessionResolver) -> Router {
        Router::new()
            .route(
                "/me",
                get(|Extension(p): Extension<Principal>| async move { p.user_id }),
            )
            .layer(middleware::from_fn_with_state(
                AuthState { resolver },
                require_session,
            ))
    }

    fn request() -> Request<Body> {
        Request::builder().uri("/me").body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_principal_reaches_handler() {
        let response = app(Arc::new(Fixed(Some("user-1"))))
            .oneshot(request())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"user-1");
    }

    #[tokio::test]
    async fn test_missing_session_is_401() {
        let response = app(Arc::new(Fixed(None))).oneshot(request()).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, json!({"error": "Unauthorized"}));
    }

    #[tokio::test]
    async fn test_resolver_failure_is_500() {
        let response = app(Arc::new(Broken)).oneshot(request()).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
