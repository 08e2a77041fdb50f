//! Session lookup against the external auth service
//!
//! The incoming `cookie` and `authorization` headers are forwarded to
//! `{base_url}/api/auth/get-session`. A JSON `null` body means no session.

use std::time::Duration;

use async_trait::async_trait;
use axum::http::{header, HeaderMap};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, warn};

use super::{Principal, SessionResolver};
use crate::shared::{DomainError, DomainResult};

#[derive(Debug, Deserialize)]
struct SessionBody {
    user: SessionUser,
}

#[derive(Debug, Deserialize)]
struct SessionUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

pub struct RemoteSessionResolver {
    client: reqwest::Client,
    url: Url,
}

impl RemoteSessionResolver {
    pub fn new(base_url: &str, timeout_secs: u64) -> DomainResult<Self> {
        let mut url = Url::parse(base_url).map_err(|e| {
            DomainError::Configuration(format!("invalid auth base URL '{}': {}", base_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| DomainError::Configuration(format!("invalid auth base URL '{}'", base_url)))?
            .pop_if_empty()
            .extend(["api", "auth", "get-session"]);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| DomainError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self { client, url })
    }
}

#[async_trait]
impl SessionResolver for RemoteSessionResolver {
    async fn resolve(&self, headers: &HeaderMap) -> DomainResult<Option<Principal>> {
        let cookie = headers.get(header::COOKIE);
        let authorization = headers.get(header::AUTHORIZATION);
        if cookie.is_none() && authorization.is_none() {
            return Ok(None);
        }

        let mut request = self.client.get(self.url.clone());
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie.as_bytes());
        }
        if let Some(authorization) = authorization {
            request = request.header(header::AUTHORIZATION, authorization.as_bytes());
        }

        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "Session lookup failed");
            DomainError::Configuration(format!("session lookup failed: {}", e))
        })?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Ok(None),
            status if !status.is_success() => {
                warn!(status = status.as_u16(), "Auth service rejected session lookup");
                return Err(DomainError::Configuration(format!(
                    "session lookup failed: HTTP {}",
                    status.as_u16()
                )));
            }
            _ => {}
        }

        let body: Option<SessionBody> = response.json().await.map_err(|e| {
            DomainError::Configuration(format!("unreadable session response: {}", e))
        })?;

        Ok(body.map(|session| {
            debug!(user_id = %session.user.id, "Session resolved");
            Principal {
                user_id: session.user.id,
                email: session.user.email,
                name: session.user.name,
            }
        }))
    }
}
