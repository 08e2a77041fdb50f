//! Session resolution
//!
//! Every protected route resolves the caller once, at the boundary, through a
//! [`SessionResolver`]. Two implementations exist, selected by `auth.mode`:
//!
//! - [`JwtSessionResolver`]: `Authorization: Bearer` tokens signed with a shared secret
//! - [`RemoteSessionResolver`]: asks the external auth service for the current session

pub mod jwt;
pub mod middleware;
pub mod remote;

pub use jwt::{create_token, verify_token, AuthError, Claims, JwtConfig, JwtSessionResolver};
pub use middleware::{require_session, AuthState};
pub use remote::RemoteSessionResolver;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::HeaderMap;

use crate::config::{AuthConfig, AuthMode};
use crate::shared::DomainResult;

/// The authenticated user making a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

impl Principal {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: None,
            name: None,
        }
    }
}

#[async_trait]
pub trait SessionResolver: Send + Sync {
    /// `Ok(None)` when the request carries no valid session. `Err` only when
    /// the session backend itself could not be consulted.
    async fn resolve(&self, headers: &HeaderMap) -> DomainResult<Option<Principal>>;
}

pub type SharedSessionResolver = Arc<dyn SessionResolver>;

/// Build the resolver selected in configuration.
pub fn build_resolver(config: &AuthConfig) -> DomainResult<SharedSessionResolver> {
    let resolver: SharedSessionResolver = match config.mode {
        AuthMode::Jwt => Arc::new(JwtSessionResolver::new(JwtConfig::from(config))),
        AuthMode::Remote => Arc::new(RemoteSessionResolver::new(
            &config.base_url,
            config.timeout_secs,
        )?),
    };
    Ok(resolver)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_resolver_for_each_mode() {
        let mut config = AuthConfig::default();
        assert!(build_resolver(&config).is_ok());

        config.mode = AuthMode::Remote;
        assert!(build_resolver(&config).is_ok());

        config.base_url = "not a url".to_string();
        assert!(build_resolver(&config).is_err());
    }
}
