//! JWT session tokens

use async_trait::async_trait;
use axum::http::{header, HeaderMap};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::{Principal, SessionResolver};
use crate::config::AuthConfig;
use crate::shared::DomainResult;

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token expiration time in hours
    pub expiration_hours: i64,
    /// Issuer claim
    pub issuer: String,
}

impl From<&AuthConfig> for JwtConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            expiration_hours: 24,
            issuer: config.jwt_issuer.clone(),
        }
    }
}

/// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Issuer
    pub iss: String,
}

impl Claims {
    pub fn new(user_id: &str, email: Option<&str>, name: Option<&str>, config: &JwtConfig) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(config.expiration_hours);

        Self {
            sub: user_id.to_string(),
            email: email.map(String::from),
            name: name.map(String::from),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: config.issuer.clone(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            name: claims.name,
        }
    }
}

/// Create a signed token for a user
pub fn create_token(
    user_id: &str,
    email: Option<&str>,
    name: Option<&str>,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims::new(user_id, email, name, config);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify and decode a token
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.set_issuer(&[&config.issuer]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

/// Reasons a bearer token is not accepted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Missing authentication token")]
    MissingToken,
    #[error("Invalid authentication token")]
    InvalidToken,
    #[error("Token has expired")]
    ExpiredToken,
}

/// Extract token from Authorization header
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Resolves sessions from HS256 bearer tokens
pub struct JwtSessionResolver {
    config: JwtConfig,
}

impl JwtSessionResolver {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }

    pub fn authenticate(&self, headers: &HeaderMap) -> Result<Claims, AuthError> {
        let token = bearer_token(headers).ok_or(AuthError::MissingToken)?;
        let claims = verify_token(token, &self.config).map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            _ => AuthError::InvalidToken,
        })?;
        if claims.is_expired() {
            return Err(AuthError::ExpiredToken);
        }
        Ok(claims)
    }
}

#[async_trait]
impl SessionResolver for JwtSessionResolver {
    async fn resolve(&self, headers: &HeaderMap) -> DomainResult<Option<Principal>> {
        match self.authenticate(headers) {
            Ok(claims) => Ok(Some(claims.into())),
            Err(reason) => {
                debug!(%reason, "No session");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            expiration_hours: 1,
            issuer: "address-utility".to_string(),
        }
    }

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );
        headers
    }

    #[test]
    fn test_create_and_verify_token() {
        let config = config();
        let token = create_token("user-123", Some("a@example.com"), None, &config).unwrap();

        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.sub, "user-123");
        assert_eq!(claims.email.as_deref(), Some("a@example.com"));
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_invalid_token() {
        assert!(verify_token("invalid-token", &config()).is_err());
    }

    #[test]
    fn test_wrong_issuer_is_rejected() {
        let mut other = config();
        other.issuer = "someone-else".to_string();
        let token = create_token("user-1", None, None, &other).unwrap();

        let resolver = JwtSessionResolver::new(config());
        assert_eq!(
            resolver.authenticate(&bearer(&token)).unwrap_err(),
            AuthError::InvalidToken
        );
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let mut expired = config();
        expired.expiration_hours = -2;
        let token = create_token("user-1", None, None, &expired).unwrap();

        let resolver = JwtSessionResolver::new(config());
        assert_eq!(
            resolver.authenticate(&bearer(&token)).unwrap_err(),
            AuthError::ExpiredToken
        );
    }

    #[tokio::test]
    async fn test_resolve() {
        let config = config();
        let resolver = JwtSessionResolver::new(config.clone());
        let token = create_token("user-7", None, Some("Ada"), &config).unwrap();

        let principal = resolver.resolve(&bearer(&token)).await.unwrap().unwrap();
        assert_eq!(principal.user_id, "user-7");
        assert_eq!(principal.name.as_deref(), Some("Ada"));

        assert!(resolver.resolve(&HeaderMap::new()).await.unwrap().is_none());
        assert!(resolver.resolve(&bearer("garbage")).await.unwrap().is_none());
    }
}
