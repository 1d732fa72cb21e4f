//! Request authenticators
//!
//! The client never acquires or refreshes credentials itself. It is handed an
//! [`Authenticator`] at construction and calls it once per outgoing request.

use std::sync::Arc;

use reqwest::RequestBuilder;

use crate::{
    config::{AuthKind, AuthSettings},
    error::{AcdError, Result},
};

pub trait Authenticator: Send + Sync + std::fmt::Debug {
    /// Attaches credentials to an outgoing request.
    fn authenticate(&self, request: RequestBuilder) -> RequestBuilder;

    fn kind(&self) -> AuthKind;
}

/// Sends requests without credentials. Used against local or test deployments.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuthAuthenticator;

impl Authenticator for NoAuthAuthenticator {
    fn authenticate(&self, request: RequestBuilder) -> RequestBuilder {
        request
    }

    fn kind(&self) -> AuthKind {
        AuthKind::None
    }
}

/// Adds `Authorization: Bearer <token>` using a token obtained elsewhere.
#[derive(Clone)]
pub struct BearerTokenAuthenticator {
    token: String,
}

impl BearerTokenAuthenticator {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(AcdError::Config("bearer token must not be empty".to_string()));
        }
        Ok(Self { token })
    }
}

impl std::fmt::Debug for BearerTokenAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerTokenAuthenticator")
            .field("token", &"<redacted>")
            .finish()
    }
}

impl Authenticator for BearerTokenAuthenticator {
    fn authenticate(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.token)
    }

    fn kind(&self) -> AuthKind {
        AuthKind::Bearer
    }
}

#[derive(Clone)]
pub struct BasicAuthenticator {
    username: String,
    password: String,
}

impl BasicAuthenticator {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(AcdError::Config("basic auth username must not be empty".to_string()));
        }
        Ok(Self {
            username,
            password: password.into(),
        })
    }
}

impl std::fmt::Debug for BasicAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuthenticator")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Authenticator for BasicAuthenticator {
    fn authenticate(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(&self.username, Some(&self.password))
    }

    fn kind(&self) -> AuthKind {
        AuthKind::Basic
    }
}

/// Builds the authenticator selected by `settings`.
pub fn authenticator_from_settings(settings: &AuthSettings) -> Result<Arc<dyn Authenticator>> {
    match settings.kind {
        AuthKind::None => Ok(Arc::new(NoAuthAuthenticator)),
        AuthKind::Bearer => {
            let token = settings.bearer_token.as_deref().ok_or_else(|| {
                AcdError::Config("bearer auth selected but no bearer_token configured".to_string())
            })?;
            Ok(Arc::new(BearerTokenAuthenticator::new(token)?))
        }
        AuthKind::Basic => {
            let username = settings.username.as_deref().ok_or_else(|| {
                AcdError::Config("basic auth selected but no username configured".to_string())
            })?;
            let password = settings.password.as_deref().unwrap_or_default();
            Ok(Arc::new(BasicAuthenticator::new(username, password)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_of(auth: &dyn Authenticator) -> Option<String> {
        let client = reqwest::Client::new();
        let request = auth
            .authenticate(client.get("http://localhost/v1/status/health_check"))
            .build()
            .unwrap();
        request
            .headers()
            .get(reqwest::header::AUTHORIZATION)
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[test]
    fn test_noauth_adds_nothing() {
        assert_eq!(header_of(&NoAuthAuthenticator), None);
    }

    #[test]
    fn test_bearer_sets_authorization_header() {
        let auth = BearerTokenAuthenticator::new("abc.def").unwrap();
        assert_eq!(header_of(&auth).as_deref(), Some("Bearer abc.def"));
        assert!(!format!("{:?}", auth).contains("abc.def"));
    }

    #[test]
    fn test_basic_sets_authorization_header() {
        let auth = BasicAuthenticator::new("user", "pass").unwrap();
        // base64("user:pass")
        assert_eq!(header_of(&auth).as_deref(), Some("Basic dXNlcjpwYXNz"));
    }

    #[test]
    fn test_settings_select_variant() {
        let settings = AuthSettings {
            kind: AuthKind::Bearer,
            bearer_token: Some("tok".to_string()),
            ..Default::default()
        };
        assert_eq!(authenticator_from_settings(&settings).unwrap().kind(), AuthKind::Bearer);

        let missing = AuthSettings {
            kind: AuthKind::Bearer,
            ..Default::default()
        };
        assert!(matches!(
            authenticator_from_settings(&missing),
            Err(AcdError::Config(_))
        ));

        assert_eq!(
            authenticator_from_settings(&AuthSettings::default()).unwrap().kind(),
            AuthKind::None
        );
        assert!(BearerTokenAuthenticator::new(" ").is_err());
    }
}
