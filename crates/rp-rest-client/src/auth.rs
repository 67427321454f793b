// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Authentication configuration for the REST client
//!
//! Token acquisition is out of scope here; callers hand the client a
//! ready-to-use credential and it is attached to every request.

use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("credential is not a valid header value: {0}")]
    InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),
}

/// Credentials attached to outgoing requests
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    bearer_token: Option<String>,
    basic: Option<(String, String)>,
}

impl AuthConfig {
    /// No authentication headers at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// Bearer-token authentication.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            bearer_token: Some(token.into()),
            basic: None,
        }
    }

    /// HTTP basic authentication.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            bearer_token: None,
            basic: Some((username.into(), password.into())),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.bearer_token.is_none() && self.basic.is_none()
    }

    /// Build the authorization headers for one request. Bearer wins when
    /// both credential kinds are somehow present.
    pub fn headers(&self) -> Result<HeaderMap, AuthError> {
        let mut headers = HeaderMap::new();

        if let Some(token) = &self.bearer_token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))?;
            headers.insert(AUTHORIZATION, value);
        } else if let Some((user, pass)) = &self.basic {
            let encoded =
                base64::engine::general_purpose::STANDARD.encode(format!("{user}:{pass}"));
            let value = HeaderValue::from_str(&format!("Basic {encoded}"))?;
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_config_adds_no_headers() {
        let headers = AuthConfig::none().headers().unwrap();
        assert!(headers.is_empty());
    }

    #[test]
    fn bearer_token_is_attached() {
        let headers = AuthConfig::bearer("secret").headers().unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer secret");
    }

    #[test]
    fn basic_credentials_are_encoded() {
        let headers = AuthConfig::basic("user", "pass").headers().unwrap();
        // base64("user:pass")
        assert_eq!(headers[AUTHORIZATION], "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn control_characters_in_token_are_rejected() {
        assert!(AuthConfig::bearer("bad\ntoken").headers().is_err());
    }
}
