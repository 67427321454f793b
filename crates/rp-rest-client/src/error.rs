// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Error types for the REST client

use reqwest::StatusCode;
use rp_api_contract::ProblemDetails;
use rp_client_api::ClientApiError;
use thiserror::Error;

/// Errors that can occur when talking to the analytics service
#[derive(Debug, Error)]
pub enum RestClientError {
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server answered with a problem+json document.
    #[error("Server error {status}: {details:?}")]
    ServerError {
        status: StatusCode,
        details: ProblemDetails,
    },

    /// Non-2xx response whose body was not a problem document.
    #[error("Unexpected response {status}: {body}")]
    UnexpectedResponse { status: StatusCode, body: String },

    #[error("Authentication error: {0}")]
    Auth(String),
}

pub type RestClientResult<T> = Result<T, RestClientError>;

impl From<RestClientError> for ClientApiError {
    fn from(err: RestClientError) -> Self {
        match err {
            RestClientError::ServerError { status, details } => ClientApiError::Api {
                status: status.as_u16(),
                problem: details,
            },
            RestClientError::UnexpectedResponse { status, body } => ClientApiError::Http {
                status: status.as_u16(),
                message: body,
            },
            RestClientError::Http(e) => {
                if e.is_decode() {
                    ClientApiError::Decode(e.to_string())
                } else {
                    ClientApiError::Network(e.to_string())
                }
            }
            RestClientError::Json(e) => ClientApiError::Decode(e.to_string()),
            RestClientError::Url(e) => ClientApiError::Internal(e.to_string()),
            RestClientError::Auth(msg) => ClientApiError::Internal(msg),
        }
    }
}
