// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Error type shared by the query layer

use chrono::NaiveDate;
use thiserror::Error;

use rp_client_api::ClientApiError;

/// Result type used throughout the query layer.
pub type QueryResult<T> = std::result::Result<T, QueryError>;

/// Errors surfaced through query state.
///
/// Cancellation is a first-class variant rather than a client-specific
/// error shape to sniff for: transports translate their own abort signals
/// into it once, at the boundary, and the status reducer suppresses it
/// from user-visible error state.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The analytics API call failed.
    #[error("{0}")]
    Api(ClientApiError),

    /// The caller abandoned the query before it settled.
    #[error("query cancelled")]
    Cancelled,

    /// Filter construction rejected an inverted date window.
    #[error("invalid filter window: {since} is after {until}")]
    InvalidWindow { since: NaiveDate, until: NaiveDate },

    /// Bookkeeping failure inside the query layer itself.
    #[error("{0}")]
    Internal(String),
}

impl From<ClientApiError> for QueryError {
    fn from(err: ClientApiError) -> Self {
        match err {
            ClientApiError::Cancelled => QueryError::Cancelled,
            other => QueryError::Api(other),
        }
    }
}

impl QueryError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, QueryError::Cancelled)
    }

    /// True when re-issuing the identical request may succeed, which
    /// decides whether an error pane offers a retry action.
    pub fn is_retryable(&self) -> bool {
        match self {
            QueryError::Api(err) => err.is_retryable(),
            QueryError::Cancelled => false,
            QueryError::InvalidWindow { .. } => false,
            QueryError::Internal(_) => false,
        }
    }
}
