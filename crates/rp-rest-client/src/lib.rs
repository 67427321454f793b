// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! REST client for the RepoPulse analytics service
//!
//! A thin typed layer over `reqwest`: one method per endpoint, shared
//! request plumbing, RFC 7807 problem decoding, and header-based
//! authentication. The client also implements the `AnalyticsApi` trait
//! so the query layer can be driven by either this client or the mock.

pub mod auth;
pub mod client;
pub mod error;

pub use auth::AuthConfig;
pub use client::RestClient;
pub use error::{RestClientError, RestClientResult};
