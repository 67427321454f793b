//! RepoPulse analytics REST API contract types and validation
//!
//! This crate defines the schema types and validation for the analytics
//! service's REST API. These types are shared between the REST client,
//! the mock client used in tests, and the query layer that sits on top
//! of both.

pub mod error;
pub mod types;
pub mod validation;

pub use error::*;
pub use types::*;
