//! REST client for the PawCare backend.
//!
//! The backend owns all business rules and persistence. This crate only moves
//! JSON over HTTP, attaches the bearer token and classifies failures so that
//! callers can tell "not authorized" apart from other errors.

mod client;
mod config;
mod error;
mod token;

pub use client::ApiClient;
pub use config::{ApiConfig, ApiConfigBuilder, DEFAULT_BASE_URL};
pub use error::{ApiError, ApiResult, ErrorKind};
pub use token::{NoToken, StaticToken, TokenSource};
