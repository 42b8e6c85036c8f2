//! API token authentication.
//!
//! Tokens are random bearer secrets shown once at creation; only their
//! SHA-256 hash is stored.

pub mod repository;
pub mod service;
pub mod token;

pub use repository::{AuthRepository, AuthRepositoryError, PgAuthRepository};
pub use service::*;
