//! Products domain.

pub mod models;
pub mod repository;
pub mod service;

mod errors;

pub use errors::ProductsServiceError;
pub use repository::ProductsRepositoryError;
pub use service::*;
