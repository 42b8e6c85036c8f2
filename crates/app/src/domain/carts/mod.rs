//! Carts

pub mod models;
pub mod repository;
pub mod service;
pub mod totals;

mod errors;

pub use errors::CartsServiceError;
pub use service::*;
