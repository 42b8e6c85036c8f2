//! Carts service errors.

use std::num::TryFromIntError;

use thiserror::Error;

use crate::domain::{carts::repository::CartsRepositoryError, products::ProductsRepositoryError};

/// Failures surfaced by cart operations.
#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("cart item not found")]
    ItemNotFound,

    #[error("product not found")]
    ProductNotFound,

    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("storage error")]
    Sql(#[source] sqlx::Error),

    #[error("invalid amount value")]
    InvalidAmount(#[from] TryFromIntError),
}

impl From<CartsRepositoryError> for CartsServiceError {
    fn from(error: CartsRepositoryError) -> Self {
        match error {
            // Item rows reference products; a foreign-key failure on
            // save means the product vanished between read and write.
            CartsRepositoryError::InvalidReference => Self::ProductNotFound,
            CartsRepositoryError::Sql(source) => Self::Sql(source),
            CartsRepositoryError::InvalidAmount(source) => Self::InvalidAmount(source),
        }
    }
}

impl From<ProductsRepositoryError> for CartsServiceError {
    fn from(error: ProductsRepositoryError) -> Self {
        match error {
            ProductsRepositoryError::NotFound => Self::ProductNotFound,
            ProductsRepositoryError::Sql(source) => Self::Sql(source),
            ProductsRepositoryError::InvalidPrice(source) => Self::InvalidAmount(source),
            // Remaining kinds only arise on product writes, which the
            // cart never performs.
            ProductsRepositoryError::AlreadyExists
            | ProductsRepositoryError::InvalidReference
            | ProductsRepositoryError::InvalidData => Self::ProductNotFound,
        }
    }
}
