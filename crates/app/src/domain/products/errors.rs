use std::num::TryFromIntError;

use crate::domain::products::ProductsRepositoryError;

#[derive(Debug, thiserror::Error)]
pub enum ProductsServiceError {
    #[error("Product already exists")]
    AlreadyExists,

    #[error("Product not found")]
    NotFound,

    #[error("Invalid product data")]
    InvalidData,

    #[error("Invalid price")]
    InvalidPrice(#[from] TryFromIntError),

    #[error(transparent)]
    Sql(sqlx::Error),
}

impl From<ProductsRepositoryError> for ProductsServiceError {
    fn from(error: ProductsRepositoryError) -> Self {
        match error {
            ProductsRepositoryError::AlreadyExists => Self::AlreadyExists,
            ProductsRepositoryError::NotFound => Self::NotFound,
            // Referential and constraint failures both mean the write
            // carried data the schema rejects.
            ProductsRepositoryError::InvalidReference | ProductsRepositoryError::InvalidData => {
                Self::InvalidData
            }
            ProductsRepositoryError::InvalidPrice(error) => Self::InvalidPrice(error),
            ProductsRepositoryError::Sql(error) => Self::Sql(error),
        }
    }
}
