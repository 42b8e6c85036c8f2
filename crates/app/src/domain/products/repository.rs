use std::num::TryFromIntError;

use async_trait::async_trait;
use jiff_sqlx::Timestamp;
use mockall::automock;
use sqlx::{
    Error, FromRow, PgPool, Row,
    error::{DatabaseError, ErrorKind},
    postgres::PgRow,
    query, query_as,
};
use uuid::Uuid;

use crate::domain::{
    carts::repository::try_get_amount,
    products::models::{NewProduct, Product, ProductUuid},
};

const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const GET_PRODUCTS_SQL: &str = include_str!("sql/get_products.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");

#[derive(Debug, thiserror::Error)]
pub enum ProductsRepositoryError {
    #[error("Product already exists")]
    AlreadyExists,

    #[error("Product not found")]
    NotFound,

    #[error("Invalid reference")]
    InvalidReference,

    #[error("Invalid data")]
    InvalidData,

    #[error("Invalid price")]
    InvalidPrice(#[from] TryFromIntError),

    #[error(transparent)]
    Sql(Error),
}

impl From<Error> for ProductsRepositoryError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation | ErrorKind::CheckViolation) => Self::InvalidData,
            Some(_) | None => Self::Sql(error),
        }
    }
}

#[automock]
#[async_trait]
pub trait ProductsRepository: Send + Sync {
    async fn create_product(&self, product: NewProduct)
    -> Result<Product, ProductsRepositoryError>;

    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsRepositoryError>;

    async fn list_products(&self) -> Result<Vec<Product>, ProductsRepositoryError>;

    async fn update_product(
        &self,
        product: ProductUuid,
        price: u64,
    ) -> Result<Product, ProductsRepositoryError>;

    /// Returns the number of rows deleted.
    async fn delete_product(&self, product: ProductUuid) -> Result<u64, ProductsRepositoryError>;
}

/// Postgres-backed products repository.
#[derive(Debug, Clone)]
pub struct PgProductsRepository {
    pool: PgPool,
}

impl PgProductsRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductsRepository for PgProductsRepository {
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<Product, ProductsRepositoryError> {
        let price = i64::try_from(product.price)?;

        let created = query_as::<_, Product>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(price)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsRepositoryError> {
        let found = query_as::<_, Product>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&self.pool)
            .await?;

        Ok(found)
    }

    async fn list_products(&self) -> Result<Vec<Product>, ProductsRepositoryError> {
        let products = query_as::<_, Product>(GET_PRODUCTS_SQL)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        price: u64,
    ) -> Result<Product, ProductsRepositoryError> {
        let price = i64::try_from(price)?;

        let updated = query_as::<_, Product>(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(price)
            .fetch_one(&self.pool)
            .await?;

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<u64, ProductsRepositoryError> {
        let result = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

impl FromRow<'_, PgRow> for Product {
    fn from_row(row: &PgRow) -> Result<Self, Error> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get::<Uuid, _>("uuid")?),
            price: try_get_amount(row, "price")?,
            created_at: row.try_get::<Timestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<Timestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
