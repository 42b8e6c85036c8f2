//! Carts Repository
//!
//! The cart is the unit of consistency: `save_cart` replaces the item
//! rows and totals of one cart inside a single transaction, so a
//! failed mutation never leaves a partially updated cart behind.

use std::num::TryFromIntError;

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{
    Error, FromRow, PgPool, Postgres, Row,
    error::{DatabaseError, ErrorKind},
    postgres::PgRow,
    query, query_as,
};
use thiserror::Error;

use crate::{
    domain::carts::models::{Cart, CartItem, CartUuid},
    uuids::OwnerUuid,
};

const FIND_CART_BY_OWNER_SQL: &str = include_str!("sql/find_cart_by_owner.sql");
const CREATE_CART_SQL: &str = include_str!("sql/create_cart.sql");
const GET_CART_ITEMS_SQL: &str = include_str!("sql/get_cart_items.sql");
const DELETE_CART_ITEMS_SQL: &str = include_str!("sql/delete_cart_items.sql");
const INSERT_CART_ITEM_SQL: &str = include_str!("sql/insert_cart_item.sql");
const UPDATE_CART_TOTALS_SQL: &str = include_str!("sql/update_cart_totals.sql");

/// Failures surfaced by the carts persistence layer.
#[derive(Debug, Error)]
pub enum CartsRepositoryError {
    #[error("related resource not found")]
    InvalidReference,

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("invalid amount value")]
    InvalidAmount(#[from] TryFromIntError),
}

impl From<Error> for CartsRepositoryError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(_) | None => Self::Sql(error),
        }
    }
}

/// Persistence surface consumed by the carts service.
#[automock]
#[async_trait]
pub trait CartsRepository: Send + Sync {
    /// Look up the owner's cart, items attached in insertion order.
    async fn find_cart_by_owner(
        &self,
        owner: OwnerUuid,
    ) -> Result<Option<Cart>, CartsRepositoryError>;

    /// Create an empty cart for the owner, or return the existing one
    /// when a concurrent request created it first.
    async fn create_cart(&self, owner: OwnerUuid) -> Result<Cart, CartsRepositoryError>;

    /// Persist the whole cart: replace its item rows and totals
    /// atomically.
    async fn save_cart(&self, cart: &Cart) -> Result<(), CartsRepositoryError>;
}

#[derive(Debug, Clone)]
pub struct PgCartsRepository {
    pool: PgPool,
}

impl PgCartsRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartsRepository for PgCartsRepository {
    async fn find_cart_by_owner(
        &self,
        owner: OwnerUuid,
    ) -> Result<Option<Cart>, CartsRepositoryError> {
        let mut tx = self.pool.begin().await.map_err(CartsRepositoryError::from)?;

        let Some(mut cart) = query_as::<Postgres, Cart>(FIND_CART_BY_OWNER_SQL)
            .bind(owner.into_uuid())
            .fetch_optional(&mut *tx)
            .await
            .map_err(CartsRepositoryError::from)?
        else {
            return Ok(None);
        };

        cart.items = query_as::<Postgres, CartItem>(GET_CART_ITEMS_SQL)
            .bind(cart.uuid.into_uuid())
            .fetch_all(&mut *tx)
            .await
            .map_err(CartsRepositoryError::from)?;

        tx.commit().await.map_err(CartsRepositoryError::from)?;

        Ok(Some(cart))
    }

    async fn create_cart(&self, owner: OwnerUuid) -> Result<Cart, CartsRepositoryError> {
        let mut tx = self.pool.begin().await.map_err(CartsRepositoryError::from)?;

        // ON CONFLICT (owner_uuid) DO NOTHING: the UNIQUE constraint
        // on owner arbitrates concurrent first-touch requests, and the
        // follow-up lookup returns whichever row won.
        query(CREATE_CART_SQL)
            .bind(CartUuid::new().into_uuid())
            .bind(owner.into_uuid())
            .execute(&mut *tx)
            .await
            .map_err(CartsRepositoryError::from)?;

        let cart = query_as::<Postgres, Cart>(FIND_CART_BY_OWNER_SQL)
            .bind(owner.into_uuid())
            .fetch_one(&mut *tx)
            .await
            .map_err(CartsRepositoryError::from)?;

        tx.commit().await.map_err(CartsRepositoryError::from)?;

        Ok(cart)
    }

    async fn save_cart(&self, cart: &Cart) -> Result<(), CartsRepositoryError> {
        let mut tx = self.pool.begin().await.map_err(CartsRepositoryError::from)?;

        query(DELETE_CART_ITEMS_SQL)
            .bind(cart.uuid.into_uuid())
            .execute(&mut *tx)
            .await
            .map_err(CartsRepositoryError::from)?;

        for (position, item) in cart.items.iter().enumerate() {
            query(INSERT_CART_ITEM_SQL)
                .bind(item.uuid.into_uuid())
                .bind(cart.uuid.into_uuid())
                .bind(item.product_uuid.into_uuid())
                .bind(i32::try_from(position)?)
                .bind(i32::try_from(item.quantity)?)
                .bind(i64::try_from(item.unit_price)?)
                .bind(i64::try_from(item.subtotal)?)
                .execute(&mut *tx)
                .await
                .map_err(CartsRepositoryError::from)?;
        }

        query(UPDATE_CART_TOTALS_SQL)
            .bind(cart.uuid.into_uuid())
            .bind(i64::try_from(cart.subtotal)?)
            .bind(i64::try_from(cart.total)?)
            .execute(&mut *tx)
            .await
            .map_err(CartsRepositoryError::from)?;

        tx.commit().await.map_err(CartsRepositoryError::from)?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for Cart {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartUuid::from_uuid(row.try_get("uuid")?),
            owner: OwnerUuid::from_uuid(row.try_get("owner_uuid")?),
            subtotal: try_get_amount(row, "subtotal")?,
            total: try_get_amount(row, "total")?,
            items: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CartItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity_i32: i32 = row.try_get("quantity")?;

        let quantity = u32::try_from(quantity_i32).map_err(|e| Error::ColumnDecode {
            index: "quantity".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: row.try_get::<uuid::Uuid, _>("uuid")?.into(),
            product_uuid: row.try_get::<uuid::Uuid, _>("product_uuid")?.into(),
            quantity,
            unit_price: try_get_amount(row, "unit_price")?,
            subtotal: try_get_amount(row, "subtotal")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

pub(crate) fn try_get_amount(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}
