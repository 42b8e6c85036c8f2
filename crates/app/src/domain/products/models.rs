use jiff::Timestamp;
use uuid::Uuid;

use crate::uuids::TypedUuid;

pub type ProductUuid = TypedUuid<Product>;

/// A sellable product with a unit price in minor currency units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub uuid: ProductUuid,
    pub price: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A product to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub price: u64,
}

impl NewProduct {
    #[must_use]
    pub fn new(price: u64) -> Self {
        Self {
            uuid: ProductUuid::new(),
            price,
        }
    }

    #[must_use]
    pub fn with_uuid(uuid: Uuid, price: u64) -> Self {
        Self {
            uuid: ProductUuid::from_uuid(uuid),
            price,
        }
    }
}
