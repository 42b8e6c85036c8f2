//! Cart Models

use jiff::Timestamp;

use crate::{
    domain::{carts::totals, products::models::ProductUuid},
    uuids::{OwnerUuid, TypedUuid},
};

/// Cart UUID
pub type CartUuid = TypedUuid<Cart>;

/// Cart Model
///
/// One cart per owner. `items` preserves insertion order for display;
/// `subtotal` and `total` are always recomputed through
/// [`totals::totals`] before the cart is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    pub uuid: CartUuid,
    pub owner: OwnerUuid,
    pub subtotal: u64,
    pub total: u64,
    pub items: Vec<CartItem>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Cart {
    /// A freshly created, empty cart for the given owner.
    #[must_use]
    pub fn empty(owner: OwnerUuid) -> Self {
        let now = Timestamp::now();

        Self {
            uuid: CartUuid::new(),
            owner,
            subtotal: 0,
            total: 0,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItem>;

/// CartItem Model
///
/// A product-and-quantity line. `quantity` is always at least 1; a
/// line whose quantity drops to 0 is removed from the cart, never
/// kept around. Prices are in minor units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub uuid: CartItemUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub unit_price: u64,
    pub subtotal: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartItem {
    /// A new line for `product_uuid` at the product's current price.
    #[must_use]
    pub fn new(product_uuid: ProductUuid, quantity: u32, unit_price: u64) -> Self {
        let now = Timestamp::now();

        Self {
            uuid: CartItemUuid::new(),
            product_uuid,
            quantity,
            unit_price,
            subtotal: totals::line_subtotal(quantity, unit_price),
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the quantity and recompute the line subtotal.
    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.subtotal = totals::line_subtotal(self.quantity, self.unit_price);
        self.updated_at = Timestamp::now();
    }

    /// Re-read the unit price and recompute the line subtotal.
    pub fn set_unit_price(&mut self, unit_price: u64) {
        self.unit_price = unit_price;
        self.subtotal = totals::line_subtotal(self.quantity, self.unit_price);
        self.updated_at = Timestamp::now();
    }
}
