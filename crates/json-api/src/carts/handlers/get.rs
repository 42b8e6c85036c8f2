//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use trolley_app::domain::carts::models::{Cart, CartItem};

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The unique identifier of the cart
    pub uuid: Uuid,

    /// The items in the cart, in insertion order
    pub items: Vec<CartItemResponse>,

    /// Sum of the item subtotals, in minor currency units
    pub subtotal: u64,

    /// The amount due, in minor currency units
    pub total: u64,

    /// The date and time the cart was created
    pub created_at: String,

    /// The date and time the cart was last updated
    pub updated_at: String,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        CartResponse {
            uuid: cart.uuid.into_uuid(),
            items: cart.items.into_iter().map(CartItemResponse::from).collect(),
            subtotal: cart.subtotal,
            total: cart.total,
            created_at: cart.created_at.to_string(),
            updated_at: cart.updated_at.to_string(),
        }
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    /// The unique identifier of the cart item
    pub uuid: Uuid,

    /// The unique identifier of the product in the cart item
    pub product_uuid: Uuid,

    /// Units of the product in this line
    pub quantity: u32,

    /// Price per unit at the time the line was last touched
    pub unit_price: u64,

    /// Line subtotal, `quantity * unit_price`
    pub subtotal: u64,

    /// The date and time the cart item was created
    pub created_at: String,

    /// The date and time the cart item was last updated
    pub updated_at: String,
}

impl From<CartItem> for CartItemResponse {
    fn from(cart_item: CartItem) -> Self {
        Self {
            uuid: cart_item.uuid.into_uuid(),
            product_uuid: cart_item.product_uuid.into_uuid(),
            quantity: cart_item.quantity,
            unit_price: cart_item.unit_price,
            subtotal: cart_item.subtotal,
            created_at: cart_item.created_at.to_string(),
            updated_at: cart_item.updated_at.to_string(),
        }
    }
}

/// Get Cart Handler
///
/// Returns the authenticated owner's cart, creating it on first
/// access.
#[endpoint(
    tags("carts"),
    summary = "Get my cart",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.owner_uuid_or_401()?;

    let cart = state
        .app
        .carts
        .get_my_cart(owner)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
