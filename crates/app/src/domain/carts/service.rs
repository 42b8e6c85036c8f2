//! Carts service.
//!
//! Owner-scoped cart operations. Every mutation is read-modify-write
//! over the whole cart: fetch, apply the change to the item sequence,
//! recompute totals, persist the cart as one unit.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    domain::{
        carts::{
            CartsServiceError,
            models::{Cart, CartItem},
            repository::CartsRepository,
            totals,
        },
        products::{models::ProductUuid, repository::ProductsRepository},
    },
    uuids::OwnerUuid,
};

#[derive(Clone)]
pub struct CartsServiceImpl {
    carts: Arc<dyn CartsRepository>,
    products: Arc<dyn ProductsRepository>,
}

impl fmt::Debug for CartsServiceImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartsServiceImpl").finish_non_exhaustive()
    }
}

impl CartsServiceImpl {
    #[must_use]
    pub fn new(carts: Arc<dyn CartsRepository>, products: Arc<dyn ProductsRepository>) -> Self {
        Self { carts, products }
    }

    /// Look up the owner's cart, creating an empty one on first
    /// access. Owner uniqueness is arbitrated by the storage layer.
    async fn get_or_create(&self, owner: OwnerUuid) -> Result<Cart, CartsServiceError> {
        if let Some(cart) = self.carts.find_cart_by_owner(owner).await? {
            return Ok(cart);
        }

        Ok(self.carts.create_cart(owner).await?)
    }

    /// Recompute totals from the item sequence and persist the cart.
    async fn persist(&self, mut cart: Cart) -> Result<Cart, CartsServiceError> {
        let totals = totals::totals(&cart.items);

        cart.subtotal = totals.subtotal;
        cart.total = totals.total;
        cart.updated_at = Timestamp::now();

        self.carts.save_cart(&cart).await?;

        Ok(cart)
    }
}

#[async_trait]
impl CartsService for CartsServiceImpl {
    async fn get_my_cart(&self, owner: OwnerUuid) -> Result<Cart, CartsServiceError> {
        self.get_or_create(owner).await
    }

    async fn add_item(
        &self,
        owner: OwnerUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError> {
        if quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        // Unit price is read fresh on every add, never cached from an
        // earlier line.
        let product = self.products.get_product(product).await?;

        let mut cart = self.get_or_create(owner).await?;

        if let Some(item) = cart
            .items
            .iter_mut()
            .find(|item| item.product_uuid == product.uuid)
        {
            item.set_unit_price(product.price);
            item.set_quantity(item.quantity.saturating_add(quantity));
        } else {
            cart.items
                .push(CartItem::new(product.uuid, quantity, product.price));
        }

        self.persist(cart).await
    }

    async fn update_item_quantity(
        &self,
        owner: OwnerUuid,
        index: usize,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError> {
        let mut cart = self.get_or_create(owner).await?;

        if quantity == 0 {
            // Quantity zero is removal, not a zero-quantity line.
            return self.remove_item(owner, index).await;
        }

        let item = cart
            .items
            .get_mut(index)
            .ok_or(CartsServiceError::ItemNotFound)?;

        item.set_quantity(quantity);

        self.persist(cart).await
    }

    async fn remove_item(&self, owner: OwnerUuid, index: usize) -> Result<Cart, CartsServiceError> {
        let mut cart = self.get_or_create(owner).await?;

        if index >= cart.items.len() {
            return Err(CartsServiceError::ItemNotFound);
        }

        cart.items.remove(index);

        self.persist(cart).await
    }

    async fn clear_cart(&self, owner: OwnerUuid) -> Result<Cart, CartsServiceError> {
        let mut cart = self.get_or_create(owner).await?;

        cart.items.clear();

        self.persist(cart).await
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the owner's cart, creating it on first access.
    async fn get_my_cart(&self, owner: OwnerUuid) -> Result<Cart, CartsServiceError>;

    /// Add `quantity` of a product, merging into an existing line for
    /// the same product.
    async fn add_item(
        &self,
        owner: OwnerUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError>;

    /// Set the quantity of the item at `index`; 0 removes the item.
    async fn update_item_quantity(
        &self,
        owner: OwnerUuid,
        index: usize,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError>;

    /// Remove the item at `index`.
    async fn remove_item(&self, owner: OwnerUuid, index: usize) -> Result<Cart, CartsServiceError>;

    /// Empty the cart and reset its totals to zero.
    async fn clear_cart(&self, owner: OwnerUuid) -> Result<Cart, CartsServiceError>;
}
