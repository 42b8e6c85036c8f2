//! Update Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    carts::{errors::into_status_error, handlers::get::CartResponse},
    extensions::*,
    state::State,
};

/// Update Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateItemRequest {
    /// New quantity for the line; 0 removes it
    pub quantity: u32,
}

/// Update Cart Item Handler
///
/// Sets the quantity of the item at the given position. A quantity of
/// 0 removes the item.
#[endpoint(
    tags("carts"),
    summary = "Update Cart Item Quantity",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart updated"),
        (status_code = StatusCode::NOT_FOUND, description = "No cart item at that position"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    index: PathParam<usize>,
    json: JsonBody<UpdateItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.owner_uuid_or_401()?;

    let cart = state
        .app
        .carts
        .update_item_quantity(owner, index.into_inner(), json.into_inner().quantity)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use trolley_app::domain::{
        carts::{CartsServiceError, service::MockCartsService},
        products::models::ProductUuid,
    };

    use crate::test_helpers::{TEST_OWNER_UUID, carts_service, make_cart, make_cart_with_item};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("cart/items/{index}").put(handler))
    }

    #[tokio::test]
    async fn test_update_quantity_returns_200() -> TestResult {
        let cart = make_cart_with_item(TEST_OWNER_UUID, ProductUuid::new(), 4);

        let mut carts = MockCartsService::new();

        carts
            .expect_update_item_quantity()
            .once()
            .withf(|owner, index, quantity| {
                *owner == TEST_OWNER_UUID && *index == 0 && *quantity == 4
            })
            .return_once(move |_, _, _| Ok(cart));

        let mut res = TestClient::put("http://example.com/cart/items/0")
            .json(&UpdateItemRequest { quantity: 4 })
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CartResponse = res.take_json().await?;

        assert_eq!(body.items.first().map(|item| item.quantity), Some(4));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_quantity_zero_returns_cart_without_item() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_update_item_quantity()
            .once()
            .withf(|_, index, quantity| *index == 0 && *quantity == 0)
            .return_once(|owner, _, _| Ok(make_cart(owner)));

        let mut res = TestClient::put("http://example.com/cart/items/0")
            .json(&UpdateItemRequest { quantity: 0 })
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CartResponse = res.take_json().await?;

        assert!(body.items.is_empty(), "quantity 0 must remove the item");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_out_of_range_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_update_item_quantity()
            .once()
            .withf(|_, index, _| *index == 5)
            .return_once(|_, _, _| Err(CartsServiceError::ItemNotFound));

        let res = TestClient::put("http://example.com/cart/items/5")
            .json(&UpdateItemRequest { quantity: 2 })
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
