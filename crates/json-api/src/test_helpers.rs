//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use trolley_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        carts::{
            models::{Cart, CartItem},
            service::MockCartsService,
        },
        products::{
            models::{Product, ProductUuid},
            service::MockProductsService,
        },
    },
    uuids::OwnerUuid,
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_OWNER_UUID: OwnerUuid = OwnerUuid::from_uuid(Uuid::nil());

#[salvo::handler]
pub(crate) async fn inject_owner(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_owner_uuid(TEST_OWNER_UUID);
    ctrl.call_next(req, depot, res).await;
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();
    auth.expect_register_owner().never();

    auth
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_get_my_cart().never();
    carts.expect_add_item().never();
    carts.expect_update_item_quantity().never();
    carts.expect_remove_item().never();
    carts.expect_clear_cart().never();

    carts
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();

    products
}

fn make_state(
    carts: MockCartsService,
    products: MockProductsService,
    auth: MockAuthService,
) -> Arc<State> {
    Arc::new(State::new(AppContext {
        carts: Arc::new(carts),
        products: Arc::new(products),
        auth: Arc::new(auth),
    }))
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    make_state(strict_carts_mock(), strict_products_mock(), auth)
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(make_state(
                carts,
                strict_products_mock(),
                strict_auth_mock(),
            )))
            .hoop(inject_owner)
            .push(route),
    )
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(make_state(
                strict_carts_mock(),
                products,
                strict_auth_mock(),
            )))
            .hoop(inject_owner)
            .push(route),
    )
}

pub(crate) fn make_cart(owner: OwnerUuid) -> Cart {
    Cart {
        uuid: Uuid::now_v7().into(),
        owner,
        subtotal: 0,
        total: 0,
        items: Vec::new(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart_with_item(owner: OwnerUuid, product: ProductUuid, quantity: u32) -> Cart {
    let item = CartItem::new(product, quantity, 50);
    let subtotal = item.subtotal;
    let mut cart = make_cart(owner);

    cart.items = vec![item];
    cart.subtotal = subtotal;
    cart.total = subtotal;
    cart
}

pub(crate) fn make_product(uuid: ProductUuid, price: u64) -> Product {
    Product {
        uuid,
        price,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
