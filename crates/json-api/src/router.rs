//! App Router

use salvo::Router;

use crate::{auth, carts, products};

pub fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("cart")
                .get(carts::handlers::get::handler)
                .push(
                    Router::with_path("items")
                        .post(carts::items::handlers::create::handler)
                        .delete(carts::items::handlers::clear::handler)
                        .push(
                            Router::with_path("{index}")
                                .put(carts::items::handlers::update::handler)
                                .delete(carts::items::handlers::delete::handler),
                        ),
                ),
        )
        .push(
            Router::with_path("products")
                .get(products::handlers::index::handler)
                .post(products::handlers::create::handler)
                .push(
                    Router::with_path("{product}")
                        .get(products::handlers::get::handler)
                        .put(products::handlers::update::handler)
                        .delete(products::handlers::delete::handler),
                ),
        )
}
