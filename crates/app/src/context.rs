//! Application context.

use std::{fmt, sync::Arc};

use sqlx::PgPool;
use tracing::info;

use crate::{
    auth::{AuthService, AuthServiceImpl, PgAuthRepository},
    database,
    domain::{
        carts::{
            repository::PgCartsRepository,
            service::{CartsService, CartsServiceImpl},
        },
        products::{
            repository::PgProductsRepository,
            service::{ProductsService, ProductsServiceImpl},
        },
    },
};

#[derive(Debug, thiserror::Error)]
pub enum AppInitError {
    #[error("Failed to connect to the database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Failed to run migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Wired-up services shared by the HTTP API and the CLI.
#[derive(Clone)]
pub struct AppContext {
    pub carts: Arc<dyn CartsService>,
    pub products: Arc<dyn ProductsService>,
    pub auth: Arc<dyn AuthService>,
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Connect to Postgres, run pending migrations, and wire the
    /// services to their Postgres repositories.
    pub async fn from_database_url(database_url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(database_url).await?;

        info!("running pending database migrations");

        database::migrate(&pool).await?;

        Ok(Self::from_pool(pool))
    }

    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        let products_repository = Arc::new(PgProductsRepository::new(pool.clone()));

        Self {
            carts: Arc::new(CartsServiceImpl::new(
                Arc::new(PgCartsRepository::new(pool.clone())),
                products_repository.clone(),
            )),
            products: Arc::new(ProductsServiceImpl::new(products_repository)),
            auth: Arc::new(AuthServiceImpl::new(Arc::new(PgAuthRepository::new(pool)))),
        }
    }
}
