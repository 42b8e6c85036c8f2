//! Products service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;

use crate::domain::products::{
    ProductsServiceError,
    models::{NewProduct, Product, ProductUuid},
    repository::ProductsRepository,
};

#[derive(Clone)]
pub struct ProductsServiceImpl {
    repository: Arc<dyn ProductsRepository>,
}

impl fmt::Debug for ProductsServiceImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductsServiceImpl").finish_non_exhaustive()
    }
}

impl ProductsServiceImpl {
    #[must_use]
    pub fn new(repository: Arc<dyn ProductsRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl ProductsService for ProductsServiceImpl {
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        Ok(self.repository.create_product(product).await?)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError> {
        Ok(self.repository.get_product(product).await?)
    }

    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        Ok(self.repository.list_products().await?)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        price: u64,
    ) -> Result<Product, ProductsServiceError> {
        Ok(self.repository.update_product(product, price).await?)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let deleted = self.repository.delete_product(product).await?;

        if deleted == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError>;

    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError>;

    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError>;

    async fn update_product(
        &self,
        product: ProductUuid,
        price: u64,
    ) -> Result<Product, ProductsServiceError>;

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;
}
