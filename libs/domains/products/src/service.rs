//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, PatchProduct, Product, ProductParams, UpdateProduct};
use crate::repository::ProductRepository;

/// Product service providing business logic operations
///
/// The service layer handles validation and orchestrates repository
/// operations. Mutations use an existence pre-check (a separate read before
/// the mutating call), so two concurrent requests for the same record can
/// interleave; the store itself arbitrates.
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new product, failing if an identical one already exists
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        let params = ProductParams::from(&input);
        let (product, created) = self.repository.get_or_create(params, input).await?;

        if !created {
            return Err(ProductError::AlreadyExists(product.name));
        }

        Ok(product)
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &str) -> ProductResult<Product> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    /// List a page of products
    #[instrument(skip(self))]
    pub async fn list_products(&self, skip: u64, limit: u64) -> ProductResult<Vec<Product>> {
        self.repository.get_multi(skip, limit).await
    }

    /// Partially update a product
    #[instrument(skip(self, input))]
    pub async fn patch_product(&self, id: &str, input: PatchProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        // Existence pre-check before the mutating call
        self.get_product(id).await?;

        self.repository
            .patch(id, input)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    /// Replace the full mutable field set of a product
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: &str, input: UpdateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        let current = self.get_product(id).await?;
        self.repository.update(current, input).await
    }

    /// Delete a product, returning its last-known state
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> ProductResult<Product> {
        self.get_product(id).await?;

        self.repository
            .remove(id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }
}
