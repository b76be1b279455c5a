use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::ProductResult;
use crate::models::{CreateProduct, PatchProduct, Product, ProductParams, UpdateProduct};

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Look up a product by id; a miss is `Ok(None)`, not an error
    async fn get(&self, id: &str) -> ProductResult<Option<Product>>;

    /// Return a page of products in the store's default order
    async fn get_multi(&self, skip: u64, limit: u64) -> ProductResult<Vec<Product>>;

    /// Return the first product matching every given filter
    async fn get_by_params(&self, params: ProductParams) -> ProductResult<Option<Product>>;

    /// Return the product matching `params`, or create one from `defaults`
    /// merged with `params`. The boolean reports whether a record was created.
    ///
    /// Not atomic: two concurrent callers with identical params can both
    /// observe a miss and insert.
    async fn get_or_create(
        &self,
        params: ProductParams,
        defaults: CreateProduct,
    ) -> ProductResult<(Product, bool)>;

    /// Apply only the provided fields; an absent id yields `Ok(None)`
    async fn patch(&self, id: &str, fields: PatchProduct) -> ProductResult<Option<Product>>;

    /// Overwrite every field of `current` with the full field set
    async fn update(&self, current: Product, fields: UpdateProduct) -> ProductResult<Product>;

    /// Delete by id, returning the removed record's last-known state;
    /// an absent id is a no-op yielding `Ok(None)`
    async fn remove(&self, id: &str) -> ProductResult<Option<Product>>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<String, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn sorted(products: &HashMap<String, Product>) -> Vec<Product> {
        // Insertion-time order keeps paging deterministic
        let mut all: Vec<Product> = products.values().cloned().collect();
        all.sort_by(|a, b| a.created_on.cmp(&b.created_on).then(a.id.cmp(&b.id)));
        all
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn get(&self, id: &str) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(id).cloned())
    }

    async fn get_multi(&self, skip: u64, limit: u64) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(Self::sorted(&products)
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .collect())
    }

    async fn get_by_params(&self, params: ProductParams) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(Self::sorted(&products)
            .into_iter()
            .find(|p| params.matches(p)))
    }

    async fn get_or_create(
        &self,
        params: ProductParams,
        defaults: CreateProduct,
    ) -> ProductResult<(Product, bool)> {
        let mut products = self.products.write().await;

        if let Some(existing) = Self::sorted(&products)
            .into_iter()
            .find(|p| params.matches(p))
        {
            return Ok((existing, false));
        }

        let product = Product::new(params.merge_into(defaults));
        products.insert(product.id.clone(), product.clone());

        tracing::info!(product_id = %product.id, "Created product");
        Ok((product, true))
    }

    async fn patch(&self, id: &str, fields: PatchProduct) -> ProductResult<Option<Product>> {
        let mut products = self.products.write().await;

        let Some(product) = products.get_mut(id) else {
            return Ok(None);
        };

        product.apply_patch(fields);
        let patched = product.clone();

        tracing::info!(product_id = %id, "Patched product");
        Ok(Some(patched))
    }

    async fn update(&self, current: Product, fields: UpdateProduct) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        let mut updated = current;
        updated.apply_update(fields);
        products.insert(updated.id.clone(), updated.clone());

        tracing::info!(product_id = %updated.id, "Updated product");
        Ok(updated)
    }

    async fn remove(&self, id: &str) -> ProductResult<Option<Product>> {
        let mut products = self.products.write().await;

        let removed = products.remove(id);
        if removed.is_some() {
            tracing::info!(product_id = %id, "Deleted product");
        }
        Ok(removed)
    }
}
