use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::ActiveValue::Set;
use sea_orm::{DatabaseConnection, Value};

use crate::{
    entity,
    error::ProductResult,
    models::{CreateProduct, PatchProduct, Product, ProductParams, UpdateProduct},
    repository::ProductRepository,
};

pub struct PgProductRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

fn column_filters(params: ProductParams) -> Vec<(entity::Column, Value)> {
    let mut filters = Vec::new();

    if let Some(name) = params.name {
        filters.push((entity::Column::Name, name.into()));
    }
    if let Some(price) = params.price {
        filters.push((entity::Column::Price, price.into()));
    }
    if let Some(image) = params.image {
        filters.push((entity::Column::Image, image.into()));
    }
    if let Some(weight) = params.weight {
        filters.push((entity::Column::Weight, weight.into()));
    }

    filters
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn get(&self, id: &str) -> ProductResult<Option<Product>> {
        let model = self.base.find_by_id(id).await?;
        Ok(model.map(Into::into))
    }

    async fn get_multi(&self, skip: u64, limit: u64) -> ProductResult<Vec<Product>> {
        let models = self.base.find_page(skip, limit).await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn get_by_params(&self, params: ProductParams) -> ProductResult<Option<Product>> {
        let model = self.base.find_one_by_params(column_filters(params)).await?;
        Ok(model.map(Into::into))
    }

    async fn get_or_create(
        &self,
        params: ProductParams,
        defaults: CreateProduct,
    ) -> ProductResult<(Product, bool)> {
        // Check-then-insert: a concurrent caller with identical params can
        // slip between the lookup and the insert.
        if let Some(existing) = self.get_by_params(params.clone()).await? {
            return Ok((existing, false));
        }

        let active_model: entity::ActiveModel = params.merge_into(defaults).into();
        let model = self.base.insert(active_model).await?;

        tracing::info!(product_id = %model.id, "Created product");
        Ok((model.into(), true))
    }

    async fn patch(&self, id: &str, fields: PatchProduct) -> ProductResult<Option<Product>> {
        let Some(existing) = self.base.find_by_id(id).await? else {
            return Ok(None);
        };

        // Only the provided fields are written; the rest stay untouched.
        let mut active_model = entity::ActiveModel {
            id: Set(existing.id),
            ..Default::default()
        };
        if let Some(name) = fields.name {
            active_model.name = Set(name);
        }
        if let Some(price) = fields.price {
            active_model.price = Set(price);
        }
        if let Some(image) = fields.image {
            active_model.image = Set(image);
        }
        if let Some(weight) = fields.weight {
            active_model.weight = Set(weight);
        }
        active_model.updated_on = Set(Some(chrono::Utc::now().into()));

        let model = self.base.update(active_model).await?;

        tracing::info!(product_id = %id, "Patched product");
        Ok(Some(model.into()))
    }

    async fn update(&self, current: Product, fields: UpdateProduct) -> ProductResult<Product> {
        let active_model = entity::ActiveModel {
            id: Set(current.id.clone()),
            name: Set(fields.name),
            price: Set(fields.price),
            image: Set(fields.image),
            weight: Set(fields.weight),
            created_on: Set(current.created_on.into()),
            updated_on: Set(Some(chrono::Utc::now().into())),
        };

        let model = self.base.update(active_model).await?;

        tracing::info!(product_id = %current.id, "Updated product");
        Ok(model.into())
    }

    async fn remove(&self, id: &str) -> ProductResult<Option<Product>> {
        let Some(existing) = self.base.find_by_id(id).await? else {
            return Ok(None);
        };

        self.base.delete_by_id(id).await?;

        tracing::info!(product_id = %id, "Deleted product");
        Ok(Some(existing.into()))
    }
}
