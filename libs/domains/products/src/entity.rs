use crate::id;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sea-ORM Entity for the products table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub price: String,
    #[sea_orm(column_type = "Text")]
    pub image: String,
    pub weight: String,
    pub created_on: DateTimeWithTimeZone,
    pub updated_on: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// Conversion from Sea-ORM Model to domain Product
impl From<Model> for crate::models::Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            price: model.price,
            image: model.image,
            weight: model.weight,
            created_on: model.created_on.into(),
            updated_on: model.updated_on.map(Into::into),
        }
    }
}

// Conversion from domain CreateProduct to Sea-ORM ActiveModel
impl From<crate::models::CreateProduct> for ActiveModel {
    fn from(input: crate::models::CreateProduct) -> Self {
        ActiveModel {
            id: Set(id::generate()),
            name: Set(input.name),
            price: Set(input.price),
            image: Set(input.image),
            weight: Set(input.weight),
            created_on: Set(chrono::Utc::now().into()),
            updated_on: Set(None),
        }
    }
}
