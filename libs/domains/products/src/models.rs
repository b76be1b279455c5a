use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::id;

/// Product entity - a single catalog record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier, generated at creation and immutable thereafter
    pub id: String,
    /// Product name
    pub name: String,
    /// Product price, kept as the client-supplied string
    pub price: String,
    /// Image URL or path
    pub image: String,
    /// Product weight (e.g. "200g")
    pub weight: String,
    /// Creation timestamp, set at insert
    pub created_on: DateTime<Utc>,
    /// Last update timestamp; None until the first patch/update
    pub updated_on: Option<DateTime<Utc>>,
}

/// DTO for creating a new product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 30))]
    pub name: String,
    #[validate(length(min = 1, max = 30))]
    pub price: String,
    #[validate(length(min = 1))]
    pub image: String,
    #[validate(length(min = 1))]
    pub weight: String,
}

/// DTO for replacing the full mutable field set of a product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 30))]
    pub name: String,
    #[validate(length(min = 1, max = 30))]
    pub price: String,
    #[validate(length(min = 1))]
    pub image: String,
    #[validate(length(min = 1))]
    pub weight: String,
}

/// DTO for partially updating a product; absent fields are untouched
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct PatchProduct {
    #[validate(length(min = 1, max = 30))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 30))]
    pub price: Option<String>,
    #[validate(length(min = 1))]
    pub image: Option<String>,
    #[validate(length(min = 1))]
    pub weight: Option<String>,
}

/// Filter set used to locate a record by non-id attributes.
///
/// Every present field must match; string comparison is case-insensitive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductParams {
    pub name: Option<String>,
    pub price: Option<String>,
    pub image: Option<String>,
    pub weight: Option<String>,
}

impl ProductParams {
    /// Merge these filters over `defaults`, with the filters winning.
    pub fn merge_into(self, defaults: CreateProduct) -> CreateProduct {
        CreateProduct {
            name: self.name.unwrap_or(defaults.name),
            price: self.price.unwrap_or(defaults.price),
            image: self.image.unwrap_or(defaults.image),
            weight: self.weight.unwrap_or(defaults.weight),
        }
    }

    /// Whether a product satisfies every present filter.
    pub fn matches(&self, product: &Product) -> bool {
        fn matches_ci(filter: &Option<String>, value: &str) -> bool {
            filter
                .as_ref()
                .is_none_or(|f| f.to_lowercase() == value.to_lowercase())
        }

        matches_ci(&self.name, &product.name)
            && matches_ci(&self.price, &product.price)
            && matches_ci(&self.image, &product.image)
            && matches_ci(&self.weight, &product.weight)
    }
}

impl From<&CreateProduct> for ProductParams {
    fn from(input: &CreateProduct) -> Self {
        Self {
            name: Some(input.name.clone()),
            price: Some(input.price.clone()),
            image: Some(input.image.clone()),
            weight: Some(input.weight.clone()),
        }
    }
}

/// Query parameters for the list endpoint
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct PageParams {
    /// Number of records to skip
    #[serde(default)]
    pub skip: u64,
    /// Maximum number of records to return
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    20
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
        }
    }
}

impl Product {
    /// Create a new product from a CreateProduct DTO
    pub fn new(input: CreateProduct) -> Self {
        Self {
            id: id::generate(),
            name: input.name,
            price: input.price,
            image: input.image,
            weight: input.weight,
            created_on: Utc::now(),
            updated_on: None,
        }
    }

    /// Apply only the fields present in the patch and stamp `updated_on`
    pub fn apply_patch(&mut self, patch: PatchProduct) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
        if let Some(weight) = patch.weight {
            self.weight = weight;
        }
        self.updated_on = Some(Utc::now());
    }

    /// Overwrite the full mutable field set and stamp `updated_on`
    pub fn apply_update(&mut self, update: UpdateProduct) {
        self.name = update.name;
        self.price = update.price;
        self.image = update.image;
        self.weight = update.weight;
        self.updated_on = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mug() -> CreateProduct {
        CreateProduct {
            name: "Mug".to_string(),
            price: "9.99".to_string(),
            image: "http://x/img.png".to_string(),
            weight: "200g".to_string(),
        }
    }

    #[test]
    fn test_new_product_has_id_and_created_on() {
        let product = Product::new(mug());
        assert!(!product.id.is_empty());
        assert_eq!(product.name, "Mug");
        assert!(product.updated_on.is_none());
    }

    #[test]
    fn test_apply_patch_touches_only_present_fields() {
        let mut product = Product::new(mug());
        product.apply_patch(PatchProduct {
            name: Some("Mug XL".to_string()),
            ..Default::default()
        });

        assert_eq!(product.name, "Mug XL");
        assert_eq!(product.price, "9.99");
        assert_eq!(product.image, "http://x/img.png");
        assert_eq!(product.weight, "200g");
        assert!(product.updated_on.is_some());
    }

    #[test]
    fn test_apply_update_overwrites_all_fields() {
        let mut product = Product::new(mug());
        let created_on = product.created_on;

        product.apply_update(UpdateProduct {
            name: "Mug XL".to_string(),
            price: "12.99".to_string(),
            image: "http://x/img-xl.png".to_string(),
            weight: "250g".to_string(),
        });

        assert_eq!(product.name, "Mug XL");
        assert_eq!(product.price, "12.99");
        assert_eq!(product.created_on, created_on);
        assert!(product.updated_on.is_some());
    }

    #[test]
    fn test_params_match_is_case_insensitive_for_strings() {
        let product = Product::new(mug());

        let params = ProductParams {
            name: Some("mUg".to_string()),
            ..Default::default()
        };
        assert!(params.matches(&product));

        let params = ProductParams {
            name: Some("kettle".to_string()),
            ..Default::default()
        };
        assert!(!params.matches(&product));
    }

    #[test]
    fn test_empty_params_match_everything() {
        let product = Product::new(mug());
        assert!(ProductParams::default().matches(&product));
    }

    #[test]
    fn test_merge_into_prefers_filter_values() {
        let params = ProductParams {
            name: Some("Kettle".to_string()),
            ..Default::default()
        };

        let merged = params.merge_into(mug());
        assert_eq!(merged.name, "Kettle");
        assert_eq!(merged.price, "9.99");
    }
}
