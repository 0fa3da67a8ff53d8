//! Product - catalog entity referencing a category and a subcategory.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use guava_core::{CategoryId, EntityStatus, ProductId, SubcategoryId};

/// A persisted product. Reference fields hold plain IDs; expansion happens
/// only on the read path (see [`ProductView`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub current_price: f64,
    pub discount_price: f64,
    pub category_id: Option<CategoryId>,
    pub subcategory_id: Option<SubcategoryId>,
    pub description: Option<String>,
    pub promo_code: Option<String>,
    pub image: Option<String>,
    pub status: EntityStatus,
}

/// Validated input for creating a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub current_price: f64,
    pub discount_price: f64,
    pub category_id: Option<CategoryId>,
    pub subcategory_id: Option<SubcategoryId>,
    pub description: Option<String>,
    pub promo_code: Option<String>,
    pub image: Option<String>,
    pub status: EntityStatus,
}

/// Partial update; only `Some` fields are applied.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub current_price: Option<f64>,
    pub discount_price: Option<f64>,
    pub category_id: Option<CategoryId>,
    pub subcategory_id: Option<SubcategoryId>,
    pub description: Option<String>,
    pub promo_code: Option<String>,
    pub image: Option<String>,
    pub status: Option<EntityStatus>,
}

/// Raw multipart input for product create/update.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub name: Option<String>,
    pub current_price: Option<String>,
    pub discount_price: Option<String>,
    pub category_id: Option<String>,
    pub subcategory_id: Option<String>,
    pub description: Option<String>,
    pub promo_code: Option<String>,
    pub status: Option<String>,
    pub image: Option<String>,
}

/// Name-only projection of a referenced entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameRef {
    pub id: Uuid,
    pub name: String,
}

/// Read-side shape with references expanded to name projections.
///
/// Expansions are serialized under the reference field names, replacing the
/// plain IDs; dangling references degrade to `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub current_price: f64,
    pub discount_price: f64,
    #[serde(rename = "categoryId")]
    pub category: Option<NameRef>,
    #[serde(rename = "subcategoryId")]
    pub subcategory: Option<NameRef>,
    pub description: Option<String>,
    pub promo_code: Option<String>,
    pub image: Option<String>,
    pub status: EntityStatus,
}

impl ProductView {
    #[must_use]
    pub fn new(product: Product, category: Option<NameRef>, subcategory: Option<NameRef>) -> Self {
        Self {
            id: product.id,
            name: product.name,
            current_price: product.current_price,
            discount_price: product.discount_price,
            category,
            subcategory,
            description: product.description,
            promo_code: product.promo_code,
            image: product.image,
            status: product.status,
        }
    }
}
