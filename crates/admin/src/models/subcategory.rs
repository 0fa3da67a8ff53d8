//! Subcategory - second-level catalog entity referencing a category.

use serde::{Deserialize, Serialize};

use guava_core::{CategoryId, EntityStatus, SubcategoryId};

use super::Category;

/// A persisted subcategory. The stored value is always the plain category
/// ID; expansion happens only on the read path (see [`SubcategoryView`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subcategory {
    pub id: SubcategoryId,
    pub category_id: CategoryId,
    pub name: String,
    pub status: EntityStatus,
    pub image: Option<String>,
}

/// Validated input for creating a subcategory.
#[derive(Debug, Clone)]
pub struct NewSubcategory {
    pub category_id: CategoryId,
    pub name: String,
    pub status: EntityStatus,
    pub image: Option<String>,
}

/// Partial update; only `Some` fields are applied.
#[derive(Debug, Clone, Default)]
pub struct SubcategoryPatch {
    pub category_id: Option<CategoryId>,
    pub name: Option<String>,
    pub status: Option<EntityStatus>,
    pub image: Option<String>,
}

/// Raw multipart input for subcategory create/update.
#[derive(Debug, Clone, Default)]
pub struct SubcategoryForm {
    pub name: Option<String>,
    pub category_id: Option<String>,
    pub status: Option<String>,
    pub image: Option<String>,
}

/// Read-side shape with the category reference expanded in full.
///
/// The expansion is serialized under `categoryId`, replacing the plain ID;
/// a dangling reference degrades to `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubcategoryView {
    pub id: SubcategoryId,
    pub name: String,
    pub status: EntityStatus,
    pub image: Option<String>,
    #[serde(rename = "categoryId")]
    pub category: Option<Category>,
}

impl SubcategoryView {
    #[must_use]
    pub fn new(subcategory: Subcategory, category: Option<Category>) -> Self {
        Self {
            id: subcategory.id,
            name: subcategory.name,
            status: subcategory.status,
            image: subcategory.image,
            category,
        }
    }
}
