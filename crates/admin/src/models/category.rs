//! Category - root catalog entity.

use serde::{Deserialize, Serialize};

use guava_core::{CategoryId, EntityStatus};

/// A persisted category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub status: EntityStatus,
    /// Blob reference (stored filename), never an empty string.
    pub image: Option<String>,
}

/// Validated input for creating a category.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub status: EntityStatus,
    pub image: Option<String>,
}

/// Partial update; only `Some` fields are applied.
#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub status: Option<EntityStatus>,
    pub image: Option<String>,
}

/// Raw multipart input for category create/update.
#[derive(Debug, Clone, Default)]
pub struct CategoryForm {
    pub name: Option<String>,
    pub status: Option<String>,
    /// Stored filename of an accompanying upload, if any.
    pub image: Option<String>,
}
