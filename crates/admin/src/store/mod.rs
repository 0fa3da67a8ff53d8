//! Entity Store Adapter - typed CRUD over the document datastore.
//!
//! The [`EntityStore`] trait is the single seam between the mutation
//! pipeline and persistence. Two implementations exist:
//!
//! - [`PgStore`] - `PostgreSQL` via sqlx, the production backend
//! - [`MemoryStore`] - insertion-ordered in-memory backend for tests and
//!   local development
//!
//! All operations are atomic at the single-entity level; no multi-entity
//! transactions are provided or required. Update and delete return
//! `Ok(None)` when the target does not exist; the pipeline turns that into
//! a not-found response.

pub mod memory;
pub mod postgres;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;
use uuid::Uuid;

use guava_core::{CategoryId, ProductId, SubcategoryId};

use crate::models::{
    Category, CategoryPatch, ContactMessage, Faq, NewCategory, NewContactMessage, NewFaq,
    NewOrder, NewProduct, NewProfile, NewSubcategory, Order, Product, ProductPatch, Profile,
    Subcategory, SubcategoryPatch,
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the store is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Unique-constraint violation (e.g. profile email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Exact-match constraint on a reference field.
///
/// Documented policy: a filter value that is not a syntactically valid ID
/// yields no match (an empty result) rather than a query error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdFilter {
    /// No constraint; every entity matches.
    #[default]
    Any,
    /// Only entities referencing exactly this ID match.
    Exact(Uuid),
    /// Syntactically invalid filter value; nothing matches.
    NoMatch,
}

impl IdFilter {
    /// Parse an optional raw query value into a filter.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None => Self::Any,
            Some(s) if s.is_empty() => Self::Any,
            Some(s) => Uuid::parse_str(s).map_or_else(
                |_| {
                    tracing::debug!(value = s, "invalid id in filter; treating as no match");
                    Self::NoMatch
                },
                Self::Exact,
            ),
        }
    }

    /// Whether an entity carrying `id` (or none) satisfies this filter.
    #[must_use]
    pub fn matches(self, id: Option<Uuid>) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(want) => id == Some(want),
            Self::NoMatch => false,
        }
    }
}

/// Exact-match constraints for product listings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductFilter {
    pub category: IdFilter,
    pub subcategory: IdFilter,
}

/// Typed create/read/update/delete/list operations per entity kind.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Verify the backing store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;

    // Categories
    async fn create_category(&self, new: NewCategory) -> Result<Category, RepositoryError>;
    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError>;
    async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError>;
    async fn update_category(
        &self,
        id: CategoryId,
        patch: CategoryPatch,
    ) -> Result<Option<Category>, RepositoryError>;
    async fn delete_category(&self, id: CategoryId)
    -> Result<Option<Category>, RepositoryError>;

    // Subcategories
    async fn create_subcategory(
        &self,
        new: NewSubcategory,
    ) -> Result<Subcategory, RepositoryError>;
    async fn get_subcategory(
        &self,
        id: SubcategoryId,
    ) -> Result<Option<Subcategory>, RepositoryError>;
    async fn list_subcategories(
        &self,
        category: IdFilter,
    ) -> Result<Vec<Subcategory>, RepositoryError>;
    async fn update_subcategory(
        &self,
        id: SubcategoryId,
        patch: SubcategoryPatch,
    ) -> Result<Option<Subcategory>, RepositoryError>;
    async fn delete_subcategory(
        &self,
        id: SubcategoryId,
    ) -> Result<Option<Subcategory>, RepositoryError>;

    // Products
    async fn create_product(&self, new: NewProduct) -> Result<Product, RepositoryError>;
    async fn get_product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;
    async fn list_products(&self, filter: ProductFilter)
    -> Result<Vec<Product>, RepositoryError>;
    async fn update_product(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Option<Product>, RepositoryError>;
    async fn delete_product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;

    // Orders (append-only, listed newest-first)
    async fn create_order(&self, new: NewOrder) -> Result<Order, RepositoryError>;
    async fn list_orders(&self) -> Result<Vec<Order>, RepositoryError>;

    // Profiles (append-only; email unique)
    async fn create_profile(&self, new: NewProfile) -> Result<Profile, RepositoryError>;
    async fn list_profiles(&self) -> Result<Vec<Profile>, RepositoryError>;

    // FAQs (append-only)
    async fn create_faq(&self, new: NewFaq) -> Result<Faq, RepositoryError>;
    async fn list_faqs(&self) -> Result<Vec<Faq>, RepositoryError>;

    // Contact messages (append-only)
    async fn create_contact(
        &self,
        new: NewContactMessage,
    ) -> Result<ContactMessage, RepositoryError>;
    async fn list_contacts(&self) -> Result<Vec<ContactMessage>, RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_filter_parse_absent_is_any() {
        assert_eq!(IdFilter::parse(None), IdFilter::Any);
        assert_eq!(IdFilter::parse(Some("")), IdFilter::Any);
    }

    #[test]
    fn test_id_filter_parse_valid_is_exact() {
        let id = Uuid::new_v4();
        assert_eq!(
            IdFilter::parse(Some(&id.to_string())),
            IdFilter::Exact(id)
        );
    }

    #[test]
    fn test_id_filter_parse_invalid_is_no_match() {
        assert_eq!(IdFilter::parse(Some("not-an-id")), IdFilter::NoMatch);
    }

    #[test]
    fn test_id_filter_matches() {
        let id = Uuid::new_v4();
        assert!(IdFilter::Any.matches(Some(id)));
        assert!(IdFilter::Any.matches(None));
        assert!(IdFilter::Exact(id).matches(Some(id)));
        assert!(!IdFilter::Exact(id).matches(Some(Uuid::new_v4())));
        assert!(!IdFilter::Exact(id).matches(None));
        assert!(!IdFilter::NoMatch.matches(Some(id)));
        assert!(!IdFilter::NoMatch.matches(None));
    }
}
