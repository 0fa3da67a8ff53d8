//! Reference Resolver - read-side expansion of reference fields.
//!
//! Resolution runs only on the response path, never before persistence;
//! stored values always remain plain IDs. A reference that no longer
//! points at an existing entity expands to `None` rather than failing.

use crate::models::{NameRef, Product, ProductView, Subcategory, SubcategoryView};
use crate::store::{EntityStore, RepositoryError};

/// Expand a subcategory's category reference into the full category.
pub async fn subcategory_view(
    store: &dyn EntityStore,
    subcategory: Subcategory,
) -> Result<SubcategoryView, RepositoryError> {
    let category = store.get_category(subcategory.category_id).await?;
    Ok(SubcategoryView::new(subcategory, category))
}

/// Expand a list of subcategories, preserving order.
pub async fn subcategory_views(
    store: &dyn EntityStore,
    subcategories: Vec<Subcategory>,
) -> Result<Vec<SubcategoryView>, RepositoryError> {
    let mut views = Vec::with_capacity(subcategories.len());
    for subcategory in subcategories {
        views.push(subcategory_view(store, subcategory).await?);
    }
    Ok(views)
}

/// Expand a product's references into name-only projections.
pub async fn product_view(
    store: &dyn EntityStore,
    product: Product,
) -> Result<ProductView, RepositoryError> {
    let category = match product.category_id {
        Some(id) => store.get_category(id).await?.map(|c| NameRef {
            id: c.id.as_uuid(),
            name: c.name,
        }),
        None => None,
    };
    let subcategory = match product.subcategory_id {
        Some(id) => store.get_subcategory(id).await?.map(|s| NameRef {
            id: s.id.as_uuid(),
            name: s.name,
        }),
        None => None,
    };
    Ok(ProductView::new(product, category, subcategory))
}

/// Expand a list of products, preserving order.
pub async fn product_views(
    store: &dyn EntityStore,
    products: Vec<Product>,
) -> Result<Vec<ProductView>, RepositoryError> {
    let mut views = Vec::with_capacity(products.len());
    for product in products {
        views.push(product_view(store, product).await?);
    }
    Ok(views)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use guava_core::EntityStatus;

    use super::*;
    use crate::models::{NewCategory, NewProduct, NewSubcategory};
    use crate::store::MemoryStore;

    async fn seed_category(store: &MemoryStore, name: &str) -> crate::models::Category {
        store
            .create_category(NewCategory {
                name: name.to_string(),
                status: EntityStatus::Active,
                image: None,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_subcategory_expands_full_category() {
        let store = MemoryStore::new();
        let category = seed_category(&store, "Shoes").await;
        let subcategory = store
            .create_subcategory(NewSubcategory {
                category_id: category.id,
                name: "Sneakers".to_string(),
                status: EntityStatus::Active,
                image: None,
            })
            .await
            .unwrap();

        let view = subcategory_view(&store, subcategory).await.unwrap();
        let expanded = view.category.unwrap();
        assert_eq!(expanded.id, category.id);
        assert_eq!(expanded.name, "Shoes");
    }

    #[tokio::test]
    async fn test_dangling_reference_expands_to_none() {
        let store = MemoryStore::new();
        let category = seed_category(&store, "Shoes").await;
        let product = store
            .create_product(NewProduct {
                name: "Runner".to_string(),
                current_price: 10.0,
                discount_price: 0.0,
                category_id: Some(category.id),
                subcategory_id: None,
                description: None,
                promo_code: None,
                image: None,
                status: EntityStatus::Active,
            })
            .await
            .unwrap();

        // Deleting the category leaves the product intact
        store.delete_category(category.id).await.unwrap().unwrap();
        let survivor = store.get_product(product.id).await.unwrap().unwrap();
        assert_eq!(survivor.category_id, Some(category.id));

        let view = product_view(&store, survivor).await.unwrap();
        assert!(view.category.is_none());
    }

    #[tokio::test]
    async fn test_product_projection_is_name_only() {
        let store = MemoryStore::new();
        let category = seed_category(&store, "Shoes").await;
        let product = store
            .create_product(NewProduct {
                name: "Runner".to_string(),
                current_price: 10.0,
                discount_price: 0.0,
                category_id: Some(category.id),
                subcategory_id: None,
                description: None,
                promo_code: None,
                image: None,
                status: EntityStatus::Active,
            })
            .await
            .unwrap();

        let view = product_view(&store, product).await.unwrap();
        let name_ref = view.category.unwrap();
        assert_eq!(name_ref.name, "Shoes");
        assert_eq!(name_ref.id, category.id.as_uuid());
    }
}
