//! In-memory entity store.
//!
//! Insertion-ordered, lock-guarded backend used by the integration tests
//! and for local development without a database. Semantics mirror
//! [`super::PgStore`]: partial patches, hard deletes, unique profile
//! emails surfacing `Conflict`.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use guava_core::{CategoryId, ProductId, SubcategoryId};

use super::{EntityStore, IdFilter, ProductFilter, RepositoryError};
use crate::models::{
    Category, CategoryPatch, ContactMessage, Faq, NewCategory, NewContactMessage, NewFaq,
    NewOrder, NewProduct, NewProfile, NewSubcategory, Order, Product, ProductPatch, Profile,
    Subcategory, SubcategoryPatch,
};

#[derive(Debug, Default)]
struct Inner {
    categories: Vec<Category>,
    subcategories: Vec<Subcategory>,
    products: Vec<Product>,
    orders: Vec<Order>,
    profiles: Vec<Profile>,
    faqs: Vec<Faq>,
    contacts: Vec<ContactMessage>,
}

/// In-memory entity store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }

    async fn create_category(&self, new: NewCategory) -> Result<Category, RepositoryError> {
        let category = Category {
            id: CategoryId::generate(),
            name: new.name,
            status: new.status,
            image: new.image,
        };
        self.inner.write().await.categories.push(category.clone());
        Ok(category)
    }

    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError> {
        let inner = self.inner.read().await;
        Ok(inner.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        Ok(self.inner.read().await.categories.clone())
    }

    async fn update_category(
        &self,
        id: CategoryId,
        patch: CategoryPatch,
    ) -> Result<Option<Category>, RepositoryError> {
        let mut inner = self.inner.write().await;
        let Some(category) = inner.categories.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            category.name = name;
        }
        if let Some(status) = patch.status {
            category.status = status;
        }
        if let Some(image) = patch.image {
            category.image = Some(image);
        }
        Ok(Some(category.clone()))
    }

    async fn delete_category(
        &self,
        id: CategoryId,
    ) -> Result<Option<Category>, RepositoryError> {
        let mut inner = self.inner.write().await;
        let Some(pos) = inner.categories.iter().position(|c| c.id == id) else {
            return Ok(None);
        };
        Ok(Some(inner.categories.remove(pos)))
    }

    async fn create_subcategory(
        &self,
        new: NewSubcategory,
    ) -> Result<Subcategory, RepositoryError> {
        let subcategory = Subcategory {
            id: SubcategoryId::generate(),
            category_id: new.category_id,
            name: new.name,
            status: new.status,
            image: new.image,
        };
        self.inner
            .write()
            .await
            .subcategories
            .push(subcategory.clone());
        Ok(subcategory)
    }

    async fn get_subcategory(
        &self,
        id: SubcategoryId,
    ) -> Result<Option<Subcategory>, RepositoryError> {
        let inner = self.inner.read().await;
        Ok(inner.subcategories.iter().find(|s| s.id == id).cloned())
    }

    async fn list_subcategories(
        &self,
        category: IdFilter,
    ) -> Result<Vec<Subcategory>, RepositoryError> {
        let inner = self.inner.read().await;
        Ok(inner
            .subcategories
            .iter()
            .filter(|s| category.matches(Some(s.category_id.as_uuid())))
            .cloned()
            .collect())
    }

    async fn update_subcategory(
        &self,
        id: SubcategoryId,
        patch: SubcategoryPatch,
    ) -> Result<Option<Subcategory>, RepositoryError> {
        let mut inner = self.inner.write().await;
        let Some(subcategory) = inner.subcategories.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        if let Some(category_id) = patch.category_id {
            subcategory.category_id = category_id;
        }
        if let Some(name) = patch.name {
            subcategory.name = name;
        }
        if let Some(status) = patch.status {
            subcategory.status = status;
        }
        if let Some(image) = patch.image {
            subcategory.image = Some(image);
        }
        Ok(Some(subcategory.clone()))
    }

    async fn delete_subcategory(
        &self,
        id: SubcategoryId,
    ) -> Result<Option<Subcategory>, RepositoryError> {
        let mut inner = self.inner.write().await;
        let Some(pos) = inner.subcategories.iter().position(|s| s.id == id) else {
            return Ok(None);
        };
        Ok(Some(inner.subcategories.remove(pos)))
    }

    async fn create_product(&self, new: NewProduct) -> Result<Product, RepositoryError> {
        let product = Product {
            id: ProductId::generate(),
            name: new.name,
            current_price: new.current_price,
            discount_price: new.discount_price,
            category_id: new.category_id,
            subcategory_id: new.subcategory_id,
            description: new.description,
            promo_code: new.promo_code,
            image: new.image,
            status: new.status,
        };
        self.inner.write().await.products.push(product.clone());
        Ok(product)
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let inner = self.inner.read().await;
        Ok(inner.products.iter().find(|p| p.id == id).cloned())
    }

    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<Product>, RepositoryError> {
        let inner = self.inner.read().await;
        Ok(inner
            .products
            .iter()
            .filter(|p| {
                filter
                    .category
                    .matches(p.category_id.map(|id| id.as_uuid()))
                    && filter
                        .subcategory
                        .matches(p.subcategory_id.map(|id| id.as_uuid()))
            })
            .cloned()
            .collect())
    }

    async fn update_product(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Option<Product>, RepositoryError> {
        let mut inner = self.inner.write().await;
        let Some(product) = inner.products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            product.name = name;
        }
        if let Some(current_price) = patch.current_price {
            product.current_price = current_price;
        }
        if let Some(discount_price) = patch.discount_price {
            product.discount_price = discount_price;
        }
        if let Some(category_id) = patch.category_id {
            product.category_id = Some(category_id);
        }
        if let Some(subcategory_id) = patch.subcategory_id {
            product.subcategory_id = Some(subcategory_id);
        }
        if let Some(description) = patch.description {
            product.description = Some(description);
        }
        if let Some(promo_code) = patch.promo_code {
            product.promo_code = Some(promo_code);
        }
        if let Some(image) = patch.image {
            product.image = Some(image);
        }
        if let Some(status) = patch.status {
            product.status = status;
        }
        Ok(Some(product.clone()))
    }

    async fn delete_product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let mut inner = self.inner.write().await;
        let Some(pos) = inner.products.iter().position(|p| p.id == id) else {
            return Ok(None);
        };
        Ok(Some(inner.products.remove(pos)))
    }

    async fn create_order(&self, new: NewOrder) -> Result<Order, RepositoryError> {
        let order = Order {
            id: guava_core::OrderId::generate(),
            name: new.name,
            email: new.email,
            phone: new.phone,
            address: new.address,
            country: new.country,
            state: new.state,
            city: new.city,
            postal_code: new.postal_code,
            order_number: new.order_number,
            total_qty: new.total_qty,
            total_cost: new.total_cost,
            created_at: Utc::now(),
        };
        self.inner.write().await.orders.push(order.clone());
        Ok(order)
    }

    async fn list_orders(&self) -> Result<Vec<Order>, RepositoryError> {
        // Newest first; insertion order breaks created_at ties
        let inner = self.inner.read().await;
        Ok(inner.orders.iter().rev().cloned().collect())
    }

    async fn create_profile(&self, new: NewProfile) -> Result<Profile, RepositoryError> {
        let mut inner = self.inner.write().await;
        if inner.profiles.iter().any(|p| p.email == new.email) {
            return Err(RepositoryError::Conflict(
                "a profile with this email already exists".to_string(),
            ));
        }
        let profile = Profile {
            id: guava_core::ProfileId::generate(),
            full_name: new.full_name,
            email: new.email,
            phone: new.phone,
            profile_picture: new.profile_picture,
            password: new.password,
            created_at: Utc::now(),
        };
        inner.profiles.push(profile.clone());
        Ok(profile)
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, RepositoryError> {
        Ok(self.inner.read().await.profiles.clone())
    }

    async fn create_faq(&self, new: NewFaq) -> Result<Faq, RepositoryError> {
        let faq = Faq {
            id: guava_core::FaqId::generate(),
            title: new.title,
            description: new.description,
            created_at: Utc::now(),
        };
        self.inner.write().await.faqs.push(faq.clone());
        Ok(faq)
    }

    async fn list_faqs(&self) -> Result<Vec<Faq>, RepositoryError> {
        Ok(self.inner.read().await.faqs.clone())
    }

    async fn create_contact(
        &self,
        new: NewContactMessage,
    ) -> Result<ContactMessage, RepositoryError> {
        let contact = ContactMessage {
            id: guava_core::ContactMessageId::generate(),
            name: new.name,
            email: new.email,
            phone: new.phone,
            website: new.website,
            message: new.message,
            created_at: Utc::now(),
        };
        self.inner.write().await.contacts.push(contact.clone());
        Ok(contact)
    }

    async fn list_contacts(&self) -> Result<Vec<ContactMessage>, RepositoryError> {
        Ok(self.inner.read().await.contacts.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use guava_core::EntityStatus;

    use super::*;

    fn new_category(name: &str) -> NewCategory {
        NewCategory {
            name: name.to_string(),
            status: EntityStatus::Active,
            image: None,
        }
    }

    #[tokio::test]
    async fn test_category_crud_roundtrip() {
        let store = MemoryStore::new();
        let created = store.create_category(new_category("Shoes")).await.unwrap();

        let fetched = store.get_category(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Shoes");

        let updated = store
            .update_category(
                created.id,
                CategoryPatch {
                    status: Some(EntityStatus::Inactive),
                    ..CategoryPatch::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        // Untouched fields survive the patch
        assert_eq!(updated.name, "Shoes");
        assert_eq!(updated.status, EntityStatus::Inactive);

        let deleted = store.delete_category(created.id).await.unwrap().unwrap();
        assert_eq!(deleted.id, created.id);
        assert!(store.get_category(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_missing_category_is_none() {
        let store = MemoryStore::new();
        let result = store
            .update_category(CategoryId::generate(), CategoryPatch::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let store = MemoryStore::new();
        for name in ["a", "b", "c"] {
            store.create_category(new_category(name)).await.unwrap();
        }
        let first = store.list_categories().await.unwrap();
        let second = store.list_categories().await.unwrap();
        let names: Vec<_> = first.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
        // Idempotent read: same elements, same order
        assert_eq!(
            first.iter().map(|c| c.id).collect::<Vec<_>>(),
            second.iter().map(|c| c.id).collect::<Vec<_>>()
        );
    }

    #[tokio::test]
    async fn test_subcategory_filter_by_category() {
        let store = MemoryStore::new();
        let shoes = store.create_category(new_category("Shoes")).await.unwrap();
        let bags = store.create_category(new_category("Bags")).await.unwrap();
        for (name, category_id) in [("Sneakers", shoes.id), ("Totes", bags.id)] {
            store
                .create_subcategory(NewSubcategory {
                    category_id,
                    name: name.to_string(),
                    status: EntityStatus::Active,
                    image: None,
                })
                .await
                .unwrap();
        }

        let filtered = store
            .list_subcategories(IdFilter::Exact(shoes.id.as_uuid()))
            .await
            .unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Sneakers");

        let none = store
            .list_subcategories(IdFilter::NoMatch)
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_profile_email_uniqueness() {
        let store = MemoryStore::new();
        let new = |email: &str| NewProfile {
            full_name: "Test User".to_string(),
            email: email.to_string(),
            phone: None,
            profile_picture: None,
            password: None,
        };

        store.create_profile(new("a@example.com")).await.unwrap();
        let err = store.create_profile(new("a@example.com")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
        // No second record was created
        assert_eq!(store.list_profiles().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_orders_listed_newest_first() {
        let store = MemoryStore::new();
        for number in ["001", "002", "003"] {
            store
                .create_order(NewOrder {
                    order_number: Some(number.to_string()),
                    ..NewOrder::default()
                })
                .await
                .unwrap();
        }
        let orders = store.list_orders().await.unwrap();
        let numbers: Vec<_> = orders
            .iter()
            .map(|o| o.order_number.as_deref().unwrap())
            .collect();
        assert_eq!(numbers, ["003", "002", "001"]);
    }
}
