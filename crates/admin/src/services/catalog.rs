//! Mutation Pipeline - the request lifecycle for every catalog operation.
//!
//! Each mutation runs validate -> persist -> resolve -> publish, in that
//! order. Validation failures never reach the store; store failures never
//! publish. Publication is fire-and-forget: success is defined purely by
//! persistence succeeding, never by delivery. Entities with references
//! (subcategories, products) are re-expanded after persistence so the
//! returned and published payloads carry the resolved shape.

use std::sync::Arc;

use guava_core::{CategoryId, EntityStatus, ProductId, SubcategoryId};

use crate::broadcast::{ChangeBroadcaster, EventKind};
use crate::error::AppError;
use crate::models::{
    Category, CategoryForm, CategoryPatch, ContactDraft, ContactMessage, Faq, FaqDraft,
    NewCategory, NewContactMessage, NewFaq, NewOrder, NewProduct, NewProfile, NewSubcategory,
    Order, Product, ProductForm, ProductPatch, ProductView, Profile,
    ProfileForm, Subcategory, SubcategoryForm, SubcategoryPatch, SubcategoryView,
};
use crate::resolve;
use crate::store::{EntityStore, IdFilter, ProductFilter};

/// Orchestrates the mutation pipeline for all entity kinds.
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn EntityStore>,
    broadcaster: ChangeBroadcaster,
}

impl CatalogService {
    #[must_use]
    pub fn new(store: Arc<dyn EntityStore>, broadcaster: ChangeBroadcaster) -> Self {
        Self { store, broadcaster }
    }

    /// Verify the backing store is reachable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` when the store is unreachable.
    pub async fn ping(&self) -> Result<(), AppError> {
        Ok(self.store.ping().await?)
    }

    // =========================================================================
    // Categories
    // =========================================================================

    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        Ok(self.store.list_categories().await?)
    }

    pub async fn create_category(&self, form: CategoryForm) -> Result<Category, AppError> {
        let new = NewCategory {
            name: require(form.name, "name")?,
            status: parse_status_or_default(form.status.as_deref())?,
            image: form.image,
        };

        let category = self.store.create_category(new).await?;
        self.broadcaster
            .publish(EventKind::CategoryUpdated, &category);
        Ok(category)
    }

    pub async fn update_category(
        &self,
        id: CategoryId,
        form: CategoryForm,
    ) -> Result<Category, AppError> {
        let patch = CategoryPatch {
            name: nonempty(form.name),
            status: parse_status_opt(form.status.as_deref())?,
            image: form.image,
        };

        let category = self
            .store
            .update_category(id, patch)
            .await?
            .ok_or(AppError::NotFound("Category"))?;
        self.broadcaster
            .publish(EventKind::CategoryUpdated, &category);
        Ok(category)
    }

    pub async fn delete_category(&self, id: CategoryId) -> Result<Category, AppError> {
        let category = self
            .store
            .delete_category(id)
            .await?
            .ok_or(AppError::NotFound("Category"))?;
        self.broadcaster
            .publish(EventKind::CategoryDeleted, &category);
        Ok(category)
    }

    // =========================================================================
    // Subcategories
    // =========================================================================

    pub async fn list_subcategories(
        &self,
        category: IdFilter,
    ) -> Result<Vec<SubcategoryView>, AppError> {
        let subcategories = self.store.list_subcategories(category).await?;
        Ok(resolve::subcategory_views(self.store.as_ref(), subcategories).await?)
    }

    pub async fn create_subcategory(
        &self,
        form: SubcategoryForm,
    ) -> Result<SubcategoryView, AppError> {
        let new = NewSubcategory {
            category_id: parse_ref::<CategoryId>(form.category_id.as_deref(), "categoryId")?
                .ok_or_else(|| AppError::Validation("categoryId is required".to_string()))?,
            name: require(form.name, "name")?,
            status: parse_status_or_default(form.status.as_deref())?,
            image: form.image,
        };

        let subcategory = self.store.create_subcategory(new).await?;
        let view = resolve::subcategory_view(self.store.as_ref(), subcategory).await?;
        self.broadcaster.publish(EventKind::SubcategoryUpdated, &view);
        Ok(view)
    }

    pub async fn update_subcategory(
        &self,
        id: SubcategoryId,
        form: SubcategoryForm,
    ) -> Result<SubcategoryView, AppError> {
        let patch = SubcategoryPatch {
            category_id: parse_ref::<CategoryId>(form.category_id.as_deref(), "categoryId")?,
            name: nonempty(form.name),
            status: parse_status_opt(form.status.as_deref())?,
            image: form.image,
        };

        let subcategory = self
            .store
            .update_subcategory(id, patch)
            .await?
            .ok_or(AppError::NotFound("Subcategory"))?;
        let view = resolve::subcategory_view(self.store.as_ref(), subcategory).await?;
        self.broadcaster.publish(EventKind::SubcategoryUpdated, &view);
        Ok(view)
    }

    pub async fn delete_subcategory(&self, id: SubcategoryId) -> Result<Subcategory, AppError> {
        let subcategory = self
            .store
            .delete_subcategory(id)
            .await?
            .ok_or(AppError::NotFound("Subcategory"))?;
        self.broadcaster
            .publish(EventKind::SubcategoryDeleted, &subcategory);
        Ok(subcategory)
    }

    // =========================================================================
    // Products
    // =========================================================================

    pub async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<ProductView>, AppError> {
        let products = self.store.list_products(filter).await?;
        Ok(resolve::product_views(self.store.as_ref(), products).await?)
    }

    pub async fn get_product(&self, id: ProductId) -> Result<ProductView, AppError> {
        let product = self
            .store
            .get_product(id)
            .await?
            .ok_or(AppError::NotFound("Product"))?;
        Ok(resolve::product_view(self.store.as_ref(), product).await?)
    }

    pub async fn create_product(&self, form: ProductForm) -> Result<ProductView, AppError> {
        // discountPrice <= currentPrice is deliberately not enforced
        let new = NewProduct {
            name: require(form.name, "name")?,
            current_price: parse_price(form.current_price.as_deref(), "currentPrice")?
                .ok_or_else(|| AppError::Validation("currentPrice is required".to_string()))?,
            discount_price: parse_price(form.discount_price.as_deref(), "discountPrice")?
                .unwrap_or(0.0),
            category_id: parse_ref::<CategoryId>(form.category_id.as_deref(), "categoryId")?,
            subcategory_id: parse_ref::<SubcategoryId>(
                form.subcategory_id.as_deref(),
                "subcategoryId",
            )?,
            description: nonempty(form.description),
            promo_code: nonempty(form.promo_code),
            image: form.image,
            status: parse_status_or_default(form.status.as_deref())?,
        };

        let product = self.store.create_product(new).await?;
        let view = resolve::product_view(self.store.as_ref(), product).await?;
        self.broadcaster.publish(EventKind::ProductUpdated, &view);
        Ok(view)
    }

    pub async fn update_product(
        &self,
        id: ProductId,
        form: ProductForm,
    ) -> Result<ProductView, AppError> {
        let patch = ProductPatch {
            name: nonempty(form.name),
            current_price: parse_price(form.current_price.as_deref(), "currentPrice")?,
            discount_price: parse_price(form.discount_price.as_deref(), "discountPrice")?,
            category_id: parse_ref::<CategoryId>(form.category_id.as_deref(), "categoryId")?,
            subcategory_id: parse_ref::<SubcategoryId>(
                form.subcategory_id.as_deref(),
                "subcategoryId",
            )?,
            description: nonempty(form.description),
            promo_code: nonempty(form.promo_code),
            image: form.image,
            status: parse_status_opt(form.status.as_deref())?,
        };

        let product = self
            .store
            .update_product(id, patch)
            .await?
            .ok_or(AppError::NotFound("Product"))?;
        let view = resolve::product_view(self.store.as_ref(), product).await?;
        self.broadcaster.publish(EventKind::ProductUpdated, &view);
        Ok(view)
    }

    pub async fn delete_product(&self, id: ProductId) -> Result<Product, AppError> {
        let product = self
            .store
            .delete_product(id)
            .await?
            .ok_or(AppError::NotFound("Product"))?;
        self.broadcaster.publish(EventKind::ProductDeleted, &product);
        Ok(product)
    }

    // =========================================================================
    // Orders
    // =========================================================================

    pub async fn list_orders(&self) -> Result<Vec<Order>, AppError> {
        Ok(self.store.list_orders().await?)
    }

    pub async fn create_order(&self, new: NewOrder) -> Result<Order, AppError> {
        if new.total_qty.is_some_and(|qty| qty < 0) {
            return Err(AppError::Validation(
                "totalQty must be non-negative".to_string(),
            ));
        }
        if new.total_cost.is_some_and(|cost| cost < 0.0) {
            return Err(AppError::Validation(
                "totalCost must be non-negative".to_string(),
            ));
        }

        let order = self.store.create_order(new).await?;
        self.broadcaster.publish(EventKind::NewOrder, &order);
        Ok(order)
    }

    // =========================================================================
    // Profiles
    // =========================================================================

    pub async fn list_profiles(&self) -> Result<Vec<Profile>, AppError> {
        Ok(self.store.list_profiles().await?)
    }

    pub async fn create_profile(&self, form: ProfileForm) -> Result<Profile, AppError> {
        let new = NewProfile {
            full_name: require(form.full_name, "fullName")?,
            email: require(form.email, "email")?,
            phone: nonempty(form.phone),
            profile_picture: form.profile_picture,
            password: nonempty(form.password),
        };

        let profile = self.store.create_profile(new).await?;
        self.broadcaster.publish(EventKind::ProfileUpdated, &profile);
        Ok(profile)
    }

    // =========================================================================
    // FAQs
    // =========================================================================

    pub async fn list_faqs(&self) -> Result<Vec<Faq>, AppError> {
        Ok(self.store.list_faqs().await?)
    }

    pub async fn create_faq(&self, draft: FaqDraft) -> Result<Faq, AppError> {
        let new = NewFaq {
            title: require(draft.title, "title")?,
            description: require(draft.description, "description")?,
        };

        let faq = self.store.create_faq(new).await?;
        self.broadcaster.publish(EventKind::FaqUpdated, &faq);
        Ok(faq)
    }

    // =========================================================================
    // Contact messages
    // =========================================================================

    pub async fn list_contacts(&self) -> Result<Vec<ContactMessage>, AppError> {
        Ok(self.store.list_contacts().await?)
    }

    pub async fn create_contact(&self, draft: ContactDraft) -> Result<ContactMessage, AppError> {
        let new = NewContactMessage {
            name: require(draft.name, "name")?,
            email: require(draft.email, "email")?,
            phone: nonempty(draft.phone),
            website: nonempty(draft.website),
            message: require(draft.message, "message")?,
        };

        let contact = self.store.create_contact(new).await?;
        self.broadcaster.publish(EventKind::ContactUpdated, &contact);
        Ok(contact)
    }
}

// =============================================================================
// Validation helpers
// =============================================================================

/// Required text field: present and non-blank.
fn require(value: Option<String>, field: &str) -> Result<String, AppError> {
    nonempty(value).ok_or_else(|| AppError::Validation(format!("{field} is required")))
}

/// Normalize an optional text field; blank counts as absent.
fn nonempty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Status field with the Active default.
fn parse_status_or_default(raw: Option<&str>) -> Result<EntityStatus, AppError> {
    Ok(parse_status_opt(raw)?.unwrap_or_default())
}

/// Optional status field; a present but unknown value is a validation error.
fn parse_status_opt(raw: Option<&str>) -> Result<Option<EntityStatus>, AppError> {
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .parse()
            .map(Some)
            .map_err(|_| AppError::Validation(format!("invalid status: {s}"))),
    }
}

/// Optional non-negative price field sent as multipart text.
fn parse_price(raw: Option<&str>, field: &str) -> Result<Option<f64>, AppError> {
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => {
            let value: f64 = s
                .trim()
                .parse()
                .map_err(|_| AppError::Validation(format!("{field} must be a number")))?;
            if value < 0.0 {
                return Err(AppError::Validation(format!(
                    "{field} must be non-negative"
                )));
            }
            Ok(Some(value))
        }
    }
}

/// Optional reference field; a present but malformed ID is a validation
/// error (unlike list filters, where it is documented as no-match).
fn parse_ref<T>(raw: Option<&str>, field: &str) -> Result<Option<T>, AppError>
where
    T: From<uuid::Uuid>,
{
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => uuid::Uuid::parse_str(s)
            .map(|id| Some(T::from(id)))
            .map_err(|_| AppError::Validation(format!("{field} is not a valid id"))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tokio::sync::broadcast::error::TryRecvError;

    use super::*;
    use crate::store::MemoryStore;

    fn service() -> CatalogService {
        CatalogService::new(Arc::new(MemoryStore::new()), ChangeBroadcaster::new())
    }

    fn category_form(name: &str) -> CategoryForm {
        CategoryForm {
            name: Some(name.to_string()),
            ..CategoryForm::default()
        }
    }

    #[tokio::test]
    async fn test_create_category_defaults_status_and_image() {
        let service = service();
        let category = service.create_category(category_form("Shoes")).await.unwrap();
        assert_eq!(category.name, "Shoes");
        assert_eq!(category.status, EntityStatus::Active);
        assert!(category.image.is_none());
    }

    #[tokio::test]
    async fn test_create_category_without_name_fails_without_persisting() {
        let service = service();
        let err = service
            .create_category(CategoryForm::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(service.list_categories().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mutation_succeeds_with_zero_observers() {
        // Broadcast-persistence decoupling: no observers, still success
        let service = service();
        let category = service.create_category(category_form("Shoes")).await.unwrap();
        assert_eq!(
            service.list_categories().await.unwrap()[0].id,
            category.id
        );
    }

    #[tokio::test]
    async fn test_observer_sees_event_before_create_returns() {
        let service = service();
        let mut rx = service.broadcaster.subscribe();

        let category = service.create_category(category_form("Shoes")).await.unwrap();

        // The event is already buffered by the time create returns
        let event = rx.try_recv().unwrap();
        assert_eq!(event.kind, EventKind::CategoryUpdated);
        assert_eq!(event.data, serde_json::to_value(&category).unwrap());
    }

    #[tokio::test]
    async fn test_update_unknown_product_is_not_found_and_emits_nothing() {
        let service = service();
        let mut rx = service.broadcaster.subscribe();

        let err = service
            .update_product(ProductId::generate(), ProductForm::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound("Product")));
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn test_partial_product_update_preserves_untouched_fields() {
        let service = service();
        let created = service
            .create_product(ProductForm {
                name: Some("Runner".to_string()),
                current_price: Some("99.5".to_string()),
                description: Some("lightweight".to_string()),
                ..ProductForm::default()
            })
            .await
            .unwrap();

        let updated = service
            .update_product(
                created.id,
                ProductForm {
                    status: Some("Inactive".to_string()),
                    ..ProductForm::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, EntityStatus::Inactive);
        assert_eq!(updated.name, "Runner");
        assert!((updated.current_price - 99.5).abs() < f64::EPSILON);
        assert_eq!(updated.description.as_deref(), Some("lightweight"));
    }

    #[tokio::test]
    async fn test_negative_price_is_rejected() {
        let service = service();
        let err = service
            .create_product(ProductForm {
                name: Some("Runner".to_string()),
                current_price: Some("-5".to_string()),
                ..ProductForm::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_discount_above_current_price_is_permitted() {
        let service = service();
        let view = service
            .create_product(ProductForm {
                name: Some("Runner".to_string()),
                current_price: Some("10".to_string()),
                discount_price: Some("25".to_string()),
                ..ProductForm::default()
            })
            .await
            .unwrap();
        assert!((view.discount_price - 25.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_subcategory_create_requires_category_id() {
        let service = service();
        let err = service
            .create_subcategory(SubcategoryForm {
                name: Some("Sneakers".to_string()),
                ..SubcategoryForm::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_subcategory_create_publishes_resolved_view() {
        let service = service();
        let category = service.create_category(category_form("Shoes")).await.unwrap();
        let mut rx = service.broadcaster.subscribe();

        let view = service
            .create_subcategory(SubcategoryForm {
                name: Some("Sneakers".to_string()),
                category_id: Some(category.id.to_string()),
                ..SubcategoryForm::default()
            })
            .await
            .unwrap();
        assert_eq!(view.status, EntityStatus::Active);
        assert_eq!(view.category.as_ref().unwrap().name, "Shoes");

        let event = rx.try_recv().unwrap();
        assert_eq!(event.kind, EventKind::SubcategoryUpdated);
        assert_eq!(event.data["categoryId"]["name"], "Shoes");
    }

    #[tokio::test]
    async fn test_order_with_negative_total_is_rejected() {
        let service = service();
        let err = service
            .create_order(NewOrder {
                total_qty: Some(-1),
                ..NewOrder::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
