//! `PostgreSQL`-backed entity store.
//!
//! Queries are runtime-checked (`sqlx::query_as`) so the crate builds
//! without a live database. Partial updates use `COALESCE` so only the
//! patch fields that are present replace stored values. Migrations live in
//! `crates/admin/migrations/` and are applied at startup.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use guava_core::{CategoryId, EntityStatus, ProductId, SubcategoryId};

use super::{EntityStore, IdFilter, ProductFilter, RepositoryError};
use crate::models::{
    Category, CategoryPatch, ContactMessage, Faq, NewCategory, NewContactMessage, NewFaq,
    NewOrder, NewProduct, NewProfile, NewSubcategory, Order, Product, ProductPatch, Profile,
    Subcategory, SubcategoryPatch,
};

/// `PostgreSQL` entity store.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply embedded migrations.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::migrate::MigrateError` if a migration fails.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!().run(&self.pool).await
    }
}

// =============================================================================
// Internal Row Types
// =============================================================================

fn parse_status(raw: &str) -> Result<EntityStatus, RepositoryError> {
    raw.parse()
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid status in database: {e}")))
}

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: Uuid,
    name: String,
    status: String,
    image: Option<String>,
}

impl TryFrom<CategoryRow> for Category {
    type Error = RepositoryError;

    fn try_from(row: CategoryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CategoryId::from(row.id),
            name: row.name,
            status: parse_status(&row.status)?,
            image: row.image,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SubcategoryRow {
    id: Uuid,
    category_id: Uuid,
    name: String,
    status: String,
    image: Option<String>,
}

impl TryFrom<SubcategoryRow> for Subcategory {
    type Error = RepositoryError;

    fn try_from(row: SubcategoryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: SubcategoryId::from(row.id),
            category_id: CategoryId::from(row.category_id),
            name: row.name,
            status: parse_status(&row.status)?,
            image: row.image,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    current_price: f64,
    discount_price: f64,
    category_id: Option<Uuid>,
    subcategory_id: Option<Uuid>,
    description: Option<String>,
    promo_code: Option<String>,
    image: Option<String>,
    status: String,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProductId::from(row.id),
            name: row.name,
            current_price: row.current_price,
            discount_price: row.discount_price,
            category_id: row.category_id.map(CategoryId::from),
            subcategory_id: row.subcategory_id.map(SubcategoryId::from),
            description: row.description,
            promo_code: row.promo_code,
            image: row.image,
            status: parse_status(&row.status)?,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    country: Option<String>,
    state: Option<String>,
    city: Option<String>,
    postal_code: Option<String>,
    order_number: Option<String>,
    total_qty: Option<i64>,
    total_cost: Option<f64>,
    created_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: row.id.into(),
            name: row.name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            country: row.country,
            state: row.state,
            city: row.city,
            postal_code: row.postal_code,
            order_number: row.order_number,
            total_qty: row.total_qty,
            total_cost: row.total_cost,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    full_name: String,
    email: String,
    phone: Option<String>,
    profile_picture: Option<String>,
    password: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: row.id.into(),
            full_name: row.full_name,
            email: row.email,
            phone: row.phone,
            profile_picture: row.profile_picture,
            password: row.password,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct FaqRow {
    id: Uuid,
    title: String,
    description: String,
    created_at: DateTime<Utc>,
}

impl From<FaqRow> for Faq {
    fn from(row: FaqRow) -> Self {
        Self {
            id: row.id.into(),
            title: row.title,
            description: row.description,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ContactRow {
    id: Uuid,
    name: String,
    email: String,
    phone: Option<String>,
    website: Option<String>,
    message: String,
    created_at: DateTime<Utc>,
}

impl From<ContactRow> for ContactMessage {
    fn from(row: ContactRow) -> Self {
        Self {
            id: row.id.into(),
            name: row.name,
            email: row.email,
            phone: row.phone,
            website: row.website,
            message: row.message,
            created_at: row.created_at,
        }
    }
}

/// Map a unique-constraint violation to `Conflict`, pass the rest through.
fn map_insert_error(err: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return RepositoryError::Conflict(format!("{what} already exists"));
        }
    }
    RepositoryError::Database(err)
}

const CATEGORY_COLS: &str = "id, name, status, image";
const SUBCATEGORY_COLS: &str = "id, category_id, name, status, image";
const PRODUCT_COLS: &str = "id, name, current_price, discount_price, category_id, \
                            subcategory_id, description, promo_code, image, status";
const ORDER_COLS: &str = "id, name, email, phone, address, country, state, city, \
                          postal_code, order_number, total_qty, total_cost, created_at";
const PROFILE_COLS: &str =
    "id, full_name, email, phone, profile_picture, password, created_at";

// =============================================================================
// EntityStore implementation
// =============================================================================

#[async_trait]
impl EntityStore for PgStore {
    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn create_category(&self, new: NewCategory) -> Result<Category, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "INSERT INTO category (id, name, status, image) VALUES ($1, $2, $3, $4) \
             RETURNING id, name, status, image",
        )
        .bind(Uuid::new_v4())
        .bind(new.name)
        .bind(new.status.to_string())
        .bind(new.image)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            "SELECT {CATEGORY_COLS} FROM category WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows = sqlx::query_as::<_, CategoryRow>(&format!(
            "SELECT {CATEGORY_COLS} FROM category ORDER BY created_at, id"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn update_category(
        &self,
        id: CategoryId,
        patch: CategoryPatch,
    ) -> Result<Option<Category>, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "UPDATE category SET \
                 name = COALESCE($2, name), \
                 status = COALESCE($3, status), \
                 image = COALESCE($4, image) \
             WHERE id = $1 \
             RETURNING id, name, status, image",
        )
        .bind(id.as_uuid())
        .bind(patch.name)
        .bind(patch.status.map(|s| s.to_string()))
        .bind(patch.image)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn delete_category(
        &self,
        id: CategoryId,
    ) -> Result<Option<Category>, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "DELETE FROM category WHERE id = $1 RETURNING id, name, status, image",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn create_subcategory(
        &self,
        new: NewSubcategory,
    ) -> Result<Subcategory, RepositoryError> {
        let row = sqlx::query_as::<_, SubcategoryRow>(
            "INSERT INTO subcategory (id, category_id, name, status, image) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, category_id, name, status, image",
        )
        .bind(Uuid::new_v4())
        .bind(new.category_id.as_uuid())
        .bind(new.name)
        .bind(new.status.to_string())
        .bind(new.image)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn get_subcategory(
        &self,
        id: SubcategoryId,
    ) -> Result<Option<Subcategory>, RepositoryError> {
        let row = sqlx::query_as::<_, SubcategoryRow>(&format!(
            "SELECT {SUBCATEGORY_COLS} FROM subcategory WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn list_subcategories(
        &self,
        category: IdFilter,
    ) -> Result<Vec<Subcategory>, RepositoryError> {
        let rows = match category {
            IdFilter::NoMatch => return Ok(Vec::new()),
            IdFilter::Any => {
                sqlx::query_as::<_, SubcategoryRow>(&format!(
                    "SELECT {SUBCATEGORY_COLS} FROM subcategory ORDER BY created_at, id"
                ))
                .fetch_all(&self.pool)
                .await?
            }
            IdFilter::Exact(category_id) => {
                sqlx::query_as::<_, SubcategoryRow>(&format!(
                    "SELECT {SUBCATEGORY_COLS} FROM subcategory \
                     WHERE category_id = $1 ORDER BY created_at, id"
                ))
                .bind(category_id)
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn update_subcategory(
        &self,
        id: SubcategoryId,
        patch: SubcategoryPatch,
    ) -> Result<Option<Subcategory>, RepositoryError> {
        let row = sqlx::query_as::<_, SubcategoryRow>(
            "UPDATE subcategory SET \
                 category_id = COALESCE($2, category_id), \
                 name = COALESCE($3, name), \
                 status = COALESCE($4, status), \
                 image = COALESCE($5, image) \
             WHERE id = $1 \
             RETURNING id, category_id, name, status, image",
        )
        .bind(id.as_uuid())
        .bind(patch.category_id.map(|id| id.as_uuid()))
        .bind(patch.name)
        .bind(patch.status.map(|s| s.to_string()))
        .bind(patch.image)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn delete_subcategory(
        &self,
        id: SubcategoryId,
    ) -> Result<Option<Subcategory>, RepositoryError> {
        let row = sqlx::query_as::<_, SubcategoryRow>(
            "DELETE FROM subcategory WHERE id = $1 \
             RETURNING id, category_id, name, status, image",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn create_product(&self, new: NewProduct) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "INSERT INTO product (id, name, current_price, discount_price, category_id, \
                                  subcategory_id, description, promo_code, image, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {PRODUCT_COLS}"
        ))
        .bind(Uuid::new_v4())
        .bind(new.name)
        .bind(new.current_price)
        .bind(new.discount_price)
        .bind(new.category_id.map(|id| id.as_uuid()))
        .bind(new.subcategory_id.map(|id| id.as_uuid()))
        .bind(new.description)
        .bind(new.promo_code)
        .bind(new.image)
        .bind(new.status.to_string())
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLS} FROM product WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<Product>, RepositoryError> {
        if filter.category == IdFilter::NoMatch || filter.subcategory == IdFilter::NoMatch {
            return Ok(Vec::new());
        }

        let rows = match (filter.category, filter.subcategory) {
            (IdFilter::Exact(category), IdFilter::Exact(subcategory)) => {
                sqlx::query_as::<_, ProductRow>(&format!(
                    "SELECT {PRODUCT_COLS} FROM product \
                     WHERE category_id = $1 AND subcategory_id = $2 \
                     ORDER BY created_at, id"
                ))
                .bind(category)
                .bind(subcategory)
                .fetch_all(&self.pool)
                .await?
            }
            (IdFilter::Exact(category), _) => {
                sqlx::query_as::<_, ProductRow>(&format!(
                    "SELECT {PRODUCT_COLS} FROM product \
                     WHERE category_id = $1 ORDER BY created_at, id"
                ))
                .bind(category)
                .fetch_all(&self.pool)
                .await?
            }
            (_, IdFilter::Exact(subcategory)) => {
                sqlx::query_as::<_, ProductRow>(&format!(
                    "SELECT {PRODUCT_COLS} FROM product \
                     WHERE subcategory_id = $1 ORDER BY created_at, id"
                ))
                .bind(subcategory)
                .fetch_all(&self.pool)
                .await?
            }
            _ => {
                sqlx::query_as::<_, ProductRow>(&format!(
                    "SELECT {PRODUCT_COLS} FROM product ORDER BY created_at, id"
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn update_product(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "UPDATE product SET \
                 name = COALESCE($2, name), \
                 current_price = COALESCE($3, current_price), \
                 discount_price = COALESCE($4, discount_price), \
                 category_id = COALESCE($5, category_id), \
                 subcategory_id = COALESCE($6, subcategory_id), \
                 description = COALESCE($7, description), \
                 promo_code = COALESCE($8, promo_code), \
                 image = COALESCE($9, image), \
                 status = COALESCE($10, status) \
             WHERE id = $1 \
             RETURNING {PRODUCT_COLS}"
        ))
        .bind(id.as_uuid())
        .bind(patch.name)
        .bind(patch.current_price)
        .bind(patch.discount_price)
        .bind(patch.category_id.map(|id| id.as_uuid()))
        .bind(patch.subcategory_id.map(|id| id.as_uuid()))
        .bind(patch.description)
        .bind(patch.promo_code)
        .bind(patch.image)
        .bind(patch.status.map(|s| s.to_string()))
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn delete_product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "DELETE FROM product WHERE id = $1 RETURNING {PRODUCT_COLS}"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn create_order(&self, new: NewOrder) -> Result<Order, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "INSERT INTO shop_order (id, name, email, phone, address, country, state, \
                                     city, postal_code, order_number, total_qty, total_cost) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {ORDER_COLS}"
        ))
        .bind(Uuid::new_v4())
        .bind(new.name)
        .bind(new.email)
        .bind(new.phone)
        .bind(new.address)
        .bind(new.country)
        .bind(new.state)
        .bind(new.city)
        .bind(new.postal_code)
        .bind(new.order_number)
        .bind(new.total_qty)
        .bind(new.total_cost)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn list_orders(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLS} FROM shop_order ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create_profile(&self, new: NewProfile) -> Result<Profile, RepositoryError> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "INSERT INTO profile (id, full_name, email, phone, profile_picture, password) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {PROFILE_COLS}"
        ))
        .bind(Uuid::new_v4())
        .bind(new.full_name)
        .bind(new.email)
        .bind(new.phone)
        .bind(new.profile_picture)
        .bind(new.password)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, "a profile with this email"))?;

        Ok(row.into())
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProfileRow>(&format!(
            "SELECT {PROFILE_COLS} FROM profile ORDER BY created_at, id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create_faq(&self, new: NewFaq) -> Result<Faq, RepositoryError> {
        let row = sqlx::query_as::<_, FaqRow>(
            "INSERT INTO faq (id, title, description) VALUES ($1, $2, $3) \
             RETURNING id, title, description, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(new.title)
        .bind(new.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn list_faqs(&self) -> Result<Vec<Faq>, RepositoryError> {
        let rows = sqlx::query_as::<_, FaqRow>(
            "SELECT id, title, description, created_at FROM faq ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create_contact(
        &self,
        new: NewContactMessage,
    ) -> Result<ContactMessage, RepositoryError> {
        let row = sqlx::query_as::<_, ContactRow>(
            "INSERT INTO contact_message (id, name, email, phone, website, message) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id, name, email, phone, website, message, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(new.name)
        .bind(new.email)
        .bind(new.phone)
        .bind(new.website)
        .bind(new.message)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn list_contacts(&self) -> Result<Vec<ContactMessage>, RepositoryError> {
        let rows = sqlx::query_as::<_, ContactRow>(
            "SELECT id, name, email, phone, website, message, created_at \
             FROM contact_message ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
