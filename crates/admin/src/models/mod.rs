//! Entity models, input schemas, and resolved views.
//!
//! Three families of types per entity kind:
//!
//! - the persisted entity (`Category`, `Product`, ...) as returned by the
//!   store, wire-serialized in camelCase;
//! - explicit input schemas: `*Form` for multipart bodies and `*Draft` for
//!   JSON bodies, all-`Option` so validation happens in the mutation
//!   pipeline rather than in serde;
//! - `New*` / `*Patch` records consumed by the store (`New*` fully
//!   validated, `*Patch` partial - only `Some` fields are applied).
//!
//! Entities with references additionally have a `*View`: the read-side
//! shape with references expanded (or `null` when dangling).

pub mod category;
pub mod contact;
pub mod faq;
pub mod order;
pub mod product;
pub mod profile;
pub mod subcategory;

pub use category::{Category, CategoryForm, CategoryPatch, NewCategory};
pub use contact::{ContactDraft, ContactMessage, NewContactMessage};
pub use faq::{Faq, FaqDraft, NewFaq};
pub use order::{NewOrder, Order};
pub use product::{NameRef, NewProduct, Product, ProductForm, ProductPatch, ProductView};
pub use profile::{NewProfile, Profile, ProfileForm};
pub use subcategory::{
    NewSubcategory, Subcategory, SubcategoryForm, SubcategoryPatch, SubcategoryView,
};
