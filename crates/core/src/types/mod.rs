//! Shared type definitions.

pub mod envelope;
pub mod id;
pub mod status;

pub use envelope::ApiResponse;
pub use id::{
    CategoryId, ContactMessageId, FaqId, OrderId, ProductId, ProfileId, SubcategoryId,
};
pub use status::EntityStatus;
