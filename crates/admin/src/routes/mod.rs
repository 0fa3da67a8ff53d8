//! HTTP routes, mounted under `/api`.
//!
//! | Method | Path | Body |
//! |---|---|---|
//! | GET/POST | `/categories`, PUT/DELETE `/categories/{id}` | multipart |
//! | GET/POST | `/subcategories`, PUT/DELETE `/subcategories/{id}` | multipart |
//! | GET/POST | `/products`, GET/PUT/DELETE `/products/{id}` | multipart |
//! | GET/POST | `/addorder` | JSON |
//! | GET/POST | `/profiles` | multipart |
//! | GET/POST | `/faqs` | JSON |
//! | GET/POST | `/contacts` | JSON |
//! | GET | `/events` | SSE |

pub mod categories;
pub mod contacts;
pub mod events;
pub mod faqs;
pub mod forms;
pub mod orders;
pub mod products;
pub mod profiles;
pub mod subcategories;

use axum::Router;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

/// Assemble all API sub-routers.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(categories::router())
        .merge(subcategories::router())
        .merge(products::router())
        .merge(orders::router())
        .merge(profiles::router())
        .merge(faqs::router())
        .merge(contacts::router())
        .merge(events::router())
}

/// Parse a path segment into a typed entity ID.
///
/// A malformed ID cannot name an existing entity, so it reports not-found
/// rather than a validation error.
pub(crate) fn parse_id<T: From<Uuid>>(raw: &str, kind: &'static str) -> Result<T, AppError> {
    Uuid::parse_str(raw)
        .map(T::from)
        .map_err(|_| AppError::NotFound(kind))
}
