//! FAQ - append-only question/answer entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use guava_core::FaqId;

/// A persisted FAQ entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    pub id: FaqId,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// JSON input for creating a FAQ entry; both fields are required and
/// checked by the mutation pipeline rather than by serde.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqDraft {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Validated input for creating a FAQ entry.
#[derive(Debug, Clone)]
pub struct NewFaq {
    pub title: String,
    pub description: String,
}
