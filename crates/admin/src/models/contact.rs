//! Contact message - append-only inbound message.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use guava_core::ContactMessageId;

/// A persisted contact message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: ContactMessageId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// JSON input for creating a contact message; `name`, `email` and
/// `message` are required and checked by the mutation pipeline.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub message: Option<String>,
}

/// Validated input for creating a contact message.
#[derive(Debug, Clone)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub message: String,
}
