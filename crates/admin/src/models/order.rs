//! Order - append-only record of a placed order.
//!
//! Orders have no update path: they are immutable records of events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use guava_core::OrderId;

/// A persisted order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub order_number: Option<String>,
    pub total_qty: Option<i64>,
    pub total_cost: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// JSON input for creating an order. No field is individually required;
/// numeric totals must be non-negative when present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub order_number: Option<String>,
    pub total_qty: Option<i64>,
    pub total_cost: Option<f64>,
}
