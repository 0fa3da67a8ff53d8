//! Entity status enumeration.

use serde::{Deserialize, Serialize};

/// Visibility status for catalog entities.
///
/// A closed enumeration: entities are either `Active` (visible to
/// storefront consumers) or `Inactive` (hidden but retained). Defaults to
/// `Active` when omitted from input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EntityStatus {
    #[default]
    Active,
    Inactive,
}

impl std::fmt::Display for EntityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Inactive => write!(f, "Inactive"),
        }
    }
}

impl std::str::FromStr for EntityStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(Self::Active),
            "Inactive" => Ok(Self::Inactive),
            _ => Err(format!("invalid status: {s}")),
        }
    }
}
