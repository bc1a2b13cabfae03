use serde::{Deserialize, Serialize};

use rebill_core::RecordId;

/// Party identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartyId(pub RecordId);

impl PartyId {
    pub fn new(id: RecordId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for PartyId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Party kind: customer or supplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyKind {
    Customer,
    Supplier,
}

/// A business contact (read side).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub id: PartyId,
    /// Display name; a party may be saved without one.
    pub name: Option<String>,
    pub kind: PartyKind,
}

impl Party {
    pub fn new(id: PartyId, name: impl Into<String>, kind: PartyKind) -> Self {
        Self {
            id,
            name: Some(name.into()),
            kind,
        }
    }

    pub fn is_customer(&self) -> bool {
        self.kind == PartyKind::Customer
    }

    /// Name for display and ordering; a missing name reads as empty.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}
