use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use rebill_core::{Money, RecordId};

use crate::party::PartyId;

/// Supplier bill identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BillId(pub RecordId);

impl BillId {
    pub fn new(id: RecordId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for BillId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Supplier bill line identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BillLineId(pub RecordId);

impl BillLineId {
    pub fn new(id: RecordId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for BillLineId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// One line of a supplier bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillLine {
    pub id: BillLineId,
    pub description: String,
    pub amount: Money,
}

/// A supplier bill (vendor invoice), read side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    pub id: BillId,
    /// Human-readable bill number; unset until the bill is validated.
    pub number: Option<String>,
    pub supplier_id: PartyId,
    pub date: Option<NaiveDate>,
    pub lines: Vec<BillLine>,
}

impl Bill {
    pub fn line(&self, id: &BillLineId) -> Option<&BillLine> {
        self.lines.iter().find(|line| line.id == *id)
    }
}
