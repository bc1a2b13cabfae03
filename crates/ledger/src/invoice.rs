use serde::{Deserialize, Serialize};

use rebill_core::{Money, RecordId};

use crate::party::PartyId;

/// Customer invoice identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceId(pub RecordId);

impl InvoiceId {
    pub fn new(id: RecordId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Customer invoice line identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceLineId(pub RecordId);

impl InvoiceLineId {
    pub fn new(id: RecordId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for InvoiceLineId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Customer invoice lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceState {
    Draft,
    Open,
    Paid,
    Cancelled,
}

impl InvoiceState {
    /// Amounts on a draft invoice are not yet committed.
    pub fn is_draft(&self) -> bool {
        *self == InvoiceState::Draft
    }
}

/// One line of a customer invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub id: InvoiceLineId,
    pub description: String,
    pub amount: Money,
}

/// A customer invoice, read side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInvoice {
    pub id: InvoiceId,
    pub customer_id: PartyId,
    pub state: InvoiceState,
    pub lines: Vec<InvoiceLine>,
}

impl CustomerInvoice {
    pub fn has_line(&self, id: &InvoiceLineId) -> bool {
        self.lines.iter().any(|line| line.id == *id)
    }
}
