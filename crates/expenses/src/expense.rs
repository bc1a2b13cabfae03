use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use rebill_core::{Currency, Money, Patch, RecordId};
use rebill_ledger::{Bill, BillId, BillLine, BillLineId, InvoiceLineId, InvoiceState, PartyId};

/// Billable expense identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(pub RecordId);

impl ExpenseId {
    pub fn new(id: RecordId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// One supplier-bill cost intended to be re-charged to a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillableExpense {
    pub id: ExpenseId,
    /// Source supplier bill, when the expense originates from one.
    pub bill_id: Option<BillId>,
    /// The bill line the expense was generated from.
    pub bill_line_id: Option<BillLineId>,
    pub description: String,
    pub amount: Money,
    pub bill_date: Option<NaiveDate>,
    pub customer_id: Option<PartyId>,
    /// Set once the expense has been added to a customer invoice line.
    pub invoice_line_id: Option<InvoiceLineId>,

    /// Derived from `invoice_line_id` and the linked invoice's state;
    /// refreshed through [`BillableExpense::refresh_derived`], never set
    /// directly.
    pub is_outstanding: bool,
    /// Derived from `bill_id`; never set directly.
    pub source_document: String,
    /// Derived from `bill_id`; never set directly.
    pub supplier_id: Option<PartyId>,
}

/// `is_outstanding` as a pure function of its dependencies.
///
/// An expense is outstanding until it sits on a line of a finalized
/// (non-draft) customer invoice. A set line whose invoice cannot be resolved
/// counts as not outstanding.
pub fn outstanding_state(
    invoice_line_id: Option<InvoiceLineId>,
    invoice_state: Option<InvoiceState>,
) -> bool {
    match (invoice_line_id, invoice_state) {
        (None, _) => true,
        (Some(_), Some(state)) => state.is_draft(),
        (Some(_), None) => false,
    }
}

/// `source_document` as a pure function of the linked bill.
pub fn source_document(bill: Option<&Bill>) -> String {
    bill.and_then(|b| b.number.clone()).unwrap_or_default()
}

/// `supplier_id` as a pure function of the linked bill.
pub fn supplier_of(bill: Option<&Bill>) -> Option<PartyId> {
    bill.map(|b| b.supplier_id)
}

impl BillableExpense {
    /// New unassigned expense for a bill line marked billable.
    ///
    /// The expense currency defaults to the acting company's currency; the
    /// numeric amount is taken from the line as-is.
    pub fn from_bill_line(
        id: ExpenseId,
        bill: &Bill,
        line: &BillLine,
        company_currency: Currency,
    ) -> Self {
        let mut expense = Self {
            id,
            bill_id: Some(bill.id),
            bill_line_id: Some(line.id),
            description: line.description.clone(),
            amount: Money::from_minor_units(line.amount.minor_units(), company_currency),
            bill_date: bill.date,
            customer_id: None,
            invoice_line_id: None,
            is_outstanding: false,
            source_document: String::new(),
            supplier_id: None,
        };
        expense.refresh_derived(Some(bill), None);
        expense
    }

    /// Recompute the persisted derived fields from their dependencies.
    ///
    /// `bill` is the record behind `bill_id` (if any), `invoice_state` the
    /// state of the invoice owning `invoice_line_id` (if it resolves).
    pub fn refresh_derived(&mut self, bill: Option<&Bill>, invoice_state: Option<InvoiceState>) {
        self.is_outstanding = outstanding_state(self.invoice_line_id, invoice_state);
        self.source_document = source_document(bill);
        self.supplier_id = supplier_of(bill);
    }
}

/// Partial field update for one or more expenses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseChanges {
    pub description: Option<String>,
    pub amount: Option<Money>,
    pub bill_date: Patch<NaiveDate>,
    pub customer_id: Patch<PartyId>,
    pub invoice_line_id: Patch<InvoiceLineId>,
}

impl ExpenseChanges {
    /// Assign to a customer, or clear the assignment with `None`.
    pub fn customer(customer_id: Option<PartyId>) -> Self {
        Self {
            customer_id: match customer_id {
                Some(id) => Patch::Set(id),
                None => Patch::Clear,
            },
            ..Self::default()
        }
    }

    /// Attach the expense to a customer invoice line.
    pub fn invoice_line(line_id: InvoiceLineId) -> Self {
        Self {
            invoice_line_id: Patch::Set(line_id),
            ..Self::default()
        }
    }

    /// Apply the stored fields to a record.
    ///
    /// This is the store primitive: derived fields are not recomputed here.
    pub fn apply_to(&self, expense: &mut BillableExpense) {
        if let Some(description) = &self.description {
            expense.description = description.clone();
        }
        if let Some(amount) = self.amount {
            expense.amount = amount;
        }
        expense.bill_date = self.bill_date.apply(expense.bill_date);
        expense.customer_id = self.customer_id.apply(expense.customer_id);
        expense.invoice_line_id = self.invoice_line_id.apply(expense.invoice_line_id);
    }
}
