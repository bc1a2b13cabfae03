use serde::{Deserialize, Serialize};
use tracing::debug;

use rebill_core::{CompanyId, DomainError, DomainResult};
use rebill_expenses::{
    ActivityLog, BillableExpense, DocumentDirectory, ExpenseId, ExpenseRepository, MessageCategory,
};
use rebill_ledger::{
    Bill, BillId, CustomerInvoice, InvoiceId, InvoiceLineId, InvoiceState, Party, PartyId,
};

use crate::company_store::{CompanyStore, InMemoryCompanyStore};

/// One audit entry on a bill's activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub body: String,
    pub category: MessageCategory,
}

/// In-memory stand-in for the platform database.
///
/// Holds every record collection the billable-expense core touches and plays
/// the collaborator roles: expense repository, document directory, and
/// activity log. Posting or paying an invoice through
/// [`InMemoryDatabase::set_invoice_state`] recomputes the derived fields of
/// the expenses that depend on it, the way the platform's dependency
/// tracking would.
#[derive(Debug, Default)]
pub struct InMemoryDatabase {
    parties: InMemoryCompanyStore<PartyId, Party>,
    bills: InMemoryCompanyStore<BillId, Bill>,
    invoices: InMemoryCompanyStore<InvoiceId, CustomerInvoice>,
    expenses: InMemoryCompanyStore<ExpenseId, BillableExpense>,
    feeds: InMemoryCompanyStore<BillId, Vec<LogEntry>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_party(&self, company_id: CompanyId, party: Party) {
        self.parties.upsert(company_id, party.id, party);
    }

    pub fn insert_bill(&self, company_id: CompanyId, bill: Bill) {
        self.bills.upsert(company_id, bill.id, bill);
    }

    pub fn insert_invoice(&self, company_id: CompanyId, invoice: CustomerInvoice) {
        self.invoices.upsert(company_id, invoice.id, invoice);
    }

    /// Move a customer invoice to a new state and recompute the derived
    /// fields of every expense sitting on one of its lines.
    pub fn set_invoice_state(
        &self,
        company_id: CompanyId,
        invoice_id: InvoiceId,
        state: InvoiceState,
    ) -> DomainResult<()> {
        let mut invoice = self
            .invoices
            .get(company_id, &invoice_id)
            .ok_or(DomainError::NotFound)?;
        invoice.state = state;
        let lines = invoice.lines.clone();
        self.invoices.upsert(company_id, invoice_id, invoice);

        for mut expense in self.expenses.list(company_id) {
            let on_this_invoice = expense
                .invoice_line_id
                .is_some_and(|line_id| lines.iter().any(|line| line.id == line_id));
            if !on_this_invoice {
                continue;
            }
            let bill = expense
                .bill_id
                .and_then(|bill_id| self.bills.get(company_id, &bill_id));
            expense.refresh_derived(bill.as_ref(), Some(state));
            self.expenses.upsert(company_id, expense.id, expense);
        }

        debug!(invoice = %invoice_id, ?state, "invoice state changed");
        Ok(())
    }

    /// Activity feed of a bill, oldest first.
    pub fn messages(&self, company_id: CompanyId, bill_id: &BillId) -> Vec<LogEntry> {
        self.feeds.get(company_id, bill_id).unwrap_or_default()
    }
}

impl ExpenseRepository for InMemoryDatabase {
    fn get(&self, company_id: CompanyId, id: &ExpenseId) -> Option<BillableExpense> {
        self.expenses.get(company_id, id)
    }

    fn list(&self, company_id: CompanyId) -> Vec<BillableExpense> {
        self.expenses.list(company_id)
    }

    fn upsert(&self, company_id: CompanyId, expense: BillableExpense) {
        self.expenses.upsert(company_id, expense.id, expense);
    }
}

impl DocumentDirectory for InMemoryDatabase {
    fn party(&self, company_id: CompanyId, id: &PartyId) -> Option<Party> {
        self.parties.get(company_id, id)
    }

    fn bill(&self, company_id: CompanyId, id: &BillId) -> Option<Bill> {
        self.bills.get(company_id, id)
    }

    fn invoice_state_of_line(
        &self,
        company_id: CompanyId,
        id: &InvoiceLineId,
    ) -> Option<InvoiceState> {
        self.invoices
            .list(company_id)
            .into_iter()
            .find(|invoice| invoice.has_line(id))
            .map(|invoice| invoice.state)
    }
}

impl ActivityLog for InMemoryDatabase {
    fn post(&self, company_id: CompanyId, bill_id: BillId, body: String, category: MessageCategory) {
        let mut feed = self.feeds.get(company_id, &bill_id).unwrap_or_default();
        feed.push(LogEntry { body, category });
        self.feeds.upsert(company_id, bill_id, feed);
    }
}
