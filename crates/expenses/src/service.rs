use std::sync::Arc;

use tracing::debug;

use rebill_core::{
    CompanyContext, CompanyId, DomainError, DomainResult, Patch, RecordId, format_amount,
};
use rebill_ledger::{Bill, BillId, BillLineId, InvoiceLineId, InvoiceState, Party, PartyId};

use crate::expense::{BillableExpense, ExpenseChanges, ExpenseId};
use crate::message::{MessageCategory, build_reassignment_message};

/// Company-scoped persistence for billable expenses (the store primitive).
pub trait ExpenseRepository: Send + Sync {
    fn get(&self, company_id: CompanyId, id: &ExpenseId) -> Option<BillableExpense>;
    fn list(&self, company_id: CompanyId) -> Vec<BillableExpense>;
    fn upsert(&self, company_id: CompanyId, expense: BillableExpense);
}

impl<S> ExpenseRepository for Arc<S>
where
    S: ExpenseRepository + ?Sized,
{
    fn get(&self, company_id: CompanyId, id: &ExpenseId) -> Option<BillableExpense> {
        (**self).get(company_id, id)
    }

    fn list(&self, company_id: CompanyId) -> Vec<BillableExpense> {
        (**self).list(company_id)
    }

    fn upsert(&self, company_id: CompanyId, expense: BillableExpense) {
        (**self).upsert(company_id, expense)
    }
}

/// Read access to the surrounding accounting documents.
pub trait DocumentDirectory: Send + Sync {
    fn party(&self, company_id: CompanyId, id: &PartyId) -> Option<Party>;
    fn bill(&self, company_id: CompanyId, id: &BillId) -> Option<Bill>;
    /// State of the invoice owning the given line, if the line resolves.
    fn invoice_state_of_line(
        &self,
        company_id: CompanyId,
        id: &InvoiceLineId,
    ) -> Option<InvoiceState>;
}

impl<S> DocumentDirectory for Arc<S>
where
    S: DocumentDirectory + ?Sized,
{
    fn party(&self, company_id: CompanyId, id: &PartyId) -> Option<Party> {
        (**self).party(company_id, id)
    }

    fn bill(&self, company_id: CompanyId, id: &BillId) -> Option<Bill> {
        (**self).bill(company_id, id)
    }

    fn invoice_state_of_line(
        &self,
        company_id: CompanyId,
        id: &InvoiceLineId,
    ) -> Option<InvoiceState> {
        (**self).invoice_state_of_line(company_id, id)
    }
}

/// Appends audit entries to a document's activity feed.
pub trait ActivityLog: Send + Sync {
    fn post(&self, company_id: CompanyId, bill_id: BillId, body: String, category: MessageCategory);
}

impl<S> ActivityLog for Arc<S>
where
    S: ActivityLog + ?Sized,
{
    fn post(&self, company_id: CompanyId, bill_id: BillId, body: String, category: MessageCategory) {
        (**self).post(company_id, bill_id, body, category)
    }
}

/// Write service for billable expenses.
///
/// Wraps the repository's primitive update with the customer-reassignment
/// business rule and the audit side effect.
pub struct Expenses<R, D, L> {
    repository: R,
    directory: D,
    activity_log: L,
    context: CompanyContext,
}

impl<R, D, L> Expenses<R, D, L>
where
    R: ExpenseRepository,
    D: DocumentDirectory,
    L: ActivityLog,
{
    pub fn new(repository: R, directory: D, activity_log: L, context: CompanyContext) -> Self {
        Self {
            repository,
            directory,
            activity_log,
            context,
        }
    }

    pub fn context(&self) -> &CompanyContext {
        &self.context
    }

    /// Register a bill line as billable.
    ///
    /// Entry point for the platform trigger that marks a line re-chargeable.
    /// Registering the same line twice is a conflict.
    pub fn register_from_bill_line(
        &self,
        bill_id: BillId,
        line_id: BillLineId,
    ) -> DomainResult<ExpenseId> {
        let company_id = self.context.company_id;
        let bill = self
            .directory
            .bill(company_id, &bill_id)
            .ok_or(DomainError::NotFound)?;
        let line = bill.line(&line_id).ok_or(DomainError::NotFound)?;

        let already_billable = self
            .repository
            .list(company_id)
            .iter()
            .any(|expense| expense.bill_line_id == Some(line_id));
        if already_billable {
            return Err(DomainError::conflict("bill line is already marked billable"));
        }

        let id = ExpenseId::new(RecordId::new());
        let expense = BillableExpense::from_bill_line(id, &bill, line, self.context.currency);
        self.repository.upsert(company_id, expense);
        debug!(expense = %id, bill = %bill_id, "registered billable expense");
        Ok(id)
    }

    /// Update the given expenses with a partial changeset.
    ///
    /// Touching the customer detaches any invoice link and posts one audit
    /// message per affected expense to its originating bill. Updates that
    /// leave the customer alone skip both. Returns the number of records
    /// written.
    pub fn update(&self, ids: &[ExpenseId], changes: ExpenseChanges) -> DomainResult<usize> {
        let company_id = self.context.company_id;
        let mut changes = changes;

        let customer_touched = changes.customer_id.touches();
        if customer_touched {
            // changing the customer always detaches any invoice link
            changes.invoice_line_id = Patch::Clear;
        }

        let mut records = Vec::with_capacity(ids.len());
        for id in ids {
            records.push(
                self.repository
                    .get(company_id, id)
                    .ok_or(DomainError::NotFound)?,
            );
        }

        // Compose audit messages against the pre-update state.
        let mut messages = Vec::new();
        if customer_touched {
            let new_customer = match &changes.customer_id {
                Patch::Set(party_id) => Some(
                    self.directory
                        .party(company_id, party_id)
                        .ok_or(DomainError::NotFound)?,
                ),
                _ => None,
            };
            for expense in &records {
                // Company currency, not the expense's own: observed platform
                // behavior, reproduced as-is.
                let formatted =
                    format_amount(expense.amount.minor_units(), self.context.currency);
                let body =
                    build_reassignment_message(expense, new_customer.as_ref(), &formatted);
                if let Some(bill_id) = expense.bill_id {
                    messages.push((bill_id, body));
                }
            }
        }

        let updated = records.len();
        for mut expense in records {
            changes.apply_to(&mut expense);
            let bill = expense
                .bill_id
                .and_then(|bill_id| self.directory.bill(company_id, &bill_id));
            let invoice_state = expense
                .invoice_line_id
                .and_then(|line_id| self.directory.invoice_state_of_line(company_id, &line_id));
            expense.refresh_derived(bill.as_ref(), invoice_state);
            self.repository.upsert(company_id, expense);
        }

        for (bill_id, body) in messages {
            self.activity_log
                .post(company_id, bill_id, body, MessageCategory::BillableExpense);
        }

        debug!(updated, customer_touched, "updated billable expenses");
        Ok(updated)
    }
}
