//! Billable expenses: supplier bill lines to be re-billed to a customer.
//!
//! The record itself, its derived fields, and the write path that appends an
//! audit message when the assigned customer changes. Reads and writes go
//! through the collaborator traits in [`service`]; persistence atomicity is
//! the store's concern, not this crate's.

pub mod expense;
pub mod message;
pub mod service;

pub use expense::{
    BillableExpense, ExpenseChanges, ExpenseId, outstanding_state, source_document, supplier_of,
};
pub use message::{MessageCategory, build_reassignment_message};
pub use service::{ActivityLog, DocumentDirectory, ExpenseRepository, Expenses};
