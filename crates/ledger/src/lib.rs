//! Read-side records for the accounting documents this extension consumes.
//!
//! Parties, supplier bills, and customer invoices are owned by the
//! surrounding platform; this crate only models what the billable-expense
//! core reads from them.

pub mod bill;
pub mod invoice;
pub mod party;

pub use bill::{Bill, BillId, BillLine, BillLineId};
pub use invoice::{CustomerInvoice, InvoiceId, InvoiceLine, InvoiceLineId, InvoiceState};
pub use party::{Party, PartyId, PartyKind};
