//! Pending billable expense report.
//!
//! A stateless query/group/sort/format routine over billable expenses: one
//! summary row per customer with outstanding expenses, detail rows beneath
//! it, and a grand total. Rendering is the shell's concern; this crate only
//! produces the ordered row list.

pub mod line;
pub mod report;

pub use line::{Column, ColumnValue, ReportLine, ReportOptions, RowAction};
pub use report::{
    DocumentKind, OpenAction, PendingExpenseReport, SUMMARY_ROW_PREFIX, TOTAL_ROW_ID, ViewMode,
};
