use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use rebill_core::{CompanyContext, DomainResult, format_amount};
use rebill_expenses::{BillableExpense, DocumentDirectory, ExpenseId, ExpenseRepository};
use rebill_ledger::{BillId, Party, PartyId};

use crate::line::{Column, ColumnValue, ReportLine, ReportOptions, RowAction};

/// Prefix of customer summary row ids; the suffix is the party id.
pub const SUMMARY_ROW_PREFIX: &str = "partner_";

/// Sentinel id of the grand-total row.
pub const TOTAL_ROW_ID: &str = "grouped_partners_total";

/// Fixed document-type label shown in the Source column.
const DOCUMENT_TYPE_LABEL: &str = "Payable Invoice";

// Every group renders unfolded regardless of shell state.
const UNFOLD_ALL: bool = true;

/// Target document type of an open action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    SupplierBill,
}

/// Target view of an open action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    Form,
}

/// Navigation descriptor for opening an expense's originating document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenAction {
    pub document: DocumentKind,
    pub record: BillId,
    pub view: ViewMode,
}

/// One customer's outstanding expenses plus their minor-unit total.
struct CustomerGroup {
    party: Party,
    total_minor_units: i64,
    expenses: Vec<BillableExpense>,
}

/// Pending billable expense report builder.
pub struct PendingExpenseReport<R, D> {
    expenses: R,
    directory: D,
    context: CompanyContext,
}

impl<R, D> PendingExpenseReport<R, D>
where
    R: ExpenseRepository,
    D: DocumentDirectory,
{
    pub fn new(expenses: R, directory: D, context: CompanyContext) -> Self {
        Self {
            expenses,
            directory,
            context,
        }
    }

    pub fn report_name(&self) -> &'static str {
        "Pending Billable Expense"
    }

    /// Leading blank header covers the row-name column.
    pub fn column_headers(&self) -> Vec<Column> {
        vec![
            Column::new(""),
            Column::new("Date"),
            Column::new("Source"),
            Column::new("Supplier"),
            Column::new("Description"),
            Column::numeric("Amount"),
            Column::new("On Draft Invoice"),
        ]
    }

    /// Customers holding at least one outstanding expense, with their
    /// outstanding expenses and totals. `focus` narrows to one customer.
    fn group_by_customer(&self, focus: Option<PartyId>) -> Vec<CustomerGroup> {
        let company_id = self.context.company_id;

        let mut by_customer: BTreeMap<PartyId, Vec<BillableExpense>> = BTreeMap::new();
        for expense in self.expenses.list(company_id) {
            let Some(customer_id) = expense.customer_id else {
                continue;
            };
            if focus.is_some_and(|focused| focused != customer_id) {
                continue;
            }
            by_customer.entry(customer_id).or_default().push(expense);
        }

        let mut groups = Vec::new();
        for (customer_id, expenses) in by_customer {
            let Some(party) = self.directory.party(company_id, &customer_id) else {
                continue;
            };
            if !party.is_customer() {
                continue;
            }
            let outstanding: Vec<_> = expenses
                .into_iter()
                .filter(|expense| expense.is_outstanding)
                .collect();
            // A linked customer may still hold nothing billable.
            if outstanding.is_empty() {
                continue;
            }
            let total_minor_units = outstanding
                .iter()
                .map(|expense| expense.amount.minor_units())
                .sum();
            groups.push(CustomerGroup {
                party,
                total_minor_units,
                expenses: outstanding,
            });
        }
        groups
    }

    /// Build the ordered row list: per customer (sorted by name) a summary
    /// row plus detail rows, then the grand total when unfocused.
    ///
    /// `focus_id` is a summary row id (`"partner_<uuid>"`) when the shell
    /// refreshes a single group.
    pub fn build_report(
        &self,
        options: &ReportOptions,
        focus_id: Option<&str>,
    ) -> DomainResult<Vec<ReportLine>> {
        let focus = match focus_id {
            Some(raw) => {
                let raw = raw.strip_prefix(SUMMARY_ROW_PREFIX).unwrap_or(raw);
                Some(PartyId::new(raw.parse()?))
            }
            None => None,
        };

        let mut groups = self.group_by_customer(focus);
        groups.sort_by(|a, b| a.party.display_name().cmp(b.party.display_name()));

        let company_id = self.context.company_id;
        let currency = self.context.currency;
        let mut lines = Vec::new();
        let mut total_minor_units = 0i64;

        for group in &groups {
            total_minor_units += group.total_minor_units;
            let row_id = format!("{SUMMARY_ROW_PREFIX}{}", group.party.id);
            let unfolded = options.unfolded_lines.contains(&row_id) || UNFOLD_ALL;

            lines.push(ReportLine {
                id: row_id.clone(),
                parent_id: None,
                name: group.party.display_name().to_string(),
                columns: vec![ColumnValue::text(format_amount(
                    group.total_minor_units,
                    currency,
                ))],
                level: 2,
                unfoldable: true,
                unfolded,
                colspan: 5,
                action: None,
            });

            if !unfolded {
                continue;
            }
            for expense in &group.expenses {
                let on_draft_invoice = expense.invoice_line_id.is_some();
                let supplier_name = expense
                    .supplier_id
                    .and_then(|supplier_id| self.directory.party(company_id, &supplier_id))
                    .map(|supplier| supplier.display_name().to_string())
                    .unwrap_or_default();

                lines.push(ReportLine {
                    id: expense.id.to_string(),
                    parent_id: Some(row_id.clone()),
                    name: expense.source_document.clone(),
                    columns: vec![
                        ColumnValue::text(
                            expense
                                .bill_date
                                .map(|date| date.to_string())
                                .unwrap_or_default(),
                        ),
                        ColumnValue::text(DOCUMENT_TYPE_LABEL),
                        ColumnValue::text(supplier_name),
                        ColumnValue::text(expense.description.clone()),
                        ColumnValue::text(format_amount(expense.amount.minor_units(), currency)),
                        ColumnValue::Flag {
                            value: on_draft_invoice,
                            blocked: on_draft_invoice,
                        },
                    ],
                    level: 4,
                    unfoldable: false,
                    unfolded: false,
                    colspan: 1,
                    action: Some(if expense.bill_id.is_some() {
                        RowAction::OpenBill
                    } else {
                        RowAction::OpenPurchase
                    }),
                });
            }
        }

        if focus.is_none() {
            lines.push(ReportLine {
                id: TOTAL_ROW_ID.to_string(),
                parent_id: None,
                name: "Total".to_string(),
                columns: vec![
                    ColumnValue::Blank,
                    ColumnValue::Blank,
                    ColumnValue::Blank,
                    ColumnValue::Blank,
                    ColumnValue::text(format_amount(total_minor_units, currency)),
                    ColumnValue::Blank,
                ],
                level: 0,
                unfoldable: false,
                unfolded: false,
                colspan: 1,
                action: None,
            });
        }

        debug!(
            groups = groups.len(),
            rows = lines.len(),
            focused = focus.is_some(),
            "built pending expense report"
        );
        Ok(lines)
    }

    /// Descriptor for navigating to the bill behind an expense row.
    ///
    /// `None` when the expense is absent or carries no bill reference.
    pub fn resolve_open_action(&self, expense_id: &ExpenseId) -> Option<OpenAction> {
        let expense = self.expenses.get(self.context.company_id, expense_id)?;
        let bill_id = expense.bill_id?;
        Some(OpenAction {
            document: DocumentKind::SupplierBill,
            record: bill_id,
            view: ViewMode::Form,
        })
    }
}
