use serde::{Deserialize, Serialize};

use rebill_ledger::Party;

use crate::expense::BillableExpense;

/// Activity-feed message category for billable-expense entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageCategory {
    BillableExpense,
}

/// Compose the audit message for a customer (re)assignment.
///
/// `expense` is the record **before** the update, `new_customer` the customer
/// after it (`None` = assignment removed). `formatted_amount` is the expense
/// amount formatted in the acting company's currency, not the expense's own
/// currency.
///
/// Kept separate from the mutation logic so extensions can alter only the
/// message text.
pub fn build_reassignment_message(
    expense: &BillableExpense,
    new_customer: Option<&Party>,
    formatted_amount: &str,
) -> String {
    match new_customer {
        None => format!(
            "Billable expense {} {} removed",
            expense.description, formatted_amount
        ),
        Some(customer) => {
            if expense.customer_id.is_none() {
                format!(
                    "Billable expense {} {} assigned to {}",
                    expense.description,
                    formatted_amount,
                    customer.display_name()
                )
            } else {
                format!(
                    "Billable expense {} {} re-assigned to {}",
                    expense.description,
                    formatted_amount,
                    customer.display_name()
                )
            }
        }
    }
}
