//! Acting-session context.

use serde::{Deserialize, Serialize};

use crate::id::{CompanyId, UserId};
use crate::money::Currency;

/// The company and user a request acts under.
///
/// Mirrors what the surrounding platform reads from the session. The acting
/// company's currency is the one used for audit-message amounts.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyContext {
    pub company_id: CompanyId,
    pub user_id: UserId,
    /// The acting company's currency.
    pub currency: Currency,
}

impl CompanyContext {
    pub fn new(company_id: CompanyId, user_id: UserId, currency: Currency) -> Self {
        Self {
            company_id,
            user_id,
            currency,
        }
    }
}
