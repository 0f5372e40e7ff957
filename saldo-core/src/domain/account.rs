//! Account domain model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account type string used by the bank for credit-card accounts
const CREDIT_CARD_TYPE: &str = "Creditcard account";

/// A bank account as reported by the accounts endpoint
///
/// Note: account_type is a freeform string from the vendor API
/// ("Standard account", "Creditcard account", ...); any string is accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Opaque API identifier, used as the path segment for per-account requests
    pub account_id: String,
    /// Human-meaningful account number; keys the aggregation maps and config lists
    pub account_number: u64,
    pub name: String,
    pub account_type: String,
    pub balance: Decimal,
    pub available: Option<Decimal>,
}

impl Account {
    /// Credit-card accounts are excluded from the projected-balance section
    pub fn is_credit_card(&self) -> bool {
        self.account_type == CREDIT_CARD_TYPE
    }
}
