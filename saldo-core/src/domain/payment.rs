//! Scheduled payment domain model

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A scheduled future payment on one account
///
/// Represents a deduction not yet reflected in the account balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub due_date: NaiveDate,
    pub amount: Decimal,
    pub text: Option<String>,
}

impl Payment {
    /// True if the payment falls on or before the given cutoff date
    pub fn is_due_by(&self, cutoff: NaiveDate) -> bool {
        self.due_date <= cutoff
    }
}
