//! Refresh snapshot - the aggregated state of one full refresh cycle

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Account, Payment, Transaction};

/// Immutable result of one full refresh cycle
///
/// Rebuilt from scratch every cycle and swapped in atomically; nothing
/// survives across cycles or process restarts. Aggregation maps are keyed
/// by account number, sourced from the accounts stage of the same cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshSnapshot {
    pub accounts: Vec<Account>,
    pub payments: HashMap<u64, Vec<Payment>>,
    pub transactions: HashMap<u64, Vec<Transaction>>,
    pub fetched_at: DateTime<Utc>,
    /// One entry per account whose payment or transaction fetch failed
    pub warnings: Vec<String>,
}

impl RefreshSnapshot {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self {
            accounts,
            payments: HashMap::new(),
            transactions: HashMap::new(),
            fetched_at: Utc::now(),
            warnings: Vec::new(),
        }
    }

    /// Payments for one account; empty if the fetch failed or was skipped
    pub fn payments_for(&self, account_number: u64) -> &[Payment] {
        self.payments
            .get(&account_number)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Transactions for one account; empty if the fetch failed or was skipped
    pub fn transactions_for(&self, account_number: u64) -> &[Transaction] {
        self.transactions
            .get(&account_number)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
