//! Bank data provider port
//!
//! Defines the interface for fetching tokens, accounts, payments, and
//! transactions from the bank. The refresh service depends on this trait
//! only; the HTTP adapter implements it, and tests substitute a mock.

use async_trait::async_trait;

use crate::domain::result::Result;
use crate::domain::{Account, BearerToken, Payment, Transaction};

/// Bank data provider trait
///
/// One method per pipeline stage. Per-account methods take the opaque
/// `account_id` from the accounts stage, never the account number.
#[async_trait]
pub trait BankDataProvider: Send + Sync {
    /// Exchange client credentials for a bearer token
    async fn fetch_token(&self) -> Result<BearerToken>;

    /// Fetch the account list for the configured customer
    async fn fetch_accounts(&self, token: &BearerToken) -> Result<Vec<Account>>;

    /// Fetch scheduled payments for one account
    async fn fetch_payments(&self, token: &BearerToken, account_id: &str)
        -> Result<Vec<Payment>>;

    /// Fetch recent transactions for one account
    async fn fetch_transactions(
        &self,
        token: &BearerToken,
        account_id: &str,
    ) -> Result<Vec<Transaction>>;
}
