//! Refresh service - the full data-refresh pipeline
//!
//! One cycle runs four strictly sequential stages: token, accounts,
//! payment aggregation, transaction aggregation. The two aggregation
//! stages fan out one request per account and fan in to a map keyed by
//! account number. The cycle result is an immutable snapshot; callers
//! swap it in whole once the cycle completes.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::config::Config;
use crate::domain::result::Result;
use crate::domain::{Account, RefreshSnapshot};
use crate::ports::BankDataProvider;

/// Refresh service driving the token → accounts → payments → transactions chain
pub struct RefreshService {
    provider: Arc<dyn BankDataProvider>,
    config: Config,
}

impl RefreshService {
    pub fn new(provider: Arc<dyn BankDataProvider>, config: Config) -> Self {
        Self { provider, config }
    }

    /// Run one full refresh cycle
    ///
    /// Token and account failures abort the cycle and surface as the
    /// returned error; the caller renders them and retries after the fixed
    /// delay. Per-account aggregation failures never abort: they are
    /// logged, recorded as warnings, and leave that account without an
    /// entry in the corresponding map.
    pub async fn run_cycle(&self) -> Result<RefreshSnapshot> {
        // Token is refreshed unconditionally; no expiry tracking
        let token = self.provider.fetch_token().await?;
        debug!("token acquired");

        let accounts = self.provider.fetch_accounts(&token).await?;
        debug!(count = accounts.len(), "accounts fetched");

        let mut snapshot = RefreshSnapshot::new(accounts);

        if self.config.show_future_account_balance {
            let provider = Arc::clone(&self.provider);
            let token = token.clone();
            let (payments, warnings) = self
                .aggregate(&snapshot.accounts, "payments", move |account_id| {
                    let provider = Arc::clone(&provider);
                    let token = token.clone();
                    async move { provider.fetch_payments(&token, &account_id).await }
                })
                .await;
            snapshot.payments = payments;
            snapshot.warnings.extend(warnings);
        }

        if self.config.show_transactions_today {
            let provider = Arc::clone(&self.provider);
            let token = token.clone();
            let (transactions, warnings) = self
                .aggregate(&snapshot.accounts, "transactions", move |account_id| {
                    let provider = Arc::clone(&provider);
                    let token = token.clone();
                    async move { provider.fetch_transactions(&token, &account_id).await }
                })
                .await;
            snapshot.transactions = transactions;
            snapshot.warnings.extend(warnings);
        }

        snapshot.fetched_at = Utc::now();
        Ok(snapshot)
    }

    /// Fan out one request per account, fan in to a map keyed by account number
    ///
    /// Requests run concurrently with no ordering guarantee among their
    /// completions; the stage completes once every spawned task has
    /// settled, successful or not. Failed accounts get a warning entry
    /// instead of a map entry, so k < N successes still completes.
    async fn aggregate<T, F, Fut>(
        &self,
        accounts: &[Account],
        stage: &str,
        fetch: F,
    ) -> (HashMap<u64, Vec<T>>, Vec<String>)
    where
        T: Send + 'static,
        F: Fn(String) -> Fut,
        Fut: Future<Output = Result<Vec<T>>> + Send + 'static,
    {
        let mut results: HashMap<u64, Vec<T>> = HashMap::new();
        let mut warnings = Vec::new();

        if accounts.is_empty() {
            return (results, warnings);
        }

        let mut tasks = JoinSet::new();
        for account in accounts {
            let account_number = account.account_number;
            let future = fetch(account.account_id.clone());
            tasks.spawn(async move { (account_number, future.await) });
        }

        while let Some(settled) = tasks.join_next().await {
            match settled {
                Ok((account_number, Ok(items))) => {
                    results.insert(account_number, items);
                }
                Ok((account_number, Err(e))) => {
                    warn!(account = account_number, stage, error = %e, "account fetch failed");
                    warnings.push(format!(
                        "Error getting {} info for account {}: {}",
                        stage, account_number, e
                    ));
                }
                Err(e) => {
                    // Task panicked or was aborted; count it as settled
                    warn!(stage, error = %e, "aggregation task failed");
                    warnings.push(format!("{} task failed: {}", stage, e));
                }
            }
        }

        (results, warnings)
    }
}
