//! Integration tests for the refresh pipeline
//!
//! Network IO is mocked at the trait level; the pipeline, fan-out/fan-in,
//! and gating behavior run for real on the tokio runtime.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use saldo_core::domain::result::{Error, Result};
use saldo_core::ports::BankDataProvider;
use saldo_core::services::{Line, Renderer};
use saldo_core::{Account, BearerToken, Config, Payment, RefreshService, Transaction};

// ============================================================================
// Mock provider
// ============================================================================

#[derive(Default)]
struct MockBank {
    accounts: Vec<Account>,
    /// Account ids whose payment fetch fails
    failing_payments: HashSet<String>,
    /// Account ids whose transaction fetch fails
    failing_transactions: HashSet<String>,
    /// Injected error for the accounts stage
    accounts_error: Option<Error>,
    token_calls: AtomicUsize,
    account_calls: AtomicUsize,
    payment_calls: AtomicUsize,
    transaction_calls: AtomicUsize,
}

impl MockBank {
    fn with_accounts(accounts: Vec<Account>) -> Self {
        Self {
            accounts,
            ..Default::default()
        }
    }
}

#[async_trait]
impl BankDataProvider for MockBank {
    async fn fetch_token(&self) -> Result<BearerToken> {
        self.token_calls.fetch_add(1, Ordering::SeqCst);
        Ok(BearerToken {
            access_token: "test-token".to_string(),
            token_type: "Bearer".to_string(),
            expires_in: 3600,
        })
    }

    async fn fetch_accounts(&self, token: &BearerToken) -> Result<Vec<Account>> {
        assert_eq!(token.access_token, "test-token");
        self.account_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(e) = &self.accounts_error {
            return Err(e.clone());
        }
        Ok(self.accounts.clone())
    }

    async fn fetch_payments(
        &self,
        _token: &BearerToken,
        account_id: &str,
    ) -> Result<Vec<Payment>> {
        self.payment_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_payments.contains(account_id) {
            return Err(Error::Http(500));
        }
        Ok(vec![Payment {
            due_date: NaiveDate::from_ymd_opt(2024, 1, 18).unwrap(),
            amount: Decimal::new(2000, 0),
            text: Some("Husleie".to_string()),
        }])
    }

    async fn fetch_transactions(
        &self,
        _token: &BearerToken,
        account_id: &str,
    ) -> Result<Vec<Transaction>> {
        self.transaction_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_transactions.contains(account_id) {
            return Err(Error::Http(500));
        }
        Ok(vec![Transaction {
            interest_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            accounting_date: None,
            text: "REMA 1000 OSLO".to_string(),
            amount: Decimal::new(-45, 0),
            transaction_type: None,
            source: None,
        }])
    }
}

fn account(number: u64, balance: i64) -> Account {
    Account {
        account_id: format!("id-{}", number),
        account_number: number,
        name: format!("Konto {}", number),
        account_type: "Standard account".to_string(),
        balance: Decimal::new(balance, 0),
        available: None,
    }
}

fn service(bank: MockBank, config: Config) -> (Arc<MockBank>, RefreshService) {
    let bank = Arc::new(bank);
    let service = RefreshService::new(bank.clone(), config);
    (bank, service)
}

// ============================================================================
// Pipeline tests
// ============================================================================

#[tokio::test]
async fn full_cycle_aggregates_per_account() {
    let bank = MockBank::with_accounts(vec![account(1001, 5000), account(1002, 300)]);
    let (bank, service) = service(bank, Config::default());

    let snapshot = service.run_cycle().await.unwrap();

    assert_eq!(snapshot.accounts.len(), 2);
    assert_eq!(snapshot.payments.len(), 2);
    assert_eq!(snapshot.transactions.len(), 2);
    assert_eq!(snapshot.payments_for(1001).len(), 1);
    assert_eq!(snapshot.transactions_for(1002).len(), 1);
    assert!(snapshot.warnings.is_empty());

    // One token and one account request per cycle, one fan-out request per
    // account and stage
    assert_eq!(bank.token_calls.load(Ordering::SeqCst), 1);
    assert_eq!(bank.account_calls.load(Ordering::SeqCst), 1);
    assert_eq!(bank.payment_calls.load(Ordering::SeqCst), 2);
    assert_eq!(bank.transaction_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn fan_in_completes_with_partial_failures() {
    // 3 accounts, 1 failing payment fetch: the stage still completes after
    // all settlements, with a gap and a warning for the failed account
    let mut bank = MockBank::with_accounts(vec![
        account(1001, 5000),
        account(1002, 300),
        account(1003, 800),
    ]);
    bank.failing_payments.insert("id-1002".to_string());
    let (bank, service) = service(bank, Config::default());

    let snapshot = service.run_cycle().await.unwrap();

    assert_eq!(bank.payment_calls.load(Ordering::SeqCst), 3);
    assert_eq!(snapshot.payments.len(), 2);
    assert!(snapshot.payments_for(1002).is_empty());
    assert!(snapshot
        .warnings
        .iter()
        .any(|w| w.contains("payments") && w.contains("1002")));
}

#[tokio::test]
async fn all_failures_still_complete_the_stage() {
    let mut bank = MockBank::with_accounts(vec![account(1001, 5000), account(1002, 300)]);
    bank.failing_transactions.insert("id-1001".to_string());
    bank.failing_transactions.insert("id-1002".to_string());
    let (_, service) = service(bank, Config::default());

    let snapshot = service.run_cycle().await.unwrap();

    assert!(snapshot.transactions.is_empty());
    assert_eq!(snapshot.warnings.len(), 2);
}

#[tokio::test]
async fn accounts_failure_halts_the_cycle() {
    let mut bank = MockBank::with_accounts(vec![account(1001, 5000)]);
    bank.accounts_error = Some(Error::from_status(429));
    let (bank, service) = service(bank, Config::default());

    let err = service.run_cycle().await.unwrap_err();
    assert_eq!(err, Error::RateLimited);

    // Downstream stages never ran
    assert_eq!(bank.payment_calls.load(Ordering::SeqCst), 0);
    assert_eq!(bank.transaction_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn disabled_sections_issue_no_requests() {
    let bank = MockBank::with_accounts(vec![account(1001, 5000)]);
    let mut config = Config::default();
    config.show_future_account_balance = false;
    config.show_transactions_today = false;
    let (bank, service) = service(bank, config);

    let snapshot = service.run_cycle().await.unwrap();

    assert!(snapshot.payments.is_empty());
    assert!(snapshot.transactions.is_empty());
    assert_eq!(bank.payment_calls.load(Ordering::SeqCst), 0);
    assert_eq!(bank.transaction_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn empty_account_list_yields_empty_snapshot() {
    let bank = MockBank::with_accounts(vec![]);
    let (bank, service) = service(bank, Config::default());

    let snapshot = service.run_cycle().await.unwrap();

    assert!(snapshot.accounts.is_empty());
    assert!(snapshot.payments.is_empty());
    assert!(snapshot.transactions.is_empty());
    assert_eq!(bank.payment_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn token_is_refetched_every_cycle() {
    let bank = MockBank::with_accounts(vec![account(1001, 5000)]);
    let (bank, service) = service(bank, Config::default());

    service.run_cycle().await.unwrap();
    service.run_cycle().await.unwrap();

    assert_eq!(bank.token_calls.load(Ordering::SeqCst), 2);
}

// ============================================================================
// End-to-end: refresh then render
// ============================================================================

#[tokio::test]
async fn cycle_renders_projection_from_spec_example() {
    // balance 5000, payment of 2000 due on the 18th, payDay 15 + buffer 4:
    // the cutoff on the 19th covers the payment, projected balance 3000,
    // so no refill warning is rendered
    let bank = MockBank::with_accounts(vec![account(1001, 5000)]);
    let (_, service) = service(bank, Config::default());

    let snapshot = service.run_cycle().await.unwrap();

    let config = Config::default();
    let today = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
    let lines = Renderer::new(&config).render(&snapshot, today);

    assert!(!lines
        .iter()
        .any(|l| matches!(l, Line::Warning { .. })));
    assert!(lines.iter().any(|l| match l {
        Line::Info(text) => text.contains("All accounts are in balance"),
        _ => false,
    }));
}

#[tokio::test]
async fn partial_payment_failure_renders_without_that_account_data() {
    // A failed payment fetch must not break rendering; the account shows
    // its plain balance and no projection for it is possible
    let mut bank = MockBank::with_accounts(vec![account(1001, 5000)]);
    bank.failing_payments.insert("id-1001".to_string());
    let (_, service) = service(bank, Config::default());

    let snapshot = service.run_cycle().await.unwrap();
    let config = Config::default();
    let today = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
    let lines = Renderer::new(&config).render(&snapshot, today);

    assert!(lines.iter().any(|l| match l {
        Line::Account { label, .. } => label == "Konto 1001",
        _ => false,
    }));
}
