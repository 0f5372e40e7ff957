//! Render service - turns a refresh snapshot into display lines
//!
//! Pure and synchronous: everything is computed from the snapshot, the
//! config, and the caller-supplied current date, so the whole section
//! layout is unit-testable without a clock or network.

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::Config;
use crate::domain::result::Error;
use crate::domain::{Account, Payment, RefreshSnapshot};

const NEEDS_REFILL_LABEL: &str = "Needs refill";
const ALL_IN_BALANCE_TEXT: &str = "All accounts are in balance";
const SALARY_RECEIVED_TEXT: &str = "Salary received";
const CHECK_MARK: &str = "\u{2713}";

/// One line of dashboard output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Line {
    /// Section or dashboard heading
    Header(String),
    /// Label/value pair, e.g. an account and its balance
    Account { label: String, value: String },
    /// Label/value pair that needs attention
    Warning { label: String, value: String },
    /// Plain informational text
    Info(String),
    /// Horizontal rule between sections
    Separator,
}

/// Snapshot renderer
pub struct Renderer<'a> {
    config: &'a Config,
}

impl<'a> Renderer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Render the full dashboard for one snapshot
    pub fn render(&self, snapshot: &RefreshSnapshot, today: NaiveDate) -> Vec<Line> {
        let mut lines = Vec::new();

        if !self.config.header.is_empty() {
            lines.push(Line::Header(self.config.header.clone()));
        }

        let subtotal = self.account_and_sum_section(snapshot, &mut lines);
        if let Some(sum) = subtotal {
            lines.push(Line::Separator);
            lines.push(Line::Account {
                label: self.config.sum_accounts_label.clone(),
                value: self.format_amount(sum),
            });
        }

        if self.config.show_future_account_balance {
            self.projected_balance_section(snapshot, today, &mut lines);
        }

        self.salary_and_transaction_section(snapshot, today, &mut lines);

        lines
    }

    /// Render a halted cycle: the error message plus the fixed retry notice
    pub fn render_error(&self, error: &Error) -> Vec<Line> {
        let mut lines = Vec::new();
        if !self.config.header.is_empty() {
            lines.push(Line::Header(self.config.header.clone()));
        }
        lines.push(Line::Info(format!(
            "{}. Retry in {} seconds",
            error.display_message(),
            self.config.error_retry().as_secs()
        )));
        lines
    }

    /// Account lines for the display filter, plus the sum-subset subtotal
    ///
    /// An empty filter shows every fetched account. The subtotal is
    /// returned whenever the sum subset is configured, even if none of its
    /// accounts were fetched this cycle.
    fn account_and_sum_section(
        &self,
        snapshot: &RefreshSnapshot,
        lines: &mut Vec<Line>,
    ) -> Option<Decimal> {
        let mut subtotal = Decimal::ZERO;

        for account in &snapshot.accounts {
            if self.config.sum_accounts.contains(&account.account_number) {
                subtotal += account.balance;
            }

            let displayed = self.config.display_only_accounts.is_empty()
                || self
                    .config
                    .display_only_accounts
                    .contains(&account.account_number);
            if displayed {
                lines.push(Line::Account {
                    label: self
                        .config
                        .account_label(account.account_number, &account.name),
                    value: self.format_amount(account.balance),
                });
            }
        }

        if self.config.sum_accounts.is_empty() {
            None
        } else {
            Some(subtotal)
        }
    }

    /// Warn for every non-credit-card account whose balance will not cover
    /// the payments due before the refill date
    fn projected_balance_section(
        &self,
        snapshot: &RefreshSnapshot,
        today: NaiveDate,
        lines: &mut Vec<Line>,
    ) {
        let cutoff =
            projection_cutoff(today, self.config.pay_day, self.config.pay_day_buffer_days);

        lines.push(Line::Separator);

        let mut all_in_balance = true;
        for account in &snapshot.accounts {
            if account.is_credit_card() {
                continue;
            }
            let projected =
                projected_balance(account, snapshot.payments_for(account.account_number), cutoff);
            if projected <= Decimal::ZERO {
                all_in_balance = false;
                lines.push(Line::Warning {
                    label: NEEDS_REFILL_LABEL.to_string(),
                    value: account.name.clone(),
                });
            }
        }

        if all_in_balance {
            lines.push(Line::Info(format!("{} {}", CHECK_MARK, ALL_IN_BALANCE_TEXT)));
        }
    }

    /// Salary banner plus today's transaction list
    fn salary_and_transaction_section(
        &self,
        snapshot: &RefreshSnapshot,
        today: NaiveDate,
        lines: &mut Vec<Line>,
    ) {
        let mut salary_on: Vec<String> = Vec::new();
        let mut transaction_lines: Vec<Line> = Vec::new();

        for account in &snapshot.accounts {
            for tx in snapshot.transactions_for(account.account_number) {
                if tx.interest_date != today || tx.is_archived() {
                    continue;
                }

                let included =
                    !self.config.show_only_expenses_in_transactions || tx.is_expense();
                if included {
                    let mut label = tx.display_text();
                    if tx.is_direct_debit() {
                        label.push_str(&format!(" ({})", account.name));
                    }
                    transaction_lines.push(Line::Account {
                        label,
                        value: self.format_amount(tx.amount),
                    });
                }

                let salary = self
                    .config
                    .salary_accounts
                    .contains(&account.account_number)
                    && tx.amount > self.config.salary_notification_minimum_amount;
                if salary {
                    let label = self.config.account_label(
                        account.account_number,
                        &account.account_number.to_string(),
                    );
                    if !salary_on.contains(&label) {
                        salary_on.push(label);
                    }
                }
            }
        }

        if !salary_on.is_empty() {
            lines.push(Line::Info(format!(
                "{} {} ({})",
                CHECK_MARK,
                SALARY_RECEIVED_TEXT,
                salary_on.join(", ")
            )));
        }

        if self.config.show_transactions_today {
            if transaction_lines.is_empty() {
                lines.push(Line::Info(format!(
                    "{} {}",
                    CHECK_MARK, self.config.no_transactions_label
                )));
            } else {
                lines.push(Line::Separator);
                if !self.config.today_transactions_header.is_empty() {
                    lines.push(Line::Info(self.config.today_transactions_header.clone()));
                }
                lines.extend(transaction_lines);
            }
        }
    }

    fn format_amount(&self, amount: Decimal) -> String {
        format!(
            "{:.*}",
            self.config.number_of_decimals as usize,
            amount
        )
    }
}

/// The refill date for the current month: day (payDay + payDayBufferDays),
/// counted from the first of the month so an overflowing day rolls into the
/// next month
pub fn projection_cutoff(today: NaiveDate, pay_day: u32, buffer_days: u32) -> NaiveDate {
    let day = pay_day + buffer_days;
    let first_of_month = today
        .with_day(1)
        .expect("first of month is always a valid date");
    first_of_month + Duration::days(i64::from(day) - 1)
}

/// Balance after subtracting every payment due on or before the cutoff
///
/// A local projection only; the account's fetched balance is untouched.
pub fn projected_balance(account: &Account, payments: &[Payment], cutoff: NaiveDate) -> Decimal {
    let due: Decimal = payments
        .iter()
        .filter(|p| p.is_due_by(cutoff))
        .map(|p| p.amount)
        .sum();
    account.balance - due
}
