//! Configuration management
//!
//! Settings are read from `settings.json` in the saldo directory:
//! ```json
//! {
//!   "clientId": "...",
//!   "clientSecret": "...",
//!   "customerId": "...",
//!   "displayOnlyAccounts": [97101234567],
//!   "payDay": 15
//! }
//! ```
//! Field names and defaults match the original widget's config surface.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::result::Error;

/// Fixed retry delay after a token- or account-stage failure
const ERROR_RETRY_SECS: u64 = 20;

/// Dashboard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub url_identity_server: String,
    pub url_api_base: String,
    pub client_id: String,
    pub client_secret: String,
    pub customer_id: String,

    /// Header line above the dashboard; empty string disables it
    pub header: String,
    /// Accounts to render; empty means all fetched accounts
    pub display_only_accounts: Vec<u64>,
    /// Label overrides, keyed by account number
    pub alias_for_account_labels: HashMap<u64, String>,
    pub sum_accounts_label: String,
    /// Accounts whose balances are accumulated into the subtotal line
    pub sum_accounts: Vec<u64>,
    /// Accounts checked by the salary detector
    pub salary_accounts: Vec<u64>,
    pub salary_notification_minimum_amount: Decimal,
    pub number_of_decimals: u32,
    pub show_future_account_balance: bool,
    pub show_transactions_today: bool,
    pub show_only_expenses_in_transactions: bool,
    pub today_transactions_header: String,
    pub no_transactions_label: String,
    pub pay_day: u32,
    pub pay_day_buffer_days: u32,
    /// Refresh interval in milliseconds
    pub update_interval: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url_identity_server: "https://auth.sbanken.no/identityserver/connect/token"
                .to_string(),
            url_api_base: "https://publicapi.sbanken.no/apibeta/api/v1/".to_string(),
            client_id: String::new(),
            client_secret: String::new(),
            customer_id: String::new(),
            header: "Bankinfo".to_string(),
            display_only_accounts: Vec::new(),
            alias_for_account_labels: HashMap::new(),
            sum_accounts_label: "Sum".to_string(),
            sum_accounts: Vec::new(),
            salary_accounts: Vec::new(),
            salary_notification_minimum_amount: Decimal::new(10000, 0),
            number_of_decimals: 2,
            show_future_account_balance: true,
            show_transactions_today: true,
            show_only_expenses_in_transactions: true,
            today_transactions_header: "Dagens utgifter:".to_string(),
            no_transactions_label: "Ingen utgifter i dag".to_string(),
            pay_day: 15,
            pay_day_buffer_days: 4,
            update_interval: 60 * 60 * 1000,
        }
    }
}

impl Config {
    /// Load config from the saldo directory
    ///
    /// Missing file yields the defaults (credentials must then come from
    /// a later `validate` failure rather than a parse error).
    pub fn load(saldo_dir: &Path) -> Result<Self> {
        let settings_path = saldo_dir.join("settings.json");

        if !settings_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&settings_path)
            .with_context(|| format!("Failed to read {}", settings_path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", settings_path.display()))?;
        Ok(config)
    }

    /// Save config to the saldo directory
    pub fn save(&self, saldo_dir: &Path) -> Result<()> {
        let settings_path = saldo_dir.join("settings.json");
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&settings_path, content)
            .with_context(|| format!("Failed to write {}", settings_path.display()))?;
        Ok(())
    }

    /// Check that the config is usable for API access
    pub fn validate(&self) -> crate::domain::result::Result<()> {
        if self.client_id.trim().is_empty() {
            return Err(Error::Config("clientId is not set".to_string()));
        }
        if self.client_secret.trim().is_empty() {
            return Err(Error::Config("clientSecret is not set".to_string()));
        }
        if self.customer_id.trim().is_empty() {
            return Err(Error::Config("customerId is not set".to_string()));
        }
        for (name, value) in [
            ("urlIdentityServer", &self.url_identity_server),
            ("urlApiBase", &self.url_api_base),
        ] {
            url::Url::parse(value)
                .map_err(|e| Error::Config(format!("{} is not a valid URL: {}", name, e)))?;
        }
        Ok(())
    }

    /// Scheduled refresh interval
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.update_interval)
    }

    /// Delay before retrying after a halted cycle
    pub fn error_retry(&self) -> Duration {
        Duration::from_secs(ERROR_RETRY_SECS)
    }

    /// Label for one account: alias override, or the fallback name
    pub fn account_label(&self, account_number: u64, fallback: &str) -> String {
        self.alias_for_account_labels
            .get(&account_number)
            .cloned()
            .unwrap_or_else(|| fallback.to_string())
    }
}
