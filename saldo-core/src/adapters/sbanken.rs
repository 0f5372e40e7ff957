//! Sbanken API client
//!
//! Handles communication with the bank's identity server and REST API.
//! Wire structs are private to this module; everything crossing the
//! adapter boundary is a domain type.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use url::Url;

use crate::config::Config;
use crate::domain::result::{Error, Result};
use crate::domain::{Account, BearerToken, Payment, Transaction};
use crate::ports::BankDataProvider;

/// Sbanken API client
#[derive(Debug)]
pub struct SbankenClient {
    client: Client,
    identity_url: String,
    api_base: String,
    client_id: String,
    client_secret: String,
    customer_id: String,
}

/// List envelope used by all collection endpoints
#[derive(Debug, Deserialize)]
struct ItemsEnvelope<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireAccount {
    account_id: String,
    account_number: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    account_type: String,
    balance: Decimal,
    #[serde(default)]
    available: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePayment {
    due_date: NaiveDate,
    amount: Decimal,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireTransaction {
    interest_date: NaiveDate,
    #[serde(default)]
    accounting_date: Option<NaiveDate>,
    #[serde(default)]
    text: String,
    amount: Decimal,
    #[serde(default)]
    transaction_type: Option<String>,
    #[serde(default)]
    source: Option<String>,
}

impl SbankenClient {
    /// Create a new client from config
    ///
    /// Validates both endpoint URLs up front so a typo fails at startup
    /// rather than on the first scheduled cycle.
    pub fn new(config: &Config) -> Result<Self> {
        for (name, value) in [
            ("urlIdentityServer", &config.url_identity_server),
            ("urlApiBase", &config.url_api_base),
        ] {
            let parsed = Url::parse(value)
                .map_err(|e| Error::Config(format!("{} is not a valid URL: {}", name, e)))?;
            if parsed.scheme() != "https" && parsed.scheme() != "http" {
                return Err(Error::Config(format!(
                    "{} must be an http(s) URL",
                    name
                )));
            }
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Transport(format!("Failed to build HTTP client: {}", e)))?;

        // The accounts/payments/transactions endpoints all hang off the base
        let api_base = config.url_api_base.trim_end_matches('/').to_string();

        Ok(Self {
            client,
            identity_url: config.url_identity_server.clone(),
            api_base,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            customer_id: config.customer_id.clone(),
        })
    }

    /// Issue an authenticated GET and parse the `{items: [...]}` envelope
    async fn get_items<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        token: &BearerToken,
    ) -> Result<Vec<T>> {
        let response = self
            .client
            .get(url)
            .header("Authorization", token.authorization_header())
            .header("customerId", &self.customer_id)
            .send()
            .await
            .map_err(map_request_error)?;

        check_response_status(&response)?;

        let envelope: ItemsEnvelope<T> = response
            .json()
            .await
            .map_err(|e| Error::Malformed(format!("Failed to parse response: {}", e)))?;
        Ok(envelope.items)
    }

    fn map_account(wire: WireAccount) -> Result<Account> {
        let account_number = wire
            .account_number
            .trim()
            .parse::<u64>()
            .map_err(|_| {
                Error::Malformed(format!(
                    "Account number is not numeric: {:?}",
                    wire.account_number
                ))
            })?;

        Ok(Account {
            account_id: wire.account_id,
            account_number,
            name: wire.name,
            account_type: wire.account_type,
            balance: wire.balance,
            available: wire.available,
        })
    }
}

#[async_trait]
impl BankDataProvider for SbankenClient {
    async fn fetch_token(&self) -> Result<BearerToken> {
        let form = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("grant_type", "client_credentials"),
        ];

        let response = self
            .client
            .post(&self.identity_url)
            .form(&form)
            .send()
            .await
            .map_err(map_request_error)?;

        check_response_status(&response)?;

        response
            .json::<BearerToken>()
            .await
            .map_err(|e| Error::Malformed(format!("Failed to parse token payload: {}", e)))
    }

    async fn fetch_accounts(&self, token: &BearerToken) -> Result<Vec<Account>> {
        let url = format!("{}/Accounts", self.api_base);
        let wires: Vec<WireAccount> = self.get_items(&url, token).await?;
        wires.into_iter().map(Self::map_account).collect()
    }

    async fn fetch_payments(
        &self,
        token: &BearerToken,
        account_id: &str,
    ) -> Result<Vec<Payment>> {
        let url = format!("{}/Payments/{}", self.api_base, account_id);
        let wires: Vec<WirePayment> = self.get_items(&url, token).await?;
        Ok(wires
            .into_iter()
            .map(|w| Payment {
                due_date: w.due_date,
                amount: w.amount,
                text: w.text,
            })
            .collect())
    }

    async fn fetch_transactions(
        &self,
        token: &BearerToken,
        account_id: &str,
    ) -> Result<Vec<Transaction>> {
        let url = format!("{}/Transactions/{}", self.api_base, account_id);
        let wires: Vec<WireTransaction> = self.get_items(&url, token).await?;
        Ok(wires
            .into_iter()
            .map(|w| Transaction {
                interest_date: w.interest_date,
                accounting_date: w.accounting_date,
                text: w.text,
                amount: w.amount,
                transaction_type: w.transaction_type,
                source: w.source,
            })
            .collect())
    }
}

/// Map request errors to the domain error type
fn map_request_error(error: reqwest::Error) -> Error {
    if error.is_timeout() {
        Error::Transport("Connection timed out after 30 seconds".to_string())
    } else if error.is_connect() {
        Error::Transport("Unable to connect to the bank API".to_string())
    } else {
        Error::Transport(format!("Request failed: {}", error))
    }
}

/// Check response status; only 200 passes
fn check_response_status(response: &reqwest::Response) -> Result<()> {
    match response.status().as_u16() {
        200 => Ok(()),
        status => Err(Error::from_status(status)),
    }
}
