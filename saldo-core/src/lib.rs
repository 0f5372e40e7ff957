//! Saldo Core - refresh pipeline and formatting for the bank dashboard
//!
//! This crate implements the dashboard's logic following hexagonal
//! architecture:
//!
//! - **domain**: Core entities (Account, Payment, Transaction, snapshot)
//! - **ports**: Trait definition for the bank data source
//! - **services**: Refresh pipeline and the pure presentation formatter
//! - **adapters**: The Sbanken HTTP client
//!
//! One refresh cycle is four strictly sequential stages (token, accounts,
//! payments, transactions); the per-account payment and transaction
//! requests inside a stage run concurrently. Every cycle rebuilds the
//! whole snapshot from scratch; nothing is persisted.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::sync::Arc;

use anyhow::Result;

// Re-export commonly used types at crate root
pub use adapters::SbankenClient;
pub use config::Config;
pub use domain::result::Error;
pub use domain::{Account, BearerToken, Payment, RefreshSnapshot, Transaction};
pub use services::{Line, RefreshService, Renderer};

/// Build the refresh service for a validated config, wired to the live
/// HTTP client
pub fn live_refresh_service(config: &Config) -> Result<RefreshService> {
    config.validate()?;
    let client = Arc::new(SbankenClient::new(config)?);
    Ok(RefreshService::new(client, config.clone()))
}
