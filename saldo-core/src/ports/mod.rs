//! Ports - trait definitions for external dependencies

pub mod bank_provider;

pub use bank_provider::BankDataProvider;
