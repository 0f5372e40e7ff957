//! Adapters - concrete implementations of the ports

pub mod sbanken;

pub use sbanken::SbankenClient;
