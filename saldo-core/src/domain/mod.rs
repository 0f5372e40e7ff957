//! Core domain models

pub mod account;
pub mod payment;
pub mod result;
pub mod snapshot;
pub mod token;
pub mod transaction;

pub use account::Account;
pub use payment::Payment;
pub use snapshot::RefreshSnapshot;
pub use token::BearerToken;
pub use transaction::Transaction;
