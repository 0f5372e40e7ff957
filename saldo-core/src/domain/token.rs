//! Bearer token domain model

use serde::{Deserialize, Serialize};

/// Bearer token from the bank's identity server
///
/// Treated as opaque: no expiry tracking, a fresh token is fetched
/// unconditionally at the start of every refresh cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BearerToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: u64,
}

impl BearerToken {
    /// Value for the `Authorization` header
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}
