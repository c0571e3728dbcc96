//! OAuth token models (local record and upstream responses).

use serde::{Deserialize, Serialize};

/// The single persisted credential.
///
/// Stored on disk as `{"accessToken": "..."}`. There is no expiry field;
/// an expired token is only detected when the upstream rejects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

impl TokenRecord {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }
}

/// Response from `POST /oauth/token`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenExchangeResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// Response from `GET /oauth/token/info`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenInfo {
    #[serde(default)]
    pub scopes: Vec<String>,
    pub expires_in_seconds: i64,
}

impl TokenInfo {
    /// Remaining lifetime in minutes, formatted with two decimals.
    pub fn expires_in_minutes(&self) -> String {
        format!("{:.2}", self.expires_in_seconds as f64 / 60.0)
    }
}
