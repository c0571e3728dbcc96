// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default upstream host, serving both OAuth and the `v2` API.
pub const DEFAULT_API_URL: &str = "https://api.intra.42.fr";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// OAuth client ID
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// Fixed redirect URI registered with the provider
    pub redirect_uri: String,
    /// Address to bind
    pub bind_address: String,
    /// Server port
    pub port: u16,
    /// Upstream base URL (no trailing slash)
    pub api_url: String,
    /// Where the single token record lives
    pub token_file: PathBuf,
    /// Where exported project rows are appended
    pub csv_file: PathBuf,
    /// Minimum spacing between per-project upstream calls during export
    pub export_interval: Duration,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            client_id: "test_client_id".to_string(),
            client_secret: "test_secret".to_string(),
            redirect_uri: "http://localhost:3000/callback".to_string(),
            bind_address: "127.0.0.1".to_string(),
            port: 3000,
            api_url: DEFAULT_API_URL.to_string(),
            token_file: PathBuf::from("accessToken.json"),
            csv_file: PathBuf::from("projects.csv"),
            export_interval: Duration::from_millis(1000),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is read first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_process_env()
    }

    /// Build from the process environment only, without reading `.env`.
    fn from_process_env() -> Result<Self, ConfigError> {
        Ok(Self {
            client_id: env::var("CLIENT_ID").map_err(|_| ConfigError::Missing("CLIENT_ID"))?,
            client_secret: env::var("CLIENT_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("CLIENT_SECRET"))?,
            redirect_uri: env::var("REDIRECT_URI")
                .unwrap_or_else(|_| "http://localhost:3000/callback".to_string()),
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            api_url: env::var("INTRA_API_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            token_file: env::var("TOKEN_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("accessToken.json")),
            csv_file: env::var("CSV_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("projects.csv")),
            export_interval: Duration::from_millis(
                env::var("EXPORT_INTERVAL_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(1000),
            ),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
