// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Intra-Tracker: a small OAuth proxy in front of the 42 intranet API
//!
//! This crate stores a single user's access token, forwards a few `v2`
//! endpoints, and exports graded projects to a CSV file.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

use config::Config;
use services::{CsvExporter, IntraClient};
use store::TokenStore;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub token_store: TokenStore,
    pub intra: IntraClient,
    pub exporter: CsvExporter,
}

impl AppState {
    /// Build the state from configuration.
    pub fn from_config(config: Config) -> Self {
        let token_store = TokenStore::new(config.token_file.clone());
        let intra = IntraClient::new(
            config.api_url.clone(),
            config.client_id.clone(),
            config.client_secret.clone(),
            config.redirect_uri.clone(),
        );
        let exporter = CsvExporter::new(config.csv_file.clone(), config.export_interval);

        Self {
            config,
            token_store,
            intra,
            exporter,
        }
    }
}
