// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! 42 intranet API client.
//!
//! Handles:
//! - Bearer-authenticated GETs against the `v2` API
//! - Token introspection
//! - The OAuth authorization URL and code exchange
//!
//! Every failure (transport, non-2xx status, bad JSON) collapses into one
//! error string; nothing is retried and no timeouts are set.

use crate::error::AppError;
use crate::models::{TokenExchangeResponse, TokenInfo};
use axum::body::Bytes;
use serde::de::DeserializeOwned;

/// Scopes requested during authorization.
pub const OAUTH_SCOPE: &str = "public projects";

/// 42 intranet API client.
#[derive(Clone)]
pub struct IntraClient {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl IntraClient {
    /// Create a new client against `base_url` (e.g. `https://api.intra.42.fr`).
    pub fn new(
        base_url: impl Into<String>,
        client_id: String,
        client_secret: String,
        redirect_uri: String,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            client_id,
            client_secret,
            redirect_uri,
        }
    }

    /// GET `/v2/{suffix}` and return the body bytes untouched.
    ///
    /// Used for passthrough routes so key order and number formatting
    /// survive the round trip.
    pub async fn get_raw(&self, suffix: &str, access_token: &str) -> Result<Bytes, AppError> {
        let url = format!("{}/v2/{}", self.base_url, suffix);
        self.send_get(&url, access_token)
            .await?
            .bytes()
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))
    }

    /// GET `/v2/{suffix}` and deserialize the body.
    pub async fn get_as<T: DeserializeOwned>(
        &self,
        suffix: &str,
        access_token: &str,
    ) -> Result<T, AppError> {
        let url = format!("{}/v2/{}", self.base_url, suffix);
        self.get_json(&url, access_token).await
    }

    /// Introspect the access token (scopes, remaining lifetime).
    pub async fn token_info(&self, access_token: &str) -> Result<TokenInfo, AppError> {
        let url = format!("{}/oauth/token/info", self.base_url);
        self.get_json(&url, access_token)
            .await
            .map_err(|e| AppError::TokenInfo(e.to_string()))
    }

    /// Provider authorization URL the user is redirected to.
    ///
    /// No `state` parameter is sent.
    pub fn authorize_url(&self) -> String {
        format!(
            "{}/oauth/authorize?\
             client_id={}&\
             redirect_uri={}&\
             response_type=code&\
             scope={}",
            self.base_url,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(OAUTH_SCOPE),
        )
    }

    /// Exchange an authorization code for an access token.
    pub async fn exchange_code(&self, code: &str) -> Result<String, AppError> {
        let response = self
            .http
            .post(format!("{}/oauth/token", self.base_url))
            .form(&[
                ("grant_type", "authorization_code"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::TokenExchange(format!("Token exchange failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Token exchange rejected");
            return Err(AppError::TokenExchange(format!(
                "Token exchange failed with status {}",
                status
            )));
        }

        let token: TokenExchangeResponse = response.json().await.map_err(|e| {
            AppError::TokenExchange(format!("Failed to parse token response: {}", e))
        })?;

        tracing::debug!(
            token_type = ?token.token_type,
            expires_in = ?token.expires_in,
            scope = ?token.scope,
            "Token exchange succeeded"
        );

        Ok(token.access_token)
    }

    /// Generic GET request with JSON response.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        access_token: &str,
    ) -> Result<T, AppError> {
        self.send_get(url, access_token)
            .await?
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("JSON parse error: {}", e)))
    }

    /// Bearer-authenticated GET; non-2xx statuses become errors.
    async fn send_get(&self, url: &str, access_token: &str) -> Result<reqwest::Response, AppError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!("HTTP {}: {}", status, body)));
        }

        Ok(response)
    }
}
