// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! 42 OAuth authentication routes.

use axum::{
    extract::{Query, State},
    response::Redirect,
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::TokenRecord;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/42", get(auth_start))
        .route("/callback", get(auth_callback))
}

/// Start OAuth flow - redirect to the 42 authorization page.
async fn auth_start(State(state): State<Arc<AppState>>) -> Redirect {
    tracing::info!(
        client_id = %state.config.client_id,
        redirect_uri = %state.config.redirect_uri,
        "Starting OAuth flow, redirecting to 42"
    );

    Redirect::temporary(&state.intra.authorize_url())
}

#[derive(Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

/// OAuth callback - exchange code for a token, store it, go home.
async fn auth_callback(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CallbackParams>,
) -> Result<Redirect> {
    // Check for OAuth errors
    if let Some(error) = params.error {
        tracing::warn!(error = %error, "OAuth error from 42");
        let message = match params.error_description {
            Some(description) => format!("{}: {}", error, description),
            None => error,
        };
        return Err(AppError::TokenExchange(message));
    }

    let code = params
        .code
        .ok_or_else(|| AppError::TokenExchange("Missing authorization code".to_string()))?;

    tracing::info!("Exchanging authorization code for token");
    let access_token = state.intra.exchange_code(&code).await?;

    state
        .token_store
        .save(&TokenRecord::new(access_token))
        .await?;

    Ok(Redirect::temporary("/"))
}
