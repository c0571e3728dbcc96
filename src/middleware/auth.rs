// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Stored-token middleware.

use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Access token loaded from the token store for the current request.
#[derive(Debug, Clone)]
pub struct AccessToken(pub String);

/// Middleware that requires a stored access token.
///
/// The token file is re-read on every request, so a fresh `/callback` takes
/// effect immediately.
pub async fn require_token(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let record = state
        .token_store
        .load()
        .await
        .filter(|record| !record.access_token.is_empty())
        .ok_or(AppError::MissingToken)?;

    request
        .extensions_mut()
        .insert(AccessToken(record.access_token));

    Ok(next.run(request).await)
}
