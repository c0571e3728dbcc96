// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Upstream passthrough and export routes (stored token required).

use crate::error::Result;
use crate::middleware::auth::AccessToken;
use crate::models::CurrentUser;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Extension, Router,
};
use std::sync::Arc;

/// Project served by `/tokenizer`.
const TOKENIZER_PROJECT_ID: u64 = 2485;

/// API routes. The token middleware is applied in routes/mod.rs.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/me", get(get_me))
        .route("/my_projects", get(get_my_projects))
        .route("/tokenizer", get(get_tokenizer))
        .route("/generate_csv", get(generate_csv))
}

/// Upstream JSON body, byte for byte.
fn passthrough(body: Bytes) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

/// Current user, verbatim.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(AccessToken(token)): Extension<AccessToken>,
) -> Result<Response> {
    Ok(passthrough(state.intra.get_raw("me", &token).await?))
}

/// Current user's projects, verbatim.
async fn get_my_projects(
    State(state): State<Arc<AppState>>,
    Extension(AccessToken(token)): Extension<AccessToken>,
) -> Result<Response> {
    Ok(passthrough(state.intra.get_raw("me/projects", &token).await?))
}

async fn get_tokenizer(
    State(state): State<Arc<AppState>>,
    Extension(AccessToken(token)): Extension<AccessToken>,
) -> Result<Response> {
    let path = format!("projects/{}", TOKENIZER_PROJECT_ID);
    Ok(passthrough(state.intra.get_raw(&path, &token).await?))
}

/// Start a CSV export of the user's projects.
///
/// Only the initial `me` lookup can fail the request. The export itself
/// runs detached and the response is sent before it finishes.
async fn generate_csv(
    State(state): State<Arc<AppState>>,
    Extension(AccessToken(token)): Extension<AccessToken>,
) -> Result<&'static str> {
    let me: CurrentUser = state.intra.get_as("me", &token).await?;

    tracing::info!(
        projects = me.projects_users.len(),
        "Queueing CSV export"
    );

    // Detached: dropping the handle does not cancel the task.
    let _ = state
        .exporter
        .spawn(state.intra.clone(), token, me.projects_users);

    Ok("Generating CSV...")
}
