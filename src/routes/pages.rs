// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTML status page.

use crate::error::Result;
use crate::middleware::auth::AccessToken;
use crate::models::TokenInfo;
use crate::AppState;
use axum::{extract::State, response::Html, routing::get, Extension, Router};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/", get(status_page))
}

/// Show token status and links to the other routes.
async fn status_page(
    State(state): State<Arc<AppState>>,
    Extension(AccessToken(token)): Extension<AccessToken>,
) -> Result<Html<String>> {
    let info = state.intra.token_info(&token).await?;
    Ok(Html(render_status(&info)))
}

fn render_status(info: &TokenInfo) -> String {
    format!(
        "<h1>Welcome to the App</h1>\n\
         <p>Token Status: Active</p>\n\
         <p>Scope: {}</p>\n\
         <p>Expires in: {} minutes</p>\n\
         <ul>\n\
         <li><a href=\"/my_projects\">My projects</a></li>\n\
         <li><a href=\"/tokenizer\">Tokenizer</a></li>\n\
         <li><a href=\"/me\">Me</a></li>\n\
         <li><a href=\"/generate_csv\">Generate csv</a></li>\n\
         </ul>",
        info.scopes.join(", "),
        info.expires_in_minutes(),
    )
}
