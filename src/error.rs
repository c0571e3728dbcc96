// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types and their HTTP responses.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::store::StoreError;

/// Login link shown whenever the user needs to (re)authenticate.
pub const LOGIN_LINK: &str = r#"<a href="/auth/42">Login via 42 OAuth</a>"#;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No access token found")]
    MissingToken,

    #[error("Token info unavailable: {0}")]
    TokenInfo(String),

    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    TokenExchange(String),

    #[error("Token store error: {0}")]
    Store(#[from] StoreError),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                Html(format!(
                    "<h1>Welcome to the App</h1>\n\
                     <p>No access token found. Please authenticate via {}.</p>",
                    LOGIN_LINK
                )),
            )
                .into_response(),
            AppError::TokenInfo(msg) => {
                tracing::error!(error = %msg, "Error fetching token info");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(format!(
                        "<h1>Welcome to the App</h1>\n\
                         <p>Error fetching token information. Please try to {} again.</p>",
                        LOGIN_LINK
                    )),
                )
                    .into_response()
            }
            AppError::Upstream(_) | AppError::TokenExchange(_) | AppError::Store(_) => {
                tracing::error!(error = %self, "Request failed");
                let body = ErrorResponse {
                    error: self.to_string(),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
