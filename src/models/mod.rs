// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod project;
pub mod token;

pub use project::{CurrentUser, Project, ProjectRef, ProjectUser};
pub use token::{TokenExchangeResponse, TokenInfo, TokenRecord};
