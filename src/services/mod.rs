// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - upstream access and background work.

pub mod export;
pub mod intra;

pub use export::{CsvExporter, ExportReport, FixedInterval};
pub use intra::IntraClient;
