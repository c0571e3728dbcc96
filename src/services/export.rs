// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Background CSV export of graded projects.
//!
//! The HTTP handler acknowledges immediately and hands the project list to
//! a detached task. The task walks the list strictly sequentially, paced by
//! a [`FixedInterval`] because the upstream enforces request-rate limits,
//! and appends one line per project with non-zero difficulty:
//!
//! ```text
//! <name>, , <difficulty>, <final_mark>
//! ```
//!
//! The middle field is always empty. The file is opened in append mode for
//! every row, so repeated exports accumulate duplicate rows.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::models::{Project, ProjectUser};
use crate::services::IntraClient;

/// Outcome counts for one export run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportReport {
    /// Rows written to the CSV file
    pub appended: usize,
    /// Projects skipped because their difficulty is 0
    pub skipped: usize,
    /// Projects that failed to fetch or write (logged, not retried)
    pub failed: usize,
}

/// Fixed-interval rate limiter: successive ticks are at least `period` apart.
///
/// The first tick returns immediately.
#[derive(Debug)]
pub struct FixedInterval {
    period: Duration,
    last: Option<Instant>,
}

impl FixedInterval {
    pub fn new(period: Duration) -> Self {
        Self { period, last: None }
    }

    /// Wait until the next call is allowed.
    pub async fn tick(&mut self) {
        if let Some(last) = self.last {
            tokio::time::sleep_until(last + self.period).await;
        }
        self.last = Some(Instant::now());
    }
}

enum RowOutcome {
    Appended,
    Skipped,
}

/// Appends project rows to a CSV file from a detached task.
#[derive(Clone)]
pub struct CsvExporter {
    path: PathBuf,
    interval: Duration,
    reports: Option<mpsc::UnboundedSender<ExportReport>>,
}

impl CsvExporter {
    pub fn new(path: impl Into<PathBuf>, interval: Duration) -> Self {
        Self {
            path: path.into(),
            interval,
            reports: None,
        }
    }

    /// Send an [`ExportReport`] on `sender` whenever a run finishes.
    pub fn with_reports(mut self, sender: mpsc::UnboundedSender<ExportReport>) -> Self {
        self.reports = Some(sender);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Start an export in the background.
    ///
    /// Callers may drop the handle; the task keeps running and cannot be
    /// cancelled through this API.
    pub fn spawn(
        &self,
        client: IntraClient,
        access_token: String,
        projects: Vec<ProjectUser>,
    ) -> JoinHandle<ExportReport> {
        let exporter = self.clone();
        tokio::spawn(async move {
            let report = exporter.run(&client, &access_token, &projects).await;
            if let Some(reports) = &exporter.reports {
                if reports.send(report).is_err() {
                    tracing::debug!("Export report receiver dropped");
                }
            }
            report
        })
    }

    /// Export every project in order. Per-item failures never stop the loop.
    pub async fn run(
        &self,
        client: &IntraClient,
        access_token: &str,
        projects: &[ProjectUser],
    ) -> ExportReport {
        let mut pacer = FixedInterval::new(self.interval);
        let mut report = ExportReport::default();

        tracing::info!(
            path = %self.path.display(),
            projects = projects.len(),
            "Starting CSV export"
        );

        for project_user in projects {
            pacer.tick().await;

            match self.export_one(client, access_token, project_user).await {
                Ok(RowOutcome::Appended) => report.appended += 1,
                Ok(RowOutcome::Skipped) => report.skipped += 1,
                Err(e) => {
                    tracing::warn!(
                        project_id = project_user.project.id,
                        project = %project_user.project.name,
                        error = %format!("{:#}", e),
                        "Failed to export project, continuing"
                    );
                    report.failed += 1;
                }
            }
        }

        tracing::info!(
            appended = report.appended,
            skipped = report.skipped,
            failed = report.failed,
            "CSV export finished"
        );

        report
    }

    async fn export_one(
        &self,
        client: &IntraClient,
        access_token: &str,
        project_user: &ProjectUser,
    ) -> anyhow::Result<RowOutcome> {
        let project_id = project_user.project.id;
        let project: Project = client
            .get_as(&format!("projects/{}", project_id), access_token)
            .await
            .with_context(|| format!("fetching project {}", project_id))?;

        let difficulty = project.difficulty();
        if difficulty == 0 {
            tracing::debug!(project = %project_user.project.name, "Skipping project with difficulty 0");
            return Ok(RowOutcome::Skipped);
        }

        let line = csv_line(&project_user.project.name, difficulty, project_user.mark());
        append_line(&self.path, &line)
            .await
            .with_context(|| format!("appending to {}", self.path.display()))?;

        tracing::info!(
            project = %project_user.project.name,
            difficulty,
            mark = project_user.mark(),
            "Project row written"
        );

        Ok(RowOutcome::Appended)
    }
}

/// Format one CSV row, including its trailing newline.
pub fn csv_line(name: &str, difficulty: i64, mark: i64) -> String {
    format!("{}, , {}, {}\n", name, difficulty, mark)
}

async fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(line.as_bytes()).await?;
    file.flush().await
}
