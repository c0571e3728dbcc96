//! Project shapes returned by the 42 intranet API.
//!
//! Only the fields the CSV export needs are modelled; passthrough routes
//! forward raw JSON instead.

use serde::Deserialize;

/// Subset of `GET /v2/me` used by the export.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentUser {
    #[serde(default)]
    pub projects_users: Vec<ProjectUser>,
}

/// Association between the user and a project.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectUser {
    /// Null until the project is graded
    #[serde(default)]
    pub final_mark: Option<i64>,
    pub project: ProjectRef,
}

impl ProjectUser {
    /// Final mark, with ungraded projects reported as 0.
    pub fn mark(&self) -> i64 {
        self.final_mark.unwrap_or(0)
    }
}

/// Project reference embedded in a `projects_users` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectRef {
    pub id: u64,
    pub name: String,
}

/// Subset of `GET /v2/projects/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    /// 0 marks projects that carry no experience (piscine days, exams...).
    #[serde(default)]
    pub difficulty: Option<i64>,
}

impl Project {
    /// Difficulty, with a missing or null value reported as 0.
    pub fn difficulty(&self) -> i64 {
        self.difficulty.unwrap_or(0)
    }
}
