//! Tracker trait — the abstraction over the issue-tracking service.
//!
//! The tools only ever talk to the tracker through this trait, which keeps
//! them testable with an in-memory fake and keeps the REST plumbing in one
//! crate. Every call is fallible; mutating calls (create, update) are not
//! idempotent and no deduplication is attempted.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::TrackerError;

/// The authenticated user, returned by the startup connectivity check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub display_name: String,
}

/// A project visible to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub key: String,
    pub name: String,
}

/// A search hit: the fields shown in ticket listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSummary {
    pub key: String,
    pub summary: String,
    pub status: String,
    pub priority: String,
}

/// Full details for a single ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueDetails {
    pub key: String,
    pub summary: String,
    pub status: String,
    pub priority: String,
    pub assignee: Option<String>,
    pub due_date: Option<String>,
    pub description: Option<String>,
}

/// A freshly created ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedIssue {
    pub key: String,
}

/// The issue-tracker collaborator.
///
/// Implemented for Jira Cloud in `jirabot-tracker`; tests implement it
/// with in-memory fakes.
#[async_trait]
pub trait Tracker: Send + Sync {
    /// Who am I authenticated as? Used as the startup connectivity check.
    async fn current_user(&self) -> Result<UserInfo, TrackerError>;

    /// All projects visible to the user.
    async fn list_projects(&self) -> Result<Vec<Project>, TrackerError>;

    /// Search tickets with a JQL query, up to `limit` results.
    async fn search(&self, jql: &str, limit: u32) -> Result<Vec<IssueSummary>, TrackerError>;

    /// Full details for one ticket (e.g., "KAN-123").
    async fn get_issue(&self, key: &str) -> Result<IssueDetails, TrackerError>;

    /// Move a ticket to a new workflow status by status name.
    async fn set_status(&self, key: &str, status_name: &str) -> Result<(), TrackerError>;

    /// Set a single field on a ticket (e.g., "duedate" → "2026-09-04").
    async fn update_field(
        &self,
        key: &str,
        field: &str,
        value: serde_json::Value,
    ) -> Result<(), TrackerError>;

    /// Create a ticket in the given project.
    async fn create_issue(
        &self,
        project_key: &str,
        summary: &str,
        issue_type: &str,
        description: &str,
    ) -> Result<CreatedIssue, TrackerError>;
}
