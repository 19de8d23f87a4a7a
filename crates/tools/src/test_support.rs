//! An in-memory `Tracker` for tool unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use jirabot_core::error::TrackerError;
use jirabot_core::tracker::{
    CreatedIssue, IssueDetails, IssueSummary, Project, Tracker, UserInfo,
};

/// A scriptable fake tracker. Mutating calls are recorded so tests can
/// assert on what was sent; setting `fail_with` makes every call fail.
#[derive(Default)]
pub struct FakeTracker {
    pub projects: Vec<Project>,
    pub search_results: Vec<IssueSummary>,
    pub issues: HashMap<String, IssueDetails>,
    pub fail_with: Option<TrackerError>,
    pub recorded: Mutex<Vec<String>>,
}

impl FakeTracker {
    pub fn failing(error: TrackerError) -> Self {
        Self {
            fail_with: Some(error),
            ..Self::default()
        }
    }

    fn check_fail(&self) -> Result<(), TrackerError> {
        match &self.fail_with {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    fn record(&self, entry: String) {
        self.recorded.lock().unwrap().push(entry);
    }
}

#[async_trait]
impl Tracker for FakeTracker {
    async fn current_user(&self) -> Result<UserInfo, TrackerError> {
        self.check_fail()?;
        Ok(UserInfo {
            display_name: "Test User".into(),
        })
    }

    async fn list_projects(&self) -> Result<Vec<Project>, TrackerError> {
        self.check_fail()?;
        Ok(self.projects.clone())
    }

    async fn search(&self, jql: &str, limit: u32) -> Result<Vec<IssueSummary>, TrackerError> {
        self.check_fail()?;
        self.record(format!("search {jql} limit={limit}"));
        Ok(self.search_results.clone())
    }

    async fn get_issue(&self, key: &str) -> Result<IssueDetails, TrackerError> {
        self.check_fail()?;
        self.issues
            .get(key)
            .cloned()
            .ok_or_else(|| TrackerError::NotFound(format!("Issue {key} does not exist")))
    }

    async fn set_status(&self, key: &str, status_name: &str) -> Result<(), TrackerError> {
        self.check_fail()?;
        self.record(format!("set_status {key} {status_name}"));
        Ok(())
    }

    async fn update_field(
        &self,
        key: &str,
        field: &str,
        value: serde_json::Value,
    ) -> Result<(), TrackerError> {
        self.check_fail()?;
        self.record(format!("update_field {key} {field}={value}"));
        Ok(())
    }

    async fn create_issue(
        &self,
        project_key: &str,
        summary: &str,
        issue_type: &str,
        _description: &str,
    ) -> Result<CreatedIssue, TrackerError> {
        self.check_fail()?;
        self.record(format!("create_issue {project_key} {issue_type} {summary}"));
        Ok(CreatedIssue {
            key: format!("{project_key}-100"),
        })
    }
}
