//! Search tool — runs a JQL query and summarizes the matching tickets.

use std::sync::Arc;

use async_trait::async_trait;
use jirabot_core::error::ToolError;
use jirabot_core::tool::{Tool, ToolResult};
use jirabot_core::tracker::Tracker;

pub struct SearchIssuesTool {
    tracker: Arc<dyn Tracker>,
    limit: u32,
}

impl SearchIssuesTool {
    pub fn new(tracker: Arc<dyn Tracker>, limit: u32) -> Self {
        Self { tracker, limit }
    }
}

#[async_trait]
impl Tool for SearchIssuesTool {
    fn name(&self) -> &str {
        "search_issues"
    }

    fn description(&self) -> &str {
        "Searches for tickets using JQL (Jira Query Language). Examples: \
         \"project = KAN AND priority = High\", \
         \"assignee = currentUser() AND resolution = Unresolved\""
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "jql": {
                    "type": "string",
                    "description": "The JQL query to run"
                }
            },
            "required": ["jql"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let jql = arguments["jql"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("'jql' must be a string".into()))?;

        let issues = self
            .tracker
            .search(jql, self.limit)
            .await
            .map_err(|e| ToolError::ExecutionFailed {
                tool_name: self.name().into(),
                reason: format!("JQL Error: {e}"),
            })?;

        if issues.is_empty() {
            return Ok(ToolResult::ok("No tickets found matching that query."));
        }

        let lines: Vec<String> = issues
            .iter()
            .map(|issue| {
                format!(
                    "[{}] {} (Status: {}, Priority: {})",
                    issue.key, issue.summary, issue.status, issue.priority
                )
            })
            .collect();
        Ok(ToolResult::ok(lines.join("\n")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeTracker;
    use jirabot_core::error::TrackerError;
    use jirabot_core::tracker::IssueSummary;

    fn issue(key: &str, summary: &str, status: &str, priority: &str) -> IssueSummary {
        IssueSummary {
            key: key.into(),
            summary: summary.into(),
            status: status.into(),
            priority: priority.into(),
        }
    }

    #[tokio::test]
    async fn formats_search_hits() {
        let tracker = FakeTracker {
            search_results: vec![
                issue("KAN-1", "Fix login bug", "In Progress", "High"),
                issue("KAN-5", "Rotate API keys", "To Do", "High"),
            ],
            ..FakeTracker::default()
        };
        let tracker = Arc::new(tracker);
        let tool = SearchIssuesTool::new(tracker.clone(), 10);

        let result = tool
            .execute(serde_json::json!({"jql": "project = KAN AND priority = High"}))
            .await
            .unwrap();

        assert_eq!(
            result.output,
            "[KAN-1] Fix login bug (Status: In Progress, Priority: High)\n\
             [KAN-5] Rotate API keys (Status: To Do, Priority: High)"
        );
        // The configured limit was forwarded to the tracker
        let recorded = tracker.recorded.lock().unwrap();
        assert_eq!(recorded[0], "search project = KAN AND priority = High limit=10");
    }

    #[tokio::test]
    async fn no_matches() {
        let tool = SearchIssuesTool::new(Arc::new(FakeTracker::default()), 10);
        let result = tool
            .execute(serde_json::json!({"jql": "project = KAN"}))
            .await
            .unwrap();
        assert_eq!(result.output, "No tickets found matching that query.");
    }

    #[tokio::test]
    async fn non_string_jql_rejected() {
        let tool = SearchIssuesTool::new(Arc::new(FakeTracker::default()), 10);
        let err = tool.execute(serde_json::json!({"jql": 42})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[tokio::test]
    async fn jql_error_surfaces_in_reason() {
        let tracker = FakeTracker::failing(TrackerError::Api {
            status_code: 400,
            message: "Field 'priorty' does not exist".into(),
        });
        let tool = SearchIssuesTool::new(Arc::new(tracker), 10);
        let err = tool
            .execute(serde_json::json!({"jql": "priorty = High"}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("JQL Error"));
        assert!(err.to_string().contains("priorty"));
    }
}
