//! List projects tool — enumerates the Jira projects visible to the user.

use std::sync::Arc;

use async_trait::async_trait;
use jirabot_core::error::ToolError;
use jirabot_core::tool::{Tool, ToolResult};
use jirabot_core::tracker::Tracker;

pub struct ListProjectsTool {
    tracker: Arc<dyn Tracker>,
}

impl ListProjectsTool {
    pub fn new(tracker: Arc<dyn Tracker>) -> Self {
        Self { tracker }
    }
}

#[async_trait]
impl Tool for ListProjectsTool {
    fn name(&self) -> &str {
        "list_projects"
    }

    fn description(&self) -> &str {
        "Retrieves a list of all Jira projects visible to the user. \
         Use this to find Project Keys."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let projects = self
            .tracker
            .list_projects()
            .await
            .map_err(|e| ToolError::ExecutionFailed {
                tool_name: self.name().into(),
                reason: e.to_string(),
            })?;

        if projects.is_empty() {
            return Ok(ToolResult::ok("No projects found."));
        }

        let lines: Vec<String> = projects
            .iter()
            .map(|p| format!("{} (Key: {})", p.name, p.key))
            .collect();
        Ok(ToolResult::ok(lines.join("\n")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeTracker;
    use jirabot_core::error::TrackerError;
    use jirabot_core::tracker::Project;

    #[tokio::test]
    async fn formats_projects_as_name_and_key() {
        let tracker = FakeTracker {
            projects: vec![
                Project {
                    key: "KAN".into(),
                    name: "Kanban Project".into(),
                },
                Project {
                    key: "OPS".into(),
                    name: "Operations".into(),
                },
            ],
            ..FakeTracker::default()
        };
        let tool = ListProjectsTool::new(Arc::new(tracker));

        let result = tool.execute(serde_json::json!({})).await.unwrap();
        assert!(result.success);
        assert_eq!(result.output, "Kanban Project (Key: KAN)\nOperations (Key: OPS)");
    }

    #[tokio::test]
    async fn empty_project_list() {
        let tool = ListProjectsTool::new(Arc::new(FakeTracker::default()));
        let result = tool.execute(serde_json::json!({})).await.unwrap();
        assert_eq!(result.output, "No projects found.");
    }

    #[tokio::test]
    async fn tracker_failure_becomes_tool_error() {
        let tracker = FakeTracker::failing(TrackerError::Network("connection refused".into()));
        let tool = ListProjectsTool::new(Arc::new(tracker));
        let err = tool.execute(serde_json::json!({})).await.unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }
}
