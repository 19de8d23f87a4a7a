//! Create ticket tool — files a new ticket in the configured project.

use std::sync::Arc;

use async_trait::async_trait;
use jirabot_core::error::ToolError;
use jirabot_core::tool::{Tool, ToolResult};
use jirabot_core::tracker::Tracker;

pub struct CreateTicketTool {
    tracker: Arc<dyn Tracker>,
    project_key: String,
    description: String,
}

impl CreateTicketTool {
    pub fn new(tracker: Arc<dyn Tracker>, project_key: impl Into<String>) -> Self {
        let project_key = project_key.into();
        let description = format!("Creates a new ticket in the {project_key} project.");
        Self {
            tracker,
            project_key,
            description,
        }
    }
}

#[async_trait]
impl Tool for CreateTicketTool {
    fn name(&self) -> &str {
        "create_ticket"
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "summary": {
                    "type": "string",
                    "description": "One-line ticket title"
                },
                "issue_type": {
                    "type": "string",
                    "description": "Issue type name (e.g. Task, Bug, Story). Defaults to Task.",
                    "default": "Task"
                },
                "description": {
                    "type": "string",
                    "description": "Optional longer description",
                    "default": ""
                }
            },
            "required": ["summary"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let summary = arguments["summary"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("'summary' must be a string".into()))?;
        let issue_type = arguments["issue_type"].as_str().unwrap_or("Task");
        let description = arguments["description"].as_str().unwrap_or("");

        let created = self
            .tracker
            .create_issue(&self.project_key, summary, issue_type, description)
            .await
            .map_err(|e| ToolError::ExecutionFailed {
                tool_name: self.name().into(),
                reason: format!("Error creating ticket: {e}"),
            })?;

        Ok(ToolResult::ok(format!(
            "Created ticket {}: {summary}",
            created.key
        )))
    }
}
