//! Due date tool — sets a ticket's due date.
//!
//! The date is validated syntactically before the network call; Jira
//! rejects anything that is not YYYY-MM-DD with an opaque 400, so a clear
//! local error gives the LLM something it can actually correct.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use jirabot_core::error::ToolError;
use jirabot_core::tool::{Tool, ToolResult};
use jirabot_core::tracker::Tracker;

pub struct UpdateDueDateTool {
    tracker: Arc<dyn Tracker>,
}

impl UpdateDueDateTool {
    pub fn new(tracker: Arc<dyn Tracker>) -> Self {
        Self { tracker }
    }
}

#[async_trait]
impl Tool for UpdateDueDateTool {
    fn name(&self) -> &str {
        "update_due_date"
    }

    fn description(&self) -> &str {
        "Updates the due date of a ticket. The date must be in YYYY-MM-DD format."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "ticket_id": {
                    "type": "string",
                    "description": "The ticket key, e.g. KAN-123"
                },
                "date": {
                    "type": "string",
                    "description": "The new due date in YYYY-MM-DD format"
                }
            },
            "required": ["ticket_id", "date"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let ticket_id = arguments["ticket_id"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("'ticket_id' must be a string".into()))?;
        let date = arguments["date"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("'date' must be a string".into()))?;

        NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
            ToolError::InvalidArguments(format!("'{date}' is not a valid YYYY-MM-DD date"))
        })?;

        self.tracker
            .update_field(ticket_id, "duedate", serde_json::json!(date))
            .await
            .map_err(|e| ToolError::ExecutionFailed {
                tool_name: self.name().into(),
                reason: format!("Error updating date: {e}"),
            })?;

        Ok(ToolResult::ok(format!(
            "Successfully updated due date of {ticket_id} to {date}."
        )))
    }
}
