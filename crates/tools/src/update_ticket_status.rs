//! Status update tool — moves a ticket through its workflow.

use std::sync::Arc;

use async_trait::async_trait;
use jirabot_core::error::ToolError;
use jirabot_core::tool::{Tool, ToolResult};
use jirabot_core::tracker::Tracker;

pub struct UpdateTicketStatusTool {
    tracker: Arc<dyn Tracker>,
}

impl UpdateTicketStatusTool {
    pub fn new(tracker: Arc<dyn Tracker>) -> Self {
        Self { tracker }
    }
}

#[async_trait]
impl Tool for UpdateTicketStatusTool {
    fn name(&self) -> &str {
        "update_ticket_status"
    }

    fn description(&self) -> &str {
        "Updates the status of a ticket (e.g., 'Done', 'In Progress')."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "ticket_id": {
                    "type": "string",
                    "description": "The ticket key, e.g. KAN-123"
                },
                "new_status": {
                    "type": "string",
                    "description": "The target status name, e.g. 'Done'"
                }
            },
            "required": ["ticket_id", "new_status"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let ticket_id = arguments["ticket_id"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("'ticket_id' must be a string".into()))?;
        let new_status = arguments["new_status"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("'new_status' must be a string".into()))?;

        self.tracker
            .set_status(ticket_id, new_status)
            .await
            .map_err(|e| ToolError::ExecutionFailed {
                tool_name: self.name().into(),
                reason: format!("Error updating status: {e}"),
            })?;

        Ok(ToolResult::ok(format!(
            "Successfully updated {ticket_id} to {new_status}."
        )))
    }
}
