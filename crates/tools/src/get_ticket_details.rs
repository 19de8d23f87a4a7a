//! Ticket details tool — fetches the full field block for one ticket.

use std::sync::Arc;

use async_trait::async_trait;
use jirabot_core::error::ToolError;
use jirabot_core::tool::{Tool, ToolResult};
use jirabot_core::tracker::{IssueDetails, Tracker};

pub struct GetTicketDetailsTool {
    tracker: Arc<dyn Tracker>,
}

impl GetTicketDetailsTool {
    pub fn new(tracker: Arc<dyn Tracker>) -> Self {
        Self { tracker }
    }
}

fn render(details: &IssueDetails) -> String {
    format!(
        "Key: {}\nSummary: {}\nStatus: {}\nPriority: {}\nAssignee: {}\nDue Date: {}\nDescription: {}",
        details.key,
        details.summary,
        details.status,
        details.priority,
        details.assignee.as_deref().unwrap_or("Unassigned"),
        details.due_date.as_deref().unwrap_or("None"),
        details.description.as_deref().unwrap_or("None"),
    )
}

#[async_trait]
impl Tool for GetTicketDetailsTool {
    fn name(&self) -> &str {
        "get_ticket_details"
    }

    fn description(&self) -> &str {
        "Retrieves full details for a specific ticket (e.g., KAN-123)."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "ticket_id": {
                    "type": "string",
                    "description": "The ticket key, e.g. KAN-123"
                }
            },
            "required": ["ticket_id"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let ticket_id = arguments["ticket_id"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("'ticket_id' must be a string".into()))?;

        let details = self
            .tracker
            .get_issue(ticket_id)
            .await
            .map_err(|e| ToolError::ExecutionFailed {
                tool_name: self.name().into(),
                reason: format!("Error getting ticket {ticket_id}: {e}"),
            })?;

        Ok(ToolResult::ok(render(&details)))
    }
}
