//! The Jira tools exposed to the LLM.
//!
//! Each tool wraps one tracker operation behind the `Tool` trait: a name,
//! a description the LLM reads when deciding what to call, a JSON-Schema
//! argument contract, and the call itself. Tools hold the tracker as an
//! explicit `Arc<dyn Tracker>` handle — no ambient client state.

pub mod create_ticket;
pub mod get_ticket_details;
pub mod list_projects;
pub mod search_issues;
pub mod update_due_date;
pub mod update_ticket_status;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

use jirabot_core::tool::ToolRegistry;
use jirabot_core::tracker::Tracker;

/// Build the registry with the full Jira tool catalog.
///
/// `project_key` scopes ticket creation; `search_limit` caps JQL results.
/// The registry is created once at startup and never mutated afterwards.
pub fn default_registry(
    tracker: Arc<dyn Tracker>,
    project_key: &str,
    search_limit: u32,
) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(list_projects::ListProjectsTool::new(
        tracker.clone(),
    )));
    registry.register(Box::new(search_issues::SearchIssuesTool::new(
        tracker.clone(),
        search_limit,
    )));
    registry.register(Box::new(get_ticket_details::GetTicketDetailsTool::new(
        tracker.clone(),
    )));
    registry.register(Box::new(update_ticket_status::UpdateTicketStatusTool::new(
        tracker.clone(),
    )));
    registry.register(Box::new(update_due_date::UpdateDueDateTool::new(
        tracker.clone(),
    )));
    registry.register(Box::new(create_ticket::CreateTicketTool::new(
        tracker,
        project_key,
    )));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_support::FakeTracker;

    #[test]
    fn registry_contains_all_six_tools() {
        let tracker = Arc::new(FakeTracker::default());
        let registry = default_registry(tracker, "KAN", 10);
        for name in [
            "list_projects",
            "search_issues",
            "get_ticket_details",
            "update_ticket_status",
            "update_due_date",
            "create_ticket",
        ] {
            assert!(registry.get(name).is_some(), "missing tool {name}");
        }
        assert_eq!(registry.names().len(), 6);
    }

    #[test]
    fn every_tool_schema_is_an_object() {
        let tracker = Arc::new(FakeTracker::default());
        let registry = default_registry(tracker, "KAN", 10);
        for def in registry.definitions() {
            assert_eq!(
                def.parameters["type"].as_str(),
                Some("object"),
                "schema for {} is not an object",
                def.name
            );
            assert!(!def.description.is_empty());
        }
    }
}
