//! Tool dispatch — turns the LLM's requested tool calls into tool results.
//!
//! The LLM's tool-call payload is untrusted wire data: tool names may not
//! exist and arguments may be malformed JSON. Nothing here is allowed to
//! fail the batch — every call produces exactly one result message, in
//! call order, and failures are flattened into text the LLM can read and
//! recover from on its next decide step.

use jirabot_core::error::ToolError;
use jirabot_core::message::{Message, MessageToolCall};
use jirabot_core::tool::{ToolCall, ToolRegistry};
use tracing::{debug, warn};

/// Execute the tool calls from one assistant turn, sequentially.
///
/// Returns one `Role::Tool` message per call, order-preserving. Infallible
/// by design: a missing tool or a failing execution must not abort sibling
/// calls in the same batch.
pub async fn execute_calls(registry: &ToolRegistry, calls: &[MessageToolCall]) -> Vec<Message> {
    let mut results = Vec::with_capacity(calls.len());

    for requested in calls {
        debug!(tool = %requested.name, call_id = %requested.id, "Executing tool call");
        let output = run_one(registry, requested).await;
        results.push(Message::tool_result(&requested.id, output));
    }

    results
}

async fn run_one(registry: &ToolRegistry, requested: &MessageToolCall) -> String {
    // The arguments arrive as a raw JSON string; an empty string is what
    // some backends send for zero-argument tools.
    let arguments = if requested.arguments.trim().is_empty() {
        serde_json::Value::Object(serde_json::Map::new())
    } else {
        match serde_json::from_str(&requested.arguments) {
            Ok(value) => value,
            Err(e) => {
                warn!(tool = %requested.name, error = %e, "Malformed tool arguments");
                return format!(
                    "Error: arguments for tool '{}' are not valid JSON: {e}",
                    requested.name
                );
            }
        }
    };

    let call = ToolCall {
        id: requested.id.clone(),
        name: requested.name.clone(),
        arguments,
    };

    match registry.execute(&call).await {
        Ok(result) => result.output,
        Err(ToolError::NotFound(name)) => {
            warn!(tool = %name, "LLM requested an unknown tool");
            format!(
                "Error: tool '{name}' is not available. Available tools: {}",
                registry.names().join(", ")
            )
        }
        Err(e) => {
            warn!(tool = %requested.name, error = %e, "Tool execution failed");
            format!("Error: {e}")
        }
    }
}
