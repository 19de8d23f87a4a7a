//! The agent loop implementation.

use std::sync::Arc;

use chrono::Utc;
use jirabot_core::message::Conversation;
use jirabot_core::prompt;
use jirabot_core::provider::{Provider, ProviderRequest};
use jirabot_core::tool::ToolRegistry;
use tracing::{debug, info, warn};

use crate::dispatch;

/// What the agent says when the cycle guard trips.
const MAX_CYCLES_MESSAGE: &str =
    "I've reached the maximum number of tool call cycles for this request. \
     Please rephrase or break the request into smaller steps.";

/// The agent loop: alternates LLM decisions with tool execution until the
/// LLM produces a final answer.
pub struct AgentLoop {
    /// The LLM provider to use
    provider: Arc<dyn Provider>,

    /// The model to use
    model: String,

    /// Temperature setting
    temperature: f32,

    /// Default max tokens per response
    max_tokens: Option<u32>,

    /// Tool registry (read-only, shared)
    tools: Arc<ToolRegistry>,

    /// Project key embedded in the system prompt
    project_key: String,

    /// Maximum decide/dispatch cycles per user turn
    max_cycles: u32,
}

impl AgentLoop {
    /// Create a new agent loop.
    pub fn new(
        provider: Arc<dyn Provider>,
        model: impl Into<String>,
        temperature: f32,
        tools: Arc<ToolRegistry>,
        project_key: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
            max_tokens: None,
            tools,
            project_key: project_key.into(),
            max_cycles: 10,
        }
    }

    /// Set the maximum number of decide/dispatch cycles per turn.
    pub fn with_max_cycles(mut self, max: u32) -> Self {
        self.max_cycles = max.max(1);
        self
    }

    /// Set the default max tokens per LLM response.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Run one user turn to completion.
    ///
    /// The caller appends the user message before calling this. On success
    /// the final assistant message has been appended and its text is
    /// returned. On a provider failure the error propagates and the
    /// conversation is exactly as it was before the failed decide step —
    /// no partial assistant message is recorded, so the session stays
    /// usable for the next turn.
    pub async fn process(
        &self,
        conversation: &mut Conversation,
    ) -> Result<String, jirabot_core::Error> {
        info!(
            conversation_id = %conversation.id,
            messages = conversation.messages.len(),
            "Processing turn"
        );

        let tool_definitions = self.tools.definitions();
        let mut cycle = 0;

        loop {
            cycle += 1;
            if cycle > self.max_cycles {
                warn!(
                    conversation_id = %conversation.id,
                    cycles = self.max_cycles,
                    "Max tool cycles reached, ending turn"
                );
                conversation.push(jirabot_core::Message::assistant(MAX_CYCLES_MESSAGE));
                return Ok(MAX_CYCLES_MESSAGE.into());
            }

            debug!(conversation_id = %conversation.id, cycle, "Decide step");

            // The system message is rebuilt every cycle and never stored in
            // the log, so its embedded date is always the real current date.
            let system = prompt::system_message(Utc::now().date_naive(), &self.project_key);
            let mut messages = Vec::with_capacity(conversation.messages.len() + 1);
            messages.push(system);
            messages.extend(conversation.messages.iter().cloned());

            let request = ProviderRequest {
                model: self.model.clone(),
                messages,
                temperature: self.temperature,
                max_tokens: self.max_tokens,
                tools: tool_definitions.clone(),
            };

            // A failure here aborts the turn with the conversation untouched
            // since the last append.
            let response = self.provider.complete(request).await?;

            if !response.message.requests_tools() {
                let text = response.message.content.clone();
                conversation.push(response.message);
                return Ok(text);
            }

            debug!(
                tool_count = response.message.tool_calls.len(),
                "Dispatching tool calls"
            );

            let calls = response.message.tool_calls.clone();
            conversation.push(response.message);

            for result in dispatch::execute_calls(&self.tools, &calls).await {
                conversation.push(result);
            }
            // Loop back — the LLM sees the tool results on the next decide.
        }
    }
}
