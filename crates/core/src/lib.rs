//! # Jirabot Core
//!
//! Domain types, traits, and error definitions for the Jirabot agent.
//! This crate has **zero framework dependencies** — it defines the domain
//! model that all other crates implement against.
//!
//! The seams are traits: `Provider` (LLM backend), `Tracker` (Jira client),
//! and `Tool` (operations the LLM may request). Implementations live in
//! their respective crates and are handed in as explicit `Arc` handles —
//! there is no ambient global state.

pub mod error;
pub mod message;
pub mod prompt;
pub mod provider;
pub mod tool;
pub mod tracker;

// Re-export key types at crate root for ergonomics
pub use error::{Error, ProviderError, Result, ToolError, TrackerError};
pub use message::{Conversation, ConversationId, Message, MessageToolCall, Role};
pub use provider::{Provider, ProviderRequest, ProviderResponse, ToolDefinition, Usage};
pub use tool::{Tool, ToolCall, ToolRegistry, ToolResult};
pub use tracker::{CreatedIssue, IssueDetails, IssueSummary, Project, Tracker, UserInfo};
