//! Error types for the Jirabot domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error enum; the propagation policy is:
//!
//! - `ToolError` and `TrackerError` are recovered locally — the dispatcher
//!   flattens them into tool-result text so the LLM sees failures as data.
//! - `ProviderError` aborts the current turn (nothing is appended to the
//!   conversation by the failed decide step); the session stays usable.
//! - `ConfigError` lives in `jirabot-config`; it can only stop startup.

use thiserror::Error;

/// The top-level error type for all Jirabot operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Tracker errors ---
    #[error("Tracker error: {0}")]
    Tracker(#[from] TrackerError),

    // --- Tool errors ---
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures from the LLM inference service.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// Failures from the issue tracker.
#[derive(Debug, Clone, Error)]
pub enum TrackerError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Tracker rejected the request: {message} (status: {status_code})")]
    Api { status_code: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Unexpected response shape: {0}")]
    InvalidResponse(String),
}

/// Failures raised by tool lookup or execution.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Tool execution failed ({tool_name}): {reason}")]
    ExecutionFailed { tool_name: String, reason: String },

    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_displays_correctly() {
        let err = Error::Provider(ProviderError::ApiError {
            status_code: 429,
            message: "Too many requests".into(),
        });
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too many requests"));
    }

    #[test]
    fn tracker_error_displays_correctly() {
        let err = Error::Tracker(TrackerError::Api {
            status_code: 400,
            message: "Invalid transition".into(),
        });
        assert!(err.to_string().contains("400"));
        assert!(err.to_string().contains("Invalid transition"));
    }

    #[test]
    fn tool_error_displays_correctly() {
        let err = ToolError::ExecutionFailed {
            tool_name: "search_issues".into(),
            reason: "JQL parse error".into(),
        };
        assert!(err.to_string().contains("search_issues"));
        assert!(err.to_string().contains("JQL parse error"));
    }
}
