//! LLM provider implementations for Jirabot.
//!
//! One implementation covers the vast majority of backends: anything
//! exposing an OpenAI-compatible `/v1/chat/completions` endpoint.

pub mod openai_compat;

pub use openai_compat::OpenAiCompatProvider;
