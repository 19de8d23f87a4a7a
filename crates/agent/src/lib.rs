//! The core agent loop — the heart of Jirabot.
//!
//! One user turn runs a **decide → dispatch** cycle:
//!
//! 1. Build the system prompt (fresh, so the embedded date is current)
//! 2. Send system prompt + full history + tool catalog to the LLM
//! 3. If the response carries tool calls: execute them in order, append
//!    the results, loop back to step 1
//! 4. If the response is plain text: append it and end the turn
//!
//! The loop is strictly sequential — no step begins before the previous
//! one completes — and bounded by a maximum cycle count so an oscillating
//! LLM cannot spin forever.

pub mod dispatch;
pub mod loop_runner;

pub use loop_runner::AgentLoop;
