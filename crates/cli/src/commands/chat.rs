//! `jirabot chat` — Interactive or single-message chat mode.
//!
//! The interactive loop is strictly sequential: read one line, run the
//! turn to completion, print the answer, prompt again. "quit"/"exit" (or
//! EOF) ends the session. A turn-level error is printed and the session
//! continues; only the startup connectivity check may end the process.

use std::io::Write;
use std::sync::Arc;

use jirabot_agent::AgentLoop;
use jirabot_config::AppConfig;
use jirabot_core::message::{Conversation, Message};
use jirabot_core::tracker::Tracker;
use jirabot_providers::OpenAiCompatProvider;
use jirabot_tracker::JiraClient;
use tokio::io::{AsyncBufReadExt, BufReader};

pub async fn run(message: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if let Err(e) = config.require_credentials() {
        eprintln!();
        eprintln!("  ERROR: {e}");
        eprintln!();
        eprintln!("  Set these environment variables (or add them to the config file):");
        eprintln!("    OPENAI_API_KEY   — your LLM API key");
        eprintln!("    JIRA_URL         — e.g. https://yourdomain.atlassian.net");
        eprintln!("    JIRA_EMAIL       — the email you log into Jira Cloud with");
        eprintln!("    JIRA_API_TOKEN   — generate one at");
        eprintln!("                       https://id.atlassian.com/manage-profile/security/api-tokens");
        eprintln!();
        eprintln!("  Config file: {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("Missing credentials. See above for setup instructions.".into());
    }

    // Collaborator handles, constructed once and shared read-only.
    let api_key = config.api_key.clone().unwrap_or_default();
    let jira_token = config.jira.api_token.clone().unwrap_or_default();

    let tracker: Arc<dyn Tracker> =
        Arc::new(JiraClient::new(&config.jira.url, &config.jira.email, jira_token));
    let provider = Arc::new(OpenAiCompatProvider::new(
        "openai",
        &config.api_url,
        api_key,
        config.request_timeout_secs,
    ));

    // Startup connectivity check — the only failure allowed to end the process.
    let user = tracker
        .current_user()
        .await
        .map_err(|e| format!("Jira connection failed: {e}"))?;
    println!("Connected to Jira as: {}", user.display_name);

    let tools = Arc::new(jirabot_tools::default_registry(
        tracker,
        &config.jira.project_key,
        config.jira.search_limit,
    ));

    let agent = AgentLoop::new(
        provider,
        &config.model,
        config.temperature,
        tools,
        &config.jira.project_key,
    )
    .with_max_cycles(config.max_tool_cycles);

    if let Some(msg) = message {
        // Single message mode
        let mut conv = Conversation::new();
        conv.push(Message::user(&msg));
        let response = agent.process(&mut conv).await?;
        println!("{response}");
        return Ok(());
    }

    // Interactive mode
    println!();
    println!("Jirabot is ready! (Type 'quit' to exit)");
    println!("Example: 'List my high priority tickets' or 'Create a task to update docs'");
    println!();
    println!("  Project:  {}", config.jira.project_key);
    println!("  Model:    {}", config.model);
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut conv = Conversation::new();

    loop {
        print!("User: ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break; // EOF (Ctrl+D)
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line.to_lowercase().as_str(), "quit" | "exit") {
            break;
        }

        conv.push(Message::user(line));

        match agent.process(&mut conv).await {
            Ok(response) => {
                println!("Agent: {response}");
                println!();
            }
            Err(e) => {
                // Turn-level failure: report it, keep the session alive.
                eprintln!("[Error] {e}");
                println!();
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}
