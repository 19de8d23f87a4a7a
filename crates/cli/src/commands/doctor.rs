//! `jirabot doctor` — Diagnose configuration and connectivity.

use std::sync::Arc;

use jirabot_config::AppConfig;
use jirabot_core::provider::Provider;
use jirabot_core::tracker::Tracker;
use jirabot_providers::OpenAiCompatProvider;
use jirabot_tracker::JiraClient;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("Jirabot Doctor — Diagnostics");
    println!("============================\n");

    let mut issues = 0;

    // Check config
    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("  ✅ Config file found: {}", config_path.display());
    } else {
        println!("  ⚠️  No config file — run `jirabot onboard` (env vars still work)");
    }

    let config = match AppConfig::load() {
        Ok(config) => {
            println!("  ✅ Config valid");
            config
        }
        Err(e) => {
            println!("  ❌ Config invalid: {e}");
            println!("\n  ⚠️  1 issue found. See above for details.");
            return Ok(());
        }
    };

    // Check credentials
    match config.require_credentials() {
        Ok(()) => println!("  ✅ Credentials present"),
        Err(e) => {
            println!("  ❌ {e}");
            issues += 1;
        }
    }

    // Check Jira connectivity
    if config.require_credentials().is_ok() {
        let tracker: Arc<dyn Tracker> = Arc::new(JiraClient::new(
            &config.jira.url,
            &config.jira.email,
            config.jira.api_token.clone().unwrap_or_default(),
        ));
        match tracker.current_user().await {
            Ok(user) => println!("  ✅ Jira reachable (authenticated as: {})", user.display_name),
            Err(e) => {
                println!("  ❌ Jira unreachable: {e}");
                issues += 1;
            }
        }

        // Check LLM endpoint
        let provider = OpenAiCompatProvider::new(
            "openai",
            &config.api_url,
            config.api_key.clone().unwrap_or_default(),
            config.request_timeout_secs,
        );
        match provider.health_check().await {
            Ok(true) => println!("  ✅ LLM endpoint reachable"),
            Ok(false) => {
                println!("  ❌ LLM endpoint rejected the request — check the API key");
                issues += 1;
            }
            Err(e) => {
                println!("  ❌ LLM endpoint unreachable: {e}");
                issues += 1;
            }
        }
    }

    // Summary
    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
