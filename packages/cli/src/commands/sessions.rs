use anyhow::Result;
use colored::Colorize;

use crate::api::{Engine, EngineClient, EngineError};
use crate::config::Config;

/// Create a chat session on a deployed agent
pub async fn create(config: &Config, engine_id: &str, user_id: &str) -> Result<()> {
    let api = EngineClient::new(config)?;

    println!(
        "{} Creating new session for user '{}'...",
        "→".blue().bold(),
        user_id
    );
    let Some(_engine) = resolve_engine(&api, engine_id).await else {
        return Ok(());
    };

    match api.create_session(engine_id, user_id).await {
        Ok(session) => {
            println!("{} Session created", "✓".green().bold());
            println!("  Session ID: {}", session.id.bold());
            println!("  User ID: {}", user_id);
        }
        Err(e) => {
            eprintln!("{} Error creating session: {}", "✗".red().bold(), e);
        }
    }

    Ok(())
}

/// List chat sessions for a user
pub async fn list(config: &Config, engine_id: &str, user_id: &str) -> Result<()> {
    let api = EngineClient::new(config)?;

    println!(
        "{} Listing sessions for user '{}'...",
        "→".blue().bold(),
        user_id
    );
    let Some(engine) = resolve_engine(&api, engine_id).await else {
        return Ok(());
    };

    match api.list_sessions(engine_id, user_id).await {
        Ok(sessions) => {
            if sessions.is_empty() {
                println!(
                    "{}",
                    format!("No sessions found for user '{}'.", user_id).dimmed()
                );
                return Ok(());
            }

            println!();
            println!("{}", format!("Sessions on {}", engine.display_name).bold());
            println!("{}", "─".repeat(60));
            for session in &sessions {
                println!("  {}", session.id);
            }
            println!();
            println!("{} session(s)", sessions.len());
        }
        Err(e) => {
            eprintln!("{} Error listing sessions: {}", "✗".red().bold(), e);
        }
    }

    Ok(())
}

/// Fetch the engine, reporting lookup failures uniformly. Returns `None`
/// when the command should stop without touching the process exit status.
pub(crate) async fn resolve_engine(api: &EngineClient, engine_id: &str) -> Option<Engine> {
    match api.get_engine(engine_id).await {
        Ok(engine) => Some(engine),
        Err(EngineError::NotFound { .. }) => {
            eprintln!(
                "{} Agent with ID '{}' not found.",
                "✗".red().bold(),
                engine_id
            );
            None
        }
        Err(EngineError::Api { status, message }) => {
            eprintln!(
                "{} Error retrieving agent: API call failed with status {}",
                "✗".red().bold(),
                status
            );
            eprintln!("  Details: {}", message);
            None
        }
        Err(e) => {
            eprintln!(
                "{} An unexpected error occurred while retrieving agent: {}",
                "✗".red().bold(),
                e
            );
            None
        }
    }
}
