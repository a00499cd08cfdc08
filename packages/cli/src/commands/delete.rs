use anyhow::Result;
use colored::Colorize;

use crate::api::{EngineClient, EngineError};
use crate::config::Config;

/// Delete an agent deployment
pub async fn run(config: &Config, engine_id: &str, force: bool) -> Result<()> {
    let api = EngineClient::new(config)?;
    let resource_name = api.full_resource_name(engine_id);

    println!(
        "{} Deleting agent {}...",
        "→".blue().bold(),
        resource_name.dimmed()
    );
    if force {
        println!("  --force set: child resources will be deleted too.");
    }

    match api.delete_engine(engine_id, force).await {
        Ok(()) => {
            println!("{} Agent deleted.", "✓".green().bold());
        }
        Err(EngineError::PreconditionFailed { message }) => {
            eprintln!(
                "{} Agent '{}' cannot be deleted: it still has sessions or other child resources.",
                "✗".red().bold(),
                engine_id
            );
            eprintln!("  Details: {}", message);
            eprintln!("  To delete the agent and all its resources, re-run with --force:");
            eprintln!("    {}", format!("brevity delete {} --force", engine_id).bold());
        }
        Err(EngineError::NotFound { .. }) => {
            eprintln!(
                "{} Agent with ID '{}' not found.",
                "✗".red().bold(),
                engine_id
            );
        }
        Err(EngineError::Api { status, message }) => {
            eprintln!(
                "{} Error deleting agent: API call failed with status {}",
                "✗".red().bold(),
                status
            );
            eprintln!("  Details: {}", message);
        }
        Err(e) => {
            eprintln!(
                "{} An unexpected error occurred during deletion: {}",
                "✗".red().bold(),
                e
            );
        }
    }

    Ok(())
}
