use anyhow::Result;
use colored::Colorize;

use crate::api::{short_id, EngineClient, EngineError};
use crate::config::Config;

/// List agent deployments
pub async fn run(config: &Config) -> Result<()> {
    let api = EngineClient::new(config)?;

    match api.list_engines().await {
        Ok(engines) => {
            if engines.is_empty() {
                println!("{}", "No deployments found.".dimmed());
                return Ok(());
            }

            println!("{}", "Agent Deployments".bold());
            println!("{}", "─".repeat(60));

            for engine in &engines {
                println!("  {}", engine.display_name.bold());
                if let Some(desc) = engine.description.as_deref().filter(|d| !d.is_empty()) {
                    println!("    {}", desc.dimmed());
                }
                println!("    Engine ID: {}", short_id(&engine.name).dimmed());
                println!(
                    "    Created: {}",
                    engine
                        .create_time
                        .format("%Y-%m-%d %H:%M:%S")
                        .to_string()
                        .dimmed()
                );
                println!();
            }

            println!("{} deployment(s)", engines.len());
        }
        Err(EngineError::Api { status, message }) => {
            eprintln!(
                "{} Error listing agents: API call failed with status {}",
                "✗".red().bold(),
                status
            );
            eprintln!("  Details: {}", message);
        }
        Err(e) => {
            eprintln!(
                "{} An unexpected error occurred while listing agents: {}",
                "✗".red().bold(),
                e
            );
        }
    }

    Ok(())
}
