use anyhow::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::api::{short_id, CreateEngineRequest, EngineClient, EngineError};
use crate::config::Config;

/// Package the agent definition and deploy it to the agent engine
pub async fn run(config: &Config) -> Result<()> {
    let api = EngineClient::new(config)?;

    println!("{} Packaging agent definition...", "→".blue().bold());
    let agent = brevity_agent::shortening_agent()?;
    let request = CreateEngineRequest {
        display_name: config.display_name.clone(),
        description: config.description.clone(),
        requirements: config.requirements.clone(),
        agent_package: config.agent_package.clone(),
        staging_bucket: config.staging_bucket.clone(),
        agent: agent.manifest(),
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")?,
    );
    spinner.set_message(format!("Deploying '{}'...", config.display_name));

    match api.create_engine(&request).await {
        Ok(engine) => {
            spinner.finish_with_message(format!(
                "{} Created agent '{}'",
                "✓".green().bold(),
                engine.display_name
            ));
            println!();
            println!("  Resource name: {}", engine.name);
            println!("  Engine ID: {}", short_id(&engine.name).bold());
        }
        Err(EngineError::Api { status, message }) => {
            spinner.finish_and_clear();
            eprintln!(
                "{} Error deploying agent: API call failed with status {}",
                "✗".red().bold(),
                status
            );
            eprintln!("  Details: {}", message);
        }
        Err(e) => {
            spinner.finish_and_clear();
            eprintln!(
                "{} An unexpected error occurred during deployment: {}",
                "✗".red().bold(),
                e
            );
        }
    }

    Ok(())
}
