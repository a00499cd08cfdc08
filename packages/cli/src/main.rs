use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "brevity", about = "Brevity CLI - Manage your Brevity agent deployments")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Package the agent definition and deploy it to the agent engine
    Create,

    /// Delete an agent deployment
    Delete {
        /// Engine ID (short ID or full resource name)
        engine_id: String,

        /// Also delete child resources such as sessions
        #[arg(long)]
        force: bool,
    },

    /// List agent deployments
    List,

    /// Create a chat session on a deployed agent
    CreateSession {
        /// Engine ID
        engine_id: String,

        /// User the session belongs to
        #[arg(long, default_value = "default-user")]
        user_id: String,
    },

    /// List chat sessions for a user
    ListSessions {
        /// Engine ID
        engine_id: String,

        /// User whose sessions to list
        #[arg(long, default_value = "default-user")]
        user_id: String,
    },

    /// Send a message into a session and stream the response
    Chat {
        /// Engine ID
        engine_id: String,

        /// Active session ID
        session_id: String,

        /// Message to send to the agent
        message: String,

        /// User the session belongs to
        #[arg(long, default_value = "default-user")]
        user_id: String,

        /// Print every stream chunk verbatim instead of extracted text
        #[arg(long)]
        raw_output: bool,

        /// Print full error detail for unexpected failures
        #[arg(long)]
        debug: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    // Missing deployment configuration is the one fatal error class:
    // exit non-zero before any remote call.
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {:#}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Create => commands::create::run(&config).await,
        Commands::Delete { engine_id, force } => {
            commands::delete::run(&config, &engine_id, force).await
        }
        Commands::List => commands::list::run(&config).await,
        Commands::CreateSession { engine_id, user_id } => {
            commands::sessions::create(&config, &engine_id, &user_id).await
        }
        Commands::ListSessions { engine_id, user_id } => {
            commands::sessions::list(&config, &engine_id, &user_id).await
        }
        Commands::Chat {
            engine_id,
            session_id,
            message,
            user_id,
            raw_output,
            debug,
        } => {
            commands::chat::run(
                &config,
                &engine_id,
                &session_id,
                &message,
                &user_id,
                raw_output,
                debug,
            )
            .await
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}
