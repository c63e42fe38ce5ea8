use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

use commands::context::AppContext;

#[derive(Parser)]
#[command(name = "solace")]
#[command(about = "Solace CLI - guest-mode wellness journal with account upgrade", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory of the local guest store
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count one guest-mode visit
    Visit,
    /// Record a mood check-in
    CheckIn {
        #[arg(long)]
        mood: String,
        #[arg(long)]
        color: String,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Record a win
    Win {
        #[arg(long)]
        text: String,
        #[arg(long, default_value = "general")]
        category: String,
    },
    /// Write a journal entry
    Journal {
        #[arg(long)]
        content: String,
        #[arg(long)]
        prompt: Option<String>,
        #[arg(long, default_value = "free")]
        entry_type: String,
    },
    /// Update guest preferences
    Prefs {
        #[arg(long)]
        language: Option<String>,
        /// Onboarding answers as a JSON value
        #[arg(long)]
        onboarding: Option<String>,
    },
    /// Show the guest summary and prompt state
    Status,
    /// Dismiss the account prompt for this guest session
    Dismiss,
    /// Move guest data to an authenticated account
    Migrate {
        #[arg(long)]
        user_id: String,
        /// Bearer token of the signed-in user
        #[arg(long, env = "SOLACE_ACCESS_TOKEN")]
        access_token: Option<String>,
    },
    /// Delete all local guest state
    Reset {
        /// Required; reset cannot be undone
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = commands::context::load_config(cli.config, cli.data_dir)?;
    commands::logging::init(&config.logging.level);

    let access_token = match &cli.command {
        Commands::Migrate { access_token, .. } => access_token.clone(),
        _ => None,
    };
    let ctx = AppContext::new(config, access_token)?;

    match cli.command {
        Commands::Visit => commands::gate::visit(&ctx)?,
        Commands::CheckIn { mood, color, notes } => {
            commands::entries::check_in(&ctx, mood, color, notes).await?
        }
        Commands::Win { text, category } => commands::entries::win(&ctx, text, category).await?,
        Commands::Journal {
            content,
            prompt,
            entry_type,
        } => commands::entries::journal(&ctx, content, prompt, entry_type).await?,
        Commands::Prefs {
            language,
            onboarding,
        } => commands::entries::prefs(&ctx, language, onboarding)?,
        Commands::Status => commands::gate::status(&ctx)?,
        Commands::Dismiss => commands::gate::dismiss(&ctx)?,
        Commands::Migrate { user_id, .. } => commands::migrate::run(&ctx, &user_id).await?,
        Commands::Reset { yes } => commands::reset::run(&ctx, yes)?,
    }

    Ok(())
}
