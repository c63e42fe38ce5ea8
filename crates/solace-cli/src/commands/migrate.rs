use anyhow::{Context, Result, bail};

use super::context::AppContext;

pub async fn run(ctx: &AppContext, user_id: &str) -> Result<()> {
    if !ctx.remote_configured() {
        bail!("remote.base_url is not configured (set it in config.toml or SOLACE_REMOTE_URL)");
    }

    let outcome = ctx
        .services
        .coordinator
        .migrate(user_id)
        .await
        .context("Failed to read local guest data")?;

    if outcome.success {
        println!("Migrated {} entries to account {}", outcome.migrated_count, user_id);
        Ok(())
    } else {
        bail!(
            "Migration failed, guest data kept for retry: {}",
            outcome.error.unwrap_or_default()
        )
    }
}
