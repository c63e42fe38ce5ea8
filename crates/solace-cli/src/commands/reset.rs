use anyhow::{Context, Result, bail};

use super::context::AppContext;

pub fn run(ctx: &AppContext, confirmed: bool) -> Result<()> {
    if !confirmed {
        bail!("reset deletes all guest data on this device; pass --yes to confirm");
    }
    ctx.services
        .store
        .clear()
        .context("Failed to clear guest data")?;
    println!("Guest data removed from {}", ctx.data_dir.display());
    Ok(())
}
