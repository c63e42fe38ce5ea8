use anyhow::{Context, Result};
use solace_core::engagement::GateState;

use super::context::AppContext;

pub fn visit(ctx: &AppContext) -> Result<()> {
    ctx.services
        .identity
        .get_or_create()
        .context("Failed to start guest session")?;
    let state = ctx
        .services
        .gate
        .record_visit()
        .context("Failed to record visit")?;

    if state.should_prompt() {
        let summary = ctx.services.gate.summarize()?;
        println!(
            "You've saved {} entries over {} days. Create an account to keep them safe.",
            summary.total_entries, summary.days_since_first
        );
    }
    Ok(())
}

pub fn status(ctx: &AppContext) -> Result<()> {
    let gate = &ctx.services.gate;
    let aggregate = ctx
        .services
        .store
        .peek()
        .context("Failed to read guest data")?;
    let session = ctx.services.identity.current()?;
    let state = gate.state()?;

    println!("Store:        {}", ctx.data_dir.display());
    match session {
        Some(id) => println!("Session:      {}", id),
        None => println!("Session:      (none)"),
    }

    match aggregate {
        Some(aggregate) => {
            let summary = gate.summarize()?;
            println!("Visits:       {}", aggregate.visit_count);
            println!("Check-ins:    {}", aggregate.check_ins.len());
            println!("Wins:         {}", aggregate.wins.len());
            println!("Journal:      {}", aggregate.journal_entries.len());
            println!("Days active:  {}", summary.days_since_first);
        }
        None => println!("No guest data yet"),
    }

    let label = match state {
        GateState::Fresh => "not yet",
        GateState::Eligible => "yes",
        GateState::Dismissed => "dismissed",
    };
    println!("Prompt:       {} (threshold {})", label, gate.threshold());
    Ok(())
}

pub fn dismiss(ctx: &AppContext) -> Result<()> {
    ctx.services
        .gate
        .dismiss()
        .context("Failed to dismiss prompt")?;
    println!("We won't ask again during this guest session.");
    Ok(())
}
