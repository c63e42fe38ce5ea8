use anyhow::{Context, Result};
use solace_application::RecordedEntry;
use solace_core::guest::{CheckInDraft, JournalEntryDraft, PreferencesPatch, WinDraft};

use super::context::AppContext;

pub async fn check_in(
    ctx: &AppContext,
    mood: String,
    color: String,
    notes: Option<String>,
) -> Result<()> {
    let mut draft = CheckInDraft::new(mood, color);
    if let Some(notes) = notes {
        draft = draft.with_notes(notes);
    }
    let recorded = ctx
        .services
        .recorder
        .record_check_in(draft)
        .await
        .context("Failed to record check-in")?;
    report("check-in", &recorded);
    Ok(())
}

pub async fn win(ctx: &AppContext, text: String, category: String) -> Result<()> {
    let recorded = ctx
        .services
        .recorder
        .record_win(WinDraft::new(text, category))
        .await
        .context("Failed to record win")?;
    report("win", &recorded);
    Ok(())
}

pub async fn journal(
    ctx: &AppContext,
    content: String,
    prompt: Option<String>,
    entry_type: String,
) -> Result<()> {
    let mut draft = JournalEntryDraft::new(content, entry_type);
    if let Some(prompt) = prompt {
        draft = draft.with_prompt(prompt);
    }
    let recorded = ctx
        .services
        .recorder
        .record_journal_entry(draft)
        .await
        .context("Failed to record journal entry")?;
    report("journal entry", &recorded);
    Ok(())
}

pub fn prefs(ctx: &AppContext, language: Option<String>, onboarding: Option<String>) -> Result<()> {
    let onboarding_data = onboarding
        .map(|raw| serde_json::from_str::<serde_json::Value>(&raw).context("--onboarding must be valid JSON"))
        .transpose()?;

    let preferences = ctx
        .services
        .store
        .update_preferences(PreferencesPatch {
            language,
            onboarding_data,
        })
        .context("Failed to update preferences")?;

    println!("{}", serde_json::to_string_pretty(&preferences)?);
    Ok(())
}

fn report(kind: &str, recorded: &RecordedEntry) {
    match recorded {
        RecordedEntry::Local { id } => println!("Saved {} {} on this device", kind, id),
        RecordedEntry::Remote { user_id } => println!("Saved {} to account {}", kind, user_id),
    }
}
