//! Partial inputs accepted by the guest store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::model::{CheckIn, JournalEntry, Preferences, Win};

/// Check-in fields supplied by the picker UI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CheckInDraft {
    pub mood: String,
    pub color: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CheckInDraft {
    pub fn new(mood: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            mood: mood.into(),
            color: color.into(),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn into_entry(self, id: String, timestamp: DateTime<Utc>) -> CheckIn {
        CheckIn {
            id,
            mood: self.mood,
            color: self.color,
            notes: self.notes,
            timestamp,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WinDraft {
    pub text: String,
    pub category: String,
}

impl WinDraft {
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
        }
    }

    pub fn into_entry(self, id: String, timestamp: DateTime<Utc>) -> Win {
        Win {
            id,
            text: self.text,
            category: self.category,
            timestamp,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntryDraft {
    pub content: String,
    #[serde(default)]
    pub prompt: Option<String>,
    pub entry_type: String,
}

impl JournalEntryDraft {
    pub fn new(content: impl Into<String>, entry_type: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            prompt: None,
            entry_type: entry_type.into(),
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn into_entry(self, id: String, timestamp: DateTime<Utc>) -> JournalEntry {
        JournalEntry {
            id,
            content: self.content,
            prompt: self.prompt,
            entry_type: self.entry_type,
            timestamp,
        }
    }
}

/// Shallow patch over [`Preferences`]; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesPatch {
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub onboarding_data: Option<serde_json::Value>,
}

impl PreferencesPatch {
    pub fn apply_to(self, preferences: &mut Preferences) {
        if let Some(language) = self.language {
            preferences.language = language;
        }
        if let Some(onboarding_data) = self.onboarding_data {
            preferences.onboarding_data = Some(onboarding_data);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_is_shallow() {
        let mut preferences = Preferences {
            language: "en".to_string(),
            onboarding_data: Some(serde_json::json!({"goal": "sleep"})),
        };

        PreferencesPatch {
            language: Some("es".to_string()),
            onboarding_data: None,
        }
        .apply_to(&mut preferences);

        assert_eq!(preferences.language, "es");
        assert_eq!(
            preferences.onboarding_data,
            Some(serde_json::json!({"goal": "sleep"}))
        );
    }

    #[test]
    fn test_patch_replaces_onboarding_data_wholesale() {
        let mut preferences = Preferences {
            language: "en".to_string(),
            onboarding_data: Some(serde_json::json!({"goal": "sleep", "age": 30})),
        };

        PreferencesPatch {
            language: None,
            onboarding_data: Some(serde_json::json!({"goal": "focus"})),
        }
        .apply_to(&mut preferences);

        assert_eq!(preferences.language, "en");
        assert_eq!(
            preferences.onboarding_data,
            Some(serde_json::json!({"goal": "focus"}))
        );
    }
}
