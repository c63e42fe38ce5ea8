//! Result type of a guest-to-account migration.

use serde::{Deserialize, Serialize};

/// Outcome handed back to the caller of a migration. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationOutcome {
    pub success: bool,
    /// Entries transferred; always 0 on failure
    pub migrated_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MigrationOutcome {
    /// Creates a successful outcome.
    pub fn success(migrated_count: usize) -> Self {
        Self {
            success: true,
            migrated_count,
            error: None,
        }
    }

    /// Creates a failed outcome.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            migrated_count: 0,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_reports_zero() {
        let outcome = MigrationOutcome::failure("boom");
        assert!(!outcome.success);
        assert_eq!(outcome.migrated_count, 0);
        assert_eq!(outcome.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_success_omits_error_on_the_wire() {
        let value = serde_json::to_value(MigrationOutcome::success(3)).unwrap();
        assert_eq!(value, serde_json::json!({"success": true, "migratedCount": 3}));
    }
}
