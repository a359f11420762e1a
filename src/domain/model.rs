use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// One row of the employee input CSV. `username`/`password` stay empty until
/// account creation succeeds for the record; neither is ever written back to
/// the persisted report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub first_name: String,
    pub last_name: String,
    /// Raw `;`-separated group field as it appears in the CSV.
    pub user_groups: String,
    pub email: String,
    #[serde(skip)]
    pub username: Option<String>,
    #[serde(skip)]
    pub password: Option<String>,
}

impl EmployeeRecord {
    /// Group identifiers for this employee, trimmed, empties dropped,
    /// input order preserved.
    pub fn groups(&self) -> Vec<String> {
        self.user_groups
            .split(';')
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A remote file whose modification time fell inside the suspicious window.
#[derive(Debug, Clone, PartialEq)]
pub struct AffectedFile {
    pub path: String,
    pub modified_at: DateTime<Local>,
    pub size: u64,
}

/// Outcome of provisioning a single employee record.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordStatus {
    Provisioned { username: String },
    Failed { reason: String },
}

#[derive(Debug, Clone)]
pub struct RecordOutcome {
    pub first_name: String,
    pub last_name: String,
    pub status: RecordStatus,
}

/// Per-record results for one provisioning run, in input order.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub outcomes: Vec<RecordOutcome>,
}

impl RunSummary {
    pub fn push(&mut self, outcome: RecordOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn provisioned_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, RecordStatus::Provisioned { .. }))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.provisioned_count()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed_count() == 0
    }
}
