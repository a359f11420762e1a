use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;
use staffops::domain::model::{EmployeeRecord, RecordStatus};
use staffops::domain::ports::{
    AccountManager, AttachmentData, IdentityDirectory, Notifier,
};
use staffops::utils::error::{OpsError, Result};
use staffops::ProvisionPipeline;
use tempfile::TempDir;

struct FakeDirectory {
    identities: HashSet<String>,
}

impl FakeDirectory {
    fn new(names: &[&str]) -> Self {
        Self {
            identities: names.iter().map(|n| n.to_string()).collect(),
        }
    }
}

impl IdentityDirectory for FakeDirectory {
    fn list_existing_identities(&self) -> Result<HashSet<String>> {
        Ok(self.identities.clone())
    }
}

/// Records every account-management call; `fail_accounts` simulates useradd
/// failing for the named usernames.
#[derive(Default)]
struct RecordingAccounts {
    calls: Vec<String>,
    fail_accounts: HashSet<String>,
}

impl AccountManager for &mut RecordingAccounts {
    fn create_group(&mut self, group: &str) -> Result<()> {
        self.calls.push(format!("create_group {}", group));
        Ok(())
    }

    fn create_account(&mut self, username: &str, display_name: &str) -> Result<()> {
        self.calls
            .push(format!("create_account {} ({})", username, display_name));
        if self.fail_accounts.contains(username) {
            return Err(OpsError::ProcessingError {
                message: format!("useradd exited with status 1 for {}", username),
            });
        }
        Ok(())
    }

    fn set_password(&mut self, username: &str, _secret: &str) -> Result<()> {
        self.calls.push(format!("set_password {}", username));
        Ok(())
    }

    fn add_group(&mut self, username: &str, group: &str) -> Result<()> {
        self.calls.push(format!("add_group {} {}", username, group));
        Ok(())
    }
}

#[derive(Default)]
struct RecordingNotifier {
    sent: Vec<(String, String, String)>,
}

impl Notifier for &mut RecordingNotifier {
    fn send(
        &mut self,
        recipient: &str,
        subject: &str,
        body: &str,
        _attachment: Option<AttachmentData>,
    ) -> Result<()> {
        self.sent
            .push((recipient.to_string(), subject.to_string(), body.to_string()));
        Ok(())
    }
}

fn record(first: &str, last: &str, groups: &str, email: &str) -> EmployeeRecord {
    EmployeeRecord {
        first_name: first.to_string(),
        last_name: last.to_string(),
        user_groups: groups.to_string(),
        email: email.to_string(),
        username: None,
        password: None,
    }
}

fn run_pipeline(
    existing: &[&str],
    records: Vec<EmployeeRecord>,
    accounts: &mut RecordingAccounts,
    notifier: &mut RecordingNotifier,
) -> (staffops::domain::model::RunSummary, String) {
    let temp_dir = TempDir::new().unwrap();
    let report_path = temp_dir.path().join("report.csv");

    let mut pipeline = ProvisionPipeline::new(
        FakeDirectory::new(existing),
        accounts,
        notifier,
        StdRng::seed_from_u64(42),
    );
    let summary = pipeline.run(records, &report_path).unwrap();

    let report = std::fs::read_to_string(&report_path).unwrap();
    (summary, report)
}

#[test]
fn test_single_record_end_to_end() {
    let mut accounts = RecordingAccounts::default();
    let mut notifier = RecordingNotifier::default();

    let records = vec![record("Jane", "Smith", "eng;admin", "jane@example.com")];
    let (summary, report) = run_pipeline(&[], records, &mut accounts, &mut notifier);

    assert_eq!(summary.provisioned_count(), 1);
    assert!(summary.all_succeeded());
    assert_eq!(
        summary.outcomes[0].status,
        RecordStatus::Provisioned {
            username: "smithj".to_string()
        }
    );

    assert_eq!(
        accounts.calls,
        vec![
            "create_group eng",
            "create_group admin",
            "create_account smithj (Jane Smith)",
            "set_password smithj",
            "add_group smithj eng",
            "add_group smithj admin",
        ]
    );

    assert!(report.starts_with("first_name,last_name,username"));
    assert!(report.contains("Jane,Smith,smithj"));
    // Passwords stay out of the persisted report.
    assert!(!report.contains("password"));

    assert_eq!(notifier.sent.len(), 1);
    let (recipient, subject, body) = &notifier.sent[0];
    assert_eq!(recipient, "jane@example.com");
    assert_eq!(subject, "Your New Account Details");
    assert!(body.contains("Username: smithj"));
    assert!(body.contains("Password: "));
}

#[test]
fn test_same_base_candidate_gets_numeric_suffix() {
    let mut accounts = RecordingAccounts::default();
    let mut notifier = RecordingNotifier::default();

    let records = vec![
        record("Jack", "Smith", "eng", "jack@example.com"),
        record("Jane", "Smith", "eng", "jane@example.com"),
    ];
    let (summary, report) = run_pipeline(&[], records, &mut accounts, &mut notifier);

    assert_eq!(summary.provisioned_count(), 2);
    assert!(report.contains("Jack,Smith,smithj"));
    assert!(report.contains("Jane,Smith,smithj1"));
}

#[test]
fn test_existing_usernames_advance_the_suffix() {
    let mut accounts = RecordingAccounts::default();
    let mut notifier = RecordingNotifier::default();

    let records = vec![record("Jane", "Smith", "eng", "jane@example.com")];
    let (summary, _) = run_pipeline(&["smithj", "smithj1"], records, &mut accounts, &mut notifier);

    assert_eq!(
        summary.outcomes[0].status,
        RecordStatus::Provisioned {
            username: "smithj2".to_string()
        }
    );
}

#[test]
fn test_failed_account_is_skipped_downstream() {
    let mut accounts = RecordingAccounts::default();
    accounts.fail_accounts.insert("doej".to_string());
    let mut notifier = RecordingNotifier::default();

    let records = vec![
        record("John", "Doe", "eng", "john@example.com"),
        record("Jane", "Smith", "eng", "jane@example.com"),
    ];
    let (summary, report) = run_pipeline(&[], records, &mut accounts, &mut notifier);

    assert_eq!(summary.provisioned_count(), 1);
    assert_eq!(summary.failed_count(), 1);
    assert!(!summary.all_succeeded());

    // No group assignment or notification for the failed record.
    assert!(!accounts.calls.iter().any(|c| c == "add_group doej eng"));
    assert!(accounts.calls.iter().any(|c| c == "add_group smithj eng"));
    assert!(!report.contains("doej"));
    assert_eq!(notifier.sent.len(), 1);
    assert_eq!(notifier.sent[0].0, "jane@example.com");
}

#[test]
fn test_empty_name_rejected_without_account_calls() {
    let mut accounts = RecordingAccounts::default();
    let mut notifier = RecordingNotifier::default();

    let records = vec![record("", "Smith", "eng", "smith@example.com")];
    let (summary, _) = run_pipeline(&[], records, &mut accounts, &mut notifier);

    assert_eq!(summary.failed_count(), 1);
    assert!(!accounts.calls.iter().any(|c| c.starts_with("create_account")));
}

#[test]
fn test_no_groups_derivable_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let report_path = temp_dir.path().join("report.csv");

    let mut accounts = RecordingAccounts::default();
    let mut notifier = RecordingNotifier::default();
    let mut pipeline = ProvisionPipeline::new(
        FakeDirectory::new(&[]),
        &mut accounts,
        &mut notifier,
        StdRng::seed_from_u64(42),
    );

    let records = vec![record("Jane", "Smith", " ; ", "jane@example.com")];
    let result = pipeline.run(records, &report_path);

    assert!(matches!(result, Err(OpsError::ValidationError { .. })));
    assert!(accounts.calls.is_empty());
    assert!(!report_path.exists());
}
