use std::collections::HashSet;
use std::path::Path;

use rand::Rng;

use crate::core::password::generate_password;
use crate::core::username::generate_username;
use crate::domain::model::{EmployeeRecord, RecordOutcome, RecordStatus, RunSummary};
use crate::domain::ports::{AccountManager, IdentityDirectory, Notifier};
use crate::utils::error::{OpsError, Result};
use crate::utils::validation::validate_non_empty;

/// Ordered unique group identifiers across every record, first-seen order.
pub fn collect_groups(records: &[EmployeeRecord]) -> Vec<String> {
    let mut groups: Vec<String> = Vec::new();
    for record in records {
        for group in record.groups() {
            if !groups.contains(&group) {
                groups.push(group);
            }
        }
    }
    groups
}

/// Sequential driver for the provisioning pipeline: group creation, username
/// allocation, account creation, group assignment, report output, and
/// credential notification. Per-record failures are recorded in the summary
/// and the batch continues; only input/report errors abort the run.
pub struct ProvisionPipeline<D, A, N, R> {
    directory: D,
    accounts: A,
    notifier: N,
    rng: R,
}

impl<D, A, N, R> ProvisionPipeline<D, A, N, R>
where
    D: IdentityDirectory,
    A: AccountManager,
    N: Notifier,
    R: Rng,
{
    pub fn new(directory: D, accounts: A, notifier: N, rng: R) -> Self {
        Self {
            directory,
            accounts,
            notifier,
            rng,
        }
    }

    pub fn run(
        &mut self,
        mut records: Vec<EmployeeRecord>,
        report_path: &Path,
    ) -> Result<RunSummary> {
        let groups = collect_groups(&records);
        if groups.is_empty() {
            return Err(OpsError::ValidationError {
                message: "no user groups could be derived from the employee file".to_string(),
            });
        }

        self.create_groups(&groups);
        let summary = self.create_accounts(&mut records)?;
        self.assign_groups(&records);
        self.write_report(&records, report_path)?;
        self.notify(&records);

        Ok(summary)
    }

    fn create_groups(&mut self, groups: &[String]) {
        for group in groups {
            match self.accounts.create_group(group) {
                Ok(()) => tracing::info!("Created group {}", group),
                Err(e) => tracing::error!("Error creating group {}: {}", group, e),
            }
        }
    }

    fn create_accounts(&mut self, records: &mut [EmployeeRecord]) -> Result<RunSummary> {
        let mut existing = self.directory.list_existing_identities()?;
        tracing::debug!("Seeded {} existing identities", existing.len());

        let mut summary = RunSummary::default();
        for record in records.iter_mut() {
            let status = self.create_one_account(record, &mut existing);
            summary.push(RecordOutcome {
                first_name: record.first_name.clone(),
                last_name: record.last_name.clone(),
                status,
            });
        }

        Ok(summary)
    }

    fn create_one_account(
        &mut self,
        record: &mut EmployeeRecord,
        existing: &mut HashSet<String>,
    ) -> RecordStatus {
        if let Err(e) = validate_non_empty("first_name", &record.first_name)
            .and_then(|_| validate_non_empty("last_name", &record.last_name))
        {
            tracing::error!("Rejecting record {:?}: {}", record.display_name(), e);
            return RecordStatus::Failed {
                reason: e.to_string(),
            };
        }

        let username = generate_username(&record.first_name, &record.last_name, existing);
        // Reserve immediately so the next record with the same base candidate
        // probes past this one, whether or not account creation succeeds.
        existing.insert(username.clone());

        let password = generate_password(&mut self.rng);

        let created = self
            .accounts
            .create_account(&username, &record.display_name())
            .and_then(|_| self.accounts.set_password(&username, &password));

        match created {
            Ok(()) => {
                tracing::info!(
                    "User account created for {} with username: {}",
                    record.display_name(),
                    username
                );
                record.username = Some(username.clone());
                record.password = Some(password);
                RecordStatus::Provisioned { username }
            }
            Err(e) => {
                tracing::error!(
                    "Error creating user account for {}: {}",
                    record.display_name(),
                    e
                );
                RecordStatus::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    fn assign_groups(&mut self, records: &[EmployeeRecord]) {
        for record in records {
            let Some(username) = record.username.as_deref() else {
                tracing::warn!(
                    "Skipping group assignment for {}: no account",
                    record.display_name()
                );
                continue;
            };

            for group in record.groups() {
                match self.accounts.add_group(username, &group) {
                    Ok(()) => tracing::info!("Added {} to group {}", username, group),
                    Err(e) => {
                        tracing::error!("Error adding {} to group {}: {}", username, group, e)
                    }
                }
            }
        }
    }

    fn write_report(&self, records: &[EmployeeRecord], report_path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(report_path)?;
        writer.write_record(["first_name", "last_name", "username"])?;

        for record in records {
            if let Some(username) = record.username.as_deref() {
                writer.write_record([record.first_name.as_str(), record.last_name.as_str(), username])?;
            }
        }

        writer.flush()?;
        tracing::info!("Account details written to {}", report_path.display());
        Ok(())
    }

    fn notify(&mut self, records: &[EmployeeRecord]) {
        for record in records {
            let (Some(username), Some(password)) =
                (record.username.as_deref(), record.password.as_deref())
            else {
                continue;
            };

            let body = format!(
                "Hello,\n\nYour new account details are as follows:\nUsername: {}\nPassword: {}\n\nPlease keep this information secure.",
                username, password
            );

            match self
                .notifier
                .send(&record.email, "Your New Account Details", &body, None)
            {
                Ok(()) => tracing::info!("Sent account details to {}", record.email),
                Err(e) => tracing::error!("Error notifying {}: {}", record.email, e),
            }
        }
    }
}
