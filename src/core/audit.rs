use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Duration, Local, TimeZone, Timelike};

use crate::domain::model::AffectedFile;
use crate::domain::ports::{AttachmentData, Notifier, RemoteHost};
use crate::utils::error::{OpsError, Result};

/// Suspicious hour-of-day window: 23:00 up to and including the 04:xx hour.
/// The comparison deliberately stays a plain hour check straddling midnight,
/// matching the operational definition this scanner was built around.
pub fn in_suspicious_window(hour: u32) -> bool {
    hour >= 23 || hour <= 4
}

/// Parses `stat --format '%n %Y %s'` output into affected-file candidates.
/// The two trailing numeric fields are split off the right so paths
/// containing spaces survive. Unparseable lines are logged and skipped.
pub fn parse_stat_listing(output: &str) -> Vec<AffectedFile> {
    let mut files = Vec::new();

    for line in output.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut fields = line.rsplitn(3, ' ');
        let parsed = match (fields.next(), fields.next(), fields.next()) {
            (Some(size), Some(mtime), Some(path)) => size
                .parse::<u64>()
                .ok()
                .zip(mtime.parse::<i64>().ok())
                .and_then(|(size, mtime)| {
                    Local
                        .timestamp_opt(mtime, 0)
                        .single()
                        .map(|modified_at| AffectedFile {
                            path: path.to_string(),
                            modified_at,
                            size,
                        })
                }),
            _ => None,
        };

        match parsed {
            Some(file) => files.push(file),
            None => tracing::warn!("Skipping unparseable stat line: {}", line),
        }
    }

    files
}

/// Applies the hour-of-day predicate, preserving input order.
pub fn filter_suspicious_hours(files: Vec<AffectedFile>) -> Vec<AffectedFile> {
    files
        .into_iter()
        .filter(|f| in_suspicious_window(f.modified_at.hour()))
        .collect()
}

fn basename(path: &str) -> Result<String> {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| OpsError::ProcessingError {
            message: format!("remote path has no file name: {}", path),
        })
}

/// Sequential driver for the audit pipeline: remote scan, suspicious-hour
/// filter, report email with the smallest affected file attached, and local
/// download of every affected file.
pub struct AuditPipeline<H, N> {
    host: H,
    notifier: N,
}

impl<H, N> AuditPipeline<H, N>
where
    H: RemoteHost,
    N: Notifier,
{
    pub fn new(host: H, notifier: N) -> Self {
        Self { host, notifier }
    }

    /// Files under the user's home directory modified in the last two weeks
    /// whose local modification hour falls in the suspicious window.
    pub fn find_affected_files(&mut self, username: &str) -> Result<Vec<AffectedFile>> {
        let cutoff = Local::now() - Duration::weeks(2);
        let command = format!(
            "find /home/{} -type f -newermt {} -print0 | xargs -0 -r stat --format '%n %Y %s'",
            username,
            cutoff.format("%Y%m%d")
        );

        tracing::debug!("Running remote scan: {}", command);
        let output = self.host.exec(&command)?;

        let candidates = parse_stat_listing(&output);
        tracing::info!("Remote scan returned {} candidate files", candidates.len());

        Ok(filter_suspicious_hours(candidates))
    }

    /// Emails the report to `recipient` with the smallest affected file
    /// attached. Callers treat failure as recoverable; the download stage
    /// still runs.
    pub fn send_report(
        &mut self,
        files: &[AffectedFile],
        recipient: &str,
        username: &str,
    ) -> Result<()> {
        let smallest = files
            .iter()
            .min_by_key(|f| f.size)
            .ok_or_else(|| OpsError::ProcessingError {
                message: "no affected files to report".to_string(),
            })?;

        let mut body = format!(
            "Dear CTO,\n\nThe following files in {}'s home directory have been identified as potentially compromised:",
            username
        );
        for file in files {
            body.push_str(&format!(
                "\n{} - Last Modified: {}",
                file.path,
                file.modified_at.format("%Y-%m-%d %H:%M:%S")
            ));
        }
        body.push_str("\n\nBest regards,\nYour Security Team");

        let attachment = AttachmentData {
            filename: basename(&smallest.path)?,
            content: self.host.read_file(&smallest.path)?,
        };

        self.notifier.send(
            recipient,
            "Security Alert: Compromised Files Detected",
            &body,
            Some(attachment),
        )
    }

    /// Downloads every affected file into `download_dir`, keeping the remote
    /// basename. Any transfer failure aborts the run.
    pub fn download_files(
        &mut self,
        files: &[AffectedFile],
        download_dir: &Path,
    ) -> Result<Vec<PathBuf>> {
        let mut downloaded = Vec::with_capacity(files.len());

        for file in files {
            let local_path = download_dir.join(basename(&file.path)?);
            let content = self.host.read_file(&file.path)?;
            fs::write(&local_path, content)?;
            tracing::info!("Downloaded {} to {}", file.path, local_path.display());
            downloaded.push(local_path);
        }

        Ok(downloaded)
    }
}
