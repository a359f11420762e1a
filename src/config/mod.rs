use std::path::PathBuf;

use clap::{Args, Parser};

use crate::utils::error::Result;
use crate::utils::validation::{validate_email, validate_non_empty, validate_path, Validate};

/// SMTP relay settings shared by both binaries. The relay password is read
/// from `STAFFOPS_SMTP_PASSWORD` at startup, never from the command line.
#[derive(Debug, Clone, Args)]
pub struct SmtpSettings {
    /// SMTP relay host used to send notifications
    #[arg(long, default_value = "localhost")]
    pub smtp_host: String,

    /// SMTP relay port
    #[arg(long, default_value_t = 465)]
    pub smtp_port: u16,

    /// Sender address for notification emails
    #[arg(long, default_value = "accounts@example.com")]
    pub smtp_sender: String,

    /// Username for SMTP authentication
    #[arg(long, default_value = "")]
    pub smtp_user: String,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "staffops-provision", version)]
#[command(about = "Bulk employee account provisioning from a CSV roster")]
pub struct ProvisionConfig {
    /// Path to the employee file (including the file name)
    pub employee_file: PathBuf,

    /// Path to the file to store employee account details
    pub output_file: PathBuf,

    /// Logfile name
    #[arg(short = 'l', long = "log")]
    pub log_file: PathBuf,

    #[command(flatten)]
    pub smtp: SmtpSettings,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,
}

impl Validate for ProvisionConfig {
    fn validate(&self) -> Result<()> {
        validate_path("employee_file", &self.employee_file.to_string_lossy())?;
        validate_path("output_file", &self.output_file.to_string_lossy())?;
        validate_path("log_file", &self.log_file.to_string_lossy())?;
        validate_email("smtp_sender", &self.smtp.smtp_sender)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "staffops-audit", version)]
#[command(about = "Monitor and report files suspected of being compromised on remote systems")]
pub struct AuditConfig {
    /// Hostname or IP address of the remote computer
    pub host: String,

    /// Username on the remote computer
    pub username: String,

    /// Display contents of the affected files
    #[arg(short = 'd', long = "disp")]
    pub disp: bool,

    /// Email address to send the report to
    #[arg(short = 'e', long = "email")]
    pub email: String,

    /// Path to download affected files, defaults to the home directory
    #[arg(short = 'p', long = "path")]
    pub download_path: Option<PathBuf>,

    /// Logfile name
    #[arg(short = 'l', long = "log")]
    pub log_file: Option<PathBuf>,

    /// SSH port on the remote computer
    #[arg(long, default_value_t = 22)]
    pub port: u16,

    /// Timeout for remote operations, in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    #[command(flatten)]
    pub smtp: SmtpSettings,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,
}

impl Validate for AuditConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty("host", &self.host)?;
        validate_non_empty("username", &self.username)?;
        validate_email("email", &self.email)?;
        validate_email("smtp_sender", &self.smtp.smtp_sender)?;
        Ok(())
    }
}
