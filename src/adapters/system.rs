use std::io::Write;
use std::process::{Command, Stdio};

use crate::domain::ports::AccountManager;
use crate::utils::error::{OpsError, Result};

fn run_checked(command: &mut Command, what: &str) -> Result<()> {
    let output = command.output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(OpsError::ProcessingError {
            message: format!("{} exited with {}: {}", what, output.status, stderr.trim()),
        });
    }

    Ok(())
}

/// Account manager shelling out to the standard user/group tools. Requires
/// the invoking process to have sufficient privileges; individual command
/// failures surface as per-record errors, never a panic.
#[derive(Debug, Default)]
pub struct SystemAccounts;

impl SystemAccounts {
    pub fn new() -> Self {
        Self
    }
}

impl AccountManager for SystemAccounts {
    fn create_group(&mut self, group: &str) -> Result<()> {
        run_checked(Command::new("groupadd").arg(group), "groupadd")
    }

    fn create_account(&mut self, username: &str, display_name: &str) -> Result<()> {
        run_checked(
            Command::new("useradd")
                .arg("-m")
                .arg("-c")
                .arg(display_name)
                .arg(username),
            "useradd",
        )
    }

    fn set_password(&mut self, username: &str, secret: &str) -> Result<()> {
        // chpasswd reads `user:password` pairs on stdin, so the secret never
        // appears in the process list.
        let mut child = Command::new("chpasswd")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(stdin) = child.stdin.as_mut() {
            stdin.write_all(format!("{}:{}\n", username, secret).as_bytes())?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OpsError::ProcessingError {
                message: format!("chpasswd exited with {}: {}", output.status, stderr.trim()),
            });
        }

        Ok(())
    }

    fn add_group(&mut self, username: &str, group: &str) -> Result<()> {
        run_checked(
            Command::new("usermod").arg("-aG").arg(group).arg(username),
            "usermod",
        )
    }
}
