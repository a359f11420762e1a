use std::collections::HashSet;

use crate::utils::error::Result;

/// Read-only view of the identities already present on the target system.
/// Consulted once at the start of a provisioning run.
pub trait IdentityDirectory {
    fn list_existing_identities(&self) -> Result<HashSet<String>>;
}

/// Account-management operations backed by OS-level tooling. Each call may
/// fail independently; callers treat failures as per-record, not fatal.
pub trait AccountManager {
    fn create_group(&mut self, group: &str) -> Result<()>;
    fn create_account(&mut self, username: &str, display_name: &str) -> Result<()>;
    fn set_password(&mut self, username: &str, secret: &str) -> Result<()>;
    fn add_group(&mut self, username: &str, group: &str) -> Result<()>;
}

/// A binary attachment for an outgoing notification.
#[derive(Debug, Clone)]
pub struct AttachmentData {
    pub filename: String,
    pub content: Vec<u8>,
}

/// Sends a plain-text message to a single recipient, optionally with one
/// binary attachment.
pub trait Notifier {
    fn send(
        &mut self,
        recipient: &str,
        subject: &str,
        body: &str,
        attachment: Option<AttachmentData>,
    ) -> Result<()>;
}

/// An authenticated session to a remote host: command execution with captured
/// stdout plus a file-transfer sub-channel for reading remote file contents.
pub trait RemoteHost {
    fn exec(&mut self, command: &str) -> Result<String>;
    fn read_file(&mut self, path: &str) -> Result<Vec<u8>>;
}
