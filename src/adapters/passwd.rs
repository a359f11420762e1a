use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use crate::domain::ports::IdentityDirectory;
use crate::utils::error::Result;

/// Identity directory backed by the system passwd database. The file path is
/// injectable so the parsing is testable without a real `/etc/passwd`.
#[derive(Debug, Clone)]
pub struct PasswdDirectory {
    path: PathBuf,
}

impl PasswdDirectory {
    pub fn new() -> Self {
        Self::with_path("/etc/passwd")
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for PasswdDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityDirectory for PasswdDirectory {
    fn list_existing_identities(&self) -> Result<HashSet<String>> {
        let content = fs::read_to_string(&self.path)?;

        let mut usernames = HashSet::new();
        for line in content.lines() {
            if let Some((username, _)) = line.split_once(':') {
                usernames.insert(username.to_string());
            }
        }

        Ok(usernames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_lists_first_field_of_each_line() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "root:x:0:0:root:/root:/bin/bash").unwrap();
        writeln!(file, "daemon:x:1:1:daemon:/usr/sbin:/usr/sbin/nologin").unwrap();
        writeln!(file, "smithj:x:1001:1001::/home/smithj:/bin/bash").unwrap();

        let directory = PasswdDirectory::with_path(file.path());
        let identities = directory.list_existing_identities().unwrap();

        assert_eq!(identities.len(), 3);
        assert!(identities.contains("root"));
        assert!(identities.contains("smithj"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let directory = PasswdDirectory::with_path("/nonexistent/passwd");
        assert!(directory.list_existing_identities().is_err());
    }
}
