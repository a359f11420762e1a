use std::path::Path;

use crate::domain::model::EmployeeRecord;
use crate::utils::error::Result;

/// Loads the employee roster from a CSV file with a header row containing at
/// least `first_name`, `last_name`, `user_groups`, `email`.
pub fn load_employees(path: &Path) -> Result<Vec<EmployeeRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();

    for row in reader.deserialize() {
        let record: EmployeeRecord = row?;
        records.push(record);
    }

    tracing::debug!("Loaded {} employee records from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_employees_parses_rows() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "first_name,last_name,user_groups,email").unwrap();
        writeln!(file, "Jane,Smith,eng;admin,jane@example.com").unwrap();
        writeln!(file, "John,Doe,ops,john@example.com").unwrap();

        let records = load_employees(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].first_name, "Jane");
        assert_eq!(records[0].groups(), vec!["eng", "admin"]);
        assert!(records[0].username.is_none());
        assert_eq!(records[1].email, "john@example.com");
    }

    #[test]
    fn test_load_employees_missing_file() {
        assert!(load_employees(Path::new("/nonexistent/employees.csv")).is_err());
    }
}
