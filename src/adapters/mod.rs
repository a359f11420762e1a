// Adapters layer: concrete implementations for external systems (CSV files,
// the OS identity database, account tooling, SMTP, SSH).

pub mod employee_csv;
pub mod passwd;
pub mod smtp;
pub mod ssh;
pub mod system;
