pub mod audit;
pub mod password;
pub mod provision;
pub mod username;

pub use crate::domain::model::{AffectedFile, EmployeeRecord, RecordStatus, RunSummary};
pub use crate::domain::ports::{AccountManager, IdentityDirectory, Notifier, RemoteHost};
pub use crate::utils::error::Result;
