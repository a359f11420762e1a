pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::{AuditConfig, ProvisionConfig};
pub use crate::core::audit::AuditPipeline;
pub use crate::core::provision::ProvisionPipeline;
pub use crate::utils::error::{OpsError, Result};
