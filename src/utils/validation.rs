use crate::utils::error::{OpsError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(OpsError::ValidationError {
            message: format!("{} cannot be empty", field_name),
        });
    }

    if path.contains('\0') {
        return Err(OpsError::ValidationError {
            message: format!("{} contains null bytes: {}", field_name, path),
        });
    }

    Ok(())
}

pub fn validate_non_empty(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(OpsError::ValidationError {
            message: format!("{} cannot be empty", field_name),
        });
    }

    Ok(())
}

pub fn validate_email(field_name: &str, address: &str) -> Result<()> {
    // Full RFC validation happens in the mail transport; this catches the
    // obviously broken values before any account mutation starts.
    let looks_valid = match address.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    };

    if !looks_valid {
        return Err(OpsError::ValidationError {
            message: format!("{} is not a valid email address: {}", field_name, address),
        });
    }

    Ok(())
}
