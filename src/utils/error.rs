use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpsError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("SSH session error: {0}")]
    SshError(#[from] ssh2::Error),

    #[error("SMTP transport error: {0}")]
    SmtpError(#[from] lettre::transport::smtp::Error),

    #[error("Email address error: {0}")]
    AddressError(#[from] lettre::address::AddressError),

    #[error("Email build error: {0}")]
    EmailError(#[from] lettre::error::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Remote command error: {message}")]
    RemoteError { message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

pub type Result<T> = std::result::Result<T, OpsError>;
