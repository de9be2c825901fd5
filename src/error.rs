//! Error types for cronsmith operations.
//!
//! This module defines [`CronsmithError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `CronsmithError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `CronsmithError::Other`) for unexpected errors
//! - Every external command failure maps to a typed error; nothing is
//!   silently ignored

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for cronsmith operations.
#[derive(Debug, Error)]
pub enum CronsmithError {
    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// External command failed or could not be spawned.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// No supported system package manager on this host.
    #[error("No supported package manager found: {message}")]
    PackageManagerNotFound { message: String },

    /// System package installation failed.
    #[error("Package installation failed for '{package}': {message}")]
    PackageInstallFailed { package: String, message: String },

    /// pip installation failed.
    #[error("pip install failed for '{package}': {message}")]
    PipInstallFailed { package: String, message: String },

    /// A cron entry line did not parse.
    #[error("Invalid cron entry: {line}")]
    InvalidCronEntry { line: String },

    /// Reading or writing the user's crontab failed.
    #[error("crontab {operation} failed: {message}")]
    CrontabFailed { operation: String, message: String },

    /// The crontab spool file was not found after registration.
    #[error("Crontab not created at {path}")]
    CrontabNotCreated { path: PathBuf },

    /// Starting the cron daemon failed.
    #[error("Failed to start scheduler service: {message}")]
    ServiceStartFailed { message: String },

    /// The invoking user could not be determined.
    #[error("Could not determine current user: {message}")]
    UnknownUser { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for cronsmith operations.
pub type Result<T> = std::result::Result<T, CronsmithError>;
