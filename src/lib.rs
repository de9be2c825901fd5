//! Cronsmith - provision a host to run a Python program on a daily cron schedule.
//!
//! Cronsmith replaces the ad-hoc `install.sh` that ships with scheduled
//! Python jobs: it locates the interpreter, installs the OS and pip
//! dependencies, registers an idempotent per-user cron entry, verifies the
//! crontab spool file, and makes sure the cron daemon is running.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and validation
//! - [`cron`] - Cron entry model, crontab access, scheduler service control
//! - [`error`] - Error types and result aliases
//! - [`packages`] - System package manager and pip invocations
//! - [`provision`] - Provisioning plan and runner
//! - [`python`] - Python interpreter discovery
//! - [`shell`] - Shell command execution and platform helpers
//! - [`ui`] - Terminal output, prompts, and spinners
//!
//! # Example
//!
//! ```
//! use cronsmith::cron::CronEntry;
//!
//! let entry = CronEntry::daily(12, 0, "cd /srv/backup; python3 main.py");
//! assert_eq!(entry.to_line(), "00 12 * * * cd /srv/backup; python3 main.py");
//! ```

pub mod cli;
pub mod config;
pub mod cron;
pub mod error;
pub mod packages;
pub mod provision;
pub mod python;
pub mod shell;
pub mod ui;

pub use error::{CronsmithError, Result};
