//! Configuration schema.

use serde::{Deserialize, Serialize};

use crate::error::{CronsmithError, Result};

/// Time of day for the daily invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Hour of day (0-23).
    #[serde(default = "default_hour")]
    pub hour: u8,

    /// Minute of hour (0-59).
    #[serde(default)]
    pub minute: u8,
}

fn default_hour() -> u8 {
    12
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            hour: default_hour(),
            minute: 0,
        }
    }
}

impl Schedule {
    /// Parse an `HH:MM` string (used by the `--at` flag).
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || CronsmithError::ConfigValidationError {
            message: format!("invalid schedule time '{}', expected HH:MM", s),
        };

        let (hour, minute) = s.split_once(':').ok_or_else(invalid)?;
        let schedule = Self {
            hour: hour.parse().map_err(|_| invalid())?,
            minute: minute.parse().map_err(|_| invalid())?,
        };
        schedule.validate()?;
        Ok(schedule)
    }

    /// Check field ranges.
    pub fn validate(&self) -> Result<()> {
        if self.hour > 23 || self.minute > 59 {
            return Err(CronsmithError::ConfigValidationError {
                message: format!(
                    "schedule {:02}:{:02} out of range (hour 0-23, minute 0-59)",
                    self.hour, self.minute
                ),
            });
        }
        Ok(())
    }
}

/// Provisioning configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvisionConfig {
    /// Python interpreter to schedule and to run pip through.
    #[serde(default = "default_interpreter")]
    pub interpreter: String,

    /// Program file invoked by the cron entry, relative to the working
    /// directory the tool is run from.
    #[serde(default = "default_entrypoint")]
    pub entrypoint: String,

    /// Daily invocation time.
    #[serde(default)]
    pub schedule: Schedule,

    /// Packages installed through the OS package manager.
    #[serde(default = "default_system_packages")]
    pub system_packages: Vec<String>,

    /// Libraries installed through pip.
    #[serde(default = "default_python_packages")]
    pub python_packages: Vec<String>,
}

fn default_interpreter() -> String {
    "python3".to_string()
}

fn default_entrypoint() -> String {
    "main.py".to_string()
}

fn default_system_packages() -> Vec<String> {
    vec!["python3".to_string(), "python3-pip".to_string()]
}

fn default_python_packages() -> Vec<String> {
    vec!["pysmb".to_string(), "email-validator".to_string()]
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            interpreter: default_interpreter(),
            entrypoint: default_entrypoint(),
            schedule: Schedule::default(),
            system_packages: default_system_packages(),
            python_packages: default_python_packages(),
        }
    }
}

impl ProvisionConfig {
    /// Validate field contents.
    pub fn validate(&self) -> Result<()> {
        self.schedule.validate()?;

        if self.interpreter.trim().is_empty() {
            return Err(CronsmithError::ConfigValidationError {
                message: "interpreter must not be empty".to_string(),
            });
        }
        if self.entrypoint.trim().is_empty() {
            return Err(CronsmithError::ConfigValidationError {
                message: "entrypoint must not be empty".to_string(),
            });
        }
        for pkg in self.system_packages.iter().chain(&self.python_packages) {
            if pkg.trim().is_empty() {
                return Err(CronsmithError::ConfigValidationError {
                    message: "package names must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}
