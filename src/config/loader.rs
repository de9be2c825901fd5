//! Configuration file discovery and loading.

use std::path::{Path, PathBuf};

use crate::error::{CronsmithError, Result};

use super::schema::ProvisionConfig;

/// Candidate config file names, checked in order.
const CONFIG_NAMES: &[&str] = &["cronsmith.yml", ".cronsmith.yml"];

/// Find the config file for a working directory, if one exists.
pub fn find_config(working_dir: &Path) -> Option<PathBuf> {
    CONFIG_NAMES
        .iter()
        .map(|name| working_dir.join(name))
        .find(|path| path.is_file())
}

/// Load configuration for a working directory.
///
/// An explicit path (from `--config`) must exist; otherwise the working
/// directory is searched and defaults are used when nothing is found.
pub fn load_config(working_dir: &Path, explicit: Option<&Path>) -> Result<ProvisionConfig> {
    let path = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(CronsmithError::ConfigParseError {
                    path: path.to_path_buf(),
                    message: "file not found".to_string(),
                });
            }
            Some(path.to_path_buf())
        }
        None => find_config(working_dir),
    };

    let config = match path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let contents = std::fs::read_to_string(&path)?;
            serde_yaml::from_str(&contents).map_err(|e| CronsmithError::ConfigParseError {
                path,
                message: e.to_string(),
            })?
        }
        None => {
            tracing::debug!("no config file found, using defaults");
            ProvisionConfig::default()
        }
    };

    config.validate()?;
    Ok(config)
}
