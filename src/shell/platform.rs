//! Platform and environment detection.

use crate::error::{CronsmithError, Result};

use super::command::{execute, CommandOptions};

/// Check if running in a CI environment.
///
/// Used to auto-detect CI and force non-interactive mode in `main()`.
/// Checks common CI environment variables: `CI`, `GITHUB_ACTIONS`,
/// `GITLAB_CI`, `CIRCLECI`, `TRAVIS`, `JENKINS_URL`.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}

/// Check if running as root.
///
/// Package installation and service control need elevated privileges;
/// when not elevated, install commands are prefixed with `sudo`.
pub fn is_elevated() -> bool {
    #[cfg(unix)]
    {
        // SAFETY: geteuid() is a simple syscall that returns the effective user ID
        unsafe { libc::geteuid() == 0 }
    }

    #[cfg(not(unix))]
    {
        false
    }
}

/// Resolve the invoking user's login name.
///
/// Checks `$USER`, then `$LOGNAME`, then asks `id -un`. The per-user
/// crontab spool file is named after this user.
pub fn current_user() -> Result<String> {
    for var in ["USER", "LOGNAME"] {
        if let Ok(name) = std::env::var(var) {
            if !name.is_empty() {
                return Ok(name);
            }
        }
    }

    let options = CommandOptions {
        capture: true,
        ..Default::default()
    };
    let result = execute("id -un", &options)?;
    let name = result.stdout.trim().to_string();
    if result.success && !name.is_empty() {
        Ok(name)
    } else {
        Err(CronsmithError::UnknownUser {
            message: "neither $USER, $LOGNAME nor `id -un` produced a name".to_string(),
        })
    }
}
