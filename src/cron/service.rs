//! Cron daemon control.

use crate::error::{CronsmithError, Result};
use crate::shell::execute_check;

/// Starts the cron daemon after a successful crontab registration.
///
/// The daemon name differs across distributions (`cron` on Debian-family,
/// `crond` on Red Hat-family) as does the service manager, so candidate
/// commands are tried in order until one succeeds.
#[derive(Debug, Clone)]
pub struct SchedulerService {
    elevated: bool,
}

impl SchedulerService {
    /// Create a service controller; `elevated` decides sudo prefixing.
    pub fn new(elevated: bool) -> Self {
        Self { elevated }
    }

    /// Candidate start commands in preference order.
    pub fn candidate_commands(&self, have_systemctl: bool) -> Vec<String> {
        let bare: &[&str] = if have_systemctl {
            &[
                "systemctl start cron",
                "systemctl start crond",
                "service cron start",
                "service crond start",
            ]
        } else {
            &["service cron start", "service crond start"]
        };

        bare.iter()
            .map(|cmd| {
                if self.elevated {
                    cmd.to_string()
                } else {
                    format!("sudo {}", cmd)
                }
            })
            .collect()
    }

    /// Start the daemon, returning the command that worked.
    pub fn start(&self) -> Result<String> {
        let have_systemctl = execute_check("systemctl --version", None);
        self.start_with(have_systemctl, &|cmd| execute_check(cmd, None))
    }

    /// Start with a custom command runner (for testing).
    pub fn start_with(
        &self,
        have_systemctl: bool,
        run: &dyn Fn(&str) -> bool,
    ) -> Result<String> {
        let candidates = self.candidate_commands(have_systemctl);
        for cmd in &candidates {
            tracing::debug!("trying scheduler start command: {}", cmd);
            if run(cmd) {
                return Ok(cmd.clone());
            }
        }

        Err(CronsmithError::ServiceStartFailed {
            message: format!("none of [{}] succeeded", candidates.join(", ")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn systemctl_commands_come_first() {
        let service = SchedulerService::new(true);
        let cmds = service.candidate_commands(true);
        assert_eq!(cmds[0], "systemctl start cron");
        assert_eq!(cmds[1], "systemctl start crond");
    }

    #[test]
    fn without_systemctl_only_service_commands() {
        let service = SchedulerService::new(true);
        let cmds = service.candidate_commands(false);
        assert!(cmds.iter().all(|c| c.starts_with("service ")));
    }

    #[test]
    fn unelevated_commands_use_sudo() {
        let service = SchedulerService::new(false);
        let cmds = service.candidate_commands(true);
        assert!(cmds.iter().all(|c| c.starts_with("sudo ")));
    }

    #[test]
    fn start_returns_first_working_command() {
        let service = SchedulerService::new(true);
        let cmd = service
            .start_with(true, &|cmd| cmd.contains("crond"))
            .unwrap();
        assert_eq!(cmd, "systemctl start crond");
    }

    #[test]
    fn start_errors_when_everything_fails() {
        let service = SchedulerService::new(true);
        let err = service.start_with(true, &|_| false).unwrap_err();
        assert!(matches!(err, CronsmithError::ServiceStartFailed { .. }));
    }
}
