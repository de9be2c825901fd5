//! Provisioning steps and dry-run rendering.

use std::path::Path;

use crate::config::ProvisionConfig;
use crate::cron::CronEntry;
use crate::packages::pip_install_command;

/// A provisioning step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Report the Python interpreter and its version (informational).
    CheckInterpreter,
    /// Install/upgrade the interpreter and pip through the OS package manager.
    InstallSystemPackages,
    /// Install the configured libraries through pip.
    InstallPythonPackages,
    /// Ensure the daily cron entry is present.
    RegisterSchedule,
    /// Verify the crontab spool file exists.
    VerifySchedule,
    /// Start the cron daemon.
    StartScheduler,
}

impl Step {
    /// Short title shown next to the step progress counter.
    pub fn title(&self) -> &'static str {
        match self {
            Self::CheckInterpreter => "Check Python interpreter",
            Self::InstallSystemPackages => "Install system packages",
            Self::InstallPythonPackages => "Install Python libraries",
            Self::RegisterSchedule => "Register cron entry",
            Self::VerifySchedule => "Verify crontab",
            Self::StartScheduler => "Start scheduler",
        }
    }
}

/// The ordered steps for one provisioning run.
#[derive(Debug, Clone)]
pub struct ProvisionPlan {
    steps: Vec<Step>,
}

impl ProvisionPlan {
    /// Build the plan from configuration.
    ///
    /// `skip_packages` drops both package steps (useful on hosts where the
    /// dependencies are managed elsewhere); the scheduling steps always run.
    pub fn build(config: &ProvisionConfig, skip_packages: bool) -> Self {
        let mut steps = vec![Step::CheckInterpreter];

        if !skip_packages {
            if !config.system_packages.is_empty() {
                steps.push(Step::InstallSystemPackages);
            }
            if !config.python_packages.is_empty() {
                steps.push(Step::InstallPythonPackages);
            }
        }

        steps.push(Step::RegisterSchedule);
        steps.push(Step::VerifySchedule);
        steps.push(Step::StartScheduler);

        Self { steps }
    }

    /// The steps in execution order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Render the plan for `--dry-run` output.
    pub fn describe(&self, config: &ProvisionConfig, working_dir: &Path) -> Vec<String> {
        let entry = daily_entry(config, working_dir);
        self.steps
            .iter()
            .map(|step| match step {
                Step::CheckInterpreter => {
                    format!("would look up '{}' on PATH", config.interpreter)
                }
                Step::InstallSystemPackages => format!(
                    "would install system packages: {}",
                    config.system_packages.join(", ")
                ),
                Step::InstallPythonPackages => format!(
                    "would run: {}",
                    pip_install_command(&config.interpreter, &config.python_packages)
                ),
                Step::RegisterSchedule => {
                    format!("would ensure crontab entry: {}", entry.to_line())
                }
                Step::VerifySchedule => "would verify the crontab spool file".to_string(),
                Step::StartScheduler => "would start the cron daemon".to_string(),
            })
            .collect()
    }
}

/// The command field of the managed cron entry.
///
/// Anchored to the absolute working directory at invocation, exactly like
/// the original `cd $PWD; python3 main.py` line.
pub fn entry_command(config: &ProvisionConfig, working_dir: &Path) -> String {
    format!(
        "cd {}; {} {}",
        working_dir.display(),
        config.interpreter,
        config.entrypoint
    )
}

/// The full managed entry for this configuration.
pub fn daily_entry(config: &ProvisionConfig, working_dir: &Path) -> CronEntry {
    CronEntry::daily(
        config.schedule.hour,
        config.schedule.minute,
        &entry_command(config, working_dir),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn full_plan_order() {
        let plan = ProvisionPlan::build(&ProvisionConfig::default(), false);
        assert_eq!(
            plan.steps(),
            &[
                Step::CheckInterpreter,
                Step::InstallSystemPackages,
                Step::InstallPythonPackages,
                Step::RegisterSchedule,
                Step::VerifySchedule,
                Step::StartScheduler,
            ]
        );
    }

    #[test]
    fn skip_packages_drops_install_steps() {
        let plan = ProvisionPlan::build(&ProvisionConfig::default(), true);
        assert_eq!(
            plan.steps(),
            &[
                Step::CheckInterpreter,
                Step::RegisterSchedule,
                Step::VerifySchedule,
                Step::StartScheduler,
            ]
        );
    }

    #[test]
    fn empty_package_lists_drop_their_steps() {
        let config = ProvisionConfig {
            system_packages: vec![],
            ..Default::default()
        };
        let plan = ProvisionPlan::build(&config, false);
        assert!(!plan.steps().contains(&Step::InstallSystemPackages));
        assert!(plan.steps().contains(&Step::InstallPythonPackages));
    }

    #[test]
    fn entry_command_matches_original_shape() {
        let cmd = entry_command(&ProvisionConfig::default(), &PathBuf::from("/srv/backup"));
        assert_eq!(cmd, "cd /srv/backup; python3 main.py");
    }

    #[test]
    fn daily_entry_uses_configured_schedule() {
        let entry = daily_entry(&ProvisionConfig::default(), &PathBuf::from("/srv/backup"));
        assert_eq!(entry.to_line(), "00 12 * * * cd /srv/backup; python3 main.py");
    }

    #[test]
    fn describe_mentions_the_entry_line() {
        let config = ProvisionConfig::default();
        let plan = ProvisionPlan::build(&config, false);
        let lines = plan.describe(&config, &PathBuf::from("/srv/backup"));
        assert_eq!(lines.len(), plan.steps().len());
        assert!(lines
            .iter()
            .any(|l| l.contains("00 12 * * * cd /srv/backup; python3 main.py")));
    }
}
