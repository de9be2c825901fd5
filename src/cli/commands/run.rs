//! Run command implementation.
//!
//! The `cronsmith run` command executes the provisioning sequence.

use std::path::{Path, PathBuf};

use crate::cli::args::RunArgs;
use crate::config::{load_config, Schedule};
use crate::error::Result;
use crate::provision::{default_context, ProvisionPlan, Runner};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The run command implementation.
pub struct RunCommand {
    working_dir: PathBuf,
    args: RunArgs,
    config_path: Option<PathBuf>,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(working_dir: &Path, args: RunArgs, config_path: Option<&Path>) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            args,
            config_path: config_path.map(|p| p.to_path_buf()),
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &RunArgs {
        &self.args
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut config = load_config(&self.working_dir, self.config_path.as_deref())?;
        if let Some(at) = &self.args.at {
            config.schedule = Schedule::parse(at)?;
        }

        let plan = ProvisionPlan::build(&config, self.args.skip_packages);

        ui.show_header(&format!("Scheduling daily run of {}", config.entrypoint));

        if self.args.dry_run {
            ui.message("Planned steps:");
            for line in plan.describe(&config, &self.working_dir) {
                ui.message(&format!("  - {}", line));
            }
            return Ok(CommandResult::success());
        }

        if !self.args.yes {
            let question = format!(
                "Install packages and schedule '{}' daily at {:02}:{:02}?",
                config.entrypoint, config.schedule.hour, config.schedule.minute
            );
            if !ui.confirm("provision", &question, true)? {
                ui.message("Aborted.");
                return Ok(CommandResult::failure(1));
            }
        }

        let ctx = default_context()?;
        let runner = Runner::new(config, self.working_dir.clone());
        runner.run(&plan, &ctx, ui)?;

        ui.success("Provisioning complete");
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    #[test]
    fn dry_run_previews_without_side_effects() {
        let temp = TempDir::new().unwrap();
        let args = RunArgs {
            dry_run: true,
            ..Default::default()
        };
        let cmd = RunCommand::new(temp.path(), args, None);
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_message("would ensure crontab entry"));
        assert!(ui.confirms_shown().is_empty());
    }

    #[test]
    fn dry_run_honors_at_override() {
        let temp = TempDir::new().unwrap();
        let args = RunArgs {
            dry_run: true,
            at: Some("06:30".to_string()),
            ..Default::default()
        };
        let cmd = RunCommand::new(temp.path(), args, None);
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();
        assert!(ui.messages().iter().any(|m| m.contains("30 06 * * *")));
    }

    #[test]
    fn invalid_at_value_is_an_error() {
        let temp = TempDir::new().unwrap();
        let args = RunArgs {
            dry_run: true,
            at: Some("noon".to_string()),
            ..Default::default()
        };
        let cmd = RunCommand::new(temp.path(), args, None);

        assert!(cmd.execute(&mut MockUI::new()).is_err());
    }

    #[test]
    fn declined_confirmation_aborts() {
        let temp = TempDir::new().unwrap();
        let cmd = RunCommand::new(temp.path(), RunArgs::default(), None);
        let mut ui = MockUI::new();
        ui.set_confirm_response("provision", false);

        let result = cmd.execute(&mut ui).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
        assert!(ui.has_message("Aborted."));
    }
}
