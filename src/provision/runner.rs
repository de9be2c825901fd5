//! Step execution with injected side effects.
//!
//! All external effects go through [`RunnerContext`], so unit tests can run
//! the full sequence against stubs without touching the host.

use std::path::PathBuf;

use crate::config::ProvisionConfig;
use crate::cron::{EnsureOutcome, SchedulerService, SpoolDir, SystemCrontab};
use crate::error::{CronsmithError, Result};
use crate::packages::{pip_install_command, SystemPackageManager};
use crate::python::{self, Interpreter};
use crate::shell::{current_user, execute, is_elevated, CommandOptions, CommandResult};
use crate::ui::UserInterface;

use super::plan::{daily_entry, ProvisionPlan, Step};

/// Injected side effects for one provisioning run.
pub struct RunnerContext<'a> {
    /// Look up a Python interpreter on PATH.
    pub detect_interpreter: &'a dyn Fn(&str) -> Option<Interpreter>,
    /// Detect the system package manager.
    pub detect_package_manager: &'a dyn Fn() -> Result<SystemPackageManager>,
    /// Run an install command with captured output.
    pub run_install: &'a dyn Fn(&str) -> Result<CommandResult>,
    /// Start the cron daemon; the flag is whether the process is elevated.
    pub start_service: &'a dyn Fn(bool) -> Result<String>,
    /// Handle to the `crontab` utility.
    pub crontab: SystemCrontab,
    /// Crontab spool directory for verification.
    pub spool: SpoolDir,
    /// The user whose crontab is managed.
    pub user: String,
    /// Whether the process runs as root.
    pub elevated: bool,
}

fn run_captured(command: &str) -> Result<CommandResult> {
    let options = CommandOptions {
        capture: true,
        ..Default::default()
    };
    execute(command, &options)
}

fn start_scheduler(elevated: bool) -> Result<String> {
    SchedulerService::new(elevated).start()
}

/// Context wired to the real host.
pub fn default_context() -> Result<RunnerContext<'static>> {
    Ok(RunnerContext {
        detect_interpreter: &python::detect,
        detect_package_manager: &SystemPackageManager::detect,
        run_install: &run_captured,
        start_service: &start_scheduler,
        crontab: SystemCrontab::new(),
        spool: SpoolDir::detect(),
        user: current_user()?,
        elevated: is_elevated(),
    })
}

/// Executes a [`ProvisionPlan`] step by step with UI reporting.
pub struct Runner {
    config: ProvisionConfig,
    working_dir: PathBuf,
}

impl Runner {
    /// Create a runner for a configuration rooted at `working_dir`.
    pub fn new(config: ProvisionConfig, working_dir: PathBuf) -> Self {
        Self {
            config,
            working_dir,
        }
    }

    /// Execute the plan. Stops at the first failed step.
    pub fn run(
        &self,
        plan: &ProvisionPlan,
        ctx: &RunnerContext,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        let total = plan.steps().len();
        for (index, step) in plan.steps().iter().enumerate() {
            ui.show_progress(index + 1, total);
            tracing::debug!("step {}/{}: {}", index + 1, total, step.title());

            match step {
                Step::CheckInterpreter => self.check_interpreter(ctx, ui),
                Step::InstallSystemPackages => self.install_system_packages(ctx, ui)?,
                Step::InstallPythonPackages => self.install_python_packages(ctx, ui)?,
                Step::RegisterSchedule => self.register_schedule(ctx, ui)?,
                Step::VerifySchedule => self.verify_schedule(ctx, ui)?,
                Step::StartScheduler => self.start_scheduler(ctx, ui)?,
            }
        }
        Ok(())
    }

    fn check_interpreter(&self, ctx: &RunnerContext, ui: &mut dyn UserInterface) {
        let binary = &self.config.interpreter;
        let mut spinner = ui.start_spinner(&format!("Looking for {}", binary));

        match (ctx.detect_interpreter)(binary) {
            Some(interpreter) => {
                let version = interpreter
                    .version
                    .as_deref()
                    .unwrap_or("unknown version")
                    .to_string();
                spinner.finish_success(&format!(
                    "{} {} at {}",
                    binary,
                    version,
                    interpreter.path.display()
                ));
            }
            None => {
                // Informational only; the package step installs it.
                spinner.finish_skipped(&format!("{} not found on PATH yet", binary));
            }
        }
    }

    fn install_system_packages(
        &self,
        ctx: &RunnerContext,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        let packages = &self.config.system_packages;
        let mut spinner = ui.start_spinner(&format!("Installing {}", packages.join(", ")));

        let manager = match (ctx.detect_package_manager)() {
            Ok(manager) => manager,
            Err(err) => {
                spinner.finish_error(&err.to_string());
                return Err(err);
            }
        };

        if let Some(refresh) = manager.refresh_command(ctx.elevated) {
            spinner.set_message(&format!("Refreshing {} package index", manager.name()));
            let result = run_step_command(ctx, &refresh, &mut *spinner)?;
            if !result.success {
                let err = CronsmithError::CommandFailed {
                    command: refresh,
                    code: result.exit_code,
                };
                spinner.finish_error(&err.to_string());
                return Err(err);
            }
        }

        spinner.set_message(&format!("Installing {}", packages.join(", ")));
        let command = manager.install_command(packages, ctx.elevated);
        let result = run_step_command(ctx, &command, &mut *spinner)?;
        if !result.success {
            let err = CronsmithError::PackageInstallFailed {
                package: packages.join(", "),
                message: failure_message(&result),
            };
            spinner.finish_error(&err.to_string());
            return Err(err);
        }

        spinner.finish_success(&format!(
            "Installed {} via {}",
            packages.join(", "),
            manager.name()
        ));
        Ok(())
    }

    fn install_python_packages(
        &self,
        ctx: &RunnerContext,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        let packages = &self.config.python_packages;
        let mut spinner =
            ui.start_spinner(&format!("Installing {} with pip", packages.join(", ")));

        let command = pip_install_command(&self.config.interpreter, packages);
        let result = run_step_command(ctx, &command, &mut *spinner)?;
        if !result.success {
            let err = CronsmithError::PipInstallFailed {
                package: packages.join(", "),
                message: failure_message(&result),
            };
            spinner.finish_error(&err.to_string());
            return Err(err);
        }

        spinner.finish_success(&format!("Installed {} with pip", packages.join(", ")));
        Ok(())
    }

    fn register_schedule(&self, ctx: &RunnerContext, ui: &mut dyn UserInterface) -> Result<()> {
        let entry = daily_entry(&self.config, &self.working_dir);
        let mut spinner = ui.start_spinner("Registering cron entry");

        let mut table = match ctx.crontab.list() {
            Ok(table) => table,
            Err(err) => {
                spinner.finish_error(&err.to_string());
                return Err(err);
            }
        };

        match table.ensure(&entry) {
            EnsureOutcome::Added => {
                if let Err(err) = ctx.crontab.store(&table) {
                    spinner.finish_error(&err.to_string());
                    return Err(err);
                }
                spinner.finish_success(&format!("Scheduled: {}", entry.to_line()));
            }
            EnsureOutcome::AlreadyPresent => {
                spinner.finish_skipped(&format!("Already scheduled: {}", entry.to_line()));
            }
        }
        Ok(())
    }

    fn verify_schedule(&self, ctx: &RunnerContext, ui: &mut dyn UserInterface) -> Result<()> {
        let mut spinner = ui.start_spinner("Verifying crontab");

        match ctx.spool.verify(&ctx.user) {
            Ok(_) => {
                spinner.finish_success(&format!(
                    "Crontab created in {}",
                    ctx.spool.path().display()
                ));
                Ok(())
            }
            Err(err) => {
                spinner.finish_error("ERROR: crontab not created");
                Err(err)
            }
        }
    }

    fn start_scheduler(&self, ctx: &RunnerContext, ui: &mut dyn UserInterface) -> Result<()> {
        let mut spinner = ui.start_spinner("Starting cron daemon");

        match (ctx.start_service)(ctx.elevated) {
            Ok(command) => {
                spinner.finish_success(&format!("Scheduler running ({})", command));
                Ok(())
            }
            Err(err) => {
                spinner.finish_error(&err.to_string());
                Err(err)
            }
        }
    }
}

/// Run one step command, finishing the spinner if the spawn itself fails.
fn run_step_command(
    ctx: &RunnerContext,
    command: &str,
    spinner: &mut dyn crate::ui::SpinnerHandle,
) -> Result<CommandResult> {
    match (ctx.run_install)(command) {
        Ok(result) => Ok(result),
        Err(err) => {
            spinner.finish_error(&err.to_string());
            Err(err)
        }
    }
}

/// Condense a failed command's output into one error line.
fn failure_message(result: &CommandResult) -> String {
    let stderr = result.stderr.trim();
    match stderr.lines().last() {
        Some(line) => line.to_string(),
        None => format!("exit code {:?}", result.exit_code),
    }
}
