//! Status command implementation.
//!
//! The `cronsmith status` command reports what is currently scheduled
//! without changing anything on the host.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::cli::args::StatusArgs;
use crate::config::load_config;
use crate::cron::{SpoolDir, SystemCrontab};
use crate::error::Result;
use crate::provision::daily_entry;
use crate::python;
use crate::shell::current_user;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Snapshot of the host's scheduling state.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    /// The cron line this configuration manages.
    pub entry: String,
    /// Whether the entry is present in the user's crontab. `None` when the
    /// crontab could not be read.
    pub scheduled: Option<bool>,
    /// Next time the entry fires, if it is scheduled.
    pub next_run: Option<String>,
    /// Detected interpreter version, if any.
    pub interpreter_version: Option<String>,
    /// Detected interpreter path, if any.
    pub interpreter_path: Option<PathBuf>,
    /// The spool file verification looks for.
    pub spool_file: Option<PathBuf>,
    /// Whether that spool file exists.
    pub spool_present: bool,
}

/// The status command implementation.
pub struct StatusCommand {
    working_dir: PathBuf,
    args: StatusArgs,
    config_path: Option<PathBuf>,
}

impl StatusCommand {
    /// Create a new status command.
    pub fn new(working_dir: &Path, args: StatusArgs, config_path: Option<&Path>) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            args,
            config_path: config_path.map(|p| p.to_path_buf()),
        }
    }

    /// Gather the report against injectable system handles.
    pub fn collect(&self, crontab: &SystemCrontab, spool: &SpoolDir) -> Result<StatusReport> {
        let config = load_config(&self.working_dir, self.config_path.as_deref())?;
        let entry = daily_entry(&config, &self.working_dir);

        let scheduled = match crontab.list() {
            Ok(table) => Some(table.contains(&entry)),
            Err(err) => {
                tracing::debug!("could not read crontab: {}", err);
                None
            }
        };

        let next_run = match scheduled {
            Some(true) => entry
                .next_run_after(chrono::Local::now().naive_local())
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string()),
            _ => None,
        };

        let interpreter = python::detect(&config.interpreter);

        let spool_file = current_user().ok().map(|user| spool.file_for(&user));
        let spool_present = spool_file.as_deref().is_some_and(Path::is_file);

        Ok(StatusReport {
            entry: entry.to_line(),
            scheduled,
            next_run,
            interpreter_version: interpreter.as_ref().and_then(|i| i.version.clone()),
            interpreter_path: interpreter.map(|i| i.path),
            spool_file,
            spool_present,
        })
    }

    fn render(&self, report: &StatusReport, ui: &mut dyn UserInterface) {
        ui.show_header("Schedule status");
        ui.message(&format!("Entry: {}", report.entry));

        match report.scheduled {
            Some(true) => ui.success("Scheduled in crontab"),
            Some(false) => ui.warning("Not scheduled; run `cronsmith run`"),
            None => ui.warning("Could not read crontab"),
        }

        if let Some(next_run) = &report.next_run {
            ui.message(&format!("Next run: {}", next_run));
        }

        match (&report.interpreter_version, &report.interpreter_path) {
            (Some(version), Some(path)) => {
                ui.message(&format!("Interpreter: {} ({})", version, path.display()))
            }
            (None, Some(path)) => ui.message(&format!("Interpreter: {}", path.display())),
            _ => ui.warning("Interpreter not found on PATH"),
        }

        match &report.spool_file {
            Some(file) if report.spool_present => {
                ui.message(&format!("Spool file: {}", file.display()))
            }
            Some(file) => ui.warning(&format!("Spool file missing: {}", file.display())),
            None => ui.warning("Could not determine current user"),
        }
    }
}

impl Command for StatusCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let report = self.collect(&SystemCrontab::new(), &SpoolDir::detect())?;

        if self.args.json {
            let json = serde_json::to_string_pretty(&report).map_err(anyhow::Error::from)?;
            println!("{}", json);
        } else {
            self.render(&report, ui);
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    #[cfg(unix)]
    fn stub_crontab(dir: &Path, script: &str) -> SystemCrontab {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join("crontab");
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        SystemCrontab::with_binary(path)
    }

    #[cfg(unix)]
    #[test]
    fn collect_reports_scheduled_entry() {
        let temp = TempDir::new().unwrap();
        let working_dir = temp.path().join("job");
        fs::create_dir_all(&working_dir).unwrap();

        let script = format!(
            "#!/bin/sh\necho '00 12 * * * cd {}; python3 main.py'\n",
            working_dir.display()
        );
        let crontab = stub_crontab(temp.path(), &script);
        let spool = SpoolDir::at(temp.path());

        let cmd = StatusCommand::new(&working_dir, StatusArgs::default(), None);
        let report = cmd.collect(&crontab, &spool).unwrap();

        assert_eq!(report.scheduled, Some(true));
        assert!(report.next_run.is_some());
        assert!(report.entry.contains("python3 main.py"));
    }

    #[cfg(unix)]
    #[test]
    fn collect_handles_empty_crontab() {
        let temp = TempDir::new().unwrap();
        let crontab = stub_crontab(temp.path(), "#!/bin/sh\necho 'no crontab' >&2\nexit 1\n");
        let spool = SpoolDir::at(temp.path());

        let cmd = StatusCommand::new(temp.path(), StatusArgs::default(), None);
        let report = cmd.collect(&crontab, &spool).unwrap();

        assert_eq!(report.scheduled, Some(false));
    }

    #[test]
    fn render_warns_when_not_scheduled() {
        let temp = TempDir::new().unwrap();
        let cmd = StatusCommand::new(temp.path(), StatusArgs::default(), None);
        let report = StatusReport {
            entry: "00 12 * * * cd /srv; python3 main.py".to_string(),
            scheduled: Some(false),
            next_run: None,
            interpreter_version: Some("3.11.2".to_string()),
            interpreter_path: Some(PathBuf::from("/usr/bin/python3")),
            spool_file: Some(PathBuf::from("/var/spool/cron/crontabs/alice")),
            spool_present: false,
        };

        let mut ui = MockUI::new();
        cmd.render(&report, &mut ui);

        assert!(ui.has_warning("Not scheduled"));
        assert!(ui.has_warning("Spool file missing"));
        assert!(ui.has_message("3.11.2"));
    }

    #[test]
    fn report_serializes_to_json() {
        let report = StatusReport {
            entry: "00 12 * * * cd /srv; python3 main.py".to_string(),
            scheduled: Some(true),
            next_run: Some("2024-05-10 12:00".to_string()),
            interpreter_version: None,
            interpreter_path: None,
            spool_file: None,
            spool_present: false,
        };

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"scheduled\":true"));
        assert!(json.contains("python3 main.py"));
    }
}
