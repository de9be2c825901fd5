//! Remove command implementation.
//!
//! The `cronsmith remove` command deletes the managed cron entry, leaving
//! every other line of the user's crontab alone.

use std::path::{Path, PathBuf};

use crate::cli::args::RemoveArgs;
use crate::config::load_config;
use crate::cron::SystemCrontab;
use crate::error::Result;
use crate::provision::entry_command;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The remove command implementation.
pub struct RemoveCommand {
    working_dir: PathBuf,
    args: RemoveArgs,
    config_path: Option<PathBuf>,
}

impl RemoveCommand {
    /// Create a new remove command.
    pub fn new(working_dir: &Path, args: RemoveArgs, config_path: Option<&Path>) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            args,
            config_path: config_path.map(|p| p.to_path_buf()),
        }
    }

    /// Remove the entry through an injectable crontab handle.
    pub fn execute_with(
        &self,
        crontab: &SystemCrontab,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let config = load_config(&self.working_dir, self.config_path.as_deref())?;
        let command = entry_command(&config, &self.working_dir);

        if !self.args.yes {
            let question = format!("Remove the daily cron entry for '{}'?", config.entrypoint);
            if !ui.confirm("remove", &question, true)? {
                ui.message("Aborted.");
                return Ok(CommandResult::failure(1));
            }
        }

        let mut table = crontab.list()?;
        let removed = table.remove_command(&command);
        if removed == 0 {
            ui.message("No matching cron entry found.");
            return Ok(CommandResult::success());
        }

        crontab.store(&table)?;
        let noun = if removed == 1 { "entry" } else { "entries" };
        ui.success(&format!("Removed {} cron {}", removed, noun));
        Ok(CommandResult::success())
    }
}

impl Command for RemoveCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        self.execute_with(&SystemCrontab::new(), ui)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    #[cfg(unix)]
    fn stub_crontab(dir: &Path, spool_file: &Path) -> SystemCrontab {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join("crontab");
        let script = format!(
            "#!/bin/sh\n\
             if [ \"$1\" = \"-l\" ]; then\n\
               if [ -f '{file}' ]; then cat '{file}'; else echo 'no crontab' >&2; exit 1; fi\n\
             else\n\
               cat > '{file}'\n\
             fi\n",
            file = spool_file.display()
        );
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        SystemCrontab::with_binary(path)
    }

    #[cfg(unix)]
    #[test]
    fn removes_only_the_managed_entry() {
        let temp = TempDir::new().unwrap();
        let working_dir = temp.path().join("job");
        fs::create_dir_all(&working_dir).unwrap();

        let spool_file = temp.path().join("alice");
        fs::write(
            &spool_file,
            format!(
                "30 2 * * * /usr/local/bin/backup\n00 12 * * * cd {}; python3 main.py\n",
                working_dir.display()
            ),
        )
        .unwrap();
        let crontab = stub_crontab(temp.path(), &spool_file);

        let args = RemoveArgs { yes: true };
        let cmd = RemoveCommand::new(&working_dir, args, None);
        let mut ui = MockUI::new();

        let result = cmd.execute_with(&crontab, &mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_success("Removed 1 cron entry"));
        let remaining = fs::read_to_string(&spool_file).unwrap();
        assert_eq!(remaining, "30 2 * * * /usr/local/bin/backup\n");
    }

    #[cfg(unix)]
    #[test]
    fn nothing_to_remove_is_not_an_error() {
        let temp = TempDir::new().unwrap();
        let crontab = stub_crontab(temp.path(), &temp.path().join("missing"));

        let cmd = RemoveCommand::new(temp.path(), RemoveArgs { yes: true }, None);
        let mut ui = MockUI::new();

        let result = cmd.execute_with(&crontab, &mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_message("No matching cron entry"));
    }

    #[cfg(unix)]
    #[test]
    fn declined_confirmation_leaves_crontab_alone() {
        let temp = TempDir::new().unwrap();
        let spool_file = temp.path().join("alice");
        fs::write(
            &spool_file,
            format!("00 12 * * * cd {}; python3 main.py\n", temp.path().display()),
        )
        .unwrap();
        let crontab = stub_crontab(temp.path(), &spool_file);

        let cmd = RemoveCommand::new(temp.path(), RemoveArgs::default(), None);
        let mut ui = MockUI::new();
        ui.set_confirm_response("remove", false);

        let result = cmd.execute_with(&crontab, &mut ui).unwrap();

        assert!(!result.success);
        assert!(fs::read_to_string(&spool_file).unwrap().contains("main.py"));
    }
}
