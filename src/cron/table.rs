//! Per-user crontab access.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{CronsmithError, Result};

use super::entry::CronEntry;

/// Outcome of an ensure-present operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsureOutcome {
    /// The entry was appended to the table.
    Added,
    /// An equivalent entry already existed; the table is unchanged.
    AlreadyPresent,
}

/// A parsed per-user crontab.
///
/// Lines the tool did not create (comments, environment assignments,
/// foreign entries) are preserved verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CronTable {
    lines: Vec<String>,
}

impl CronTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the text produced by `crontab -l`.
    pub fn from_text(text: &str) -> Self {
        let lines = text
            .lines()
            .map(|l| l.trim_end().to_string())
            .collect::<Vec<_>>();
        // Drop trailing blank lines but keep interior ones
        let mut table = Self { lines };
        while table.lines.last().is_some_and(|l| l.is_empty()) {
            table.lines.pop();
        }
        table
    }

    /// Render back to crontab text. `crontab -` requires a trailing newline.
    pub fn to_text(&self) -> String {
        if self.lines.is_empty() {
            String::new()
        } else {
            format!("{}\n", self.lines.join("\n"))
        }
    }

    /// Raw lines of the table.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Parseable entries in the table (comments and blanks skipped).
    pub fn entries(&self) -> impl Iterator<Item = CronEntry> + '_ {
        self.lines
            .iter()
            .filter(|l| !l.trim().is_empty() && !l.trim_start().starts_with('#'))
            .filter_map(|l| CronEntry::parse(l).ok())
    }

    /// Whether an equivalent entry is already present.
    pub fn contains(&self, entry: &CronEntry) -> bool {
        self.entries().any(|e| e.same_as(entry))
    }

    /// Append a raw line unconditionally.
    ///
    /// This reproduces the original script's `(crontab -l; echo ...) | crontab -`
    /// behavior: appending the same line twice yields two entries. The CLI
    /// goes through [`ensure`](Self::ensure) instead.
    pub fn push_line(&mut self, line: &str) {
        self.lines.push(line.trim_end().to_string());
    }

    /// Ensure the entry is present exactly once.
    pub fn ensure(&mut self, entry: &CronEntry) -> EnsureOutcome {
        if self.contains(entry) {
            EnsureOutcome::AlreadyPresent
        } else {
            self.push_line(&entry.to_line());
            EnsureOutcome::Added
        }
    }

    /// Remove every entry whose command matches; returns how many went away.
    pub fn remove_command(&mut self, command: &str) -> usize {
        let before = self.lines.len();
        self.lines.retain(|line| {
            CronEntry::parse(line)
                .map(|e| e.command != command)
                .unwrap_or(true)
        });
        before - self.lines.len()
    }
}

/// Handle to the system `crontab` utility.
///
/// The binary is overridable so tests can point at a stub.
#[derive(Debug, Clone)]
pub struct SystemCrontab {
    binary: PathBuf,
}

impl Default for SystemCrontab {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCrontab {
    /// Use the `crontab` found on PATH.
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("crontab"),
        }
    }

    /// Use a specific crontab binary (for testing).
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Read the invoking user's table.
    ///
    /// `crontab -l` exits non-zero with "no crontab for <user>" when the
    /// user has no table yet; that is an empty table, not an error.
    pub fn list(&self) -> Result<CronTable> {
        let output = Command::new(&self.binary)
            .arg("-l")
            .output()
            .map_err(|e| CronsmithError::CrontabFailed {
                operation: "list".to_string(),
                message: format!("could not run {}: {}", self.binary.display(), e),
            })?;

        if output.status.success() {
            return Ok(CronTable::from_text(&String::from_utf8_lossy(
                &output.stdout,
            )));
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        if stderr.to_lowercase().contains("no crontab") {
            Ok(CronTable::new())
        } else {
            Err(CronsmithError::CrontabFailed {
                operation: "list".to_string(),
                message: stderr.trim().to_string(),
            })
        }
    }

    /// Replace the invoking user's table with the given one.
    ///
    /// List-then-store is not atomic; a concurrent crontab edit between the
    /// two calls is lost, same as with the underlying utility.
    pub fn store(&self, table: &CronTable) -> Result<()> {
        let mut child = Command::new(&self.binary)
            .arg("-")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| CronsmithError::CrontabFailed {
                operation: "store".to_string(),
                message: format!("could not run {}: {}", self.binary.display(), e),
            })?;

        if let Some(stdin) = child.stdin.as_mut() {
            stdin.write_all(table.to_text().as_bytes())?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| CronsmithError::CrontabFailed {
                operation: "store".to_string(),
                message: e.to_string(),
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(CronsmithError::CrontabFailed {
                operation: "store".to_string(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

/// The directory where the system stores per-user crontab files.
///
/// Debian-family systems use `/var/spool/cron/crontabs`, Red Hat-family
/// systems `/var/spool/cron`. The original script's success message names
/// the Debian path; verification reproduces it for whichever directory is
/// in use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpoolDir {
    dir: PathBuf,
}

impl SpoolDir {
    /// Conventional spool locations, most specific first.
    const CANDIDATES: &'static [&'static str] = &["/var/spool/cron/crontabs", "/var/spool/cron"];

    /// Detect the spool directory on this host.
    ///
    /// Falls back to the Debian path when neither candidate exists, so the
    /// failure message still names a concrete location.
    pub fn detect() -> Self {
        let dir = Self::CANDIDATES
            .iter()
            .map(PathBuf::from)
            .find(|p| p.is_dir())
            .unwrap_or_else(|| PathBuf::from(Self::CANDIDATES[0]));
        Self { dir }
    }

    /// Use a specific directory (for testing).
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory itself.
    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// The crontab file for a user.
    pub fn file_for(&self, user: &str) -> PathBuf {
        self.dir.join(user)
    }

    /// Check that the user's crontab file exists.
    pub fn verify(&self, user: &str) -> Result<PathBuf> {
        let file = self.file_for(user);
        if file.is_file() {
            Ok(file)
        } else {
            Err(CronsmithError::CrontabNotCreated { path: file })
        }
    }
}
