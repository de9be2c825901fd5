//! Python interpreter discovery.
//!
//! The interpreter check is informational: provisioning proceeds whether or
//! not an interpreter is found, since the package step installs one. The
//! version is surfaced in `run` output and in `status`.

use std::path::{Path, PathBuf};

use regex::Regex;

use crate::shell::{execute, CommandOptions};

/// A discovered Python interpreter.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpreter {
    /// Binary name that was searched for (e.g., "python3").
    pub binary: String,
    /// Resolved absolute path.
    pub path: PathBuf,
    /// Version string (e.g., "3.11.2"), if `--version` produced one.
    pub version: Option<String>,
}

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On non-Unix platforms executability is determined by file extension.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Resolve a binary by iterating over PATH entries.
///
/// Returns the first match that exists and is executable. Does NOT use
/// the `which` command — `which` behavior varies across systems and
/// is sometimes a shell builtin with inconsistent error handling.
pub fn resolve_binary(binary: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    for dir in path_entries {
        let candidate = dir.join(binary);
        if candidate.is_file() && is_executable(&candidate) {
            return Some(candidate);
        }
    }
    None
}

/// Extract a dotted version from `python3 --version` output.
///
/// Python 2 printed the banner to stderr, Python 3 to stdout; both streams
/// are accepted.
pub fn parse_version(stdout: &str, stderr: &str) -> Option<String> {
    let re = Regex::new(r"Python (\d+(?:\.\d+)+)").ok()?;
    re.captures(stdout)
        .or_else(|| re.captures(stderr))
        .map(|caps| caps[1].to_string())
}

/// Look up an interpreter on PATH and query its version.
pub fn detect(binary: &str) -> Option<Interpreter> {
    let path = resolve_binary(binary, &parse_system_path())?;

    let options = CommandOptions {
        capture: true,
        ..Default::default()
    };
    let version = execute(&format!("{} --version", shell_quote(&path)), &options)
        .ok()
        .filter(|r| r.success)
        .and_then(|r| parse_version(&r.stdout, &r.stderr));

    Some(Interpreter {
        binary: binary.to_string(),
        path,
        version,
    })
}

/// Quote a path for inclusion in an `sh -c` command line.
fn shell_quote(path: &Path) -> String {
    format!("'{}'", path.display().to_string().replace('\'', r"'\''"))
}
