//! System package manager detection and command construction.

use crate::error::{CronsmithError, Result};
use crate::shell::execute_check;

/// Detected system package manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemPackageManager {
    Apt,
    Dnf,
    Yum,
    Pacman,
    Homebrew,
}

impl SystemPackageManager {
    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Apt => "apt",
            Self::Dnf => "dnf",
            Self::Yum => "yum",
            Self::Pacman => "pacman",
            Self::Homebrew => "brew",
        }
    }

    /// Detect the package manager on this host.
    pub fn detect() -> Result<Self> {
        Self::detect_with(&|cmd| execute_check(cmd, None))
    }

    /// Detect with a custom probe function (for testing).
    pub fn detect_with(probe: &dyn Fn(&str) -> bool) -> Result<Self> {
        let candidates = [
            ("apt-get --version", Self::Apt),
            ("dnf --version", Self::Dnf),
            ("yum --version", Self::Yum),
            ("pacman --version", Self::Pacman),
            ("brew --version", Self::Homebrew),
        ];

        for (check, manager) in candidates {
            if probe(check) {
                return Ok(manager);
            }
        }

        Err(CronsmithError::PackageManagerNotFound {
            message: "none of apt, dnf, yum, pacman, brew responded".to_string(),
        })
    }

    /// Command to refresh the package index, if this manager needs one
    /// before installing.
    pub fn refresh_command(&self, elevated: bool) -> Option<String> {
        let cmd = match self {
            Self::Apt => "apt-get update",
            // dnf/yum/pacman refresh as part of install; brew updates itself
            _ => return None,
        };
        Some(with_sudo(cmd, elevated, *self))
    }

    /// Command to install (or upgrade to latest) the named packages.
    pub fn install_command(&self, packages: &[String], elevated: bool) -> String {
        let list = packages.join(" ");
        let cmd = match self {
            Self::Apt => format!("apt-get install -y {}", list),
            Self::Dnf => format!("dnf install -y {}", list),
            Self::Yum => format!("yum install -y {}", list),
            Self::Pacman => format!("pacman -S --noconfirm --needed {}", list),
            Self::Homebrew => format!("brew install {}", list),
        };
        with_sudo(&cmd, elevated, *self)
    }
}

/// Prefix a command with `sudo` when not already elevated.
///
/// Homebrew refuses to run as root, so it is never sudo-prefixed.
fn with_sudo(cmd: &str, elevated: bool, manager: SystemPackageManager) -> String {
    if elevated || manager == SystemPackageManager::Homebrew {
        cmd.to_string()
    } else {
        format!("sudo {}", cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pkgs(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn detect_prefers_apt() {
        let manager = SystemPackageManager::detect_with(&|cmd| cmd.starts_with("apt-get")).unwrap();
        assert_eq!(manager, SystemPackageManager::Apt);
    }

    #[test]
    fn detect_falls_through_to_later_managers() {
        let manager = SystemPackageManager::detect_with(&|cmd| cmd.starts_with("pacman")).unwrap();
        assert_eq!(manager, SystemPackageManager::Pacman);
    }

    #[test]
    fn detect_errors_when_nothing_responds() {
        let err = SystemPackageManager::detect_with(&|_| false).unwrap_err();
        assert!(matches!(err, CronsmithError::PackageManagerNotFound { .. }));
    }

    #[test]
    fn apt_install_command_elevated() {
        let cmd = SystemPackageManager::Apt.install_command(&pkgs(&["python3", "python3-pip"]), true);
        assert_eq!(cmd, "apt-get install -y python3 python3-pip");
    }

    #[test]
    fn apt_install_command_unelevated_uses_sudo() {
        let cmd = SystemPackageManager::Apt.install_command(&pkgs(&["python3"]), false);
        assert_eq!(cmd, "sudo apt-get install -y python3");
    }

    #[test]
    fn brew_never_uses_sudo() {
        let cmd = SystemPackageManager::Homebrew.install_command(&pkgs(&["python3"]), false);
        assert_eq!(cmd, "brew install python3");
    }

    #[test]
    fn only_apt_refreshes() {
        assert_eq!(
            SystemPackageManager::Apt.refresh_command(true),
            Some("apt-get update".to_string())
        );
        assert_eq!(
            SystemPackageManager::Apt.refresh_command(false),
            Some("sudo apt-get update".to_string())
        );
        assert_eq!(SystemPackageManager::Dnf.refresh_command(true), None);
        assert_eq!(SystemPackageManager::Homebrew.refresh_command(false), None);
    }

    #[test]
    fn pacman_install_is_idempotent() {
        let cmd = SystemPackageManager::Pacman.install_command(&pkgs(&["python"]), true);
        assert!(cmd.contains("--needed"));
    }
}
