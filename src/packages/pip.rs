//! pip invocations.
//!
//! Libraries are installed through `<interpreter> -m pip` rather than a
//! bare `pip3` so the install lands in the same interpreter the cron entry
//! will run.

/// Build the pip install command for a set of libraries.
pub fn pip_install_command(interpreter: &str, packages: &[String]) -> String {
    format!(
        "{} -m pip install --upgrade {}",
        interpreter,
        packages.join(" ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_module_invocation() {
        let cmd = pip_install_command(
            "python3",
            &["pysmb".to_string(), "email-validator".to_string()],
        );
        assert_eq!(cmd, "python3 -m pip install --upgrade pysmb email-validator");
    }

    #[test]
    fn respects_configured_interpreter() {
        let cmd = pip_install_command("python3.12", &["requests".to_string()]);
        assert!(cmd.starts_with("python3.12 -m pip"));
    }
}
