//! Shell command execution and platform helpers.

pub mod command;
pub mod platform;

pub use command::{execute, execute_check, CommandOptions, CommandResult};
pub use platform::{current_user, is_ci, is_elevated};
