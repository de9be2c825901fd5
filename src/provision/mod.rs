//! Provisioning plan and runner.
//!
//! [`ProvisionPlan`] turns the configuration into an ordered list of steps;
//! [`Runner`] executes them with UI reporting. External effects (package
//! installs, crontab access, service control) are injected through
//! [`RunnerContext`] so tests can stub them.

pub mod plan;
pub mod runner;

pub use plan::{daily_entry, entry_command, ProvisionPlan, Step};
pub use runner::{default_context, Runner, RunnerContext};
