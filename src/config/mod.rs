//! Configuration loading and validation.
//!
//! Configuration is optional: with no file present the defaults reproduce
//! the classic provisioning script (daily `python3 main.py` at 12:00 with
//! the pysmb and email-validator libraries).

pub mod loader;
pub mod schema;

pub use loader::{find_config, load_config};
pub use schema::{ProvisionConfig, Schedule};
