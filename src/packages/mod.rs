//! Package installation: OS package manager and pip.

pub mod manager;
pub mod pip;

pub use manager::SystemPackageManager;
pub use pip::pip_install_command;
