//! Cron entry model, crontab access, and scheduler service control.
//!
//! The per-user crontab is treated as a read-mutate-write document:
//! [`CronTable`] parses the output of `crontab -l`, entry mutation happens
//! on the parsed table, and [`SystemCrontab`] writes the result back by
//! piping through `crontab -`. Verification checks the OS spool file that
//! `crontab` maintains.

pub mod entry;
pub mod service;
pub mod table;

pub use entry::CronEntry;
pub use service::SchedulerService;
pub use table::{CronTable, EnsureOutcome, SpoolDir, SystemCrontab};
