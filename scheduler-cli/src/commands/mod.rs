//! Command implementations for the scheduler CLI

pub mod appointments;
pub mod customers;
pub mod db;
pub mod login;
pub mod lookups;
pub mod reports;

// Re-export main dispatcher functions for flat access from main.rs
pub use appointments::run_appointments;
pub use customers::run_customers;
pub use db::run_db;
pub use login::run_login;
pub use reports::run_reports;

use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use inquire::Confirm;

/// Ask before a destructive step; `assume_yes` skips the prompt.
pub(crate) fn confirm(question: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    if !io::stdin().is_terminal() {
        anyhow::bail!("{} (pass --yes to confirm non-interactively)", question);
    }
    Confirm::new(question)
        .with_default(false)
        .prompt()
        .context("Failed to get confirmation")
}
