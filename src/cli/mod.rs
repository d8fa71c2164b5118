//! CLI module
//!
//! Command-line interface for listing platform resources through the pagers.
//!
//! # Commands
//!
//! - `cases` - Support cases
//! - `access-groups` / `access-group-members` - IAM access groups
//! - `resource-instances` - Resource controller instances
//! - `users` - Users in an account
//! - `partner-reports` / `enterprise-reports` / `account-usage` - Usage reports

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, PageArgs};
pub use runner::Runner;
