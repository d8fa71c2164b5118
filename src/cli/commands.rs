//! CLI commands and argument parsing

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// IBM Cloud platform services CLI
#[derive(Parser, Debug)]
#[command(name = "platform-services")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Service configuration file (YAML); defaults to `<SERVICE>_*` environment variables
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Paging options shared by every list command
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct PageArgs {
    /// Page size requested from the server
    #[arg(long)]
    pub limit: Option<i64>,

    /// Fetch only the first page
    #[arg(long)]
    pub first_page: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List support cases
    Cases {
        #[command(flatten)]
        page: PageArgs,
    },

    /// List access groups in an account
    AccessGroups {
        #[arg(long)]
        account_id: String,

        #[command(flatten)]
        page: PageArgs,
    },

    /// List members of an access group
    AccessGroupMembers {
        #[arg(long)]
        access_group_id: String,

        #[command(flatten)]
        page: PageArgs,
    },

    /// List resource instances
    ResourceInstances {
        #[command(flatten)]
        page: PageArgs,
    },

    /// List users in an account
    Users {
        #[arg(long)]
        account_id: String,

        #[command(flatten)]
        page: PageArgs,
    },

    /// List partner usage reports
    PartnerReports {
        #[arg(long)]
        partner_id: String,

        /// Billing month, yyyy-mm
        #[arg(long)]
        month: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// List enterprise usage reports
    EnterpriseReports {
        #[arg(long, conflicts_with = "account_id")]
        enterprise_id: Option<String>,

        #[arg(long)]
        account_id: Option<String>,

        /// Billing month, yyyy-mm
        #[arg(long)]
        month: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// List resource instance usage in an account for a month
    AccountUsage {
        #[arg(long)]
        account_id: String,

        /// Billing month, yyyy-mm
        #[arg(long)]
        month: String,

        #[command(flatten)]
        page: PageArgs,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one item per line)
    Json,
    /// Human-readable output
    Pretty,
}
