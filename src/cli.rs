// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes. Three subcommands mirror the three views of
// the portfolio: the profile, the project listing, and a single project's
// documentation.
// =============================================================================

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "portfolio-scout",
    version = "0.1.0",
    about = "Fetch a GitHub portfolio and extract structured project info from READMEs",
    long_about = "portfolio-scout queries the public GitHub REST API for a user's profile and \
                  repositories, detects installer artifacts on releases, renders README files \
                  to sanitized HTML, and mines structured summary fields out of README text."
)]
pub struct Cli {
    /// GitHub account to fetch (defaults to the portfolio owner)
    ///
    /// Global: applies to every subcommand
    #[arg(long, global = true)]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch and display the user profile
    ///
    /// Example: portfolio-scout user
    User {
        /// Output JSON instead of the human-readable summary
        #[arg(long)]
        json: bool,
    },

    /// List the portfolio repositories with release artifact info
    ///
    /// Forks, archived repos and the identity repos are filtered out;
    /// mobile-oriented repos are checked for an installer on their
    /// latest release.
    Repos {
        /// Output JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Fetch a repository's documentation and extract project info
    ///
    /// Example: portfolio-scout readme my-cool-app --html
    Readme {
        /// Repository name (e.g. "my-cool-app")
        repo: String,

        /// Print rendered, sanitized HTML instead of extracted info
        #[arg(long)]
        html: bool,

        /// Output extracted info as JSON
        #[arg(long, conflicts_with = "html")]
        json: bool,
    },
}
