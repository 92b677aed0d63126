//! A terminal client for a developer-search service.
//!
//! # Overview
//!
//! `dev-scout` submits a free-text query to a developer-search service,
//! normalizes the ranked answer it gets back, and renders each candidate's
//! per-repository contribution evidence as a color-coded table: category
//! chips for languages and project types, commit totals, and a
//! technical-ability bar banded into four quality tiers.
//!
//! # Quick Start
//!
//! ```bash
//! dev-scout search "The best Rust developers who work in data processing"
//! ```
//!
//! The service's ranking order is preserved by default; `--sort-by
//! commits` or `--sort-by ability` reorders the rows at render time.
//!
//! # Output
//!
//! Results go to the terminal unless `--html results.html` is given, which
//! writes a self-contained HTML report instead.
//!
//! A search that matches nothing prints a "no developers found" notice and
//! exits successfully; transport failures and service-reported errors
//! print a message and exit non-zero. With `--check`, the exit code also
//! fails when no candidate reaches the second ability tier.
//!
//! # Configuration
//!
//! Settings load from `scout.[toml|yml|yaml|json]` in the working
//! directory (or `--config PATH`): the service base URL, the request
//! timeout, the pending status messages, and the tier colors. Generate a
//! commented starting point with:
//!
//! ```bash
//! dev-scout init
//! ```
//!
//! and check an edited file with `dev-scout validate`.

use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};
use dev_scout::Result;

mod commands;

use crate::commands::{InitArgs, SearchArgs, ValidateArgs, init_config, process_search, validate_config};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "dev-scout", version, about)]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: ScoutSubcommand,
}

#[derive(Subcommand, Debug)]
enum ScoutSubcommand {
    /// Search for developers and render the ranked results
    Search(Box<SearchArgs>),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    match &Cli::parse().command {
        ScoutSubcommand::Search(search_args) => process_search(search_args).await,
        ScoutSubcommand::Init(init_args) => init_config(init_args),
        ScoutSubcommand::Validate(validate_args) => validate_config(validate_args),
    }
}
