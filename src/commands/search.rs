use super::common::{LogLevel, init_logging, print_config_warnings};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use core::cmp::{Ordering, Reverse};
use core::time::Duration;
use dev_scout::Result;
use dev_scout::config::Config;
use dev_scout::misc::ColorMode;
use dev_scout::model::{AbilityTier, Developer, aggregate};
use dev_scout::reports::{generate_console, generate_html};
use dev_scout::search::{SearchClient, SearchSession, SessionState, StatusTicker};
use ohno::bail;
use std::fs;
use std::io::{IsTerminal, stderr};

/// Delay before the pending status line becomes visible; fast answers
/// never show it.
const TICKER_DELAY: Duration = Duration::from_millis(500);

/// How to order developer rows in the rendered table
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortBy {
    /// Order returned by the search service (most relevant first)
    Rank,
    /// Total commit count, highest first
    Commits,
    /// Mean technical ability, highest first
    Ability,
}

#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Free-text description of the developers to search for
    #[arg(value_name = "QUERY", required = true)]
    pub query: Vec<String>,

    /// Base URL of the search service [default: from configuration]
    #[arg(long, value_name = "URL", env = "DEV_SCOUT_BASE_URL")]
    pub base_url: Option<String>,

    /// Path to configuration file [default: one of scout.[toml|yml|yaml|json] ]
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// How to order developer rows in the rendered table
    #[arg(long, value_name = "ORDER", default_value = "rank")]
    pub sort_by: SortBy,

    /// Exit with failure if no developer reaches the second ability tier
    #[arg(long)]
    pub check: bool,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,

    /// Output the result table to an HTML file instead of to the terminal
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub html: Option<Utf8PathBuf>,
}

pub async fn process_search(args: &SearchArgs) -> Result<()> {
    init_logging(args.log_level);

    let (config, warnings) = Config::load(Utf8Path::new("."), args.config.as_ref())?;
    print_config_warnings(&warnings);

    let base_url = args.base_url.as_deref().unwrap_or(&config.base_url);
    let client = SearchClient::new(base_url, Duration::from_secs(config.request_timeout))?;

    let use_colors = matches!(args.color, ColorMode::Always) || (matches!(args.color, ColorMode::Auto) && stderr().is_terminal());
    let ticker = StatusTicker::new(
        config.status_messages.clone(),
        Duration::from_secs(config.status_message_interval.max(1)),
        TICKER_DELAY,
        use_colors,
    );

    let query = args.query.join(" ");
    let mut session = SearchSession::new();
    session.submit(&client, &query, &ticker).await;

    match session.state() {
        SessionState::Succeeded => {
            if let Some(notice) = session.notice() {
                println!("{notice}");
                return Ok(());
            }
            report(&session, args, &config)
        }
        SessionState::Failed => {
            let Some(failure) = session.failure() else {
                unreachable!("failed session must carry a failure");
            };
            eprintln!("{}", failure.user_message());
            bail!("search failed")
        }
        SessionState::Idle | SessionState::Pending => {
            unreachable!("session must settle before reporting")
        }
    }
}

fn report(session: &SearchSession, args: &SearchArgs, config: &Config) -> Result<()> {
    let mut developers = session.developers().to_vec();
    sort_developers(&mut developers, args.sort_by);

    if let Some(filename) = &args.html {
        let mut html = String::new();
        generate_html(&developers, config, "Developer search results", &mut html)?;
        fs::write(filename, html)?;
    } else {
        let mut console_output = String::new();
        _ = generate_console(&developers, config, args.color, &mut console_output);
        print!("{console_output}");
    }

    if args.check {
        check_quality_gate(&developers)?;
    }

    Ok(())
}

/// Reorder developer rows for display. `Rank` keeps the service's order;
/// both other orders sort stably so ties preserve the service's ranking.
fn sort_developers(developers: &mut [Developer], sort_by: SortBy) {
    match sort_by {
        SortBy::Rank => {}
        SortBy::Commits => developers.sort_by_key(|d| Reverse(aggregate(&d.contributions).total_commits)),
        SortBy::Ability => developers.sort_by(|a, b| {
            let a_mean = aggregate(&a.contributions).mean_technical_ability;
            let b_mean = aggregate(&b.contributions).mean_technical_ability;
            b_mean.partial_cmp(&a_mean).unwrap_or(Ordering::Equal)
        }),
    }
}

fn check_quality_gate(developers: &[Developer]) -> Result<()> {
    let best = developers
        .iter()
        .map(|d| AbilityTier::from_score(aggregate(&d.contributions).mean_technical_ability))
        .max();

    match best {
        Some(tier) if tier >= AbilityTier::Strong => {
            println!("\n✓ Quality Check: at least one candidate is at or above the {} tier", AbilityTier::Strong);
            Ok(())
        }
        _ => bail!("quality check failed: no candidate at or above the {} tier", AbilityTier::Strong),
    }
}
