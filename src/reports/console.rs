use crate::Result;
use crate::config::Config;
use crate::misc::ColorMode;
use crate::model::{
    AbilityTier, Bucket, CategoryTable, Developer, RepoContribution, aggregate, display_label, language_table, project_type_table,
};
use chrono::{DateTime, Utc};
use core::fmt::{self, Write};
use owo_colors::OwoColorize;
use std::io::{IsTerminal, stdout};
use terminal_size::{Width, terminal_size};

const DEFAULT_TERMINAL_WIDTH: usize = 120;
const SEPARATOR_WIDTH: usize = 40;
const TABLE_INDENT: usize = 4;
const COLUMN_GAP: usize = 2;
const ABILITY_BAR_WIDTH: usize = 20;
const LABEL_WIDTH: usize = 17;

const COMMITS_WIDTH: usize = 7;
const IMPACT_WIDTH: usize = 6;
const ABILITY_WIDTH: usize = 7;
const LINES_WIDTH: usize = 8;
const DATE_WIDTH: usize = 12;

pub fn generate<W: Write>(developers: &[Developer], config: &Config, color: ColorMode, writer: &mut W) -> Result<()> {
    ConsoleReporter::new(writer, config, color).generate_report(developers)
}

struct ConsoleReporter<'a, W: Write> {
    writer: &'a mut W,
    colors: ColorScheme<'a>,
    layout: Layout,
}

impl<'a, W: Write> ConsoleReporter<'a, W> {
    fn new(writer: &'a mut W, config: &'a Config, color_mode: ColorMode) -> Self {
        Self {
            writer,
            colors: ColorScheme::new(config, color_mode),
            layout: Layout::new(),
        }
    }

    fn generate_report(&mut self, developers: &[Developer]) -> Result<()> {
        for (index, developer) in developers.iter().enumerate() {
            if index > 0 {
                self.write_separator()?;
            }
            self.write_developer_header(developer)?;
            self.write_contributions_table(developer)?;
        }
        Ok(())
    }

    fn write_separator(&mut self) -> Result<()> {
        writeln!(self.writer)?;
        self.colors.write_styled_line(self.writer, "═", SEPARATOR_WIDTH, TextStyle::Dimmed)?;
        writeln!(self.writer)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_developer_header(&mut self, developer: &Developer) -> Result<()> {
        let summary = aggregate(&developer.contributions);
        let tier = AbilityTier::from_score(summary.mean_technical_ability);

        self.write_label("Developer")?;
        writeln!(self.writer, "{}", developer.name)?;

        self.write_label("Email")?;
        writeln!(self.writer, "{}", developer.primary_email().unwrap_or_default())?;

        if developer.emails.len() > 1 {
            self.write_label("Other Emails")?;
            writeln!(self.writer, "{}", developer.emails[1..].join(", "))?;
        }

        if !developer.rank_reason.is_empty() {
            let max_width = self.layout.terminal_width.saturating_sub(LABEL_WIDTH + COLUMN_GAP);
            self.write_label("Rank Reason")?;
            writeln!(self.writer, "{}", truncate(&developer.rank_reason, max_width))?;
        }

        self.write_label("Project Types")?;
        self.write_chips(&developer.project_types, project_type_table())?;
        writeln!(self.writer)?;

        self.write_label("Languages")?;
        self.write_chips(&developer.languages, language_table())?;
        writeln!(self.writer)?;

        self.write_label("Total Commits")?;
        writeln!(self.writer, "{}", summary.total_commits)?;

        self.write_label("Technical Ability")?;
        write!(self.writer, "{:.1} ", summary.mean_technical_ability)?;
        self.write_ability_bar(summary.mean_technical_ability, tier)?;
        write!(self.writer, " ")?;
        self.colors.write_tier_text(self.writer, &tier.to_string(), tier)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_label(&mut self, label: &str) -> Result<()> {
        write!(self.writer, "{label:<LABEL_WIDTH$}: ")?;
        Ok(())
    }

    fn write_chips(&mut self, tokens: &[String], table: &CategoryTable) -> Result<()> {
        for (index, token) in tokens.iter().enumerate() {
            if index > 0 {
                write!(self.writer, ", ")?;
            }
            let bucket = table.resolve(token);
            self.colors.write_bucket_token(self.writer, &display_label(token), bucket)?;
        }
        Ok(())
    }

    fn write_ability_bar(&mut self, mean: f64, tier: AbilityTier) -> Result<()> {
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss,
            reason = "Mean is in [0, 10] by construction"
        )]
        let filled = ((mean / 10.0) * ABILITY_BAR_WIDTH as f64).round() as usize;
        let filled = filled.min(ABILITY_BAR_WIDTH);

        write!(self.writer, "[")?;
        self.colors
            .write_tier_text(self.writer, &"=".repeat(filled), tier)?;
        write!(self.writer, "{}]", " ".repeat(ABILITY_BAR_WIDTH - filled))?;
        Ok(())
    }

    fn write_contributions_table(&mut self, developer: &Developer) -> Result<()> {
        if developer.contributions.is_empty() {
            writeln!(self.writer)?;
            self.colors.write_styled_text(self.writer, "    (no per-repository evidence)", TextStyle::Dimmed)?;
            writeln!(self.writer)?;
            return Ok(());
        }

        let table = Table::new(&developer.contributions);

        self.write_table_header(&table)?;
        for contribution in &developer.contributions {
            self.write_contribution_row(contribution, &table)?;
        }
        Ok(())
    }

    fn write_table_header(&mut self, table: &Table) -> Result<()> {
        writeln!(self.writer)?;
        self.colors.write_styled_line(self.writer, "─", table.width, TextStyle::Dimmed)?;
        writeln!(self.writer)?;

        write!(self.writer, "{:TABLE_INDENT$}", "")?;
        self.colors.write_styled_text(self.writer, "Repository", TextStyle::Bold)?;
        write!(self.writer, "{:width$}", "", width = table.repo_width - "Repository".len() + COLUMN_GAP)?;
        for (title, width) in [
            ("Commits", COMMITS_WIDTH + COLUMN_GAP),
            ("Impact", IMPACT_WIDTH),
            ("Ability", ABILITY_WIDTH),
            ("Lines", LINES_WIDTH),
            ("First Commit", DATE_WIDTH),
            ("Last Commit", DATE_WIDTH),
        ] {
            write!(self.writer, "{:width$}", "", width = width.saturating_sub(title.len()))?;
            self.colors.write_styled_text(self.writer, title, TextStyle::Bold)?;
        }
        writeln!(self.writer)?;

        self.colors.write_styled_line(self.writer, "─", table.width, TextStyle::Dimmed)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_contribution_row(&mut self, contribution: &RepoContribution, table: &Table) -> Result<()> {
        let repo_width = table.repo_width;
        write!(self.writer, "{:TABLE_INDENT$}{:<repo_width$}", "", contribution.repo)?;
        write!(self.writer, "{:>width$}", contribution.commit_count, width = COMMITS_WIDTH + COLUMN_GAP)?;
        write!(self.writer, "{:>IMPACT_WIDTH$.1}", contribution.impact_score)?;
        write!(self.writer, "{:>ABILITY_WIDTH$.1}", contribution.technical_ability)?;
        write!(self.writer, "{:>LINES_WIDTH$}", contribution.lines_modified)?;
        write!(self.writer, "{:>DATE_WIDTH$}", format_date(contribution.first_commit_at))?;
        write!(self.writer, "{:>DATE_WIDTH$}", format_date(contribution.last_commit_at))?;
        writeln!(self.writer)?;
        Ok(())
    }
}

#[derive(Copy, Clone)]
enum TextStyle {
    Bold,
    Dimmed,
}

struct ColorScheme<'a> {
    config: &'a Config,
    enabled: bool,
}

impl<'a> ColorScheme<'a> {
    fn new(config: &'a Config, color_mode: ColorMode) -> Self {
        let enabled = matches!(color_mode, ColorMode::Always) || (matches!(color_mode, ColorMode::Auto) && stdout().is_terminal());
        Self { config, enabled }
    }

    fn write_styled_text<W: Write>(&self, writer: &mut W, text: &str, style: TextStyle) -> fmt::Result {
        if !self.enabled {
            return write!(writer, "{text}");
        }
        match style {
            TextStyle::Bold => write!(writer, "{}", text.bold()),
            TextStyle::Dimmed => write!(writer, "{}", text.dimmed()),
        }
    }

    fn write_styled_line<W: Write>(&self, writer: &mut W, ch: &str, width: usize, style: TextStyle) -> fmt::Result {
        if !self.enabled {
            return write!(writer, "{}", ch.repeat(width));
        }
        match style {
            TextStyle::Bold => write!(writer, "{}", ch.repeat(width).bold()),
            TextStyle::Dimmed => write!(writer, "{}", ch.repeat(width).dimmed()),
        }
    }

    fn write_bucket_token<W: Write>(&self, writer: &mut W, label: &str, bucket: Bucket) -> fmt::Result {
        match bucket.color() {
            Some(color) if self.enabled => write!(writer, "{}", label.truecolor(color.red, color.green, color.blue)),
            _ => write!(writer, "{label}"),
        }
    }

    fn write_tier_text<W: Write>(&self, writer: &mut W, text: &str, tier: AbilityTier) -> fmt::Result {
        if !self.enabled {
            return write!(writer, "{text}");
        }
        let color = self.config.tier_color(tier);
        write!(writer, "{}", text.truecolor(color.red, color.green, color.blue))
    }
}

struct Layout {
    terminal_width: usize,
}

impl Layout {
    fn new() -> Self {
        Self {
            terminal_width: detect_terminal_width(),
        }
    }
}

struct Table {
    repo_width: usize,
    width: usize,
}

impl Table {
    fn new(contributions: &[RepoContribution]) -> Self {
        let repo_width = contributions
            .iter()
            .map(|c| c.repo.len())
            .max()
            .unwrap_or(0)
            .max("Repository".len());

        Self {
            repo_width,
            width: TABLE_INDENT
                + repo_width
                + COLUMN_GAP
                + COMMITS_WIDTH
                + IMPACT_WIDTH
                + ABILITY_WIDTH
                + LINES_WIDTH
                + DATE_WIDTH
                + DATE_WIDTH,
        }
    }
}

fn format_date(timestamp: Option<DateTime<Utc>>) -> String {
    timestamp.map_or_else(|| "-".to_string(), |ts| ts.format("%Y-%m-%d").to_string())
}

fn truncate(text: &str, max_width: usize) -> String {
    if text.len() <= max_width {
        return text.to_string();
    }

    let mut result = String::new();
    for ch in text.chars() {
        if result.len() + 1 >= max_width {
            break;
        }
        result.push(ch);
    }

    format!("{result}…")
}

fn detect_terminal_width() -> usize {
    if stdout().is_terminal() {
        terminal_size().map_or(DEFAULT_TERMINAL_WIDTH, |(Width(w), _)| usize::from(w))
    } else {
        DEFAULT_TERMINAL_WIDTH
    }
}
