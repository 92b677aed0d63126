use crate::Result;
use crate::config::Config;
use crate::model::{AbilityTier, CategoryTable, Developer, aggregate, display_label, language_table, project_type_table};
use core::fmt::Write;

const REPO_SUMMARY_LIMIT: usize = 3;

pub fn generate<W: Write>(developers: &[Developer], config: &Config, title: &str, writer: &mut W) -> Result<()> {
    let mut generator = HtmlGenerator::new(writer, config, title);
    generator.generate(developers)
}

struct HtmlGenerator<'a, W: Write> {
    writer: &'a mut W,
    config: &'a Config,
    title: &'a str,
}

impl<'a, W: Write> HtmlGenerator<'a, W> {
    const fn new(writer: &'a mut W, config: &'a Config, title: &'a str) -> Self {
        Self { writer, config, title }
    }

    fn generate(&mut self, developers: &[Developer]) -> Result<()> {
        self.write_header()?;
        self.write_styles()?;
        self.write_body_start()?;
        self.write_title()?;
        self.write_table(developers)?;
        self.write_footer()?;
        Ok(())
    }

    fn write_header(&mut self) -> Result<()> {
        writeln!(self.writer, "<!DOCTYPE html>")?;
        writeln!(self.writer, "<html lang=\"en\">")?;
        writeln!(self.writer, "<head>")?;
        writeln!(self.writer, "<meta charset=\"UTF-8\">")?;
        writeln!(
            self.writer,
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
        )?;
        writeln!(self.writer, "<title>{}</title>", html_escape(self.title))?;
        Ok(())
    }

    fn write_styles(&mut self) -> Result<()> {
        writeln!(self.writer, "<style>")?;
        writeln!(self.writer, ":root {{")?;
        writeln!(self.writer, "  color-scheme: light dark;")?;
        writeln!(self.writer, "}}")?;
        writeln!(self.writer)?;

        writeln!(self.writer, "@media (prefers-color-scheme: light) {{")?;
        writeln!(self.writer, "  :root {{")?;
        writeln!(self.writer, "    --bg-primary: #ffffff;")?;
        writeln!(self.writer, "    --bg-secondary: #f5f5f5;")?;
        writeln!(self.writer, "    --text-primary: #1a1a1a;")?;
        writeln!(self.writer, "    --text-secondary: #666666;")?;
        writeln!(self.writer, "    --border-color: #e0e0e0;")?;
        writeln!(self.writer, "    --bar-track: #e0e0e0;")?;
        writeln!(self.writer, "  }}")?;
        writeln!(self.writer, "}}")?;
        writeln!(self.writer)?;

        writeln!(self.writer, "@media (prefers-color-scheme: dark) {{")?;
        writeln!(self.writer, "  :root {{")?;
        writeln!(self.writer, "    --bg-primary: #1e1e1e;")?;
        writeln!(self.writer, "    --bg-secondary: #2d2d2d;")?;
        writeln!(self.writer, "    --text-primary: #e0e0e0;")?;
        writeln!(self.writer, "    --text-secondary: #b0b0b0;")?;
        writeln!(self.writer, "    --border-color: #404040;")?;
        writeln!(self.writer, "    --bar-track: #404040;")?;
        writeln!(self.writer, "  }}")?;
        writeln!(self.writer, "}}")?;
        writeln!(self.writer)?;

        writeln!(self.writer, "body {{")?;
        writeln!(
            self.writer,
            "  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;"
        )?;
        writeln!(self.writer, "  background: var(--bg-primary);")?;
        writeln!(self.writer, "  color: var(--text-primary);")?;
        writeln!(self.writer, "  line-height: 1.6;")?;
        writeln!(self.writer, "  padding: 20px;")?;
        writeln!(self.writer, "}}")?;
        writeln!(self.writer)?;

        writeln!(self.writer, "table {{")?;
        writeln!(self.writer, "  border-collapse: collapse;")?;
        writeln!(self.writer, "  width: 100%;")?;
        writeln!(self.writer, "}}")?;
        writeln!(self.writer)?;

        writeln!(self.writer, "th, td {{")?;
        writeln!(self.writer, "  text-align: left;")?;
        writeln!(self.writer, "  vertical-align: top;")?;
        writeln!(self.writer, "  padding: 12px 16px;")?;
        writeln!(self.writer, "  border-bottom: 1px solid var(--border-color);")?;
        writeln!(self.writer, "}}")?;
        writeln!(self.writer)?;

        writeln!(self.writer, "th {{")?;
        writeln!(self.writer, "  background: var(--bg-secondary);")?;
        writeln!(self.writer, "  text-transform: uppercase;")?;
        writeln!(self.writer, "  font-size: 0.75em;")?;
        writeln!(self.writer, "  letter-spacing: 0.05em;")?;
        writeln!(self.writer, "  color: var(--text-secondary);")?;
        writeln!(self.writer, "}}")?;
        writeln!(self.writer)?;

        writeln!(self.writer, ".email, .repos, .reason {{")?;
        writeln!(self.writer, "  color: var(--text-secondary);")?;
        writeln!(self.writer, "  font-size: 0.85em;")?;
        writeln!(self.writer, "}}")?;
        writeln!(self.writer)?;

        writeln!(self.writer, ".chip {{")?;
        writeln!(self.writer, "  display: inline-block;")?;
        writeln!(self.writer, "  padding: 2px 10px;")?;
        writeln!(self.writer, "  margin: 2px;")?;
        writeln!(self.writer, "  border-radius: 9999px;")?;
        writeln!(self.writer, "  font-size: 0.8em;")?;
        writeln!(self.writer, "  background: var(--bg-secondary);")?;
        writeln!(self.writer, "}}")?;
        writeln!(self.writer)?;

        writeln!(self.writer, ".bar {{")?;
        writeln!(self.writer, "  display: inline-block;")?;
        writeln!(self.writer, "  width: 120px;")?;
        writeln!(self.writer, "  height: 10px;")?;
        writeln!(self.writer, "  border-radius: 9999px;")?;
        writeln!(self.writer, "  background: var(--bar-track);")?;
        writeln!(self.writer, "  overflow: hidden;")?;
        writeln!(self.writer, "  vertical-align: middle;")?;
        writeln!(self.writer, "}}")?;
        writeln!(self.writer)?;

        writeln!(self.writer, ".bar-fill {{")?;
        writeln!(self.writer, "  height: 100%;")?;
        writeln!(self.writer, "}}")?;
        writeln!(self.writer, "</style>")?;
        writeln!(self.writer, "</head>")?;
        Ok(())
    }

    fn write_body_start(&mut self) -> Result<()> {
        writeln!(self.writer, "<body>")?;
        Ok(())
    }

    fn write_title(&mut self) -> Result<()> {
        writeln!(self.writer, "<h1>{}</h1>", html_escape(self.title))?;
        Ok(())
    }

    fn write_table(&mut self, developers: &[Developer]) -> Result<()> {
        writeln!(self.writer, "<table>")?;
        writeln!(self.writer, "<thead>")?;
        writeln!(
            self.writer,
            "<tr><th>Developer</th><th>Projects</th><th>Skills</th><th>Technical Ability</th></tr>"
        )?;
        writeln!(self.writer, "</thead>")?;
        writeln!(self.writer, "<tbody>")?;

        for developer in developers {
            self.write_row(developer)?;
        }

        writeln!(self.writer, "</tbody>")?;
        writeln!(self.writer, "</table>")?;
        Ok(())
    }

    fn write_row(&mut self, developer: &Developer) -> Result<()> {
        let summary = aggregate(&developer.contributions);
        let tier = AbilityTier::from_score(summary.mean_technical_ability);

        writeln!(self.writer, "<tr>")?;

        writeln!(self.writer, "<td>")?;
        writeln!(self.writer, "<div>{}</div>", html_escape(&developer.name))?;
        writeln!(
            self.writer,
            "<div class=\"email\">{}</div>",
            html_escape(&developer.emails.join(", "))
        )?;
        if !developer.rank_reason.is_empty() {
            writeln!(self.writer, "<div class=\"reason\">{}</div>", html_escape(&developer.rank_reason))?;
        }
        writeln!(self.writer, "</td>")?;

        writeln!(self.writer, "<td>")?;
        self.write_chip_list(&developer.project_types, project_type_table())?;
        self.write_repo_summary(developer)?;
        writeln!(self.writer, "</td>")?;

        writeln!(self.writer, "<td>")?;
        self.write_chip_list(&developer.languages, language_table())?;
        writeln!(self.writer, "</td>")?;

        writeln!(self.writer, "<td>")?;
        let color = self.config.tier_color(tier);
        let percent = summary.mean_technical_ability * 10.0;
        writeln!(
            self.writer,
            "<div class=\"bar\"><div class=\"bar-fill\" style=\"width: {percent:.0}%; background: rgb({}, {}, {})\"></div></div>",
            color.red, color.green, color.blue
        )?;
        writeln!(
            self.writer,
            "<span> {:.1}/10 · {} commits</span>",
            summary.mean_technical_ability, summary.total_commits
        )?;
        writeln!(self.writer, "</td>")?;

        writeln!(self.writer, "</tr>")?;
        Ok(())
    }

    fn write_chip_list(&mut self, tokens: &[String], table: &CategoryTable) -> Result<()> {
        writeln!(self.writer, "<div>")?;
        for token in tokens {
            let label = html_escape(&display_label(token));
            match table.resolve(token).color() {
                Some(color) => writeln!(
                    self.writer,
                    "<span class=\"chip\" style=\"background: rgba({}, {}, {}, 0.15); color: rgb({}, {}, {})\">{label}</span>",
                    color.red, color.green, color.blue, color.red, color.green, color.blue
                )?,
                None => writeln!(self.writer, "<span class=\"chip\">{label}</span>")?,
            }
        }
        writeln!(self.writer, "</div>")?;
        Ok(())
    }

    fn write_repo_summary(&mut self, developer: &Developer) -> Result<()> {
        if developer.contributions.is_empty() {
            return Ok(());
        }

        let repos: Vec<&str> = developer
            .contributions
            .iter()
            .take(REPO_SUMMARY_LIMIT)
            .map(|c| c.repo.as_str())
            .collect();
        let ellipsis = if developer.contributions.len() > REPO_SUMMARY_LIMIT { " …" } else { "" };

        writeln!(self.writer, "<div class=\"repos\">{}{ellipsis}</div>", html_escape(&repos.join(", ")))?;
        Ok(())
    }

    fn write_footer(&mut self) -> Result<()> {
        writeln!(self.writer, "</body>")?;
        writeln!(self.writer, "</html>")?;
        Ok(())
    }
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RepoContribution;

    #[test]
    fn test_report_renders_chips_in_source_order() {
        let config = Config::default();
        let developer = Developer {
            name: "Sarah Chen".to_string(),
            emails: vec!["sarah@example.com".to_string()],
            languages: vec!["rust".to_string()],
            project_types: vec!["data_processing".to_string(), "dev_ops".to_string()],
            contributions: vec![RepoContribution {
                repo: "acme/pipeline".to_string(),
                commit_count: 42,
                impact_score: 7.5,
                technical_ability: 8.0,
                lines_modified: 1200,
                first_commit_at: None,
                last_commit_at: None,
            }],
            rank_reason: String::new(),
        };

        let mut output = String::new();
        generate(&[developer], &config, "Search results", &mut output).expect("report generation must succeed");

        let data = output.find("data processing").expect("first chip missing");
        let ops = output.find("dev ops").expect("second chip missing");
        assert!(data < ops);
        assert!(output.contains("width: 80%"));
        assert!(output.contains("8.0/10"));
    }

    #[test]
    fn test_escapes_untrusted_text() {
        let config = Config::default();
        let developer = Developer {
            name: "<script>alert(1)</script>".to_string(),
            ..Developer::default()
        };

        let mut output = String::new();
        generate(&[developer], &config, "Search results", &mut output).expect("report generation must succeed");

        assert!(!output.contains("<script>alert(1)</script>"));
        assert!(output.contains("&lt;script&gt;"));
    }
}
