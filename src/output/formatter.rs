//! Output formatters for match reports

use crate::config::OutputFormat;
use crate::error::{Result, ResumeMatchError};
use crate::output::report::{AnalysisReport, ScoreBand};
use colored::{Color, Colorize};
use log::info;
use std::path::Path;

/// Trait for formatting analysis reports
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
}

/// Terminal output with a coloured score
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON output: `{score, missing_skills}`, or the full report when detailed
pub struct JsonFormatter {
    pretty: bool,
    detailed: bool,
}

pub struct MarkdownFormatter {
    detailed: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn band_color(band: ScoreBand) -> Color {
        match band {
            ScoreBand::Strong => Color::Green,
            ScoreBand::Moderate => Color::Yellow,
            ScoreBand::Weak => Color::Red,
        }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).bold().to_string()
        } else {
            text.to_string()
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut out = String::new();
        let score = format!("{}%", report.result.score);

        out.push_str("Match Score\n");
        out.push_str(&format!(
            "  {} ({})\n",
            self.paint(&score, Self::band_color(report.band)),
            report.band.verdict()
        ));

        if self.detailed {
            out.push_str(&format!("\nResume text ({}):\n{}\n", report.resume_source, report.resume_preview));
            out.push_str(&format!("\nJob description text ({}):\n{}\n", report.job_source, report.job_preview));
        }

        out.push_str("\nSuggestions to improve your resume\n");
        if report.result.missing_skills.is_empty() {
            out.push_str(&format!(
                "  {}\n",
                self.paint("Your resume covers all relevant skills!", Color::Green)
            ));
        } else {
            out.push_str("  Your resume is missing the following relevant skills:\n");
            for skill in &report.result.missing_skills {
                out.push_str(&format!("  • {}\n", self.paint(skill, Color::Red)));
            }
        }

        Ok(out)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool, detailed: bool) -> Self {
        Self { pretty, detailed }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let json = match (self.detailed, self.pretty) {
            (true, true) => serde_json::to_string_pretty(report)?,
            (true, false) => serde_json::to_string(report)?,
            (false, true) => serde_json::to_string_pretty(&report.result)?,
            (false, false) => serde_json::to_string(&report.result)?,
        };
        Ok(json)
    }
}

impl MarkdownFormatter {
    pub fn new(detailed: bool) -> Self {
        Self { detailed }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut md = String::from("# Resume Match Report\n\n");
        md.push_str(&format!(
            "**Match score:** {}% ({})\n\n",
            report.result.score,
            report.band.verdict()
        ));
        md.push_str(&format!("- Resume: `{}`\n", report.resume_source));
        md.push_str(&format!("- Job description: `{}`\n\n", report.job_source));

        md.push_str("## Missing skills\n\n");
        if report.result.missing_skills.is_empty() {
            md.push_str("None. The resume covers every recognised skill in the job description.\n");
        } else {
            for skill in &report.result.missing_skills {
                md.push_str(&format!("- {}\n", skill));
            }
        }

        if self.detailed {
            md.push_str(&format!("\n## Resume text\n\n```text\n{}\n```\n", report.resume_preview));
            md.push_str(&format!("\n## Job description text\n\n```text\n{}\n```\n", report.job_preview));
        }

        Ok(md)
    }
}

/// Picks the formatter for a format and writes results to disk.
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ReportGenerator {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true, detailed),
            markdown_formatter: MarkdownFormatter::new(detailed),
        }
    }

    pub fn generate(&self, report: &AnalysisReport, format: OutputFormat) -> Result<String> {
        let formatter: &dyn OutputFormatter = match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
        };
        formatter.format_report(report)
    }

    pub fn save(&self, content: &str, path: &Path) -> Result<()> {
        std::fs::write(path, content).map_err(|e| {
            ResumeMatchError::OutputFormatting(format!("Failed to write {}: {}", path.display(), e))
        })?;
        info!("Report saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::analyzer::MatchResult;

    fn report(missing: &[&str]) -> AnalysisReport {
        AnalysisReport {
            result: MatchResult {
                score: 34,
                missing_skills: missing.iter().map(|s| s.to_string()).collect(),
            },
            band: ScoreBand::Weak,
            resume_source: "resume.pdf".to_string(),
            job_source: "pasted text".to_string(),
            resume_preview: "Python developer".to_string(),
            job_preview: "Python and Docker engineer".to_string(),
        }
    }

    #[test]
    fn test_console_lists_missing_skills() {
        let formatter = ConsoleFormatter::new(false, false);
        let out = formatter.format_report(&report(&["kubernetes", "docker"])).unwrap();

        assert!(out.contains("34%"));
        assert!(out.contains("Weak match"));
        let docker = out.find("• docker").unwrap();
        let kubernetes = out.find("• kubernetes").unwrap();
        assert!(docker < kubernetes);
        assert!(!out.contains("Python developer"));
    }

    #[test]
    fn test_console_all_covered() {
        let formatter = ConsoleFormatter::new(false, true);
        let out = formatter.format_report(&report(&[])).unwrap();

        assert!(out.contains("covers all relevant skills"));
        assert!(out.contains("Python developer"));
    }

    #[test]
    fn test_json_compact_shape() {
        let formatter = JsonFormatter::new(false, false);
        let out = formatter.format_report(&report(&["docker"])).unwrap();

        assert_eq!(out, r#"{"score":34,"missing_skills":["docker"]}"#);
    }

    #[test]
    fn test_json_detailed_includes_band() {
        let formatter = JsonFormatter::new(false, true);
        let value: serde_json::Value =
            serde_json::from_str(&formatter.format_report(&report(&["docker"])).unwrap()).unwrap();

        assert_eq!(value["score"], 34);
        assert_eq!(value["band"], "Weak");
        assert_eq!(value["missing_skills"][0], "docker");
    }

    #[test]
    fn test_markdown_report() {
        let generator = ReportGenerator::new(false, false);
        let md = generator.generate(&report(&["docker"]), OutputFormat::Markdown).unwrap();

        assert!(md.starts_with("# Resume Match Report"));
        assert!(md.contains("- docker"));
    }
}
