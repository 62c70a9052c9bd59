//! Output formatters: console, JSON and Markdown

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::{display_skills, AnalysisReport};
use crate::processing::skill_matcher::SkillSet;
use colored::{Color, Colorize};
use std::path::Path;

const SCORE_FOOTNOTE: &str = "The match score compares the full text of both documents using \
TF-IDF cosine similarity. The skill breakdown only looks for phrases from the skill vocabulary.";

pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Terminal output with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Picks the formatter for a requested output format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{}\n", title.color(Color::Blue).bold())
        } else {
            format!("\n{}\n", title)
        }
    }

    fn format_skill_list(&self, title: &str, skills: &SkillSet, color: Color) -> String {
        let mut output = self.format_header(&format!("{} ({})", title, skills.len()));
        if skills.is_empty() {
            output.push_str("  None\n");
        }
        for skill in display_skills(skills) {
            output.push_str(&format!("  • {}\n", self.colorize(&skill, color)));
        }
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME ANALYSIS"));
        output.push_str(&format!(
            "Job: {} | Resume: {}\n",
            report.metadata.job_file, report.metadata.resume_file
        ));

        let score = result.score_percentage();
        let score = if self.use_colors {
            score.color(Color::Cyan).bold().to_string()
        } else {
            score
        };
        output.push_str(&format!("\nMatch Score: {}\n", score));

        output.push_str(&self.format_skill_list("Matched Skills", &result.matched, Color::Green));
        output.push_str(&self.format_skill_list("Missing Skills", &result.missing, Color::Red));
        output.push_str(&self.format_skill_list("Additional Skills", &result.extra, Color::Yellow));

        if self.detailed {
            output.push_str(&self.format_header("Details"));
            output.push_str(&format!(
                "Job description skills: {}\nResume skills: {}\nVocabulary size: {}\n",
                result.job_skill_count(),
                result.resume_skill_count(),
                report.metadata.vocabulary_size
            ));
            output.push_str(&format!(
                "Generated: {} | Processing time: {}ms | Version: {}\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.processing_time_ms,
                report.metadata.analyzer_version
            ));
        }

        output.push('\n');
        output.push_str(&self.colorize(&format!("Note: {}", SCORE_FOOTNOTE), Color::BrightBlack));
        output.push('\n');

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn skill_section(title: &str, skills: &SkillSet) -> String {
        let mut output = format!("## {} ({})\n\n", title, skills.len());
        if skills.is_empty() {
            output.push_str("_None_\n");
        }
        for skill in display_skills(skills) {
            output.push_str(&format!("- {}\n", skill));
        }
        output.push('\n');
        output
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str("# Resume Analysis Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.processing_time_ms
            ));
            output.push_str(&format!(
                "**Resume:** `{}` | **Job:** `{}`\n\n",
                report.metadata.resume_file, report.metadata.job_file
            ));
        }

        output.push_str(&format!("**Match Score:** {}\n\n", result.score_percentage()));

        output.push_str(&Self::skill_section("Matched Skills", &result.matched));
        output.push_str(&Self::skill_section("Missing Skills", &result.missing));
        output.push_str(&Self::skill_section("Additional Skills", &result.extra));

        output.push_str(&format!("> {}\n", SCORE_FOOTNOTE));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    pub fn with_options(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(detailed),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(file_path, content)?;
    Ok(())
}
