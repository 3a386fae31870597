//! Output formatters for ranking reports

use crate::error::Result;
use crate::output::report::RankingReport;
use colored::{Color, Colorize};
use std::path::Path;

const RULE_WIDTH: usize = 80;

/// Terms listed per candidate in the text report
pub const TEXT_REPORT_TERMS: usize = 5;

/// Characters of job summary shown in the text report
pub const TEXT_SUMMARY_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Console,
}

/// Trait for formatting ranking reports
pub trait OutputFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Fixed plain-text layout, byte-for-byte deterministic
pub struct TextFormatter;

/// JSON formatter for API integration and structured data
pub struct JsonFormatter {
    pretty: bool,
}

/// Short colored summary of the leading candidates
pub struct ConsoleFormatter {
    use_colors: bool,
    max_candidates: usize,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    text_formatter: TextFormatter,
    json_formatter: JsonFormatter,
    console_formatter: ConsoleFormatter,
}

/// Render `report` in the fixed text layout
pub fn render_text(report: &RankingReport) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let summary: String = report
        .job_description_summary
        .chars()
        .take(TEXT_SUMMARY_CHARS)
        .collect();

    let mut lines = vec![
        rule.clone(),
        "CANDIDATE RANKING REPORT".to_string(),
        rule.clone(),
        format!("Generated: {}", report.timestamp),
        format!("Total Candidates: {}", report.total_candidates),
        String::new(),
        "Job Description Summary:".to_string(),
        format!("{}...", summary),
        String::new(),
        rule.clone(),
        "RANKED CANDIDATES".to_string(),
        rule,
        String::new(),
    ];

    for candidate in &report.candidates {
        lines.push(format!("Rank #{}: {}", candidate.rank, candidate.candidate_id));
        lines.push(format!("  Match Score: {:.2}%", candidate.match_percentage));
        lines.push(format!("  Similarity Score: {:.4}", candidate.similarity_score));
        lines.push("  Top Matching Terms:".to_string());

        for term in candidate.top_matching_terms.iter().take(TEXT_REPORT_TERMS) {
            lines.push(format!("    - {}: {:.4}", term.term, term.relevance));
        }

        lines.push(String::new());
    }

    lines.join("\n")
}

pub fn render_json(report: &RankingReport, pretty: bool) -> Result<String> {
    if pretty {
        Ok(serde_json::to_string_pretty(report)?)
    } else {
        Ok(serde_json::to_string(report)?)
    }
}

impl OutputFormatter for TextFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        Ok(render_text(report))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Text
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        render_json(report, self.pretty)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, max_candidates: usize) -> Self {
        Self {
            use_colors,
            max_candidates,
        }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        if self.use_colors {
            format!("{}\n{}\n{}", rule, title.blue().bold(), rule)
        } else {
            format!("{}\n{}\n{}", rule, title, rule)
        }
    }

    fn score_color(match_percentage: f64) -> Color {
        match match_percentage {
            p if p >= 70.0 => Color::Green,
            p if p >= 40.0 => Color::Yellow,
            p if p > 0.0 => Color::BrightRed,
            _ => Color::Red,
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        let mut output = String::new();
        output.push_str(&self.format_header("RANKING SUMMARY"));
        output.push('\n');

        for candidate in report.candidates.iter().take(self.max_candidates) {
            let percentage = format!("{:.2}%", candidate.match_percentage);
            let terms: Vec<&str> = candidate
                .top_matching_terms
                .iter()
                .take(3)
                .map(|t| t.term.as_str())
                .collect();

            output.push_str(&format!("\nRank #{}: {}\n", candidate.rank, candidate.candidate_id));
            output.push_str(&format!(
                "  Match Score: {}\n",
                self.colorize(&percentage, Self::score_color(candidate.match_percentage))
            ));
            output.push_str(&format!("  Top Terms: {}\n", terms.join(", ")));
        }

        if report.candidates.len() > self.max_candidates {
            output.push_str(&format!(
                "\n... and {} more candidates\n",
                report.candidates.len() - self.max_candidates
            ));
        }

        output.push('\n');
        output.push_str(&"=".repeat(RULE_WIDTH));
        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, true, 5)
    }

    pub fn with_options(pretty_json: bool, use_colors: bool, summary_candidates: usize) -> Self {
        Self {
            text_formatter: TextFormatter,
            json_formatter: JsonFormatter::new(pretty_json),
            console_formatter: ConsoleFormatter::new(use_colors, summary_candidates),
        }
    }

    pub fn generate_report(&self, report: &RankingReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => self.text_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Console => self.console_formatter.format_report(report),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::report::{CandidateReport, TermRelevance};
    use tempfile::TempDir;

    fn sample_report() -> RankingReport {
        RankingReport {
            timestamp: "2024-01-01T00:00:00".to_string(),
            job_description_summary: "Test job description".to_string(),
            total_candidates: 1,
            candidates: vec![CandidateReport {
                candidate_id: "test.pdf".to_string(),
                rank: 1,
                similarity_score: 0.85,
                match_percentage: 85.0,
                top_matching_terms: vec![TermRelevance {
                    term: "python".to_string(),
                    relevance: 0.8,
                }],
            }],
        }
    }

    #[test]
    fn test_render_text_layout() {
        let text = render_text(&sample_report());

        let expected = [
            "=".repeat(80),
            "CANDIDATE RANKING REPORT".to_string(),
            "=".repeat(80),
            "Generated: 2024-01-01T00:00:00".to_string(),
            "Total Candidates: 1".to_string(),
            String::new(),
            "Job Description Summary:".to_string(),
            "Test job description...".to_string(),
            String::new(),
            "=".repeat(80),
            "RANKED CANDIDATES".to_string(),
            "=".repeat(80),
            String::new(),
            "Rank #1: test.pdf".to_string(),
            "  Match Score: 85.00%".to_string(),
            "  Similarity Score: 0.8500".to_string(),
            "  Top Matching Terms:".to_string(),
            "    - python: 0.8000".to_string(),
            String::new(),
        ]
        .join("\n");

        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_text_is_deterministic() {
        let report = sample_report();
        assert_eq!(render_text(&report), render_text(&report.clone()));
    }

    #[test]
    fn test_render_text_limits_terms_and_summary() {
        let mut report = sample_report();
        report.job_description_summary = "x".repeat(300);
        report.candidates[0].top_matching_terms = (0..8)
            .map(|i| TermRelevance {
                term: format!("term{}", i),
                relevance: 0.1,
            })
            .collect();

        let text = render_text(&report);

        assert!(text.contains(&format!("{}...", "x".repeat(200))));
        assert!(!text.contains(&"x".repeat(201)));
        assert!(text.contains("term4"));
        assert!(!text.contains("term5"));
    }

    #[test]
    fn test_json_formatter() {
        let report = sample_report();
        let compact = JsonFormatter::new(false).format_report(&report).unwrap();
        let parsed: RankingReport = serde_json::from_str(&compact).unwrap();
        assert_eq!(parsed, report);
        assert!(!compact.contains('\n'));
    }

    #[test]
    fn test_console_formatter_without_colors() {
        let output = ConsoleFormatter::new(false, 5).format_report(&sample_report()).unwrap();
        assert!(output.contains("RANKING SUMMARY"));
        assert!(output.contains("Rank #1: test.pdf"));
        assert!(output.contains("Match Score: 85.00%"));
        assert!(output.contains("Top Terms: python"));
    }

    #[test]
    fn test_generator_dispatch() {
        let generator = ReportGenerator::with_options(true, false, 3);
        let report = sample_report();
        assert_eq!(
            generator.generate_report(&report, OutputFormat::Text).unwrap(),
            render_text(&report)
        );
        assert!(generator
            .generate_report(&report, OutputFormat::Json)
            .unwrap()
            .contains("\"candidate_id\": \"test.pdf\""));
    }

    #[test]
    fn test_save_report_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out").join("ranking_report.txt");

        save_report_to_file("hello", &path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");
    }
}
