//! Output formatters for ranking and extraction reports

use crate::config::{OutputConfig, OutputFormat};
use crate::error::{Result, ResumeRankerError};
use crate::output::report::*;
use crate::processing::headings::Section;
use crate::processing::ranker::SCORE_SCALE;
use crate::processing::record::{ResumeRecord, RECORD_COLUMNS};
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

const SECTION_PREVIEW: usize = 60;

/// Trait for rendering reports in one output format
pub trait OutputFormatter {
    fn format_ranking(&self, report: &RankingReport) -> Result<String>;
    fn format_extraction(&self, report: &ExtractionReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// JSON formatter for scripting and integration
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for sharing results
pub struct MarkdownFormatter;

/// Standalone HTML page
pub struct HtmlFormatter;

/// Dispatches a report to the formatter for the requested format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resume Ranking</title>
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; color: #333; max-width: 900px; margin: 0 auto; padding: 20px; background: #f8f9fa; }
        .container { background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        h1 { color: #007acc; border-bottom: 3px solid #007acc; padding-bottom: 10px; }
        table { width: 100%; border-collapse: collapse; margin: 20px 0; }
        th, td { text-align: left; padding: 8px 12px; border-bottom: 1px solid #e9ecef; }
        th { background: #f1f3f5; }
        .band { display: inline-block; padding: 2px 10px; border-radius: 12px; font-size: 0.85em; font-weight: bold; color: white; }
        .band-strong { background: #28a745; }
        .band-moderate { background: #17a2b8; }
        .band-weak { background: #ffc107; color: #000; }
        .band-none { background: #adb5bd; }
        .metadata { background: #e9ecef; padding: 15px; border-radius: 6px; font-size: 0.9em; color: #6c757d; }
    </style>
</head>
<body>
    <div class="container">
        <h1>Resume Ranking</h1>
        <p><strong>Job description:</strong> {{ job_preview }}</p>
        {% if rows.is_empty() %}
        <p>No stored resumes to rank.</p>
        {% else %}
        <table>
            <tr><th>#</th><th>Candidate</th><th>File</th><th>Score</th><th></th></tr>
            {% for row in rows %}
            <tr>
                <td>{{ row.rank }}</td>
                <td>{{ row.name }}</td>
                <td>{{ row.file }}</td>
                <td>{{ row.score }}</td>
                <td><span class="band {{ row.band_class }}">{{ row.band_label }}</span></td>
            </tr>
            {% endfor %}
        </table>
        {% endif %}
        {% if hidden_entries > 0 %}
        <p>{{ hidden_entries }} more resumes not shown.</p>
        {% endif %}
        <div class="metadata">
            <p>Generated {{ generated_at }} by resume-ranker v{{ version }} in {{ processing_time }}ms</p>
            <p>Source: {{ job_source }} | Resumes in store: {{ corpus_size }}</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct RankingHtml {
    job_preview: String,
    job_source: String,
    rows: Vec<HtmlRow>,
    hidden_entries: usize,
    corpus_size: usize,
    generated_at: String,
    processing_time: u64,
    version: String,
}

struct HtmlRow {
    rank: usize,
    name: String,
    file: String,
    score: String,
    band_class: &'static str,
    band_label: &'static str,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Extracted Resumes</title>
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; color: #333; max-width: 1100px; margin: 0 auto; padding: 20px; }
        table { width: 100%; border-collapse: collapse; }
        th, td { text-align: left; vertical-align: top; padding: 6px 10px; border-bottom: 1px solid #e9ecef; white-space: pre-line; }
    </style>
</head>
<body>
    <h1>Extracted Resumes</h1>
    <table>
        <tr>{% for column in columns %}<th>{{ column }}</th>{% endfor %}</tr>
        {% for row in rows %}
        <tr>{% for cell in row %}<td>{{ cell }}</td>{% endfor %}</tr>
        {% endfor %}
    </table>
    {% for item in skipped %}
    <p>Skipped {{ item.file }}: {{ item.reason }}</p>
    {% endfor %}
</body>
</html>"#, ext = "html")]
struct ExtractionHtml {
    columns: Vec<&'static str>,
    rows: Vec<Vec<String>>,
    skipped: Vec<SkippedDocument>,
}

fn display_name(name: &Option<String>) -> &str {
    name.as_deref().unwrap_or("(unknown)")
}

fn record_row(record: &ResumeRecord) -> Vec<String> {
    RECORD_COLUMNS
        .iter()
        .map(|c| record.column(c).unwrap_or("").to_string())
        .collect()
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
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
            format!("\n{} {}\n", "█".blue().bold(), title.blue().bold())
        } else {
            format!("\n█ {}\n", title)
        }
    }

    fn format_band(&self, score: f64) -> String {
        let band = ScoreBand::for_score(score);
        let color = match band {
            ScoreBand::Strong => Color::Green,
            ScoreBand::Moderate => Color::Cyan,
            ScoreBand::Weak => Color::Yellow,
            ScoreBand::NoMatch => Color::BrightBlack,
        };

        if self.use_colors {
            format!("[{}]", band.label().color(color).bold())
        } else {
            format!("[{}]", band.label())
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_ranking(&self, report: &RankingReport) -> Result<String> {
        let mut output = String::new();
        let meta = &report.metadata;

        output.push_str(&self.format_header("RESUME RANKING"));
        output.push_str(&format!(
            "Job: {}\nSource: {} | Resumes in store: {} | {}ms\n",
            self.colorize(&meta.job_preview, Color::Cyan),
            meta.job_source,
            meta.corpus_size,
            meta.processing_time_ms
        ));

        if report.entries.is_empty() {
            output.push_str("\nNo resumes to rank.\n");
            return Ok(output);
        }

        output.push('\n');
        for (i, entry) in report.entries.iter().enumerate() {
            output.push_str(&format!(
                "{:>3}. {:>5.2} / {} {} {} ({})\n",
                i + 1,
                entry.score,
                SCORE_SCALE,
                self.format_band(entry.score),
                display_name(&entry.full_name),
                entry.file_name
            ));
        }

        if meta.hidden_entries > 0 {
            output.push_str(&format!("     ... and {} more\n", meta.hidden_entries));
        }

        Ok(output)
    }

    fn format_extraction(&self, report: &ExtractionReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("EXTRACTED RESUMES"));
        for record in &report.records {
            output.push_str(&format!(
                "\n{} {}\n",
                self.colorize(&record.file_name, Color::Green),
                display_name(&record.full_name)
            ));
            for (label, value) in [
                ("Email", &record.email),
                ("Phone", &record.phone),
                ("LinkedIn", &record.linkedin),
            ] {
                if let Some(value) = value {
                    output.push_str(&format!("  {:<15} {}\n", label, value));
                }
            }
            for section in Section::ALL {
                let value = record
                    .section(section)
                    .map(|v| preview(v, SECTION_PREVIEW))
                    .unwrap_or_else(|| self.colorize("-", Color::BrightBlack));
                output.push_str(&format!("  {:<15} {}\n", section.name(), value));
            }
        }

        for skipped in &report.skipped {
            output.push_str(&format!(
                "\n{} {}: {}\n",
                self.colorize("skipped", Color::Yellow),
                skipped.file,
                skipped.reason
            ));
        }

        match &report.store_path {
            Some(path) => output.push_str(&format!("\nSaved {} record(s) to {}\n", report.records.len(), path)),
            None => output.push_str("\nDry run: nothing saved\n"),
        }

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

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_ranking(&self, report: &RankingReport) -> Result<String> {
        self.to_json(report)
    }

    fn format_extraction(&self, report: &ExtractionReport) -> Result<String> {
        self.to_json(report)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    fn escape_cell(value: &str) -> String {
        value.replace('|', "\\|").replace('\n', "<br>")
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_ranking(&self, report: &RankingReport) -> Result<String> {
        let meta = &report.metadata;
        let mut output = String::new();

        output.push_str("# Resume Ranking\n\n");
        output.push_str(&format!("**Job description:** {}\n\n", meta.job_preview));
        output.push_str(&format!(
            "**Generated:** {} | **Source:** `{}` | **Resumes in store:** {}\n\n",
            meta.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            meta.job_source,
            meta.corpus_size
        ));

        if report.entries.is_empty() {
            output.push_str("_No resumes to rank._\n");
            return Ok(output);
        }

        output.push_str("| # | Candidate | File | Score |\n|---|---|---|---|\n");
        for (i, entry) in report.entries.iter().enumerate() {
            output.push_str(&format!(
                "| {} | {} | `{}` | {:.2} |\n",
                i + 1,
                Self::escape_cell(display_name(&entry.full_name)),
                entry.file_name,
                entry.score
            ));
        }

        if meta.hidden_entries > 0 {
            output.push_str(&format!("\n_{} more not shown._\n", meta.hidden_entries));
        }

        Ok(output)
    }

    fn format_extraction(&self, report: &ExtractionReport) -> Result<String> {
        let mut output = String::from("# Extracted Resumes\n");

        for record in &report.records {
            output.push_str(&format!(
                "\n## {} (`{}`)\n\n",
                Self::escape_cell(display_name(&record.full_name)),
                record.file_name
            ));
            output.push_str("| Field | Value |\n|---|---|\n");
            for column in RECORD_COLUMNS.iter().skip(2) {
                if let Some(value) = record.column(column) {
                    output.push_str(&format!("| {} | {} |\n", column, Self::escape_cell(value)));
                }
            }
        }

        if !report.skipped.is_empty() {
            output.push_str("\n## Skipped\n\n");
            for skipped in &report.skipped {
                output.push_str(&format!("- `{}`: {}\n", skipped.file, skipped.reason));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_ranking(&self, report: &RankingReport) -> Result<String> {
        let meta = &report.metadata;
        let rows = report
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let band = ScoreBand::for_score(entry.score);
                let band_class = match band {
                    ScoreBand::Strong => "band-strong",
                    ScoreBand::Moderate => "band-moderate",
                    ScoreBand::Weak => "band-weak",
                    ScoreBand::NoMatch => "band-none",
                };
                HtmlRow {
                    rank: i + 1,
                    name: display_name(&entry.full_name).to_string(),
                    file: entry.file_name.clone(),
                    score: format!("{:.2}", entry.score),
                    band_class,
                    band_label: band.label(),
                }
            })
            .collect();

        let template = RankingHtml {
            job_preview: meta.job_preview.clone(),
            job_source: meta.job_source.clone(),
            rows,
            hidden_entries: meta.hidden_entries,
            corpus_size: meta.corpus_size,
            generated_at: meta.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            processing_time: meta.processing_time_ms,
            version: meta.tool_version.clone(),
        };

        template
            .render()
            .map_err(|e| ResumeRankerError::OutputFormatting(e.to_string()))
    }

    fn format_extraction(&self, report: &ExtractionReport) -> Result<String> {
        let template = ExtractionHtml {
            columns: RECORD_COLUMNS.to_vec(),
            rows: report.records.iter().map(record_row).collect(),
            skipped: report.skipped.clone(),
        };

        template
            .render()
            .map_err(|e| ResumeRankerError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, true)
    }

    pub fn with_options(use_colors: bool, pretty_json: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter,
            html_formatter: HtmlFormatter,
        }
    }

    pub fn from_config(output: &OutputConfig) -> Self {
        Self::with_options(output.color_output, output.pretty_json)
    }

    fn formatter(&self, format: OutputFormat) -> &dyn OutputFormatter {
        match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
            OutputFormat::Html => &self.html_formatter,
        }
    }

    pub fn ranking(&self, report: &RankingReport, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_ranking(report)
    }

    pub fn extraction(&self, report: &ExtractionReport, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_extraction(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// Utility functions for saving reports
pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, job_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(job_name)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "job".to_string());

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };

    format!("{}_ranking{}.{}", base_name, timestamp_suffix, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::ranker::ScoredEntry;

    fn sample_report() -> RankingReport {
        let entries = vec![
            ScoredEntry {
                full_name: Some("Jane <Doe>".to_string()),
                file_name: "jane.pdf".to_string(),
                score: 7.5,
            },
            ScoredEntry {
                full_name: None,
                file_name: "anon.txt".to_string(),
                score: 0.0,
            },
        ];
        RankingReport::new("job.txt", "Rust engineer", 2, entries, 3, None)
    }

    fn sample_extraction() -> ExtractionReport {
        let mut report = ExtractionReport::new(None);
        report.records.push(ResumeRecord {
            file_name: "jane.pdf".to_string(),
            full_name: Some("Jane Doe".to_string()),
            email: Some("jane@example.com".to_string()),
            skills: Some("Rust | Go\nSQL".to_string()),
            ..Default::default()
        });
        report.skipped.push(SkippedDocument {
            file: "blank.pdf".to_string(),
            reason: "no text".to_string(),
        });
        report
    }

    #[test]
    fn test_console_ranking_without_colors() {
        let output = ConsoleFormatter::new(false).format_ranking(&sample_report()).unwrap();

        assert!(output.contains("  1.  7.50 / 10 [STRONG] Jane <Doe> (jane.pdf)"));
        assert!(output.contains("  2.  0.00 / 10 [NO MATCH] (unknown) (anon.txt)"));
    }

    #[test]
    fn test_console_empty_ranking() {
        let report = RankingReport::new("inline", "", 0, Vec::new(), 0, None);
        let output = ConsoleFormatter::new(false).format_ranking(&report).unwrap();
        assert!(output.contains("No resumes to rank."));
    }

    #[test]
    fn test_json_ranking_uses_column_names() {
        let output = JsonFormatter::new(false).format_ranking(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["entries"][0]["File Name"], "jane.pdf");
        assert_eq!(value["entries"][0]["score"], 7.5);
        assert!(value["entries"][1]["Full Name"].is_null());
    }

    #[test]
    fn test_markdown_escapes_cells() {
        let output = MarkdownFormatter.format_extraction(&sample_extraction()).unwrap();

        assert!(output.contains("| Skills | Rust \\| Go<br>SQL |"));
        assert!(output.contains("- `blank.pdf`: no text"));
    }

    #[test]
    fn test_html_ranking_escapes_names() {
        let output = HtmlFormatter.format_ranking(&sample_report()).unwrap();

        assert!(output.contains("Jane &lt;Doe&gt;"));
        assert!(output.contains("band-strong"));
        assert!(!output.contains("Jane <Doe>"));
    }

    #[test]
    fn test_html_extraction_table() {
        let output = HtmlFormatter.format_extraction(&sample_extraction()).unwrap();
        assert!(output.contains("<th>LinkedIn</th>"));
        assert!(output.contains("jane@example.com"));
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(
            suggest_filename(OutputFormat::Markdown, "jobs/backend.txt", false),
            "backend_ranking.md"
        );
        assert_eq!(suggest_filename(OutputFormat::Html, "", false), "job_ranking.html");
    }
}
