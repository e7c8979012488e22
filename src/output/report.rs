//! Report structures handed to the output formatters

use crate::processing::ranker::{ScoredEntry, SCORE_SCALE};
use crate::processing::record::ResumeRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const PREVIEW_LENGTH: usize = 120;

/// Ranked resumes for one job description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingReport {
    pub metadata: RankingMetadata,
    pub entries: Vec<ScoredEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingMetadata {
    pub generated_at: DateTime<Utc>,
    /// Where the job description came from (file path or "inline").
    pub job_source: String,
    pub job_preview: String,
    pub corpus_size: usize,
    /// Entries left out by the result cap.
    pub hidden_entries: usize,
    pub processing_time_ms: u64,
    pub tool_version: String,
}

/// Records produced by one extraction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub generated_at: DateTime<Utc>,
    pub records: Vec<ResumeRecord>,
    pub skipped: Vec<SkippedDocument>,
    /// Store the records were appended to; `None` for dry runs.
    pub store_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedDocument {
    pub file: String,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Strong,
    Moderate,
    Weak,
    NoMatch,
}

impl ScoreBand {
    pub fn for_score(score: f64) -> Self {
        let fraction = score / SCORE_SCALE;
        if fraction >= 0.5 {
            ScoreBand::Strong
        } else if fraction >= 0.25 {
            ScoreBand::Moderate
        } else if fraction > 0.0 {
            ScoreBand::Weak
        } else {
            ScoreBand::NoMatch
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Strong => "STRONG",
            ScoreBand::Moderate => "MODERATE",
            ScoreBand::Weak => "WEAK",
            ScoreBand::NoMatch => "NO MATCH",
        }
    }
}

impl RankingReport {
    /// Build a report, keeping at most `max_results` entries when set.
    pub fn new(
        job_source: &str,
        job_text: &str,
        corpus_size: usize,
        mut entries: Vec<ScoredEntry>,
        processing_time_ms: u64,
        max_results: Option<usize>,
    ) -> Self {
        let total = entries.len();
        if let Some(limit) = max_results {
            entries.truncate(limit);
        }

        Self {
            metadata: RankingMetadata {
                generated_at: Utc::now(),
                job_source: job_source.to_string(),
                job_preview: preview(job_text, PREVIEW_LENGTH),
                corpus_size,
                hidden_entries: total - entries.len(),
                processing_time_ms,
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
            },
            entries,
        }
    }
}

impl ExtractionReport {
    pub fn new(store_path: Option<String>) -> Self {
        Self {
            generated_at: Utc::now(),
            records: Vec::new(),
            skipped: Vec::new(),
            store_path,
        }
    }
}

/// Single-line preview cut at a word boundary.
pub fn preview(text: &str, max_chars: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        return flat;
    }

    let truncated: String = flat.chars().take(max_chars).collect();
    let cut = truncated.rfind(' ').unwrap_or(truncated.len());
    format!("{}...", &truncated[..cut])
}
