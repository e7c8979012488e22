//! Output formatting module
//! Renders ranking and extraction reports

pub mod formatter;
pub mod report;

pub use formatter::{save_report_to_file, suggest_filename, ReportGenerator};
pub use report::{ExtractionReport, RankingReport};
