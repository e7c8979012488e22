//! Error handling for the resume ranker

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeRankerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("No text could be extracted from document: {0}")]
    EmptyDocument(String),

    #[error("No stored resumes to rank")]
    EmptyCorpus,

    #[error("Ranking inputs share no vocabulary")]
    NoVocabulary,

    #[error("Corpus store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Invalid pattern: {0}")]
    Pattern(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, ResumeRankerError>;

impl From<regex::Error> for ResumeRankerError {
    fn from(err: regex::Error) -> Self {
        ResumeRankerError::Pattern(err.to_string())
    }
}

impl From<csv::Error> for ResumeRankerError {
    fn from(err: csv::Error) -> Self {
        ResumeRankerError::StoreUnavailable(err.to_string())
    }
}
