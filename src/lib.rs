//! Resume ranker library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;
pub mod store;

pub use config::Config;
pub use error::{Result, ResumeRankerError};
pub use processing::ranker::{ScoredEntry, SimilarityRanker};
pub use processing::record::{RecordBuilder, ResumeRecord};
pub use processing::segmenter::{SegmentMap, Segmenter};
pub use store::{CorpusStore, CsvCorpusStore};
