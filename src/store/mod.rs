//! Append-only persistence of resume records

pub mod csv_store;

use crate::error::Result;
use crate::processing::record::ResumeRecord;

pub use csv_store::CsvCorpusStore;

/// Tabular store of records, one row per processed document.
///
/// Appends never update earlier rows; re-processing a file adds another row.
pub trait CorpusStore: Send + Sync {
    fn append(&self, record: &ResumeRecord) -> Result<()>;

    /// All stored records in insertion order. A store that does not exist yet is empty.
    fn read_all(&self) -> Result<Vec<ResumeRecord>>;
}
