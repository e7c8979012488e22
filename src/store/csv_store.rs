//! CSV-backed corpus store

use crate::error::{Result, ResumeRankerError};
use crate::processing::record::{ResumeRecord, RECORD_COLUMNS};
use crate::store::CorpusStore;
use csv::{ReaderBuilder, WriterBuilder};
use log::{debug, info};
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub struct CsvCorpusStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl CsvCorpusStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn unavailable(&self, err: impl std::fmt::Display) -> ResumeRankerError {
        ResumeRankerError::StoreUnavailable(format!("{}: {}", self.path.display(), err))
    }

    fn has_content(&self) -> bool {
        fs::metadata(&self.path).map(|m| m.len() > 0).unwrap_or(false)
    }

    /// Header of the existing file, if it has one.
    fn existing_header(&self) -> Result<Option<Vec<String>>> {
        if !self.has_content() {
            return Ok(None);
        }

        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| self.unavailable(e))?;
        let header: Vec<String> = reader
            .headers()
            .map_err(|e| self.unavailable(e))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        Ok(Some(header).filter(|h| h.iter().any(|c| !c.is_empty())))
    }

    /// True when the file has content but its last row is not terminated.
    fn lacks_final_newline(&self) -> Result<bool> {
        if !self.has_content() {
            return Ok(false);
        }

        let mut file = File::open(&self.path).map_err(|e| self.unavailable(e))?;
        let mut last = [0u8; 1];
        file.seek(SeekFrom::End(-1))
            .and_then(|_| file.read_exact(&mut last))
            .map_err(|e| self.unavailable(e))?;

        Ok(!matches!(last[0], b'\n' | b'\r'))
    }
}

impl CorpusStore for CsvCorpusStore {
    fn append(&self, record: &ResumeRecord) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| self.unavailable("writer lock poisoned"))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.unavailable(e))?;
        }

        let header = self.existing_header()?;
        let unterminated = self.lacks_final_newline()?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.unavailable(e))?;
        if unterminated {
            debug!("Terminating last row of {}", self.path.display());
            file.write_all(b"\n").map_err(|e| self.unavailable(e))?;
        }
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);

        let columns: Vec<String> = match header {
            Some(columns) => columns,
            None => {
                debug!("Creating corpus store at {}", self.path.display());
                writer
                    .write_record(RECORD_COLUMNS)
                    .map_err(|e| self.unavailable(e))?;
                RECORD_COLUMNS.iter().map(|c| c.to_string()).collect()
            }
        };

        // follow the file's column order; columns we do not know stay empty
        let row: Vec<&str> = columns
            .iter()
            .map(|c| record.column(c).unwrap_or(""))
            .collect();
        writer.write_record(&row).map_err(|e| self.unavailable(e))?;
        writer.flush().map_err(|e| self.unavailable(e))?;

        info!("Saved {} to {}", record.file_name, self.path.display());
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<ResumeRecord>> {
        if !self.has_content() {
            return Ok(Vec::new());
        }

        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_path(&self.path)
            .map_err(|e| self.unavailable(e))?;

        let records = reader
            .deserialize::<ResumeRecord>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| self.unavailable(e))?;

        debug!("Loaded {} records from {}", records.len(), self.path.display());
        Ok(records)
    }
}
