//! Heading-driven segmentation of resume text into sections

use crate::error::Result;
use crate::processing::headings::{HeadingCatalog, Section};
use log::debug;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

/// Block text per section for one document.
///
/// Every section has an entry; sections without collected lines hold an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentMap {
    blocks: BTreeMap<Section, String>,
}

impl SegmentMap {
    fn from_lines(lines: BTreeMap<Section, Vec<&str>>) -> Self {
        let blocks = Section::ALL
            .iter()
            .map(|section| {
                let block = lines
                    .get(section)
                    .map(|l| l.join("\n").trim().to_string())
                    .unwrap_or_default();
                (*section, block)
            })
            .collect();

        Self { blocks }
    }

    pub fn block(&self, section: Section) -> &str {
        self.blocks.get(&section).map(String::as_str).unwrap_or("")
    }

    /// The block for `section`, or `None` when nothing was collected.
    pub fn non_empty(&self, section: Section) -> Option<&str> {
        Some(self.block(section)).filter(|b| !b.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Section, &str)> {
        self.blocks.iter().map(|(s, b)| (*s, b.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.values().all(|b| b.is_empty())
    }
}

const LINE_BREAKS: [char; 7] = ['\n', '\r', '\u{b}', '\u{c}', '\u{85}', '\u{2028}', '\u{2029}'];

/// Split on every line boundary, including the lone `\r` and form feeds
/// that PDF text extraction produces. `\r\n` yields an extra empty line.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(LINE_BREAKS)
}

struct HeadingPattern {
    section: Section,
    regex: Regex,
}

/// Splits text into sections at recognized heading lines.
pub struct Segmenter {
    patterns: Vec<HeadingPattern>,
}

impl Segmenter {
    pub fn new() -> Result<Self> {
        Self::with_catalog(&HeadingCatalog::default())
    }

    pub fn with_catalog(catalog: &HeadingCatalog) -> Result<Self> {
        let mut patterns = Vec::with_capacity(catalog.entries().len());

        for entry in catalog.entries() {
            if entry.synonyms.is_empty() {
                continue;
            }

            let alternatives = entry
                .synonyms
                .iter()
                .map(|s| regex::escape(s))
                .collect::<Vec<_>>()
                .join("|");

            // heading alone, or heading + separator + discarded trailing text
            let pattern = format!(r"(?i)^(?:{})(?:\s*[:\-–—].*|\s*)$", alternatives);
            patterns.push(HeadingPattern {
                section: entry.section,
                regex: Regex::new(&pattern)?,
            });
        }

        Ok(Self { patterns })
    }

    /// Section introduced by `line`, if the trimmed line is a heading.
    pub fn heading_section(&self, line: &str) -> Option<Section> {
        let line = line.trim();
        self.patterns
            .iter()
            .find(|p| p.regex.is_match(line))
            .map(|p| p.section)
    }

    pub fn segment(&self, text: &str) -> SegmentMap {
        let mut lines: BTreeMap<Section, Vec<&str>> = BTreeMap::new();
        let mut current: Option<Section> = None;

        for line in split_lines(text) {
            let stripped = line.trim();
            if stripped.is_empty() {
                continue;
            }

            if let Some(section) = self.heading_section(stripped) {
                if lines.contains_key(&section) {
                    debug!("Repeated {} heading, discarding earlier block", section);
                }
                current = Some(section);
                lines.insert(section, Vec::new());
                continue;
            }

            if let Some(section) = current {
                lines.entry(section).or_default().push(stripped);
            }
        }

        SegmentMap::from_lines(lines)
    }
}
