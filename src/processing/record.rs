//! Structured resume records built from raw text

use crate::error::{Result, ResumeRankerError};
use crate::processing::extractors::{FieldExtractors, KeywordPatterns};
use crate::processing::headings::{HeadingCatalog, Section};
use crate::processing::segmenter::{SegmentMap, Segmenter};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Column names in persisted order.
pub const RECORD_COLUMNS: [&str; 11] = [
    "File Name",
    "Full Name",
    "Email",
    "Phone",
    "LinkedIn",
    "Education",
    "Experience",
    "Skills",
    "Certifications",
    "Leadership",
    "Projects",
];

/// One processed resume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeRecord {
    #[serde(rename = "File Name", default)]
    pub file_name: String,
    #[serde(rename = "Full Name", default)]
    pub full_name: Option<String>,
    #[serde(rename = "Email", default)]
    pub email: Option<String>,
    #[serde(rename = "Phone", default)]
    pub phone: Option<String>,
    #[serde(rename = "LinkedIn", default)]
    pub linkedin: Option<String>,
    #[serde(rename = "Education", default)]
    pub education: Option<String>,
    #[serde(rename = "Experience", default)]
    pub experience: Option<String>,
    #[serde(rename = "Skills", default)]
    pub skills: Option<String>,
    #[serde(rename = "Certifications", default)]
    pub certifications: Option<String>,
    #[serde(rename = "Leadership", default)]
    pub leadership: Option<String>,
    #[serde(rename = "Projects", default)]
    pub projects: Option<String>,
}

impl ResumeRecord {
    pub fn section(&self, section: Section) -> Option<&str> {
        let value = match section {
            Section::Education => &self.education,
            Section::Experience => &self.experience,
            Section::Skills => &self.skills,
            Section::Certifications => &self.certifications,
            Section::Leadership => &self.leadership,
            Section::Projects => &self.projects,
        };
        value.as_deref()
    }

    fn section_mut(&mut self, section: Section) -> &mut Option<String> {
        match section {
            Section::Education => &mut self.education,
            Section::Experience => &mut self.experience,
            Section::Skills => &mut self.skills,
            Section::Certifications => &mut self.certifications,
            Section::Leadership => &mut self.leadership,
            Section::Projects => &mut self.projects,
        }
    }

    /// Value of a persisted column by name. Unknown columns yield `None`.
    pub fn column(&self, name: &str) -> Option<&str> {
        match name {
            "File Name" => Some(self.file_name.as_str()),
            "Full Name" => self.full_name.as_deref(),
            "Email" => self.email.as_deref(),
            "Phone" => self.phone.as_deref(),
            "LinkedIn" => self.linkedin.as_deref(),
            other => Section::ALL
                .iter()
                .find(|s| s.name() == other)
                .and_then(|s| self.section(*s)),
        }
    }

    /// Number of sections with a value.
    pub fn filled_sections(&self) -> usize {
        Section::ALL.iter().filter(|s| self.section(**s).is_some()).count()
    }
}

/// Source of candidate person names, typically a named-entity recognizer.
pub trait NameOracle {
    fn person_names(&self, text: &str) -> Vec<String>;
}

/// Oracle used when no recognizer is available.
pub struct NoNameOracle;

impl NameOracle for NoNameOracle {
    fn person_names(&self, _text: &str) -> Vec<String> {
        Vec::new()
    }
}

type Provider<'a> = &'a dyn Fn() -> Option<String>;

/// First provider that yields a non-blank value.
fn first_present(providers: &[Provider<'_>]) -> Option<String> {
    providers
        .iter()
        .filter_map(|provider| provider())
        .find(|value| !value.trim().is_empty())
}

pub struct RecordBuilder {
    segmenter: Segmenter,
    fallbacks: BTreeMap<Section, KeywordPatterns>,
    extractors: FieldExtractors,
}

impl RecordBuilder {
    pub fn new() -> Result<Self> {
        Self::with_catalog(HeadingCatalog::default())
    }

    pub fn with_catalog(catalog: HeadingCatalog) -> Result<Self> {
        catalog.validate()?;
        let segmenter = Segmenter::with_catalog(&catalog)?;
        let extractors = FieldExtractors::new()?;
        let fallbacks = catalog
            .entries()
            .iter()
            .map(|entry| Ok((entry.section, KeywordPatterns::new(entry.fallback_keywords.as_slice())?)))
            .collect::<Result<BTreeMap<_, _>>>()?;

        Ok(Self {
            segmenter,
            fallbacks,
            extractors,
        })
    }

    pub fn segmenter(&self) -> &Segmenter {
        &self.segmenter
    }

    /// Build a record, using `ner_names` only when no name is found in the text.
    pub fn build(&self, text: &str, file_name: &str, ner_names: &[String]) -> Result<ResumeRecord> {
        let ner_name = || ner_names.iter().find(|n| !n.trim().is_empty()).cloned();
        self.build_inner(text, file_name, &ner_name)
    }

    /// Build a record, consulting `oracle` only when no name is found in the text.
    pub fn build_with_oracle(
        &self,
        text: &str,
        file_name: &str,
        oracle: &dyn NameOracle,
    ) -> Result<ResumeRecord> {
        let ner_name = || {
            oracle
                .person_names(text)
                .into_iter()
                .find(|n| !n.trim().is_empty())
        };
        self.build_inner(text, file_name, &ner_name)
    }

    fn build_inner(
        &self,
        text: &str,
        file_name: &str,
        ner_name: &dyn Fn() -> Option<String>,
    ) -> Result<ResumeRecord> {
        if text.trim().is_empty() {
            return Err(ResumeRankerError::EmptyDocument(file_name.to_string()));
        }

        let segments = self.segmenter.segment(text);

        let mut record = ResumeRecord {
            file_name: file_name.to_string(),
            ..Default::default()
        };

        for section in Section::ALL {
            *record.section_mut(section) = self.section_value(text, &segments, section);
        }

        let from_text = || self.extractors.extract_name(text);
        record.full_name = first_present(&[&from_text, ner_name]);
        record.email = self.extractors.extract_email(text);
        record.phone = self.extractors.extract_phone(text);
        record.linkedin = self.extractors.extract_profile_link(text);

        info!(
            "Extracted {}: name={:?}, email={:?}, {} of {} sections",
            record.file_name,
            record.full_name,
            record.email,
            record.filled_sections(),
            Section::ALL.len()
        );

        Ok(record)
    }

    fn section_value(&self, text: &str, segments: &SegmentMap, section: Section) -> Option<String> {
        let from_heading = || segments.non_empty(section).map(str::to_string);
        let from_keywords = || {
            let value = self.fallbacks.get(&section).and_then(|p| p.extract(text));
            if value.is_some() {
                debug!("{} taken from keyword fallback", section);
            }
            value
        };

        first_present(&[&from_heading, &from_keywords])
    }
}
