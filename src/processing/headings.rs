//! Canonical resume sections and the heading synonyms that introduce them

use crate::error::{Result, ResumeRankerError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The closed set of resume sections, declared in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Section {
    Education,
    Experience,
    Skills,
    Certifications,
    Leadership,
    Projects,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Education,
        Section::Experience,
        Section::Skills,
        Section::Certifications,
        Section::Leadership,
        Section::Projects,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Section::Education => "Education",
            Section::Experience => "Experience",
            Section::Skills => "Skills",
            Section::Certifications => "Certifications",
            Section::Leadership => "Leadership",
            Section::Projects => "Projects",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Section {
    type Err = ResumeRankerError;

    fn from_str(s: &str) -> Result<Self> {
        Section::ALL
            .iter()
            .copied()
            .find(|section| section.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ResumeRankerError::Configuration(format!("Unknown section: {}", s)))
    }
}

// (section, heading synonyms, fallback keywords in priority order)
const DEFAULT_HEADINGS: &[(Section, &[&str], &[&str])] = &[
    (
        Section::Education,
        &[
            "Education", "Educational Background", "Academic Qualifications", "Qualifications",
            "Degree", "Degrees", "Academic", "University", "College", "School", "Courses",
        ],
        &["Education", "Qualification", "Degree"],
    ),
    (
        Section::Experience,
        &[
            "Experience", "Work Experience", "Employment", "Professional Experience",
            "Career", "Internship", "Relevant Experience",
        ],
        &["Experience", "Work History", "Employment"],
    ),
    (
        Section::Skills,
        &[
            "Skills", "Technical Skills", "Core Competencies", "Expertise", "Programming",
            "Technologies", "Tools",
        ],
        &["Skills", "Technical Skills", "Programming Languages"],
    ),
    (
        Section::Certifications,
        &["Certifications", "Licenses", "Accreditations", "Training", "Certificate", "Cert"],
        &["Certifications", "Licenses", "Accreditations"],
    ),
    (
        Section::Leadership,
        &[
            "Leadership", "Volunteer", "Community Involvement", "Extracurricular", "Social Work",
            "Civic Engagement", "Nonprofit", "Team Leadership", "Management",
        ],
        &["Leadership", "Volunteer", "Community Involvement"],
    ),
    (
        Section::Projects,
        &["Projects", "Project Experience", "Portfolio", "Case Studies", "Research Projects"],
        &["Projects", "Project Experience", "Portfolio", "Case Studies"],
    ),
];

#[derive(Debug, Clone, PartialEq)]
pub struct HeadingEntry {
    pub section: Section,
    pub synonyms: Vec<String>,
    pub fallback_keywords: Vec<String>,
}

/// Immutable table of heading synonyms per section.
///
/// Every synonym belongs to exactly one section; comparison is case-insensitive.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingCatalog {
    entries: Vec<HeadingEntry>,
}

impl Default for HeadingCatalog {
    fn default() -> Self {
        let entries = DEFAULT_HEADINGS
            .iter()
            .map(|(section, synonyms, keywords)| HeadingEntry {
                section: *section,
                synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
                fallback_keywords: keywords.iter().map(|s| s.to_string()).collect(),
            })
            .collect();

        Self { entries }
    }
}

impl HeadingCatalog {
    /// Append extra heading synonyms to a section.
    ///
    /// Synonyms already registered under the same section are skipped; a synonym
    /// owned by another section is rejected.
    pub fn with_synonyms<I, S>(mut self, section: Section, extra: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for synonym in extra {
            let synonym = synonym.into().trim().to_string();
            if synonym.is_empty() {
                continue;
            }

            match self.section_for_synonym(&synonym) {
                Some(owner) if owner == section => continue,
                Some(owner) => {
                    return Err(ResumeRankerError::Configuration(format!(
                        "Heading '{}' is already mapped to {}, cannot add it to {}",
                        synonym, owner, section
                    )));
                }
                None => {}
            }

            if let Some(entry) = self.entries.iter_mut().find(|e| e.section == section) {
                entry.synonyms.push(synonym);
            }
        }

        Ok(self)
    }

    pub fn entries(&self) -> &[HeadingEntry] {
        &self.entries
    }

    pub fn synonyms(&self, section: Section) -> &[String] {
        self.entries
            .iter()
            .find(|e| e.section == section)
            .map(|e| e.synonyms.as_slice())
            .unwrap_or(&[])
    }

    pub fn fallback_keywords(&self, section: Section) -> &[String] {
        self.entries
            .iter()
            .find(|e| e.section == section)
            .map(|e| e.fallback_keywords.as_slice())
            .unwrap_or(&[])
    }

    /// Look up which section owns a synonym.
    pub fn section_for_synonym(&self, synonym: &str) -> Option<Section> {
        let needle = synonym.trim().to_lowercase();
        self.entries
            .iter()
            .find(|e| e.synonyms.iter().any(|s| s.to_lowercase() == needle))
            .map(|e| e.section)
    }

    /// Check that no synonym is shared between two sections.
    pub fn validate(&self) -> Result<()> {
        let mut owners: HashMap<String, Section> = HashMap::new();
        for entry in &self.entries {
            for synonym in &entry.synonyms {
                if let Some(owner) = owners.insert(synonym.to_lowercase(), entry.section) {
                    if owner != entry.section {
                        return Err(ResumeRankerError::Configuration(format!(
                            "Heading '{}' is mapped to both {} and {}",
                            synonym, owner, entry.section
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}
