//! Single-purpose field extractors over raw resume text
//!
//! Each extractor returns `None` when its pattern does not match. The name and
//! generic section extractors are heuristics: they can return a value that is
//! not actually a name or a section, and callers must treat their output as
//! best-effort.

use crate::error::Result;
use crate::processing::segmenter::split_lines;
use regex::{Regex, RegexBuilder};

pub struct FieldExtractors {
    email_regex: Regex,
    phone_regex: Regex,
    profile_regex: Regex,
    name_line_regex: Regex,
    non_word_regex: Regex,
    capitalized_regex: Regex,
}

impl FieldExtractors {
    pub fn new() -> Result<Self> {
        Ok(Self {
            email_regex: Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")?,
            phone_regex: Regex::new(r"\+?\d[\d \-()]{8,}\d")?,
            profile_regex: Regex::new(r"(?:https?://)?(?:www\.)?linkedin\.com/in/[a-zA-Z0-9\-_/]+")?,
            name_line_regex: Regex::new(r"(?im)^name\s*:\s*(.+)$")?,
            non_word_regex: Regex::new(r"[^\w\s]")?,
            capitalized_regex: Regex::new(r"\b[A-Z][a-z]+(?: [A-Z][a-z]+)*\b")?,
        })
    }

    pub fn extract_email(&self, text: &str) -> Option<String> {
        self.email_regex.find(text).map(|m| m.as_str().to_string())
    }

    pub fn extract_phone(&self, text: &str) -> Option<String> {
        self.phone_regex.find(text).map(|m| m.as_str().to_string())
    }

    pub fn extract_profile_link(&self, text: &str) -> Option<String> {
        self.profile_regex.find(text).map(|m| m.as_str().to_string())
    }

    /// Best-effort candidate name.
    ///
    /// Tries an explicit `Name:` line, then a short first line containing a
    /// capitalized token, then the first run of capitalized words. A `Name:`
    /// line settles the question: when nothing survives punctuation stripping
    /// the result is `None`.
    pub fn extract_name(&self, text: &str) -> Option<String> {
        if let Some(caps) = self.name_line_regex.captures(text) {
            let cleaned = self.non_word_regex.replace_all(caps[1].trim(), "");
            return Some(cleaned.trim().to_string()).filter(|c| !c.is_empty());
        }

        if let Some(first_line) = split_lines(text).map(str::trim).find(|l| !l.is_empty()) {
            let words: Vec<&str> = first_line.split_whitespace().collect();
            let has_capital = words
                .iter()
                .any(|w| w.chars().next().is_some_and(char::is_uppercase));
            if words.len() <= 3 && has_capital {
                return Some(first_line.to_string());
            }
        }

        self.capitalized_regex
            .find(text)
            .map(|m| m.as_str().to_string())
    }
}

/// Compiled keyword fallback for one section, in priority order.
pub struct KeywordPatterns {
    patterns: Vec<Regex>,
}

impl KeywordPatterns {
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Result<Self> {
        let patterns = keywords
            .iter()
            .map(|keyword| {
                let pattern = format!(r"{}[:\s]*(.*)", regex::escape(keyword.as_ref()));
                RegexBuilder::new(&pattern).case_insensitive(true).build()
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// Text following the first keyword (in list order) found anywhere in `text`.
    ///
    /// Keyword priority beats position: a later keyword is only tried when every
    /// earlier keyword is absent, even if the later one occurs first in the text.
    pub fn extract(&self, text: &str) -> Option<String> {
        let caps = self.patterns.iter().find_map(|regex| regex.captures(text))?;
        let value = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
        Some(value.to_string()).filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractors() -> FieldExtractors {
        FieldExtractors::new().unwrap()
    }

    fn keywords(list: &[&str]) -> KeywordPatterns {
        KeywordPatterns::new(list).unwrap()
    }

    #[test]
    fn test_email_extraction() {
        let e = extractors();
        assert_eq!(
            e.extract_email("Contact me at a.b@example.co.uk today"),
            Some("a.b@example.co.uk".to_string())
        );
        assert_eq!(e.extract_email("No address here, just text."), None);
    }

    #[test]
    fn test_phone_extraction() {
        let e = extractors();
        assert_eq!(
            e.extract_phone("Phone: +1 (555) 123-4567 (mobile)"),
            Some("+1 (555) 123-4567".to_string())
        );
        assert_eq!(e.extract_phone("Call 5551234567"), Some("5551234567".to_string()));
        assert_eq!(e.extract_phone("Room 42, ext 7"), None);
    }

    #[test]
    fn test_profile_link_extraction() {
        let e = extractors();
        assert_eq!(
            e.extract_profile_link("Profile: https://www.linkedin.com/in/jane-doe_42 | GitHub"),
            Some("https://www.linkedin.com/in/jane-doe_42".to_string())
        );
        assert_eq!(
            e.extract_profile_link("linkedin.com/in/jdoe"),
            Some("linkedin.com/in/jdoe".to_string())
        );
        assert_eq!(e.extract_profile_link("https://github.com/jdoe"), None);
    }

    #[test]
    fn test_name_from_name_line_strips_punctuation() {
        let text = "Curriculum Vitae of a very experienced person\nName: Dr. Jane O'Neil, PhD\n";
        assert_eq!(extractors().extract_name(text), Some("Dr Jane ONeil PhD".to_string()));
    }

    #[test]
    fn test_punctuation_only_name_line_is_a_miss() {
        let text = "objective: build compilers and tools for teams\nName: ---\nskills: rust";
        assert_eq!(extractors().extract_name(text), None);
    }

    #[test]
    fn test_name_first_line_after_carriage_return() {
        let text = "Jane Doe\rjane@example.com\rSkills: Rust";
        assert_eq!(extractors().extract_name(text), Some("Jane Doe".to_string()));
    }

    #[test]
    fn test_name_from_short_first_line() {
        let text = "\n  Jane Doe  \njane@example.com\nSkills\nRust";
        assert_eq!(extractors().extract_name(text), Some("Jane Doe".to_string()));
    }

    #[test]
    fn test_name_falls_back_to_capitalized_words() {
        let text = "results driven engineer with ten years of work\nreach out to Maria Lopez for details";
        assert_eq!(extractors().extract_name(text), Some("Maria Lopez".to_string()));
    }

    #[test]
    fn test_name_heuristic_may_return_non_name() {
        // short first line with a capital is accepted verbatim
        let text = "Resume\nJane Doe";
        assert_eq!(extractors().extract_name(text), Some("Resume".to_string()));
        assert_eq!(extractors().extract_name("all lowercase words only here"), None);
    }

    #[test]
    fn test_section_returns_rest_of_line() {
        let text = "Summary of things. Skills: Rust, Go and SQL\nOther";
        assert_eq!(
            keywords(&["Skills"]).extract(text),
            Some("Rust, Go and SQL".to_string())
        );
    }

    #[test]
    fn test_section_keyword_priority_beats_position() {
        let text = "Employment at Acme Corp\nlater on: Experience in Rust systems";
        let patterns = keywords(&["Experience", "Work History", "Employment"]);

        // "Employment" occurs first in the text, but "Experience" has priority
        assert_eq!(
            patterns.extract(text),
            Some("in Rust systems".to_string())
        );
    }

    #[test]
    fn test_section_can_continue_onto_next_line() {
        let text = "education:\nBSc Physics";
        assert_eq!(
            keywords(&["Education"]).extract(text),
            Some("BSc Physics".to_string())
        );
    }

    #[test]
    fn test_section_keywords_are_literal() {
        let text = "C++ (advanced): templates";
        assert_eq!(keywords(&["C++ (advanced)"]).extract(text), Some("templates".to_string()));
    }

    #[test]
    fn test_section_missing_keyword() {
        assert_eq!(keywords(&["Skills"]).extract("nothing relevant"), None);
    }
}
