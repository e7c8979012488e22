//! Ranking of stored resumes against a job description

use crate::error::{Result, ResumeRankerError};
use crate::processing::headings::Section;
use crate::processing::record::ResumeRecord;
use crate::processing::tfidf::{cosine_similarity, TfIdfVectorizer};
use log::debug;
use serde::{Deserialize, Serialize};

/// Multiplier applied to cosine similarity.
pub const SCORE_SCALE: f64 = 10.0;

/// Field order used when concatenating a record into its bag of text.
pub const BAG_SECTIONS: [Section; 6] = [
    Section::Skills,
    Section::Experience,
    Section::Education,
    Section::Certifications,
    Section::Leadership,
    Section::Projects,
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredEntry {
    #[serde(rename = "Full Name")]
    pub full_name: Option<String>,
    #[serde(rename = "File Name")]
    pub file_name: String,
    pub score: f64,
}

pub struct SimilarityRanker {
    vectorizer: TfIdfVectorizer,
}

impl SimilarityRanker {
    pub fn new() -> Result<Self> {
        Ok(Self {
            vectorizer: TfIdfVectorizer::new()?,
        })
    }

    /// Section values of `record` joined by single spaces; absent sections add nothing.
    pub fn bag(record: &ResumeRecord) -> String {
        BAG_SECTIONS
            .iter()
            .filter_map(|s| record.section(*s))
            .filter(|v| !v.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Rank `corpus` against `query`, surfacing `EmptyCorpus` and `NoVocabulary`.
    pub fn try_rank(&self, query: &str, corpus: &[ResumeRecord]) -> Result<Vec<ScoredEntry>> {
        if corpus.is_empty() {
            return Err(ResumeRankerError::EmptyCorpus);
        }

        let mut documents = Vec::with_capacity(corpus.len() + 1);
        documents.push(query.to_string());
        documents.extend(corpus.iter().map(Self::bag));

        let matrix = self.vectorizer.fit_transform(&documents)?;
        debug!(
            "Ranking {} resumes over {} terms",
            corpus.len(),
            matrix.vocabulary_size()
        );

        let query_vector = &matrix.rows()[0];
        let mut entries: Vec<ScoredEntry> = corpus
            .iter()
            .zip(&matrix.rows()[1..])
            .map(|(record, vector)| {
                let similarity = cosine_similarity(query_vector, vector);
                Self::entry(record, (similarity * SCORE_SCALE).clamp(0.0, SCORE_SCALE))
            })
            .collect();

        // stable: equal scores keep corpus order
        entries.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(entries)
    }

    /// Rank `corpus` against `query`.
    ///
    /// An empty corpus ranks to an empty list; inputs without any token rank
    /// every record at zero in corpus order.
    pub fn rank(&self, query: &str, corpus: &[ResumeRecord]) -> Vec<ScoredEntry> {
        match self.try_rank(query, corpus) {
            Ok(entries) => entries,
            Err(ResumeRankerError::NoVocabulary) => {
                debug!("No shared vocabulary, scoring all resumes at zero");
                corpus.iter().map(|r| Self::entry(r, 0.0)).collect()
            }
            Err(_) => Vec::new(),
        }
    }

    fn entry(record: &ResumeRecord, score: f64) -> ScoredEntry {
        ScoredEntry {
            full_name: record.full_name.clone(),
            file_name: record.file_name.clone(),
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(file: &str, skills: Option<&str>, experience: Option<&str>) -> ResumeRecord {
        ResumeRecord {
            file_name: file.to_string(),
            full_name: Some(format!("Candidate {}", file)),
            skills: skills.map(str::to_string),
            experience: experience.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_bag_skips_absent_sections() {
        let mut r = record("a.pdf", Some("rust go"), None);
        r.education = Some("bsc".to_string());
        r.projects = Some("compiler".to_string());

        assert_eq!(SimilarityRanker::bag(&r), "rust go bsc compiler");
        assert_eq!(SimilarityRanker::bag(&ResumeRecord::default()), "");
    }

    #[test]
    fn test_matching_resume_outranks_disjoint_resume() {
        let ranker = SimilarityRanker::new().unwrap();
        let corpus = vec![
            record("disjoint.pdf", Some("watercolor painting pottery"), None),
            record("match.pdf", Some("python developer"), None),
        ];

        let ranked = ranker.rank("python developer", &corpus);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].file_name, "match.pdf");
        assert!(ranked[0].score > ranked[1].score);
        for entry in &ranked {
            assert!((0.0..=SCORE_SCALE).contains(&entry.score));
        }
        assert!((ranked[0].score - SCORE_SCALE).abs() < 1e-9);
    }

    #[test]
    fn test_empty_corpus() {
        let ranker = SimilarityRanker::new().unwrap();
        assert!(ranker.rank("python developer", &[]).is_empty());
        assert!(matches!(
            ranker.try_rank("python developer", &[]),
            Err(ResumeRankerError::EmptyCorpus)
        ));
    }

    #[test]
    fn test_no_vocabulary_scores_zero() {
        let ranker = SimilarityRanker::new().unwrap();
        let corpus = vec![ResumeRecord {
            file_name: "empty.pdf".to_string(),
            ..Default::default()
        }];

        assert!(matches!(ranker.try_rank("", &corpus), Err(ResumeRankerError::NoVocabulary)));

        let ranked = ranker.rank("", &corpus);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].file_name, "empty.pdf");
        assert_eq!(ranked[0].score, 0.0);
    }

    #[test]
    fn test_ties_keep_corpus_order() {
        let ranker = SimilarityRanker::new().unwrap();
        let corpus = vec![
            record("first.pdf", Some("gardening"), None),
            record("best.pdf", Some("rust systems"), Some("rust")),
            record("second.pdf", Some("knitting"), None),
            record("third.pdf", None, None),
        ];

        let ranked = ranker.rank("rust engineer", &corpus);
        let order: Vec<&str> = ranked.iter().map(|e| e.file_name.as_str()).collect();

        assert_eq!(order, vec!["best.pdf", "first.pdf", "second.pdf", "third.pdf"]);
        assert!(ranked[1..].iter().all(|e| e.score == 0.0));
    }

    #[test]
    fn test_blank_query_scores_zero_against_nonempty_corpus() {
        let ranker = SimilarityRanker::new().unwrap();
        let corpus = vec![record("a.pdf", Some("rust"), None)];

        let ranked = ranker.try_rank("   ", &corpus).unwrap();
        assert_eq!(ranked[0].score, 0.0);
    }
}
