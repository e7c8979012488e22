//! TF-IDF vector space with smoothed IDF and L2-normalized rows

use crate::error::{Result, ResumeRankerError};
use regex::Regex;
use std::collections::{BTreeMap, HashMap};

/// Sparse row vector, entries sorted by term index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    fn from_counts(counts: HashMap<usize, usize>, idf: &[f64]) -> Self {
        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(term, count)| (term, count as f64 * idf[term]))
            .collect();
        entries.sort_by_key(|(term, _)| *term);

        let mut vector = Self { entries };
        vector.normalize();
        vector
    }

    fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, weight) in &mut self.entries {
                *weight /= norm;
            }
        }
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn weight(&self, term: usize) -> f64 {
        self.entries
            .binary_search_by_key(&term, |(t, _)| *t)
            .map(|i| self.entries[i].1)
            .unwrap_or(0.0)
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a, wa) = self.entries[i];
            let (b, wb) = other.entries[j];
            match a.cmp(&b) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// Cosine similarity of two vectors; zero when either vector is zero.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let norm_a = a.norm();
    let norm_b = b.norm();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        a.dot(b) / (norm_a * norm_b)
    }
}

#[derive(Debug, Clone)]
pub struct TfIdfMatrix {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
    rows: Vec<SparseVector>,
}

impl TfIdfMatrix {
    pub fn rows(&self) -> &[SparseVector] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&SparseVector> {
        self.rows.get(index)
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.term_index(term).map(|i| self.idf[i])
    }
}

pub struct TfIdfVectorizer {
    token_regex: Regex,
}

impl TfIdfVectorizer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            token_regex: Regex::new(r"\b\w\w+\b")?,
        })
    }

    /// Lowercased tokens of two or more word characters.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.token_regex
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Fit the vocabulary and IDF weights on `documents` and return their rows.
    ///
    /// Fails with `NoVocabulary` when no document contains a token.
    pub fn fit_transform<S: AsRef<str>>(&self, documents: &[S]) -> Result<TfIdfMatrix> {
        let tokenized: Vec<Vec<String>> = documents
            .iter()
            .map(|d| self.tokenize(d.as_ref()))
            .collect();

        let mut vocabulary: BTreeMap<String, usize> = tokenized
            .iter()
            .flatten()
            .map(|t| (t.clone(), 0))
            .collect();
        if vocabulary.is_empty() {
            return Err(ResumeRankerError::NoVocabulary);
        }
        for (index, slot) in vocabulary.values_mut().enumerate() {
            *slot = index;
        }

        let mut document_frequency = vec![0usize; vocabulary.len()];
        let counts: Vec<HashMap<usize, usize>> = tokenized
            .iter()
            .map(|tokens| {
                let mut counts = HashMap::new();
                for token in tokens {
                    *counts.entry(vocabulary[token]).or_insert(0) += 1;
                }
                for term in counts.keys() {
                    document_frequency[*term] += 1;
                }
                counts
            })
            .collect();

        let n = documents.len() as f64;
        let idf: Vec<f64> = document_frequency
            .iter()
            .map(|df| ((1.0 + n) / (1.0 + *df as f64)).ln() + 1.0)
            .collect();

        let rows = counts
            .into_iter()
            .map(|c| SparseVector::from_counts(c, &idf))
            .collect();

        Ok(TfIdfMatrix {
            vocabulary,
            idf,
            rows,
        })
    }
}
