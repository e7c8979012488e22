//! Resume segmentation, field extraction and ranking

pub mod headings;
pub mod segmenter;
pub mod extractors;
pub mod record;
pub mod tfidf;
pub mod ranker;
