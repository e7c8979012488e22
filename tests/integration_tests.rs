//! Integration tests for the resume ranker

use resume_ranker::config::Config;
use resume_ranker::input::manager::InputManager;
use resume_ranker::processing::headings::Section;
use resume_ranker::{CorpusStore, CsvCorpusStore, RecordBuilder, ResumeRankerError, SimilarityRanker};
use std::path::Path;
use tempfile::TempDir;

const JOHN_TXT: &str = "tests/fixtures/sample_resume.txt";
const JOHN_MD: &str = "tests/fixtures/sample_resume.md";
const PRIYA_TXT: &str = "tests/fixtures/data_scientist_resume.txt";
const JOB_TXT: &str = "tests/fixtures/job_description.txt";

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let text = manager.extract_text(Path::new(JOHN_TXT)).await.unwrap();

    assert!(text.starts_with("John Doe"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let text = manager.extract_text(Path::new(JOHN_MD)).await.unwrap();

    assert!(text.contains("John Doe"));
    assert!(text.contains("React"));
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new(JOHN_TXT);

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/unsupported.xyz")).await;
    assert!(matches!(result, Err(ResumeRankerError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_extension_allow_list() {
    let mut manager = InputManager::new().with_allowed_extensions(vec!["pdf".to_string()]);
    let result = manager.extract_text(Path::new(JOHN_TXT)).await;
    assert!(matches!(result, Err(ResumeRankerError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/nonexistent.txt")).await;
    assert!(matches!(result, Err(ResumeRankerError::InvalidInput(_))));
}

#[tokio::test]
async fn test_empty_document_is_not_stored() {
    let dir = TempDir::new().unwrap();
    let store = CsvCorpusStore::new(dir.path().join("resume_data.csv"));
    let builder = RecordBuilder::new().unwrap();

    let mut manager = InputManager::new();
    let text = manager.extract_text(Path::new("tests/fixtures/empty.txt")).await.unwrap();
    let result = builder.build(&text, "empty.txt", &[]);

    assert!(matches!(result, Err(ResumeRankerError::EmptyDocument(_))));
    assert!(store.read_all().unwrap().is_empty());
}

#[tokio::test]
async fn test_markdown_resume_fields() {
    let mut manager = InputManager::new();
    let text = manager.extract_text(Path::new(JOHN_MD)).await.unwrap();
    let record = RecordBuilder::new().unwrap().build(&text, "sample_resume.md", &[]).unwrap();

    assert_eq!(record.full_name.as_deref(), Some("John Doe"));
    assert_eq!(record.email.as_deref(), Some("john.doe@example.com"));
    assert!(record.skills.as_deref().unwrap().contains("TypeScript"));
    assert!(record.experience.as_deref().unwrap().contains("Webworks"));
    assert_eq!(record.certifications, None);
}

#[tokio::test]
async fn test_extract_store_rank_pipeline() {
    let dir = TempDir::new().unwrap();
    let store = CsvCorpusStore::new(dir.path().join("data").join("resume_data.csv"));
    let builder = RecordBuilder::new().unwrap();
    let mut manager = InputManager::new();

    for path in [PRIYA_TXT, JOHN_TXT] {
        let path = Path::new(path);
        let text = manager.extract_text(path).await.unwrap();
        let file_name = path.file_name().unwrap().to_string_lossy().to_string();
        let record = builder.build(&text, &file_name, &[]).unwrap();
        store.append(&record).unwrap();
    }

    let corpus = store.read_all().unwrap();
    assert_eq!(corpus.len(), 2);

    let priya = &corpus[0];
    assert_eq!(priya.full_name.as_deref(), Some("Priya Patel"));
    assert_eq!(priya.phone.as_deref(), Some("+44 20 7946 0958"));
    assert!(priya.section(Section::Education).unwrap().contains("MSc Statistics"));
    assert!(priya.section(Section::Certifications).unwrap().contains("AWS"));

    let job = manager.extract_text(Path::new(JOB_TXT)).await.unwrap();
    let ranked = SimilarityRanker::new().unwrap().rank(&job, &corpus);

    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].file_name, "sample_resume.txt");
    assert_eq!(ranked[0].full_name.as_deref(), Some("John Doe"));
    assert!(ranked[0].score > ranked[1].score);
    assert!(ranked.iter().all(|e| (0.0..=10.0).contains(&e.score)));
}

#[tokio::test]
async fn test_rank_empty_store() {
    let dir = TempDir::new().unwrap();
    let store = CsvCorpusStore::new(dir.path().join("missing.csv"));

    let corpus = store.read_all().unwrap();
    let ranked = SimilarityRanker::new().unwrap().rank("Rust engineer", &corpus);
    assert!(ranked.is_empty());
}

#[tokio::test]
async fn test_configured_extra_heading() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    let mut config = Config::load_from(&config_path).unwrap();
    config
        .extraction
        .extra_headings
        .insert("Skills".to_string(), vec!["Tech Stack".to_string()]);
    config.save_to(&config_path).unwrap();

    let config = Config::load_from(&config_path).unwrap();
    let builder = RecordBuilder::with_catalog(config.heading_catalog().unwrap()).unwrap();
    let record = builder
        .build("Ada Lovelace\nTech Stack\nRust, Kafka\n", "ada.txt", &[])
        .unwrap();

    assert_eq!(record.skills.as_deref(), Some("Rust, Kafka"));
}
