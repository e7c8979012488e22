//! Resume file type detection

use crate::error::{Result, ResumeRankerError};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Text,
    Markdown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(FileType::Pdf),
            "txt" => Some(FileType::Text),
            "md" | "markdown" => Some(FileType::Markdown),
            _ => None,
        }
    }

    /// Detect the type of `path`, honouring the caller's extension allow-list.
    pub fn detect(path: &Path, allowed_extensions: &[String]) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .ok_or_else(|| {
                ResumeRankerError::InvalidInput(format!("File has no extension: {}", path.display()))
            })?;

        if !allowed_extensions.iter().any(|a| a.eq_ignore_ascii_case(&extension)) {
            return Err(ResumeRankerError::UnsupportedFormat(format!(
                ".{} is not allowed for {} (allowed: {})",
                extension,
                path.display(),
                allowed_extensions.join(", ")
            )));
        }

        Self::from_extension(&extension).ok_or_else(|| {
            ResumeRankerError::UnsupportedFormat(format!(
                "No text extractor for {}",
                path.display()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::manager::DEFAULT_ALLOWED_EXTENSIONS;

    fn allowed() -> Vec<String> {
        vec!["pdf".to_string(), "txt".to_string(), "md".to_string()]
    }

    #[test]
    fn test_detect_known_types() {
        assert_eq!(FileType::detect(Path::new("cv.PDF"), &allowed()).unwrap(), FileType::Pdf);
        assert_eq!(FileType::detect(Path::new("cv.txt"), &allowed()).unwrap(), FileType::Text);
        assert_eq!(FileType::detect(Path::new("cv.md"), &allowed()).unwrap(), FileType::Markdown);
    }

    #[test]
    fn test_detect_rejects_disallowed_or_unknown() {
        assert!(matches!(
            FileType::detect(Path::new("cv.docx"), &allowed()),
            Err(ResumeRankerError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            FileType::detect(Path::new("cv.markdown"), &allowed()),
            Err(ResumeRankerError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            FileType::detect(Path::new("README"), &allowed()),
            Err(ResumeRankerError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_default_allow_list_accepts_markdown_extension() {
        let defaults: Vec<String> = DEFAULT_ALLOWED_EXTENSIONS.iter().map(|e| e.to_string()).collect();
        assert_eq!(
            FileType::detect(Path::new("cv.markdown"), &defaults).unwrap(),
            FileType::Markdown
        );
    }

    #[test]
    fn test_allowed_but_unextractable() {
        let allowed = vec!["docx".to_string()];
        assert!(matches!(
            FileType::detect(Path::new("cv.docx"), &allowed),
            Err(ResumeRankerError::UnsupportedFormat(_))
        ));
    }
}
