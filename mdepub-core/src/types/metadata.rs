//! Book metadata (Dublin Core subset)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CompileError;

/// Book metadata written to the package document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookMetadata {
    /// Unique identifier (ISBN, URN, UUID...)
    pub identifier: String,

    /// Book title
    pub title: String,

    /// Authors, in display order
    pub authors: Vec<String>,

    /// Language tag (e.g. "en", "pt-BR")
    pub language: String,

    /// Publisher name
    pub publisher: Option<String>,

    /// Publication date
    pub date: Option<DateTime<Utc>>,

    /// Book description/summary
    pub description: Option<String>,

    /// Subject/genre tags
    pub subjects: Vec<String>,

    /// Copyright/rights information
    pub rights: Option<String>,

    /// Last modification time, written as `dcterms:modified`
    pub modified: Option<DateTime<Utc>>,
}

impl BookMetadata {
    /// Create metadata with the required fields
    pub fn new(
        identifier: impl Into<String>,
        title: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            title: title.into(),
            authors: Vec::new(),
            language: language.into(),
            publisher: None,
            date: None,
            description: None,
            subjects: Vec::new(),
            rights: None,
            modified: None,
        }
    }

    /// Create metadata with a fresh `urn:uuid:` identifier
    pub fn with_random_identifier(title: impl Into<String>, language: impl Into<String>) -> Self {
        Self::new(
            format!("urn:uuid:{}", uuid::Uuid::new_v4()),
            title,
            language,
        )
    }

    /// Append an author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.authors.push(author.into());
        self
    }

    /// Set publisher
    pub fn with_publisher(mut self, publisher: impl Into<String>) -> Self {
        self.publisher = Some(publisher.into());
        self
    }

    /// Set publication date
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    /// Set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a subject tag
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subjects.push(subject.into());
        self
    }

    /// Set rights statement
    pub fn with_rights(mut self, rights: impl Into<String>) -> Self {
        self.rights = Some(rights.into());
        self
    }

    /// Set modification time
    pub fn with_modified(mut self, modified: DateTime<Utc>) -> Self {
        self.modified = Some(modified);
        self
    }

    /// Get the primary author (first creator)
    pub fn primary_author(&self) -> Option<&str> {
        self.authors.first().map(|s| s.as_str())
    }

    /// Timestamp for `dcterms:modified`.
    ///
    /// Falls back to the publication date, then the Unix epoch, so output
    /// never depends on the wall clock.
    pub fn modified_timestamp(&self) -> String {
        self.modified
            .or(self.date)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
            .format("%Y-%m-%dT%H:%M:%SZ")
            .to_string()
    }

    /// Check required fields are non-empty
    pub fn validate(&self) -> Result<(), CompileError> {
        let required = [
            ("identifier", &self.identifier),
            ("title", &self.title),
            ("language", &self.language),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(CompileError::InvalidMetadata(format!(
                    "{} must not be empty",
                    field
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_authors_keep_insertion_order() {
        let metadata = BookMetadata::new("id", "Title", "en")
            .with_author("Zed")
            .with_author("Amy");
        assert_eq!(metadata.authors, vec!["Zed", "Amy"]);
        assert_eq!(metadata.primary_author(), Some("Zed"));
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        let err = BookMetadata::new("  ", "Title", "en").validate().unwrap_err();
        assert_eq!(
            err,
            CompileError::InvalidMetadata("identifier must not be empty".into())
        );
        assert!(BookMetadata::new("id", "", "en").validate().is_err());
        assert!(BookMetadata::new("id", "Title", "").validate().is_err());
        assert!(BookMetadata::new("id", "Title", "en").validate().is_ok());
    }

    #[test]
    fn test_modified_timestamp_fallbacks() {
        let metadata = BookMetadata::new("id", "Title", "en");
        assert_eq!(metadata.modified_timestamp(), "1970-01-01T00:00:00Z");

        let date = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let metadata = metadata.with_date(date);
        assert_eq!(metadata.modified_timestamp(), "2024-03-01T12:00:00Z");

        let modified = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let metadata = metadata.with_modified(modified);
        assert_eq!(metadata.modified_timestamp(), "2025-01-02T03:04:05Z");
    }

    #[test]
    fn test_random_identifier_is_urn() {
        let metadata = BookMetadata::with_random_identifier("Title", "en");
        assert!(metadata.identifier.starts_with("urn:uuid:"));
    }
}
