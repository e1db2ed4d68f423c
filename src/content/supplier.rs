//! Content suppliers: where chapters come from before the game starts.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

use super::sample::sample_chapters;
use super::types::{parse_chapter_set, tag_and_validate, Chapter, ChapterSet, ContentOrigin, PlayerProfile};
use crate::error::ContentError;

/// A source of validated chapters for a given player.
pub trait ContentSupplier {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Fetch chapters. Implementations validate before returning `Ok`.
    fn fetch(&self, profile: &PlayerProfile) -> Result<Vec<Chapter>, ContentError>;
}

/// Requests generated chapters from a content service over HTTP.
///
/// The player profile is POSTed as JSON; the service answers with
/// `{"chapters": [...]}`.
pub struct HttpSupplier {
    pub endpoint: String,
    pub timeout: Duration,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ContentRequest<'a> {
    profile: &'a PlayerProfile,
    answer_format: &'static str,
}

impl HttpSupplier {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout,
        }
    }
}

impl ContentSupplier for HttpSupplier {
    fn name(&self) -> &'static str {
        "http"
    }

    fn fetch(&self, profile: &PlayerProfile) -> Result<Vec<Chapter>, ContentError> {
        let request = ContentRequest {
            profile,
            answer_format: "true_false",
        };
        let response = ureq::post(&self.endpoint)
            .timeout(self.timeout)
            .send_json(&request)
            .map_err(|e| ContentError::Http(e.to_string()))?;
        let set: ChapterSet = response.into_json()?;
        tag_and_validate(set.chapters, ContentOrigin::Generated)
    }
}

/// Reads a chapter set from a JSON file on disk.
pub struct FileSupplier {
    pub path: PathBuf,
}

impl ContentSupplier for FileSupplier {
    fn name(&self) -> &'static str {
        "file"
    }

    fn fetch(&self, _profile: &PlayerProfile) -> Result<Vec<Chapter>, ContentError> {
        let json = fs::read_to_string(&self.path)?;
        parse_chapter_set(&json, ContentOrigin::File)
    }
}

/// Always returns the built-in sample chapters.
pub struct SampleSupplier;

impl ContentSupplier for SampleSupplier {
    fn name(&self) -> &'static str {
        "sample"
    }

    fn fetch(&self, _profile: &PlayerProfile) -> Result<Vec<Chapter>, ContentError> {
        Ok(sample_chapters())
    }
}

/// Fetch from `supplier`, substituting the sample chapters on any failure.
///
/// The returned list always satisfies `validate_chapters`.
pub fn load_or_fallback(supplier: &dyn ContentSupplier, profile: &PlayerProfile) -> Vec<Chapter> {
    match supplier.fetch(profile) {
        Ok(chapters) => {
            info!(
                supplier = supplier.name(),
                chapters = chapters.len(),
                "Loaded chapter content"
            );
            chapters
        }
        Err(error) => {
            warn!(
                supplier = supplier.name(),
                %error,
                "Content supplier failed, using sample chapters"
            );
            sample_chapters()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl ContentSupplier for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn fetch(&self, _profile: &PlayerProfile) -> Result<Vec<Chapter>, ContentError> {
            Err(ContentError::Http("connection refused".to_string()))
        }
    }

    #[test]
    fn test_failure_falls_back_to_sample() {
        let chapters = load_or_fallback(&Failing, &PlayerProfile::default());
        assert_eq!(chapters, sample_chapters());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let supplier = FileSupplier {
            path: PathBuf::from("/nonexistent/ballotbird/chapters.json"),
        };
        assert!(matches!(
            supplier.fetch(&PlayerProfile::default()),
            Err(ContentError::Io(_))
        ));
        let chapters = load_or_fallback(&supplier, &PlayerProfile::default());
        assert!(chapters.iter().all(|c| c.origin == ContentOrigin::Fallback));
    }

    #[test]
    fn test_file_supplier_reads_and_tags() {
        let path = std::env::temp_dir().join(format!(
            "ballotbird_supplier_test_{}.json",
            std::process::id()
        ));
        let set = ChapterSet {
            chapters: sample_chapters(),
        };
        fs::write(&path, serde_json::to_string(&set).unwrap()).unwrap();

        let chapters = FileSupplier { path: path.clone() }
            .fetch(&PlayerProfile::default())
            .unwrap();
        assert_eq!(chapters.len(), 3);
        assert!(chapters.iter().all(|c| c.origin == ContentOrigin::File));

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_unreachable_endpoint_is_http_error() {
        let supplier = HttpSupplier::new("http://127.0.0.1:9/chapters", Duration::from_millis(200));
        assert!(matches!(
            supplier.fetch(&PlayerProfile::default()),
            Err(ContentError::Http(_))
        ));
    }
}
