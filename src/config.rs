//! Persistent settings, read from ~/.ballotbird/config.json and then
//! overridden by command-line flags.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cli::Overrides;
use crate::content::{ContentSupplier, FileSupplier, HttpSupplier, PlayerProfile, SampleSupplier};
use crate::engine::EngineConfig;
use crate::utils::persistence;

pub const CONFIG_FILE: &str = "config.json";

/// Where chapters come from. A file wins over an endpoint; with neither,
/// or with `use_sample`, the built-in sample set is used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentConfig {
    pub endpoint: Option<String>,
    pub timeout_secs: u64,
    pub file: Option<PathBuf>,
    pub use_sample: bool,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: 20,
            file: None,
            use_sample: false,
        }
    }
}

impl ContentConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The supplier these settings select: sample, then file, then endpoint.
    pub fn supplier(&self) -> Box<dyn ContentSupplier> {
        if self.use_sample {
            return Box::new(SampleSupplier);
        }
        if let Some(path) = &self.file {
            return Box::new(FileSupplier { path: path.clone() });
        }
        match &self.endpoint {
            Some(endpoint) => Box::new(HttpSupplier::new(endpoint.clone(), self.timeout())),
            None => Box::new(SampleSupplier),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub engine: EngineConfig,
    pub content: ContentConfig,
    pub profile: PlayerProfile,
    pub muted: bool,
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Load the config file, falling back to defaults when it is missing or
    /// malformed.
    pub fn load() -> Self {
        persistence::load_json_or_default(CONFIG_FILE)
    }

    /// Layer command-line overrides on top.
    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(file) = overrides.content_file {
            self.content.file = Some(file);
        }
        if let Some(endpoint) = overrides.endpoint {
            self.content.endpoint = Some(endpoint);
        }
        if overrides.sample {
            self.content.use_sample = true;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
        if overrides.mute {
            self.muted = true;
        }
        if let Some(location) = overrides.location {
            self.profile.location = location;
        }
        if !overrides.topics.is_empty() {
            self.profile.topics = overrides.topics;
        }
        if let Some(level) = overrides.knowledge {
            self.profile.knowledge = level;
        }
        if let Some(voter) = overrides.voter_type {
            self.profile.voter_type = voter;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::KnowledgeLevel;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{"content": {"endpoint": "http://localhost:8080/chapters"}}"#)
                .unwrap();
        assert_eq!(
            config.content.endpoint.as_deref(),
            Some("http://localhost:8080/chapters")
        );
        assert_eq!(config.content.timeout(), Duration::from_secs(20));
        assert_eq!(config.engine, EngineConfig::default());
        assert!(!config.muted);
    }

    #[test]
    fn test_supplier_selection() {
        let mut content = ContentConfig::default();
        assert_eq!(content.supplier().name(), "sample");
        content.endpoint = Some("http://localhost:9/chapters".to_string());
        assert_eq!(content.supplier().name(), "http");
        content.file = Some(PathBuf::from("chapters.json"));
        assert_eq!(content.supplier().name(), "file");
        content.use_sample = true;
        assert_eq!(content.supplier().name(), "sample");
    }

    #[test]
    fn test_overrides_win() {
        let mut config = GameConfig::default();
        config.profile.location = "Ohio".to_string();
        config.apply(Overrides {
            sample: true,
            seed: Some(7),
            knowledge: Some(KnowledgeLevel::Expert),
            topics: vec!["housing".to_string()],
            ..Overrides::default()
        });
        assert!(config.content.use_sample);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.profile.location, "Ohio");
        assert_eq!(config.profile.knowledge, KnowledgeLevel::Expert);
        assert_eq!(config.profile.topics, vec!["housing".to_string()]);
    }
}
