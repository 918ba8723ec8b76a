// Copyright 2025 Cowboy AI, LLC.

//! Tagger configuration
//!
//! Values are layered: built-in defaults, then an optional JSON file, then
//! `SCENE_TAGGER_*` environment variables. Command-line flags are applied on
//! top by the binary.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{TaggingError, TaggingResult};

/// Environment variable naming an external thesaurus file
pub const ENV_THESAURUS: &str = "SCENE_TAGGER_THESAURUS";
/// Environment variable toggling synonym expansion (`true`/`false`/`1`/`0`)
pub const ENV_EXPAND_SYNONYMS: &str = "SCENE_TAGGER_EXPAND_SYNONYMS";
/// Environment variable for the synonym cache capacity
pub const ENV_CACHE_CAPACITY: &str = "SCENE_TAGGER_CACHE_CAPACITY";
/// Environment variable for the output file
pub const ENV_OUTPUT: &str = "SCENE_TAGGER_OUTPUT";

/// Configuration of a tagger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TaggerConfig {
    /// External thesaurus JSON; the built-in thesaurus is used when absent
    pub thesaurus_path: Option<PathBuf>,
    /// Union tokens with their synonyms before matching
    pub expand_synonyms: bool,
    /// Number of words kept in the synonym cache
    pub synonym_cache_capacity: usize,
    /// Where the CLI writes the tags
    pub output_path: PathBuf,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            thesaurus_path: None,
            expand_synonyms: true,
            synonym_cache_capacity: 1024,
            output_path: PathBuf::from("scene_config.json"),
        }
    }
}

impl TaggerConfig {
    /// Read a JSON config file; missing keys keep their defaults
    pub fn from_path(path: impl AsRef<Path>) -> TaggingResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        info!(path = %path.display(), "Loaded tagger configuration");
        Ok(config)
    }

    /// Apply `SCENE_TAGGER_*` variables from the process environment
    pub fn with_env(self) -> TaggingResult<Self> {
        self.with_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn with_vars<F>(mut self, lookup: F) -> TaggingResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_THESAURUS).filter(|v| !v.is_empty()) {
            self.thesaurus_path = Some(PathBuf::from(path));
        }
        if let Some(raw) = lookup(ENV_EXPAND_SYNONYMS) {
            self.expand_synonyms = parse_bool(ENV_EXPAND_SYNONYMS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_CACHE_CAPACITY) {
            self.synonym_cache_capacity =
                raw.trim()
                    .parse()
                    .map_err(|e: std::num::ParseIntError| TaggingError::InvalidConfig {
                        key: ENV_CACHE_CAPACITY.to_string(),
                        reason: e.to_string(),
                    })?;
        }
        if let Some(path) = lookup(ENV_OUTPUT).filter(|v| !v.is_empty()) {
            self.output_path = PathBuf::from(path);
        }
        self.validate()?;
        Ok(self)
    }

    /// Check value ranges
    pub fn validate(&self) -> TaggingResult<()> {
        if self.synonym_cache_capacity == 0 {
            return Err(TaggingError::InvalidConfig {
                key: "synonym_cache_capacity".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(TaggingError::InvalidConfig {
                key: "output_path".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Cache capacity as the non-zero type the cache requires
    pub fn cache_capacity(&self) -> TaggingResult<NonZeroUsize> {
        NonZeroUsize::new(self.synonym_cache_capacity).ok_or_else(|| TaggingError::InvalidConfig {
            key: "synonym_cache_capacity".to_string(),
            reason: "must be greater than zero".to_string(),
        })
    }
}

fn parse_bool(key: &str, raw: &str) -> TaggingResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(TaggingError::InvalidConfig {
            key: key.to_string(),
            reason: format!("expected a boolean, got '{other}'"),
        }),
    }
}
