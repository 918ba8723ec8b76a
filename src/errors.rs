// Copyright 2025 Cowboy AI, LLC.

//! Error types for tagging operations

use thiserror::Error;

/// Errors that can occur while extracting scene tags
///
/// Empty, contentless, or unknown input is never an error; these variants
/// only cover collaborator failures, bad configuration, and I/O.
#[derive(Debug, Clone, Error)]
pub enum TaggingError {
    /// The token normalizer failed
    #[error("Normalizer error: {message}")]
    Normalizer {
        /// Message from the normalizer
        message: String,
    },

    /// The synonym source failed for a word
    #[error("Synonym source error for '{word}': {message}")]
    SynonymSource {
        /// Word being looked up
        word: String,
        /// Message from the synonym source
        message: String,
    },

    /// A thesaurus could not be loaded
    #[error("Failed to load thesaurus from {source_name}: {message}")]
    ThesaurusLoad {
        /// Where the thesaurus was loaded from (path or "builtin")
        source_name: String,
        /// What went wrong
        message: String,
    },

    /// An ontology violates its structural invariants
    #[error("Invalid ontology: {0}")]
    InvalidOntology(String),

    /// Unknown category name
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Invalid configuration value
    #[error("Invalid configuration for {key}: {reason}")]
    InvalidConfig {
        /// Configuration key
        key: String,
        /// Why the value was rejected
        reason: String,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(String),
}

/// Result type for tagging operations
pub type TaggingResult<T> = Result<T, TaggingError>;

impl From<serde_json::Error> for TaggingError {
    fn from(err: serde_json::Error) -> Self {
        TaggingError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for TaggingError {
    fn from(err: std::io::Error) -> Self {
        TaggingError::Io(err.to_string())
    }
}

impl TaggingError {
    /// Create a normalizer error
    pub fn normalizer(msg: impl Into<String>) -> Self {
        TaggingError::Normalizer {
            message: msg.into(),
        }
    }

    /// Create a synonym source error
    pub fn synonym_source(word: impl Into<String>, msg: impl Into<String>) -> Self {
        TaggingError::SynonymSource {
            word: word.into(),
            message: msg.into(),
        }
    }

    /// Check if this error came from an external collaborator
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(
            self,
            TaggingError::Normalizer { .. }
                | TaggingError::SynonymSource { .. }
                | TaggingError::ThesaurusLoad { .. }
        )
    }

    /// Check if this is a configuration or setup error
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            TaggingError::InvalidConfig { .. }
                | TaggingError::InvalidOntology(_)
                | TaggingError::UnknownCategory(_)
        )
    }
}
