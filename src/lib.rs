// Copyright 2025 Cowboy AI, LLC.

//! # Scene Tagger
//!
//! Keyword extraction and ontology matching for procedural content generation.
//!
//! A free-text scene description is turned into one label for each of seven
//! fixed categories plus per-category confidence:
//! - **Token Normalizer**: text → lowercase lemma tokens, stopwords dropped before lemmatizing
//! - **Synonym Expander**: tokens ∪ lexical synonyms
//! - **Category Matcher**: first label in declared order with a vocabulary hit
//! - **Result Assembler**: matched labels merged with category defaults
//!
//! ## Guarantees
//!
//! 1. **Completeness**: every category always carries a non-empty label
//! 2. **Determinism**: ties between labels resolve by ontology declaration order
//! 3. **Honest confidence**: only matched categories appear in `confidence`
//! 4. **Robustness**: empty or unknown input is not an error
//!
//! ```no_run
//! let tags = scene_tagger::extract("The ancient temple stood silent at dawn in thick fog")?;
//! assert_eq!(tags.scene_type, "temple");
//! # Ok::<(), scene_tagger::TaggingError>(())
//! ```

#![warn(missing_docs)]

mod errors;
mod extractor;
mod matcher;
mod tags;
pub mod config;
pub mod normalizer;
pub mod ontology;
pub mod persistence;
pub mod synonyms;

pub use config::TaggerConfig;
pub use errors::{TaggingError, TaggingResult};
pub use extractor::{extract, SceneExtractor, StandardExtractor};
pub use matcher::{match_all, match_category, round2, CategoryMatch};
pub use normalizer::{SimpleNormalizer, TokenNormalizer};
pub use ontology::{lookup, Category, LabelEntry, Ontology, OntologyBuilder};
pub use synonyms::{
    normalize_synonym, CachedSynonymSource, NoSynonyms, SynonymExpander, SynonymSource,
    Thesaurus,
};
pub use tags::{assemble, CategoryDefaults, SceneTags};
