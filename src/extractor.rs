// Copyright 2025 Cowboy AI, LLC.

//! Extraction pipeline
//!
//! normalize → expand → match → assemble, run start to finish for each
//! prompt. No state is carried between calls apart from the read-only
//! ontology and whatever caching a synonym source does internally.

use std::collections::BTreeSet;
use std::sync::{Arc, OnceLock};

use tracing::{debug, info};

use crate::config::TaggerConfig;
use crate::errors::TaggingResult;
use crate::matcher::match_all;
use crate::normalizer::{SimpleNormalizer, TokenNormalizer};
use crate::ontology::{self, Ontology};
use crate::synonyms::{CachedSynonymSource, SynonymExpander, SynonymSource, Thesaurus};
use crate::tags::{assemble, CategoryDefaults, SceneTags};

/// Scene description → tags, over pluggable collaborators
#[derive(Debug)]
pub struct SceneExtractor<N, S> {
    normalizer: N,
    synonyms: S,
    ontology: Arc<Ontology>,
    defaults: CategoryDefaults,
    expand_synonyms: bool,
}

/// Extractor wired with the rule-based normalizer and the cached thesaurus
pub type StandardExtractor = SceneExtractor<SimpleNormalizer, CachedSynonymSource<Thesaurus>>;

impl<N: TokenNormalizer, S: SynonymSource> SceneExtractor<N, S> {
    /// Built-in ontology and standard defaults over the given collaborators
    pub fn new(normalizer: N, synonyms: S) -> Self {
        Self {
            normalizer,
            synonyms,
            ontology: ontology::lookup(),
            defaults: CategoryDefaults::standard(),
            expand_synonyms: true,
        }
    }

    /// Match against a different ontology
    pub fn with_ontology(mut self, ontology: Arc<Ontology>) -> Self {
        self.ontology = ontology;
        self
    }

    /// Use different fallback labels
    pub fn with_defaults(mut self, defaults: CategoryDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Enable or disable synonym expansion
    pub fn with_synonym_expansion(mut self, enabled: bool) -> Self {
        self.expand_synonyms = enabled;
        self
    }

    /// The ontology being matched against
    pub fn ontology(&self) -> &Ontology {
        &self.ontology
    }

    /// The synonym source
    pub fn synonym_source(&self) -> &S {
        &self.synonyms
    }

    /// Normalized and expanded token set of a prompt
    pub fn expanded_tokens(&self, prompt: &str) -> TaggingResult<BTreeSet<String>> {
        let tokens = self.normalizer.normalize(prompt)?;
        debug!(tokens = ?tokens, "Normalized prompt");
        if self.expand_synonyms {
            SynonymExpander::new(&self.synonyms).expand(&tokens)
        } else {
            Ok(tokens.into_iter().collect())
        }
    }

    /// Extract the tags of one scene description
    ///
    /// Contentless input is not an error; it yields the defaults. Only a
    /// collaborator failure aborts the call.
    pub fn extract(&self, prompt: &str) -> TaggingResult<SceneTags> {
        let expanded = self.expanded_tokens(prompt)?;
        let matches = match_all(&expanded, &self.ontology);
        let tags = assemble(&matches, &self.defaults);
        debug!(
            matched = tags.confidence.len(),
            expanded = expanded.len(),
            "Extracted scene tags"
        );
        Ok(tags)
    }
}

impl StandardExtractor {
    /// Built-in thesaurus with default settings
    pub fn standard() -> TaggingResult<Self> {
        Self::from_config(&TaggerConfig::default())
    }

    /// Build from configuration
    pub fn from_config(config: &TaggerConfig) -> TaggingResult<Self> {
        config.validate()?;
        let thesaurus = match &config.thesaurus_path {
            Some(path) => Thesaurus::from_path(path)?,
            None => Thesaurus::builtin()?,
        };
        info!(
            synsets = thesaurus.synset_count(),
            expand_synonyms = config.expand_synonyms,
            cache_capacity = config.synonym_cache_capacity,
            "Scene extractor ready"
        );
        let synonyms = CachedSynonymSource::new(thesaurus, config.cache_capacity()?);
        Ok(SceneExtractor::new(SimpleNormalizer::new(), synonyms)
            .with_synonym_expansion(config.expand_synonyms))
    }
}

static STANDARD: OnceLock<StandardExtractor> = OnceLock::new();

fn standard_extractor() -> TaggingResult<&'static StandardExtractor> {
    if let Some(extractor) = STANDARD.get() {
        return Ok(extractor);
    }
    let built = StandardExtractor::standard()?;
    Ok(STANDARD.get_or_init(|| built))
}

/// Extract tags with the standard extractor
pub fn extract(prompt: &str) -> TaggingResult<SceneTags> {
    standard_extractor()?.extract(prompt)
}
