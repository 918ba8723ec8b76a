// Copyright 2025 Cowboy AI, LLC.

//! Ontology Store
//!
//! The ontology is the fixed taxonomy of scene categories, each holding an
//! explicitly ordered sequence of labels with their trigger vocabularies.
//! Declaration order is significant: the matcher picks the first label in
//! that order with any vocabulary hit, so reordering entries changes results.
//!
//! The built-in ontology is initialized once per process and shared read-only.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use indexmap::{IndexMap, IndexSet};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::{TaggingError, TaggingResult};

/// A scene category
///
/// Variant order is the canonical category order used for output.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Kind of place (temple, forest, ...)
    SceneType,
    /// Time of day (sunrise, night, ...)
    TimeOfDay,
    /// State of repair
    Condition,
    /// Weather
    Weather,
    /// Emotional tone
    Mood,
    /// How crowded the scene is
    Density,
    /// Overall light level
    LightingIntensity,
}

impl Category {
    /// All categories in canonical order
    pub const ALL: [Category; 7] = [
        Category::SceneType,
        Category::TimeOfDay,
        Category::Condition,
        Category::Weather,
        Category::Mood,
        Category::Density,
        Category::LightingIntensity,
    ];

    /// Wire name of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::SceneType => "scene_type",
            Category::TimeOfDay => "time_of_day",
            Category::Condition => "condition",
            Category::Weather => "weather",
            Category::Mood => "mood",
            Category::Density => "density",
            Category::LightingIntensity => "lighting_intensity",
        }
    }

    /// Label used when nothing in the input matches this category
    pub fn default_label(&self) -> &'static str {
        match self {
            Category::SceneType => "unknown",
            Category::TimeOfDay => "day",
            Category::Condition => "intact",
            Category::Weather => "none",
            Category::Mood => "neutral",
            Category::Density => "normal",
            Category::LightingIntensity => "normal",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = TaggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| TaggingError::UnknownCategory(s.to_string()))
    }
}

/// One label of a category together with its trigger vocabulary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEntry {
    /// Label emitted when this entry wins
    pub label: String,
    /// Trigger words, lowercase single tokens
    pub vocabulary: IndexSet<String>,
}

impl LabelEntry {
    /// Number of distinct vocabulary words
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}

/// Category → ordered label entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ontology {
    categories: IndexMap<Category, Vec<LabelEntry>>,
}

type BuiltinTable = &'static [(Category, &'static [(&'static str, &'static [&'static str])])];

const BUILTIN_TABLE: BuiltinTable = &[
    (
        Category::SceneType,
        &[
            ("temple", &["temple", "shrine", "sanctuary"]),
            ("forest", &["forest", "woods", "jungle", "woodland"]),
            ("city", &["city", "street", "urban"]),
            ("interior", &["room", "interior", "hall", "chamber"]),
        ],
    ),
    (
        Category::TimeOfDay,
        &[
            ("sunrise", &["sunrise", "dawn"]),
            ("sunset", &["sunset", "dusk", "evening", "twilight"]),
            ("night", &["night", "midnight"]),
            ("day", &["day", "noon", "morning", "afternoon"]),
        ],
    ),
    (
        Category::Condition,
        &[
            (
                "ruined",
                &["ruin", "ruined", "broken", "damaged", "abandoned", "ancient"],
            ),
            ("intact", &["intact", "clean", "new"]),
        ],
    ),
    (
        Category::Weather,
        &[
            ("mist", &["mist", "fog"]),
            ("snow", &["snow", "snowy"]),
            ("rain", &["rain", "rainy"]),
            ("clear", &["clear", "sunny"]),
        ],
    ),
    (
        Category::Mood,
        &[
            ("mysterious", &["mysterious", "eerie", "dark"]),
            ("peaceful", &["peaceful", "calm", "serene"]),
            ("dramatic", &["dramatic", "intense", "epic"]),
            ("gloomy", &["gloomy", "somber"]),
        ],
    ),
    (
        Category::Density,
        &[
            ("sparse", &["sparse", "empty", "isolated"]),
            ("dense", &["dense", "crowded", "thick"]),
        ],
    ),
    (
        Category::LightingIntensity,
        &[
            ("bright", &["bright", "vivid"]),
            ("dim", &["dim", "faint"]),
            ("dark", &["dark"]),
        ],
    ),
];

static BUILTIN: OnceLock<Arc<Ontology>> = OnceLock::new();

/// The process-wide built-in ontology
pub fn lookup() -> Arc<Ontology> {
    BUILTIN.get_or_init(|| Arc::new(Ontology::builtin())).clone()
}

impl Ontology {
    /// Start building a custom ontology
    pub fn builder() -> OntologyBuilder {
        OntologyBuilder::default()
    }

    fn builtin() -> Self {
        let categories = BUILTIN_TABLE
            .iter()
            .map(|(category, labels)| {
                let entries = labels
                    .iter()
                    .map(|(label, words)| LabelEntry {
                        label: (*label).to_string(),
                        vocabulary: words.iter().map(|w| (*w).to_string()).collect(),
                    })
                    .collect();
                (*category, entries)
            })
            .collect();
        Self { categories }
    }

    /// Label entries of a category in declared order
    pub fn labels(&self, category: Category) -> &[LabelEntry] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Categories with their entries, in declared order
    pub fn categories(&self) -> impl Iterator<Item = (Category, &[LabelEntry])> + '_ {
        self.categories.iter().map(|(c, e)| (*c, e.as_slice()))
    }

    /// Check the structural invariants
    pub fn validate(&self) -> TaggingResult<()> {
        for category in Category::ALL {
            let entries = self.labels(category);
            if entries.is_empty() {
                return Err(TaggingError::InvalidOntology(format!(
                    "category {category} has no labels"
                )));
            }
            let mut seen = BTreeSet::new();
            for entry in entries {
                if entry.label.trim().is_empty() {
                    return Err(TaggingError::InvalidOntology(format!(
                        "category {category} has an empty label"
                    )));
                }
                if !seen.insert(entry.label.as_str()) {
                    return Err(TaggingError::InvalidOntology(format!(
                        "duplicate label {} in {category}",
                        entry.label
                    )));
                }
                if entry.vocabulary.is_empty() {
                    return Err(TaggingError::InvalidOntology(format!(
                        "label {} in {category} has no vocabulary",
                        entry.label
                    )));
                }
                for word in &entry.vocabulary {
                    if !is_vocabulary_word(word) {
                        return Err(TaggingError::InvalidOntology(format!(
                            "vocabulary word '{word}' of {category}.{} must be a lowercase single token",
                            entry.label
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

fn is_vocabulary_word(word: &str) -> bool {
    !word.is_empty()
        && !word.chars().any(char::is_whitespace)
        && word.chars().all(|c| !c.is_uppercase())
}

/// Builder for custom ontologies
///
/// Labels keep the order in which they are added.
#[derive(Debug, Default)]
pub struct OntologyBuilder {
    categories: IndexMap<Category, Vec<(String, Vec<String>)>>,
}

impl OntologyBuilder {
    /// Append a label to a category
    pub fn label<I, W>(mut self, category: Category, label: impl Into<String>, words: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: Into<String>,
    {
        self.categories
            .entry(category)
            .or_default()
            .push((label.into(), words.into_iter().map(Into::into).collect()));
        self
    }

    /// Validate and freeze the ontology
    pub fn build(self) -> TaggingResult<Ontology> {
        let mut categories = IndexMap::new();
        for category in Category::ALL {
            let Some(raw) = self.categories.get(&category) else {
                continue;
            };
            let mut entries: Vec<LabelEntry> = Vec::with_capacity(raw.len());
            for (label, words) in raw {
                let vocabulary: IndexSet<String> = words.iter().cloned().collect();
                if vocabulary.len() != words.len() {
                    return Err(TaggingError::InvalidOntology(format!(
                        "label {label} in {category} repeats a vocabulary word"
                    )));
                }
                if let Some(earlier) = entries
                    .iter()
                    .find(|e| !vocabulary.is_empty() && vocabulary.is_subset(&e.vocabulary))
                {
                    warn!(
                        category = %category,
                        label = %label,
                        shadowed_by = %earlier.label,
                        "Label can never win: its vocabulary is covered by an earlier label"
                    );
                }
                entries.push(LabelEntry {
                    label: label.clone(),
                    vocabulary,
                });
            }
            categories.insert(category, entries);
        }
        let ontology = Ontology { categories };
        ontology.validate()?;
        Ok(ontology)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> OntologyBuilder {
        Category::ALL
            .into_iter()
            .fold(Ontology::builder(), |b, c| b.label(c, "only", ["word"]))
    }

    #[test]
    fn builtin_ontology_satisfies_invariants() {
        let ont = lookup();
        ont.validate().unwrap();
        assert_eq!(ont.categories().count(), 7);
    }

    #[test]
    fn builtin_preserves_declared_label_order() {
        let ont = lookup();
        let labels: Vec<&str> = ont
            .labels(Category::TimeOfDay)
            .iter()
            .map(|e| e.label.as_str())
            .collect();
        assert_eq!(labels, vec!["sunrise", "sunset", "night", "day"]);

        let ruined = &ont.labels(Category::Condition)[0];
        assert_eq!(ruined.label, "ruined");
        assert_eq!(ruined.vocabulary_size(), 6);
    }

    #[test]
    fn lookup_is_shared_and_idempotent() {
        let a = lookup();
        let b = lookup();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(*a, *b);
    }

    #[test]
    fn category_names_round_trip_through_from_str() {
        for c in Category::ALL {
            assert_eq!(c.as_str().parse::<Category>().unwrap(), c);
        }
        assert!(matches!(
            "colour".parse::<Category>(),
            Err(TaggingError::UnknownCategory(_))
        ));
    }

    #[test]
    fn category_serializes_as_snake_case() {
        let json = serde_json::to_string(&Category::LightingIntensity).unwrap();
        assert_eq!(json, "\"lighting_intensity\"");
    }

    #[test]
    fn builder_rejects_missing_category() {
        let err = Ontology::builder()
            .label(Category::SceneType, "temple", ["temple"])
            .build()
            .unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn builder_rejects_empty_vocabulary() {
        let empty: [&str; 0] = [];
        let err = minimal()
            .label(Category::Weather, "storm", empty)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("no vocabulary"));
    }

    #[test]
    fn builder_rejects_uppercase_and_multiword_vocabulary() {
        assert!(minimal()
            .label(Category::Mood, "angry", ["Angry"])
            .build()
            .is_err());
        assert!(minimal()
            .label(Category::Mood, "angry", ["red mist"])
            .build()
            .is_err());
    }

    #[test]
    fn builder_rejects_duplicate_labels_and_words() {
        assert!(minimal()
            .label(Category::Mood, "only", ["other"])
            .build()
            .is_err());
        assert!(minimal()
            .label(Category::Mood, "calm", ["calm", "calm"])
            .build()
            .is_err());
    }

    #[test]
    fn builder_keeps_insertion_order() {
        let ont = minimal()
            .label(Category::Weather, "zeta", ["z"])
            .label(Category::Weather, "alpha", ["a"])
            .build()
            .unwrap();
        let labels: Vec<&str> = ont
            .labels(Category::Weather)
            .iter()
            .map(|e| e.label.as_str())
            .collect();
        assert_eq!(labels, vec!["only", "zeta", "alpha"]);
    }
}
