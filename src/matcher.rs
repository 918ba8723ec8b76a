// Copyright 2025 Cowboy AI, LLC.

//! Category Matcher
//!
//! Scores ontology labels against an expanded token set. Within a category,
//! labels are visited in declared order and the first label with at least one
//! vocabulary hit wins; later labels are not evaluated even if they would
//! score higher. Categories are matched independently of each other.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::ontology::{Category, LabelEntry, Ontology};

/// Winning label of one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryMatch {
    /// Winning label
    pub label: String,
    /// `matched_words / vocabulary_size`, rounded to 2 decimals
    pub confidence: f64,
    /// Vocabulary words found in the token set, in vocabulary order
    pub matched_words: Vec<String>,
    /// Size of the winning label's vocabulary
    pub vocabulary_size: usize,
}

/// Round to 2 decimal places, ties to even
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// First label (in declared order) whose vocabulary intersects `tokens`
pub fn match_category(entries: &[LabelEntry], tokens: &BTreeSet<String>) -> Option<CategoryMatch> {
    entries.iter().find_map(|entry| {
        let matched_words: Vec<String> = entry
            .vocabulary
            .iter()
            .filter(|w| tokens.contains(w.as_str()))
            .cloned()
            .collect();
        if matched_words.is_empty() {
            return None;
        }
        let vocabulary_size = entry.vocabulary_size();
        Some(CategoryMatch {
            label: entry.label.clone(),
            confidence: round2(matched_words.len() as f64 / vocabulary_size as f64),
            matched_words,
            vocabulary_size,
        })
    })
}

/// Match every category of `ontology`; unmatched categories are absent
pub fn match_all(tokens: &BTreeSet<String>, ontology: &Ontology) -> BTreeMap<Category, CategoryMatch> {
    let mut matches = BTreeMap::new();
    for (category, entries) in ontology.categories() {
        match match_category(entries, tokens) {
            Some(m) => {
                debug!(
                    category = %category,
                    label = %m.label,
                    confidence = m.confidence,
                    matched = ?m.matched_words,
                    "Category matched"
                );
                matches.insert(category, m);
            }
            None => debug!(category = %category, "Category unmatched"),
        }
    }
    matches
}
