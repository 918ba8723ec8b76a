// Copyright 2025 Cowboy AI, LLC.

//! Scene Tags and the Result Assembler
//!
//! [`SceneTags`] is the contract handed to the PCG pipeline: exactly one label
//! per category, always present, plus a confidence entry for each category
//! that actually matched. [`assemble`] fills unmatched categories from
//! [`CategoryDefaults`].

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::matcher::CategoryMatch;
use crate::ontology::Category;

/// Fallback label per category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDefaults {
    labels: BTreeMap<Category, String>,
}

impl CategoryDefaults {
    /// `unknown / day / intact / none / neutral / normal / normal`
    pub fn standard() -> Self {
        Self {
            labels: Category::ALL
                .into_iter()
                .map(|c| (c, c.default_label().to_string()))
                .collect(),
        }
    }

    /// Override the fallback of one category
    ///
    /// Blank labels are ignored so the output never carries an empty string.
    pub fn with(mut self, category: Category, label: impl Into<String>) -> Self {
        let label = label.into();
        if !label.trim().is_empty() {
            self.labels.insert(category, label);
        }
        self
    }

    /// Fallback label of `category`
    pub fn get(&self, category: Category) -> &str {
        self.labels
            .get(&category)
            .map(String::as_str)
            .unwrap_or_else(|| category.default_label())
    }
}

impl Default for CategoryDefaults {
    fn default() -> Self {
        Self::standard()
    }
}

/// Final tag set for one scene description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SceneTags {
    /// Kind of place
    pub scene_type: String,
    /// Time of day
    pub time_of_day: String,
    /// State of repair
    pub condition: String,
    /// Weather
    pub weather: String,
    /// Emotional tone
    pub mood: String,
    /// How crowded the scene is
    pub density: String,
    /// Overall light level
    pub lighting_intensity: String,
    /// Confidence of each matched category, in [0, 1] with 2 decimals
    pub confidence: BTreeMap<Category, f64>,
}

impl SceneTags {
    /// Tags where every category holds its standard default
    pub fn defaults() -> Self {
        assemble(&BTreeMap::new(), &CategoryDefaults::standard())
    }

    /// Label of a category
    pub fn label(&self, category: Category) -> &str {
        match category {
            Category::SceneType => &self.scene_type,
            Category::TimeOfDay => &self.time_of_day,
            Category::Condition => &self.condition,
            Category::Weather => &self.weather,
            Category::Mood => &self.mood,
            Category::Density => &self.density,
            Category::LightingIntensity => &self.lighting_intensity,
        }
    }

    fn label_mut(&mut self, category: Category) -> &mut String {
        match category {
            Category::SceneType => &mut self.scene_type,
            Category::TimeOfDay => &mut self.time_of_day,
            Category::Condition => &mut self.condition,
            Category::Weather => &mut self.weather,
            Category::Mood => &mut self.mood,
            Category::Density => &mut self.density,
            Category::LightingIntensity => &mut self.lighting_intensity,
        }
    }

    /// Whether the category came from the input rather than a default
    pub fn is_matched(&self, category: Category) -> bool {
        self.confidence.contains_key(&category)
    }

    /// `(category, label)` pairs in canonical order
    pub fn labels(&self) -> impl Iterator<Item = (Category, &str)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.label(c)))
    }
}

/// Merge matcher output with defaults into a complete tag set
pub fn assemble(
    matches: &BTreeMap<Category, CategoryMatch>,
    defaults: &CategoryDefaults,
) -> SceneTags {
    let mut tags = SceneTags {
        scene_type: String::new(),
        time_of_day: String::new(),
        condition: String::new(),
        weather: String::new(),
        mood: String::new(),
        density: String::new(),
        lighting_intensity: String::new(),
        confidence: BTreeMap::new(),
    };
    for category in Category::ALL {
        let label = match matches.get(&category) {
            Some(m) => {
                tags.confidence.insert(category, m.confidence);
                m.label.clone()
            }
            None => defaults.get(category).to_string(),
        };
        *tags.label_mut(category) = label;
    }
    tags
}
