// Copyright 2025 Cowboy AI, LLC.

//! Token normalization
//!
//! Turns raw text into the ordered sequence of lemma tokens the matcher works
//! on: lowercase, alphabetic only, stopwords removed, each token reduced to
//! its base form.
//!
//! The pipeline only depends on the [`TokenNormalizer`] trait. [`SimpleNormalizer`]
//! is a deterministic rule-based English implementation: an irregular-form
//! table followed by conservative plural rules. Verb and adjective inflections
//! outside the table are left as written.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use crate::errors::TaggingResult;

/// Text → normalized lemma tokens
pub trait TokenNormalizer {
    /// Lowercase `text`, drop stopwords and non-alphabetic tokens, and return
    /// the lemma of each surviving token in input order.
    fn normalize(&self, text: &str) -> TaggingResult<Vec<String>>;
}

impl<T: TokenNormalizer + ?Sized> TokenNormalizer for &T {
    fn normalize(&self, text: &str) -> TaggingResult<Vec<String>> {
        (**self).normalize(text)
    }
}

impl<T: TokenNormalizer + ?Sized> TokenNormalizer for Box<T> {
    fn normalize(&self, text: &str) -> TaggingResult<Vec<String>> {
        (**self).normalize(text)
    }
}

/// English function words, checked against the surface token
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst", "amount",
    "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway", "anywhere", "are",
    "around", "as", "at", "back", "be", "became", "because", "become", "becomes", "becoming",
    "been", "before", "beforehand", "behind", "being", "below", "beside", "besides", "between",
    "beyond", "both", "bottom", "but", "by", "ca", "call", "can", "cannot", "could", "did", "do",
    "does", "doing", "done", "down", "due", "during", "each", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "first", "five", "for", "former",
    "formerly", "forty", "four", "from", "front", "full", "further", "get", "give", "go", "had",
    "has", "have", "he", "hence", "her", "here", "hereafter", "hereby", "herein", "hereupon",
    "hers", "herself", "him", "himself", "his", "how", "however", "hundred", "i", "if", "in",
    "indeed", "into", "is", "it", "its", "itself", "just", "keep", "last", "latter", "latterly",
    "least", "less", "made", "make", "many", "may", "me", "meanwhile", "might", "mine", "more",
    "moreover", "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely",
    "neither", "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor",
    "not", "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
    "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own",
    "part", "per", "perhaps", "please", "put", "quite", "rather", "re", "really", "regarding",
    "same", "say", "see", "seem", "seemed", "seeming", "seems", "serious", "several", "she",
    "should", "show", "side", "since", "six", "sixty", "so", "some", "somehow", "someone",
    "something", "sometime", "sometimes", "somewhere", "still", "such", "take", "ten", "than",
    "that", "the", "their", "them", "themselves", "then", "thence", "there", "thereafter",
    "thereby", "therefore", "therein", "thereupon", "these", "they", "third", "this", "those",
    "though", "three", "through", "throughout", "thru", "thus", "to", "together", "too", "top",
    "toward", "towards", "twelve", "twenty", "two", "under", "unless", "until", "up", "upon",
    "us", "used", "using", "various", "very", "via", "was", "we", "well", "were", "what",
    "whatever", "when", "whence", "whenever", "where", "whereafter", "whereas", "whereby",
    "wherein", "whereupon", "wherever", "whether", "which", "while", "whither", "who", "whoever",
    "whole", "whom", "whose", "why", "will", "with", "within", "without", "would", "yet", "you",
    "your", "yours", "yourself", "yourselves",
];

const IRREGULAR_FORMS: &[(&str, &str)] = &[
    // verbs
    ("stood", "stand"),
    ("understood", "understand"),
    ("ran", "run"),
    ("fell", "fall"),
    ("fallen", "fall"),
    ("lay", "lie"),
    ("lain", "lie"),
    ("lit", "light"),
    ("shone", "shine"),
    ("grew", "grow"),
    ("grown", "grow"),
    ("broke", "break"),
    ("hid", "hide"),
    ("hidden", "hide"),
    ("sat", "sit"),
    ("found", "find"),
    ("left", "leave"),
    ("came", "come"),
    ("went", "go"),
    ("gone", "go"),
    ("took", "take"),
    ("taken", "take"),
    ("began", "begin"),
    ("begun", "begin"),
    ("hung", "hang"),
    ("swept", "sweep"),
    ("crept", "creep"),
    ("slept", "sleep"),
    ("felt", "feel"),
    ("built", "build"),
    ("burnt", "burn"),
    ("wept", "weep"),
    ("rang", "ring"),
    ("sank", "sink"),
    ("sunk", "sink"),
    ("froze", "freeze"),
    ("frozen", "freeze"),
    ("blew", "blow"),
    ("flew", "fly"),
    ("drew", "draw"),
    ("spread", "spread"),
    ("raining", "rain"),
    ("rained", "rain"),
    ("snowing", "snow"),
    ("snowed", "snow"),
    ("shining", "shine"),
    ("glowing", "glow"),
    ("burning", "burn"),
    ("falling", "fall"),
    ("crumbling", "crumble"),
    ("towering", "tower"),
    ("standing", "stand"),
    // comparatives and superlatives
    ("darker", "dark"),
    ("darkest", "dark"),
    ("brighter", "bright"),
    ("brightest", "bright"),
    ("dimmer", "dim"),
    ("dimmest", "dim"),
    ("thicker", "thick"),
    ("thickest", "thick"),
    ("denser", "dense"),
    ("densest", "dense"),
    ("calmer", "calm"),
    ("calmest", "calm"),
    ("gloomier", "gloomy"),
    ("gloomiest", "gloomy"),
    ("eerier", "eerie"),
    ("eeriest", "eerie"),
    ("older", "old"),
    ("oldest", "old"),
    // nouns
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("people", "people"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("geese", "goose"),
    ("mice", "mouse"),
    ("leaves", "leaf"),
    ("wolves", "wolf"),
    ("shelves", "shelf"),
    ("knives", "knife"),
    ("lives", "life"),
    ("thieves", "thief"),
];

/// Words ending in `s` that are not plurals
const UNINFLECTED: &[&str] = &[
    "chaos", "canvas", "atlas", "lens", "news", "series", "species", "gas", "bias", "dais",
];

fn stop_words() -> &'static HashSet<&'static str> {
    static WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();
    WORDS.get_or_init(|| STOP_WORDS.iter().copied().collect())
}

fn irregular_forms() -> &'static HashMap<&'static str, &'static str> {
    static FORMS: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    FORMS.get_or_init(|| IRREGULAR_FORMS.iter().copied().collect())
}

fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == '\u{2019}'
}

/// Rule-based English normalizer
#[derive(Debug, Default, Clone, Copy)]
pub struct SimpleNormalizer;

impl SimpleNormalizer {
    /// Create a normalizer
    pub fn new() -> Self {
        Self
    }

    /// Split lowercased text into candidate tokens.
    ///
    /// Splits on whitespace and punctuation. A clitic after an apostrophe
    /// (`'s`, `n't`) is dropped; the stem before it is kept.
    fn tokenize(text: &str) -> Vec<String> {
        text.split(|c: char| c.is_whitespace() || (c.is_ascii_punctuation() && !is_apostrophe(c)))
            .filter_map(|raw| {
                let stem = raw.split(is_apostrophe).find(|p| !p.is_empty())?;
                Some(stem.to_string())
            })
            .collect()
    }

    /// Reduce a lowercase alphabetic token to its lemma
    pub fn lemmatize(&self, word: &str) -> String {
        if let Some(base) = irregular_forms().get(word) {
            return (*base).to_string();
        }
        if UNINFLECTED.contains(&word) {
            return word.to_string();
        }
        let len = word.chars().count();
        if len > 4 && word.ends_with("ies") {
            return format!("{}y", &word[..word.len() - 3]);
        }
        if len > 4
            && ["ches", "shes", "sses", "xes", "zes"]
                .iter()
                .any(|suffix| word.ends_with(suffix))
        {
            return word[..word.len() - 2].to_string();
        }
        if len > 3
            && word.ends_with('s')
            && !["ss", "us", "is", "ous"]
                .iter()
                .any(|suffix| word.ends_with(suffix))
        {
            return word[..word.len() - 1].to_string();
        }
        word.to_string()
    }
}

impl TokenNormalizer for SimpleNormalizer {
    fn normalize(&self, text: &str) -> TaggingResult<Vec<String>> {
        let lowered = text.to_lowercase();
        let stops = stop_words();
        Ok(Self::tokenize(&lowered)
            .into_iter()
            .filter(|t| t.chars().all(char::is_alphabetic))
            .filter(|t| !stops.contains(t.as_str()))
            .map(|t| self.lemmatize(&t))
            .collect())
    }
}
