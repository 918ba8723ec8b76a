// Copyright 2025 Cowboy AI, LLC.

//! Synonym sources and token expansion
//!
//! A [`SynonymSource`] answers "which words are lexically related to this
//! one". The [`SynonymExpander`] unions every token with all of its synonyms
//! so that a prompt mentioning "daybreak" can still hit the `dawn` vocabulary.
//!
//! All word senses are merged; there is no part-of-speech or sense
//! disambiguation. A word like "night" therefore pulls in "dark" and can
//! trigger mood and lighting labels.
//!
//! The built-in thesaurus is a small curated set of synsets around the
//! ontology vocabulary, not the full WordNet database, so it expands far
//! fewer words than a WordNet lookup would. For full coverage, convert a
//! WordNet 3.x dictionary directory once and point `--thesaurus` at the
//! result:
//!
//! ```text
//! scene-tagger --import-wordnet /usr/share/wordnet/dict > wordnet.json
//! scene-tagger --thesaurus wordnet.json "misty forest at dusk"
//! ```
//!
//! The same conversion is available as [`Thesaurus::from_wordnet_dict`]
//! followed by [`Thesaurus::to_json_pretty`].

use std::collections::{BTreeSet, HashMap};
use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::{Arc, Mutex};

use lru::LruCache;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::{TaggingError, TaggingResult};

const BUILTIN_THESAURUS: &str = include_str!("../data/thesaurus.json");

/// Synset files of a WordNet dictionary directory
const WORDNET_DATA_FILES: [&str; 4] = ["data.noun", "data.verb", "data.adj", "data.adv"];

/// Word → related words
pub trait SynonymSource {
    /// All synonyms of `word`, lowercase, word separators rendered as single
    /// spaces. Unknown words yield an empty set.
    fn synonyms(&self, word: &str) -> TaggingResult<BTreeSet<String>>;
}

impl<T: SynonymSource + ?Sized> SynonymSource for &T {
    fn synonyms(&self, word: &str) -> TaggingResult<BTreeSet<String>> {
        (**self).synonyms(word)
    }
}

impl<T: SynonymSource + ?Sized> SynonymSource for Box<T> {
    fn synonyms(&self, word: &str) -> TaggingResult<BTreeSet<String>> {
        (**self).synonyms(word)
    }
}

impl<T: SynonymSource + ?Sized> SynonymSource for Arc<T> {
    fn synonyms(&self, word: &str) -> TaggingResult<BTreeSet<String>> {
        (**self).synonyms(word)
    }
}

/// Lowercase a lemma name and render `_` separators as spaces
pub fn normalize_synonym(raw: &str) -> String {
    raw.to_lowercase().replace('_', " ")
}

/// Source that knows no synonyms
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSynonyms;

impl SynonymSource for NoSynonyms {
    fn synonyms(&self, _word: &str) -> TaggingResult<BTreeSet<String>> {
        Ok(BTreeSet::new())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ThesaurusFile {
    synsets: Vec<Vec<String>>,
}

/// In-memory lexical database of synsets
///
/// A synset is a group of lemma names sharing one sense. The synonyms of a
/// word are the lemma names of every synset the word belongs to.
#[derive(Debug, Clone, Default)]
pub struct Thesaurus {
    synsets: Vec<Vec<String>>,
    index: HashMap<String, Vec<usize>>,
}

impl Thesaurus {
    /// Build from synsets of raw lemma names
    pub fn from_synsets<I, S, W>(synsets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: IntoIterator<Item = W>,
        W: AsRef<str>,
    {
        let synsets: Vec<Vec<String>> = synsets
            .into_iter()
            .map(|s| s.into_iter().map(|w| normalize_synonym(w.as_ref())).collect())
            .filter(|s: &Vec<String>| !s.is_empty())
            .collect();

        let mut index: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, synset) in synsets.iter().enumerate() {
            for lemma in synset {
                let ids = index.entry(lemma.clone()).or_default();
                if ids.last() != Some(&i) {
                    ids.push(i);
                }
            }
        }
        Self { synsets, index }
    }

    /// Parse the `{"synsets": [[...], ...]}` JSON format
    pub fn from_json_str(json: &str, source_name: &str) -> TaggingResult<Self> {
        let file: ThesaurusFile =
            serde_json::from_str(json).map_err(|e| TaggingError::ThesaurusLoad {
                source_name: source_name.to_string(),
                message: e.to_string(),
            })?;
        let thesaurus = Self::from_synsets(file.synsets);
        debug!(
            source = source_name,
            synsets = thesaurus.synset_count(),
            words = thesaurus.word_count(),
            "Thesaurus parsed"
        );
        Ok(thesaurus)
    }

    /// Load a thesaurus JSON file
    pub fn from_path(path: impl AsRef<Path>) -> TaggingResult<Self> {
        let path = path.as_ref();
        let source_name = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|e| TaggingError::ThesaurusLoad {
            source_name: source_name.clone(),
            message: e.to_string(),
        })?;
        let thesaurus = Self::from_json_str(&raw, &source_name)?;
        info!(path = %source_name, synsets = thesaurus.synset_count(), "Loaded thesaurus");
        Ok(thesaurus)
    }

    /// The thesaurus embedded in the crate
    ///
    /// About 150 hand-picked synsets covering the ontology vocabulary and its
    /// common neighbours. Words outside that set get no synonyms; load a
    /// converted WordNet (see [`Thesaurus::from_wordnet_dict`]) when broader
    /// expansion is needed.
    pub fn builtin() -> TaggingResult<Self> {
        Self::from_json_str(BUILTIN_THESAURUS, "builtin")
    }

    /// Read the synsets of a WordNet dictionary directory
    ///
    /// Parses `data.noun`, `data.verb`, `data.adj` and `data.adv` in the
    /// WordNet database format. Header lines (leading space) are skipped and
    /// adjective position markers such as `(a)` are dropped.
    pub fn from_wordnet_dict(dir: impl AsRef<Path>) -> TaggingResult<Self> {
        let dir = dir.as_ref();
        let mut synsets = Vec::new();
        for name in WORDNET_DATA_FILES {
            let path = dir.join(name);
            let source_name = path.display().to_string();
            let raw = std::fs::read_to_string(&path).map_err(|e| TaggingError::ThesaurusLoad {
                source_name: source_name.clone(),
                message: e.to_string(),
            })?;
            for (line_no, line) in raw.lines().enumerate() {
                if line.trim().is_empty() || line.starts_with(' ') {
                    continue;
                }
                let synset =
                    parse_wordnet_synset(line).map_err(|message| TaggingError::ThesaurusLoad {
                        source_name: format!("{source_name}:{}", line_no + 1),
                        message,
                    })?;
                synsets.push(synset);
            }
            debug!(file = %source_name, synsets = synsets.len(), "Read WordNet data file");
        }
        let thesaurus = Self::from_synsets(synsets);
        info!(
            dir = %dir.display(),
            synsets = thesaurus.synset_count(),
            words = thesaurus.word_count(),
            "Imported WordNet"
        );
        Ok(thesaurus)
    }

    /// Render in the `{"synsets": [[...], ...]}` format read by [`Thesaurus::from_path`]
    pub fn to_json_pretty(&self) -> TaggingResult<String> {
        let file = ThesaurusFile {
            synsets: self.synsets.clone(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Number of synsets
    pub fn synset_count(&self) -> usize {
        self.synsets.len()
    }

    /// Number of distinct lemma names
    pub fn word_count(&self) -> usize {
        self.index.len()
    }
}

/// Lemma names of one WordNet data line:
/// `offset lex_filenum ss_type w_cnt (word lex_id){w_cnt} ...`, `w_cnt` in hex
fn parse_wordnet_synset(line: &str) -> Result<Vec<String>, String> {
    let mut fields = line.split_ascii_whitespace().skip(3);
    let count = fields.next().ok_or("missing word count")?;
    let count =
        usize::from_str_radix(count, 16).map_err(|e| format!("bad word count {count:?}: {e}"))?;
    (0..count)
        .map(|_| -> Result<String, String> {
            let word = fields.next().ok_or("truncated word list")?;
            fields.next().ok_or("missing lex_id")?;
            Ok(strip_adjective_marker(word).to_string())
        })
        .collect()
}

fn strip_adjective_marker(word: &str) -> &str {
    match word.find('(') {
        Some(i) if i > 0 && word.ends_with(')') => &word[..i],
        _ => word,
    }
}

impl SynonymSource for Thesaurus {
    fn synonyms(&self, word: &str) -> TaggingResult<BTreeSet<String>> {
        let key = normalize_synonym(word);
        let Some(ids) = self.index.get(&key) else {
            return Ok(BTreeSet::new());
        };
        Ok(ids
            .iter()
            .flat_map(|&i| self.synsets[i].iter().cloned())
            .collect())
    }
}

/// LRU memoization around another synonym source
///
/// Failed lookups are not cached.
pub struct CachedSynonymSource<S> {
    inner: S,
    cache: Mutex<LruCache<String, BTreeSet<String>>>,
}

impl<S: SynonymSource> CachedSynonymSource<S> {
    /// Wrap `inner` with a cache holding up to `capacity` words
    pub fn new(inner: S, capacity: NonZeroUsize) -> Self {
        Self {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Number of cached words
    pub fn cached_len(&self) -> usize {
        self.cache.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// The wrapped source
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: SynonymSource> SynonymSource for CachedSynonymSource<S> {
    fn synonyms(&self, word: &str) -> TaggingResult<BTreeSet<String>> {
        if let Some(hit) = self
            .cache
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(word)
        {
            return Ok(hit.clone());
        }
        let found = self.inner.synonyms(word)?;
        self.cache
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .put(word.to_string(), found.clone());
        Ok(found)
    }
}

impl<S> std::fmt::Debug for CachedSynonymSource<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedSynonymSource")
            .field("cap", &self.cache.lock().unwrap_or_else(|e| e.into_inner()).cap())
            .finish_non_exhaustive()
    }
}

/// Unions tokens with their lexical synonyms
#[derive(Debug, Clone, Copy)]
pub struct SynonymExpander<'a, S: ?Sized> {
    source: &'a S,
}

impl<'a, S: SynonymSource + ?Sized> SynonymExpander<'a, S> {
    /// Expand against `source`
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Original tokens ∪ normalized synonyms of each distinct token
    pub fn expand<I, T>(&self, tokens: I) -> TaggingResult<BTreeSet<String>>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let originals: BTreeSet<String> = tokens
            .into_iter()
            .map(|t| t.as_ref().to_string())
            .collect();
        let mut expanded = originals.clone();
        for token in &originals {
            for synonym in self.source.synonyms(token)? {
                expanded.insert(normalize_synonym(&synonym));
            }
        }
        debug!(
            tokens = originals.len(),
            expanded = expanded.len(),
            "Expanded tokens with synonyms"
        );
        Ok(expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct CountingSource {
        calls: Cell<usize>,
    }

    impl SynonymSource for CountingSource {
        fn synonyms(&self, word: &str) -> TaggingResult<BTreeSet<String>> {
            self.calls.set(self.calls.get() + 1);
            if word == "boom" {
                return Err(TaggingError::synonym_source(word, "lexicon offline"));
            }
            Ok(["First_Light".to_string()].into_iter().collect())
        }
    }

    fn set(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn normalize_synonym_lowercases_and_splits_separators() {
        assert_eq!(normalize_synonym("First_Light"), "first light");
        assert_eq!(normalize_synonym("age-old"), "age-old");
    }

    #[test]
    fn thesaurus_unions_all_senses() {
        let t = Thesaurus::from_synsets([
            vec!["night", "nighttime", "dark"],
            vec!["evening", "night"],
            vec!["dark", "darkness"],
        ]);
        assert_eq!(
            t.synonyms("night").unwrap(),
            set(&["dark", "evening", "night", "nighttime"])
        );
        assert!(t.synonyms("unknownword").unwrap().is_empty());
    }

    #[test]
    fn thesaurus_normalizes_multiword_lemmas() {
        let t = Thesaurus::from_synsets([vec!["dawn", "First_Light", "break_of_day"]]);
        let syns = t.synonyms("dawn").unwrap();
        assert!(syns.contains("first light"));
        assert!(syns.contains("break of day"));
    }

    #[test]
    fn builtin_thesaurus_loads() {
        let t = Thesaurus::builtin().unwrap();
        assert!(t.synset_count() > 100);
        assert!(t.synonyms("fog").unwrap().contains("mist"));
        assert!(!t.synonyms("snow").unwrap().contains("snowy"));
    }

    const DATA_ADJ: &str = "  1 This software and database is being provided to you, the LICENSEE, by
  2 Princeton University under the following license.
00001740 00 a 01 able 0 005 = 05207437 n 0000 = 05624029 n 0000 + 05207437 n 0102 ! 00002098 a 0101 | (usually followed by `to') having the necessary means or skill
01010862 00 s 02 misty(a) 0 foggy 0 001 & 01010437 a 0000 | filled or abounding with fog or mist
";
    const DATA_NOUN: &str = "  1 This software and database is being provided to you, the LICENSEE, by
14522719 19 n 03 fog 0 fogginess 0 murk 1 002 @ 14522099 n 0000 ~ 14523048 n 0000 | droplets of water vapor suspended in the air near the ground
15170178 28 n 0a dawn 0 dawning 0 morning 1 aurora 0 first_light 0 daybreak 0 break_of_day 0 break_of_the_day 0 dayspring 0 sunrise 0 002 @ 15169248 n 0000 ~ 15170331 n 0000 | the first light of day
";

    fn wordnet_dir(noun: &str, adj: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("data.noun"), noun).unwrap();
        std::fs::write(dir.path().join("data.verb"), "  1 header only\n").unwrap();
        std::fs::write(dir.path().join("data.adj"), adj).unwrap();
        std::fs::write(dir.path().join("data.adv"), "").unwrap();
        dir
    }

    #[test]
    fn wordnet_dict_is_imported() {
        let dir = wordnet_dir(DATA_NOUN, DATA_ADJ);
        let t = Thesaurus::from_wordnet_dict(dir.path()).unwrap();
        assert_eq!(t.synset_count(), 4);
        assert_eq!(t.synonyms("misty").unwrap(), set(&["foggy", "misty"]));
        assert_eq!(t.synonyms("fog").unwrap(), set(&["fog", "fogginess", "murk"]));
        let dawn = t.synonyms("daybreak").unwrap();
        assert_eq!(dawn.len(), 10);
        assert!(dawn.contains("first light"));
        assert!(dawn.contains("sunrise"));
    }

    #[test]
    fn imported_wordnet_round_trips_through_json() {
        let dir = wordnet_dir(DATA_NOUN, DATA_ADJ);
        let t = Thesaurus::from_wordnet_dict(dir.path()).unwrap();
        let path = dir.path().join("wordnet.json");
        std::fs::write(&path, t.to_json_pretty().unwrap()).unwrap();

        let loaded = Thesaurus::from_path(&path).unwrap();
        assert_eq!(loaded.synset_count(), t.synset_count());
        assert_eq!(loaded.synonyms("dawn").unwrap(), t.synonyms("dawn").unwrap());
    }

    #[test]
    fn wordnet_import_reports_bad_lines_and_missing_files() {
        let dir = wordnet_dir("00001740 03 n zz entity 0 000 | nothing\n", DATA_ADJ);
        let err = Thesaurus::from_wordnet_dict(dir.path()).unwrap_err();
        match err {
            TaggingError::ThesaurusLoad { source_name, .. } => {
                assert!(source_name.ends_with("data.noun:1"))
            }
            other => panic!("unexpected error {other:?}"),
        }

        let empty = tempfile::tempdir().unwrap();
        let err = Thesaurus::from_wordnet_dict(empty.path()).unwrap_err();
        assert!(matches!(err, TaggingError::ThesaurusLoad { .. }));
    }

    #[test]
    fn adjective_markers_are_stripped() {
        assert_eq!(strip_adjective_marker("misty(a)"), "misty");
        assert_eq!(strip_adjective_marker("galore(ip)"), "galore");
        assert_eq!(strip_adjective_marker("fog"), "fog");
    }

    #[test]
    fn malformed_thesaurus_is_a_load_error() {
        let err = Thesaurus::from_json_str("{\"synsets\": 3}", "inline").unwrap_err();
        assert!(matches!(err, TaggingError::ThesaurusLoad { .. }));
        assert!(err.is_collaborator_failure());
    }

    #[test]
    fn missing_thesaurus_file_is_a_load_error() {
        let err = Thesaurus::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, TaggingError::ThesaurusLoad { .. }));
    }

    #[test]
    fn expand_keeps_originals_and_queries_each_token_once() {
        let source = CountingSource { calls: Cell::new(0) };
        let expanded = SynonymExpander::new(&source)
            .expand(["dawn", "dawn", "fog"])
            .unwrap();
        assert_eq!(expanded, set(&["dawn", "first light", "fog"]));
        assert_eq!(source.calls.get(), 2);
    }

    #[test]
    fn expand_of_nothing_is_empty() {
        let empty: [&str; 0] = [];
        assert!(SynonymExpander::new(&NoSynonyms).expand(empty).unwrap().is_empty());
    }

    #[test]
    fn expand_propagates_source_failure() {
        let source = CountingSource { calls: Cell::new(0) };
        let err = SynonymExpander::new(&source).expand(["boom"]).unwrap_err();
        assert!(matches!(err, TaggingError::SynonymSource { .. }));
    }

    #[test]
    fn cache_serves_repeat_lookups() {
        let t = Thesaurus::from_synsets([vec!["fog", "mist"]]);
        let cached = CachedSynonymSource::new(t, NonZeroUsize::new(2).unwrap());
        assert_eq!(cached.synonyms("fog").unwrap(), set(&["fog", "mist"]));
        assert_eq!(cached.synonyms("fog").unwrap(), set(&["fog", "mist"]));
        assert_eq!(cached.cached_len(), 1);

        cached.synonyms("a").unwrap();
        cached.synonyms("b").unwrap();
        assert_eq!(cached.cached_len(), 2);
    }
}
