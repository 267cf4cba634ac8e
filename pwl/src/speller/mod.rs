//! Personal word list checking and correction.

use std::path::Path;

use hashbrown::HashMap;
use smol_str::SmolStr;

use crate::case_handling::{
    is_all_caps, is_title_case, lower_case, normalize, title_case, upper_case,
};
use crate::constants::MAX_ERRORS;
use crate::distance::edit_distance;
use crate::error::WordListError;
use crate::trie::TrieNode;
use crate::wordlist::WordListFile;

use self::suggestion::{Suggestion, SuggestionList};
use self::worker::{MatchSink, MatcherMode, TrieMatcher};

pub mod suggestion;
mod worker;

/// A user-maintained dictionary of words with fuzzy correction support.
///
/// Words are stored NFD-normalized in a prefix-compressed trie, alongside a
/// map back to the casing they were first added with. Checking is
/// case-sensitive with title-case and all-caps fallbacks; suggesting is
/// case-insensitive and returns at most fifteen entries within three edit
/// errors, re-cased to match the query.
///
/// A list bound to a file with [`PersonalWordList::with_file`] reloads
/// itself whenever the file's modification time changes, so external edits
/// are picked up before every operation.
#[derive(Debug, Default)]
pub struct PersonalWordList {
    trie: Option<TrieNode>,
    original_forms: HashMap<SmolStr, SmolStr>,
    storage: Option<WordListFile>,
}

impl PersonalWordList {
    /// Creates an empty word list with no backing file.
    pub fn new() -> PersonalWordList {
        PersonalWordList::default()
    }

    /// Creates a word list bound to `path`, creating the file when absent
    /// and loading whatever it already holds.
    pub fn with_file<P: AsRef<Path>>(path: P) -> Result<PersonalWordList, WordListError> {
        let storage = WordListFile::open_or_create(path.as_ref())?;
        let mut pwl = PersonalWordList {
            storage: Some(storage),
            ..PersonalWordList::default()
        };
        pwl.refresh_from_file();
        Ok(pwl)
    }

    /// Whether `word` is in the list.
    ///
    /// The lookup is case-sensitive, except that a title-case query also
    /// tries its lowercase form and an all-caps query tries its lowercase
    /// and title-case forms.
    pub fn check(&mut self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        self.refresh_from_file();

        if self.contains(word) {
            return true;
        }

        let title = is_title_case(word);
        let all_caps = !title && is_all_caps(word);
        if title || all_caps {
            if self.contains(&lower_case(word)) {
                return true;
            }
            if all_caps && self.contains(&title_case(word)) {
                return true;
            }
        }

        false
    }

    /// Suggests corrections for `word`, best first.
    pub fn suggest(&mut self, word: &str) -> Vec<Suggestion> {
        self.suggest_impl(word, None)
    }

    /// Suggests corrections at least as close to `word` as the best of
    /// `baseline`: suggestions already obtained elsewhere cap how far the
    /// search will wander.
    pub fn suggest_with_baseline(&mut self, word: &str, baseline: &[&str]) -> Vec<Suggestion> {
        self.suggest_impl(word, Some(baseline))
    }

    fn suggest_impl(&mut self, word: &str, baseline: Option<&[&str]>) -> Vec<Suggestion> {
        if word.is_empty() {
            return vec![];
        }
        let max_dist = match baseline {
            Some(suggestions) => best_distance(suggestions, word).min(MAX_ERRORS),
            None => MAX_ERRORS,
        };
        log::debug!("suggesting for {word:?} within {max_dist} errors");
        self.refresh_from_file();

        let mut list = SuggestionList::default();
        let mut matcher = TrieMatcher::new(word, max_dist, MatcherMode::CaseInsensitive, &mut list);
        matcher.find_matches(self.trie.as_ref());

        self.recase_suggestions(word, list.into_suggestions())
    }

    /// Adds `word` to the list and, when the list is file-backed, appends it
    /// to the file. Adding a word already present changes nothing.
    pub fn add(&mut self, word: &str) {
        if word.is_empty() {
            return;
        }
        self.refresh_from_file();

        if !Self::insert_word(&mut self.trie, &mut self.original_forms, word) {
            return;
        }
        if let Some(storage) = self.storage.as_mut() {
            if let Err(err) = storage.append_word(word) {
                log::warn!(
                    "cannot append {:?} to {}: {}",
                    word,
                    storage.path().display(),
                    err
                );
            }
        }
    }

    /// Removes `word` from the list and scrubs it from the backing file.
    pub fn remove(&mut self, word: &str) {
        if !self.check(word) {
            return;
        }

        let normalized = normalize(word);
        if self.original_forms.remove(&normalized).is_some() {
            if let Some(node) = self.trie.as_mut() {
                if node.remove(&normalized) {
                    self.trie = None;
                }
            }
        }

        if let Some(storage) = self.storage.as_mut() {
            if let Err(err) = storage.remove_word(word) {
                log::warn!(
                    "cannot remove {:?} from {}: {}",
                    word,
                    storage.path().display(),
                    err
                );
            }
        }
    }

    fn contains(&self, word: &str) -> bool {
        let mut sink = PresenceSink::default();
        let mut matcher = TrieMatcher::new(word, 0, MatcherMode::Exact, &mut sink);
        matcher.find_matches(self.trie.as_ref());
        sink.found
    }

    fn insert_word(
        trie: &mut Option<TrieNode>,
        original_forms: &mut HashMap<SmolStr, SmolStr>,
        word: &str,
    ) -> bool {
        let normalized = normalize(word);
        if original_forms.contains_key(&normalized) {
            return false;
        }
        original_forms.insert(normalized.clone(), SmolStr::new(word));
        *trie = Some(TrieNode::insert(trie.take(), &normalized));
        true
    }

    fn refresh_from_file(&mut self) {
        let storage = match self.storage.as_mut() {
            Some(storage) => storage,
            None => return,
        };
        if !storage.has_changed() {
            return;
        }
        log::debug!("reloading word list from {}", storage.path().display());

        let trie = &mut self.trie;
        let forms = &mut self.original_forms;
        *trie = None;
        forms.clear();
        storage.load(&mut |word| {
            Self::insert_word(trie, forms, word);
        });
    }

    /// Maps normalized matches back to their stored casing and re-cases
    /// them after the query: a title-case query title-cases suggestions, an
    /// all-caps query uppercases them, except for suggestions stored
    /// all-caps.
    fn recase_suggestions(&self, word: &str, suggestions: Vec<Suggestion>) -> Vec<Suggestion> {
        let convert: Option<fn(&str) -> SmolStr> = if is_title_case(word) {
            Some(title_case)
        } else if is_all_caps(word) {
            Some(upper_case)
        } else {
            None
        };

        suggestions
            .into_iter()
            .map(|mut suggestion| {
                let original = self
                    .original_forms
                    .get(suggestion.value.as_str())
                    .cloned()
                    .unwrap_or_else(|| suggestion.value.clone());
                suggestion.value = match convert {
                    Some(convert) if !is_all_caps(&original) => convert(&original),
                    _ => original,
                };
                suggestion
            })
            .collect()
    }
}

/// Sink that only records that some match arrived.
#[derive(Debug, Default)]
struct PresenceSink {
    found: bool,
}

impl MatchSink for PresenceSink {
    fn accept(&mut self, _candidate: &str, _errors: u32, budget: u32) -> u32 {
        self.found = true;
        budget
    }
}

/// Best NFD edit distance from any baseline suggestion to the word; the
/// scalar length of the word when there is nothing to compare against.
fn best_distance(baseline: &[&str], word: &str) -> u32 {
    let word: Vec<char> = normalize(word).chars().collect();
    let mut best = word.len() as u32;
    for suggestion in baseline {
        let suggestion: Vec<char> = normalize(suggestion).chars().collect();
        best = best.min(edit_distance(&word, &suggestion));
    }
    best
}
