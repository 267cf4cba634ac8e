//! Suggestion for a spelling correction.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::constants::MAX_SUGGESTIONS;
use crate::speller::worker::MatchSink;

/// Suggestion for a spelling correction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Suggestion {
    /// the suggested word-form
    pub value: SmolStr,
    /// number of edit errors between the query and the suggestion
    pub distance: u32,
}

impl Suggestion {
    /// creates a spelling correction suggestion
    pub fn new(value: SmolStr, distance: u32) -> Suggestion {
        Suggestion { value, distance }
    }

    /// gets the suggested word-form
    pub fn value(&self) -> &str {
        &self.value
    }

    /// gets the error count of the suggestion
    pub fn distance(&self) -> u32 {
        self.distance
    }
}

impl PartialOrd for Suggestion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Suggestion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .cmp(&other.distance)
            .then_with(|| self.value.cmp(&other.value))
    }
}

impl PartialEq for Suggestion {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.distance == other.distance
    }
}

impl Eq for Suggestion {}

/// Bounded list of matches ranked by ascending error count, ties kept in
/// emission order. Acts as the matcher's sink during suggestion searches
/// and tightens the error budget to the best match seen so far.
#[derive(Debug, Default)]
pub(crate) struct SuggestionList {
    entries: Vec<Suggestion>,
}

impl SuggestionList {
    pub(crate) fn into_suggestions(self) -> Vec<Suggestion> {
        self.entries
    }
}

impl MatchSink for SuggestionList {
    fn accept(&mut self, candidate: &str, errors: u32, budget: u32) -> u32 {
        // Only matches at least as good as the best seen remain interesting.
        let budget = budget.min(errors);

        let mut loc = self.entries.len();
        for (i, entry) in self.entries.iter().enumerate() {
            if entry.distance > errors {
                loc = i;
                break;
            }
            if entry.value == candidate {
                return budget;
            }
        }

        if loc >= MAX_SUGGESTIONS {
            return budget;
        }

        // Everything from the insertion point on scores worse than the
        // tightened budget and is discarded.
        self.entries.truncate(loc);
        self.entries
            .push(Suggestion::new(SmolStr::new(candidate), errors));
        budget
    }
}
