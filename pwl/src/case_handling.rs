//! Case and normalization primitives for word list keys.
//!
//! All trie content and every query go through [`normalize`]; the casing
//! predicates drive the fallback lookups performed by checking and the
//! re-casing of suggestions.

use smol_str::SmolStr;
use unic_ucd_category::GeneralCategory;
use unicode_normalization::UnicodeNormalization;

/// NFD-normalizes a string.
#[inline(always)]
pub fn normalize(s: &str) -> SmolStr {
    s.nfd().collect::<SmolStr>()
}

/// Lowercases a string with the locale-insensitive Unicode mapping.
#[inline(always)]
pub fn lower_case(s: &str) -> SmolStr {
    s.chars()
        .map(|c| c.to_lowercase().collect::<String>())
        .collect::<SmolStr>()
}

/// Uppercases a string with the locale-insensitive Unicode mapping.
#[inline(always)]
pub fn upper_case(s: &str) -> SmolStr {
    s.chars()
        .map(|c| c.to_uppercase().collect::<String>())
        .collect::<SmolStr>()
}

/// Converts a word to its title-case form: the title-cased first scalar
/// followed by the lowercased remainder.
pub fn title_case(s: &str) -> SmolStr {
    let upper = upper_case(s);
    let mut chars = upper.chars();
    match chars.next() {
        None => SmolStr::default(),
        Some(first) => {
            let mut out = String::with_capacity(upper.len());
            out.push(title_case_char(first));
            out.push_str(&lower_case(chars.as_str()));
            SmolStr::from(out)
        }
    }
}

/// Title-case mapping for a single scalar.
///
/// The Lt digraph forms are tabulated; everything else falls back to the
/// uppercase mapping when that is a single scalar.
pub(crate) fn title_case_char(ch: char) -> char {
    match ch {
        '\u{01C4}'..='\u{01C6}' => '\u{01C5}',
        '\u{01C7}'..='\u{01C9}' => '\u{01C8}',
        '\u{01CA}'..='\u{01CC}' => '\u{01CB}',
        '\u{01F1}'..='\u{01F3}' => '\u{01F2}',
        _ => {
            let mut upper = ch.to_uppercase();
            match (upper.next(), upper.next()) {
                (Some(u), None) => u,
                _ => ch,
            }
        }
    }
}

/// Whether the word has at least one uppercase letter and no lowercase or
/// title-case letter. Letters of other categories are ignored.
pub fn is_all_caps(word: &str) -> bool {
    let mut has_upper = false;
    for ch in word.chars() {
        match GeneralCategory::of(ch) {
            GeneralCategory::UppercaseLetter => has_upper = true,
            GeneralCategory::LowercaseLetter | GeneralCategory::TitlecaseLetter => return false,
            _ => {}
        }
    }
    has_upper
}

/// Whether the word starts with a scalar that is its own title-case form
/// and has no uppercase or title-case letter after it.
pub fn is_title_case(word: &str) -> bool {
    let mut chars = word.chars();
    let first = match chars.next() {
        Some(ch) => ch,
        None => return false,
    };
    match GeneralCategory::of(first) {
        GeneralCategory::UppercaseLetter | GeneralCategory::TitlecaseLetter => {}
        _ => return false,
    }
    if title_case_char(first) != first {
        return false;
    }
    !chars.any(|ch| {
        matches!(
            GeneralCategory::of(ch),
            GeneralCategory::UppercaseLetter | GeneralCategory::TitlecaseLetter
        )
    })
}
