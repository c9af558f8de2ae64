//! Search-form normalization.
//!
//! The single comparison rule for facet values: a stored record matches a
//! filter value exactly when both normalize to the same string.

use unicode_normalization::char::canonical_combining_class;
use unicode_normalization::UnicodeNormalization;

/// Normalizes free text into its search form.
///
/// Compatibility-decomposes the input, drops combining marks (non-zero
/// canonical combining class), lowercases and collapses whitespace runs into
/// single spaces. Spacing marks such as Devanagari vowel signs are letters
/// of the word and are kept. Blank input yields `None`
/// so callers can tell "no value" apart from an empty string.
pub fn normalize(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        return None;
    }

    let folded: String = text
        .nfkd()
        .filter(|c| canonical_combining_class(*c) == 0)
        .collect::<String>()
        .to_lowercase();

    let collapsed = folded.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}
