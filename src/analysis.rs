//! Text analysis: normalization and tokenization.
//!
//! Every component of the engine sees text through [`normalize`]: Unicode
//! canonical composition (NFC), case folding, punctuation stripping, and
//! whitespace splitting. The pipeline is pure and deterministic, with no
//! locale dependence beyond Unicode case folding.

use unicode_normalization::UnicodeNormalization;

use crate::error::{Result, XystonError};

/// Normalize text into a token sequence.
///
/// The input is NFC-normalized, lower-cased, every character that is not a
/// letter, digit, or whitespace is replaced with a space, and the result is
/// split on whitespace. Empty or whitespace-only input yields an empty
/// sequence.
///
/// # Examples
///
/// ```
/// use xyston::analysis::normalize;
///
/// let tokens = normalize("  Hello,  WORLD!! ");
/// assert_eq!(tokens, vec!["hello", "world"]);
/// ```
pub fn normalize(text: &str) -> Vec<String> {
    let composed: String = text.nfc().collect();
    let cleaned: String = composed
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned.split_whitespace().map(str::to_string).collect()
}

/// Normalize a user-supplied term that must be a single token.
///
/// Term-level statistics (term frequency, IDF) are only defined for single
/// tokens; multi-word input is rejected with an invalid-argument error, as is
/// input that normalizes to nothing at all.
pub fn normalize_term(term: &str) -> Result<String> {
    let mut tokens = normalize(term);
    if tokens.len() != 1 {
        return Err(XystonError::invalid_argument(format!(
            "term must normalize to a single token, got {} from {term:?}",
            tokens.len()
        )));
    }
    Ok(tokens.remove(0))
}
