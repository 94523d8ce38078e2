//! Punctuation and digit removal.

use once_cell::sync::Lazy;
use regex::Regex;

/// Unicode punctuation and symbols (covers ASCII punctuation as well as
/// full-width CJK marks such as `，` and `！`), or a run of decimal digits.
static NOISE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\p{P}\p{S}]+|\d+").unwrap());

/// Remove punctuation, symbols and digit runs. Whitespace is left alone.
pub fn strip_noise(text: &str) -> String {
    NOISE.replace_all(text, "").into_owned()
}
