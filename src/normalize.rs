//! Whitespace normalization for Chinese text.
//!
//! Chinese has no inter-word spacing, so whitespace runs (newlines included)
//! are dropped entirely rather than compacted to a single space. Not suitable
//! for space-delimited languages as is.

/// Remove every whitespace character, then trim.
pub fn normalize(text: &str) -> String {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    compact.trim().to_string()
}
