//! Stopword list: one term per line, loaded into a lookup set.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Terms excluded from frequency analysis. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// Read a newline-delimited UTF-8 file. Blank lines are ignored and
    /// surrounding whitespace on each line is trimmed.
    ///
    /// A missing or unreadable file is a configuration error; an existing
    /// empty file yields an empty set.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::StopwordFile {
            path: path.to_path_buf(),
            source,
        })?;
        let set = Self::from_lines(&text);
        tracing::debug!(path = %path.display(), count = set.len(), "loaded stopwords");
        Ok(set)
    }

    pub fn from_lines(text: &str) -> Self {
        text.trim_start_matches('\u{feff}')
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for StopwordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io::Write;

    #[test]
    fn loads_one_term_per_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "的\n了\n\n的\r\n  是 \n").unwrap();

        let set = StopwordSet::load(file.path()).unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.contains("的"));
        assert!(set.contains("了"));
        assert!(set.contains("是"));
        assert!(!set.contains(""));
    }

    #[test]
    fn empty_file_is_an_empty_set() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let set = StopwordSet::load(file.path()).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn missing_file_is_a_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = StopwordSet::load(&dir.path().join("nope.txt")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(matches!(err, Error::StopwordFile { .. }));
    }

    #[test]
    fn byte_order_mark_is_ignored() {
        let set = StopwordSet::from_lines("\u{feff}的\n了");
        assert!(set.contains("的"));
        assert_eq!(set.len(), 2);
    }
}
