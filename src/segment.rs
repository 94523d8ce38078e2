//! Chinese word segmentation (jieba) with stopword filtering.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use jieba_rs::Jieba;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};
use crate::stopwords::StopwordSet;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").unwrap());

/// Dictionary-based segmenter. Read-only after construction, so one instance
/// can serve any number of runs.
pub struct Segmenter {
    jieba: Jieba,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Segmenter {
    /// Segmenter backed by jieba's bundled dictionary.
    pub fn new() -> Self {
        Self {
            jieba: Jieba::new(),
        }
    }

    /// Bundled dictionary plus a user dictionary (`word [freq] [tag]` per line).
    pub fn with_user_dict(path: &Path) -> Result<Self> {
        let dict_err = |reason: String| Error::Dictionary {
            path: path.to_path_buf(),
            reason,
        };
        let file = File::open(path).map_err(|e| dict_err(e.to_string()))?;
        let mut jieba = Jieba::new();
        jieba
            .load_dict(&mut BufReader::new(file))
            .map_err(|e| dict_err(e.to_string()))?;
        tracing::debug!(path = %path.display(), "loaded user dictionary");
        Ok(Self { jieba })
    }

    /// Split `text` into tokens, dropping stopwords and empty tokens.
    ///
    /// Precise mode with HMM for out-of-vocabulary words; the output is a
    /// deterministic function of the input and the loaded dictionary.
    pub fn segment(&self, text: &str, stopwords: &StopwordSet) -> Vec<String> {
        let cleaned = NON_WORD.replace_all(text, "");
        filter_tokens(self.jieba.cut(&cleaned, true), stopwords)
    }
}

/// Drop empty tokens and tokens that exactly match a stopword.
pub fn filter_tokens<I, S>(tokens: I, stopwords: &StopwordSet) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .filter(|t| {
            let t = t.as_ref();
            !t.is_empty() && !stopwords.contains(t)
        })
        .map(|t| t.as_ref().to_string())
        .collect()
}
