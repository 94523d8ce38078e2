//! Run configuration, resolved once at startup and passed into constructors.

use std::path::PathBuf;
use std::time::Duration;

use crate::freq::DEFAULT_TOP_K;

pub const DEFAULT_STOPWORDS_PATH: &str = "stopwords.txt";
pub const DEFAULT_FONT_PATH: &str = "simhei.ttf";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    /// Newline-delimited stopword list, re-read on every run.
    pub stopwords_path: PathBuf,
    /// Font covering CJK glyphs; only the word cloud needs it.
    pub font_path: PathBuf,
    /// Extra jieba dictionary (`word [freq] [tag]` per line).
    pub user_dict_path: Option<PathBuf>,
    pub top_k: usize,
    /// `None` waits on the fetch indefinitely.
    pub fetch_timeout: Option<Duration>,
    /// Characters shown for each text stage preview.
    pub preview_chars: usize,
    /// Tokens shown in the segmentation preview.
    pub token_preview: usize,
    pub cloud_width: u32,
    pub cloud_height: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stopwords_path: PathBuf::from(DEFAULT_STOPWORDS_PATH),
            font_path: PathBuf::from(DEFAULT_FONT_PATH),
            user_dict_path: None,
            top_k: DEFAULT_TOP_K,
            fetch_timeout: Some(Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS)),
            preview_chars: 500,
            token_preview: 50,
            cloud_width: 800,
            cloud_height: 400,
        }
    }
}

impl Config {
    pub fn with_paths(stopwords_path: impl Into<PathBuf>, font_path: impl Into<PathBuf>) -> Self {
        Self {
            stopwords_path: stopwords_path.into(),
            font_path: font_path.into(),
            ..Self::default()
        }
    }

    /// Log configuration problems that only surface later in a run.
    pub fn warn_missing_resources(&self) {
        if !self.stopwords_path.is_file() {
            tracing::warn!(path = %self.stopwords_path.display(), "stopword file not found; every run will fail until it exists");
        }
        if !self.font_path.is_file() {
            tracing::warn!(path = %self.font_path.display(), "font file not found; word cloud will be skipped");
        }
    }
}
