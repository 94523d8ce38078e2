//! Fetch → extract → strip noise → normalize → segment → rank.

use serde::Serialize;

use crate::config::Config;
use crate::error::Result;
use crate::extract;
use crate::fetch::{Fetch, HttpFetcher};
use crate::freq::{self, RankedTerms};
use crate::noise;
use crate::normalize;
use crate::segment::Segmenter;
use crate::stopwords::StopwordSet;

/// Every intermediate stage of one run, plus the ranked result.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Analysis {
    pub title: Option<String>,
    /// Visible text of the page.
    pub extracted: String,
    /// `extracted` without punctuation and digits.
    pub stripped: String,
    /// `stripped` without whitespace; input to the segmenter.
    pub normalized: String,
    pub tokens: Vec<String>,
    pub ranked: RankedTerms,
}

impl Analysis {
    /// True when no token survived filtering. A valid result, not a failure.
    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}

/// Run every text stage over an HTML document. Pure; never fails.
pub fn analyze(
    html: &str,
    segmenter: &Segmenter,
    stopwords: &StopwordSet,
    top_k: usize,
) -> Analysis {
    let title = extract::extract_title(html);
    let extracted = extract::extract_text(html);
    let stripped = noise::strip_noise(&extracted);
    let normalized = normalize::normalize(&stripped);
    let tokens = segmenter.segment(&normalized, stopwords);
    let ranked = freq::rank(&tokens, top_k);

    tracing::debug!(
        extracted_chars = extracted.chars().count(),
        normalized_chars = normalized.chars().count(),
        tokens = tokens.len(),
        ranked = ranked.len(),
        "analyzed document"
    );

    Analysis {
        title,
        extracted,
        stripped,
        normalized,
        tokens,
        ranked,
    }
}

/// Orchestrates one run per URL. Holds only read-only state (configuration,
/// segmentation model, HTTP client), so it can be shared across runs.
pub struct Pipeline<F = HttpFetcher> {
    config: Config,
    segmenter: Segmenter,
    fetcher: F,
}

impl Pipeline<HttpFetcher> {
    /// Build the segmenter (with the optional user dictionary) and HTTP client.
    pub fn from_config(config: Config) -> Result<Self> {
        let segmenter = match &config.user_dict_path {
            Some(path) => Segmenter::with_user_dict(path)?,
            None => Segmenter::new(),
        };
        let fetcher = HttpFetcher::new(config.fetch_timeout)?;
        Ok(Self::with_parts(config, segmenter, fetcher))
    }
}

impl<F: Fetch> Pipeline<F> {
    pub fn with_parts(config: Config, segmenter: Segmenter, fetcher: F) -> Self {
        Self {
            config,
            segmenter,
            fetcher,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Stopwords are re-read for every run.
    pub fn load_stopwords(&self) -> Result<StopwordSet> {
        StopwordSet::load(&self.config.stopwords_path)
    }

    /// Fetch `url` and analyze it. Stopwords are loaded first, so a
    /// configuration problem is reported without touching the network.
    pub async fn run(&self, url: &str) -> Result<Analysis> {
        let stopwords = self.load_stopwords()?;
        let page = self.fetcher.fetch(url).await?;
        let analysis = analyze(&page.body, &self.segmenter, &stopwords, self.config.top_k);
        tracing::info!(
            url = %page.url,
            tokens = analysis.tokens.len(),
            terms = analysis.ranked.len(),
            "pipeline run finished"
        );
        Ok(analysis)
    }

    /// Analyze an HTML document that is already in hand.
    pub fn run_html(&self, html: &str) -> Result<Analysis> {
        let stopwords = self.load_stopwords()?;
        Ok(analyze(html, &self.segmenter, &stopwords, self.config.top_k))
    }
}
