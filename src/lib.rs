//! zh-wordfreq: fetch a web page, reduce it to Chinese text, segment it and
//! rank term frequencies for a bar chart and a word cloud.

pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod freq;
pub mod noise;
pub mod normalize;
pub mod pipeline;
pub mod report;
pub mod segment;
pub mod stopwords;
pub mod viz;
pub mod web;

pub use config::Config;
pub use error::{Error, ErrorKind, Result};
pub use freq::{RankedTerms, TermCount};
pub use pipeline::{analyze, Analysis, Pipeline};
pub use segment::Segmenter;
pub use stopwords::StopwordSet;
