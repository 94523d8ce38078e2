//! Forwards a pipeline outcome to whatever displays it.
//!
//! The pipeline itself knows nothing about output; a [`Presenter`] receives
//! the stage previews, the ranked terms and the visualizations in a fixed
//! order, or a single error message.

use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::error::Error;
use crate::freq::RankedTerms;
use crate::pipeline::Analysis;
use crate::viz::{self, WordCloud};

/// Text stages shown to the user, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Extracted,
    Stripped,
    Normalized,
}

impl Stage {
    pub fn label(self) -> &'static str {
        match self {
            Stage::Extracted => "提取的正文文本",
            Stage::Stripped => "去除噪音后的文本",
            Stage::Normalized => "预处理后的文本",
        }
    }
}

/// Non-error conditions worth telling the user about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// No term survived filtering; both charts are skipped.
    InsufficientData,
    /// The word cloud could not be drawn; the bar chart was still rendered.
    WordCloudSkipped(String),
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::InsufficientData => "没有足够的词语生成可视化图表。".to_string(),
            Notice::WordCloudSkipped(reason) => format!("未生成词云图: {reason}"),
        }
    }
}

pub trait Presenter {
    fn stage(&mut self, stage: Stage, preview: &str);
    fn tokens(&mut self, tokens: &[String]);
    fn ranked(&mut self, ranked: &RankedTerms);
    fn bar_chart(&mut self, options: &Value);
    fn word_cloud(&mut self, png: &[u8]);
    fn notice(&mut self, notice: &Notice);
    fn error(&mut self, message: &str);
}

/// First `max_chars` characters of `text`.
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Send `outcome` to `presenter`.
///
/// A failed run produces exactly one `error` call and nothing else. An empty
/// result produces the previews followed by [`Notice::InsufficientData`]
/// instead of any chart.
pub fn present<P: Presenter>(
    outcome: Result<&Analysis, &Error>,
    config: &Config,
    cloud: &WordCloud,
    presenter: &mut P,
) {
    let analysis = match outcome {
        Ok(analysis) => analysis,
        Err(err) => {
            tracing::warn!(error = %err, kind = ?err.kind(), "pipeline run failed");
            presenter.error(&err.user_message());
            return;
        }
    };

    for (stage, text) in [
        (Stage::Extracted, &analysis.extracted),
        (Stage::Stripped, &analysis.stripped),
        (Stage::Normalized, &analysis.normalized),
    ] {
        presenter.stage(stage, preview(text, config.preview_chars));
    }
    let shown = analysis.tokens.len().min(config.token_preview);
    presenter.tokens(&analysis.tokens[..shown]);
    presenter.ranked(&analysis.ranked);

    let Some(options) = viz::bar_chart_options(&analysis.ranked) else {
        presenter.notice(&Notice::InsufficientData);
        return;
    };
    presenter.bar_chart(&options);

    match cloud.render(&analysis.ranked) {
        Ok(Some(png)) => presenter.word_cloud(&png),
        Ok(None) => presenter.notice(&Notice::InsufficientData),
        Err(err) => {
            tracing::warn!(error = %err, "word cloud skipped");
            presenter.notice(&Notice::WordCloudSkipped(err.to_string()));
        }
    }
}

/// Prints to stdout and writes the charts into `out_dir`. `failed` is set by
/// a run error or by a chart that could not be written.
pub struct CliPresenter {
    out_dir: PathBuf,
    title: String,
    pub failed: bool,
}

impl CliPresenter {
    pub fn new(out_dir: impl Into<PathBuf>, title: impl Into<String>) -> Self {
        Self {
            out_dir: out_dir.into(),
            title: title.into(),
            failed: false,
        }
    }

    fn write_file(&mut self, name: &str, contents: &[u8]) {
        let path = self.out_dir.join(name);
        match fs::create_dir_all(&self.out_dir).and_then(|_| fs::write(&path, contents)) {
            Ok(()) => println!("已保存: {}", path.display()),
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "cannot write output");
                eprintln!("无法保存 {}: {e}", path.display());
                self.failed = true;
            }
        }
    }
}

impl Presenter for CliPresenter {
    fn stage(&mut self, stage: Stage, preview: &str) {
        println!("{}：\n{}\n", stage.label(), preview);
    }

    fn tokens(&mut self, tokens: &[String]) {
        println!("分词结果：{}\n", tokens.join(" / "));
    }

    fn ranked(&mut self, ranked: &RankedTerms) {
        println!("词频统计结果：");
        for (i, t) in ranked.terms().iter().enumerate() {
            println!("{:>3}. {}\t{}", i + 1, t.term, t.count);
        }
        println!();
    }

    fn bar_chart(&mut self, options: &Value) {
        let html = viz::bar_chart_html(&self.title, options);
        self.write_file("bar_chart.html", html.as_bytes());
    }

    fn word_cloud(&mut self, png: &[u8]) {
        self.write_file("wordcloud.png", png);
    }

    fn notice(&mut self, notice: &Notice) {
        println!("{}", notice.message());
    }

    fn error(&mut self, message: &str) {
        self.failed = true;
        eprintln!("出现错误: {message}");
    }
}
