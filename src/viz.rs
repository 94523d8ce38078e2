//! Bar chart (ECharts options) and word cloud (PNG) for ranked terms.

use std::collections::HashSet;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use ab_glyph::FontVec;
use image::{DynamicImage, ImageFormat};
use serde_json::{json, Value};
use wcloud::{Tokenizer, WordCloudSize};

use crate::error::{Error, Result};
use crate::freq::RankedTerms;

const ECHARTS_CDN: &str = "https://cdn.jsdelivr.net/npm/echarts@5/dist/echarts.min.js";

/// ECharts option object for a bar chart of `ranked`, or `None` when there is
/// nothing to plot.
pub fn bar_chart_options(ranked: &RankedTerms) -> Option<Value> {
    if ranked.is_empty() {
        return None;
    }
    let terms: Vec<&str> = ranked.terms().iter().map(|t| t.term.as_str()).collect();
    let counts: Vec<u32> = ranked.terms().iter().map(|t| t.count).collect();
    Some(json!({
        "tooltip": { "trigger": "item", "formatter": "{b} : {c}" },
        "xAxis": [{
            "type": "category",
            "data": terms,
            "axisLabel": { "interval": 0, "rotate": 45 }
        }],
        "yAxis": [{ "type": "value" }],
        "series": [{ "type": "bar", "data": counts }]
    }))
}

/// Standalone HTML page rendering `options` with ECharts.
pub fn bar_chart_html(title: &str, options: &Value) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
  <meta charset="UTF-8">
  <title>{title}</title>
  <script src="{ECHARTS_CDN}"></script>
</head>
<body>
  <div id="chart" style="width: 100%; height: 500px;"></div>
  <script>
    echarts.init(document.getElementById('chart')).setOption({options});
  </script>
</body>
</html>
"#,
        title = escape_xml(title),
    )
}

/// Word cloud renderer backed by `wcloud`. The font is loaded on every
/// render so a missing or broken font only affects this visualization.
#[derive(Debug, Clone)]
pub struct WordCloud {
    font_path: PathBuf,
    width: u32,
    height: u32,
}

impl WordCloud {
    pub fn new(font_path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            font_path: font_path.into(),
            width,
            height,
        }
    }

    pub fn font_path(&self) -> &Path {
        &self.font_path
    }

    /// Render `ranked` as a PNG of `width` x `height`.
    ///
    /// `Ok(None)` when there are no terms. A font that is missing, unreadable
    /// or not a parseable TrueType/OpenType file is `Error::FontFile`.
    pub fn render(&self, ranked: &RankedTerms) -> Result<Option<Vec<u8>>> {
        if ranked.is_empty() {
            return Ok(None);
        }
        let font = self.load_font()?;

        // wcloud counts words itself, so each term is repeated by its count.
        let text = cloud_text(ranked);
        let tokenizer = Tokenizer::default().with_filter(HashSet::new());
        let image = wcloud::WordCloud::default()
            .with_tokenizer(tokenizer)
            .with_font(font)
            .generate_from_text(
                &text,
                WordCloudSize::FromDimensions {
                    width: self.width,
                    height: self.height,
                },
                1.0,
            );

        let mut png = Vec::new();
        DynamicImage::ImageRgba8(image)
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(Error::Image)?;
        tracing::debug!(terms = ranked.len(), bytes = png.len(), "rendered word cloud");
        Ok(Some(png))
    }

    fn load_font(&self) -> Result<FontVec> {
        let font_err = |reason: String| Error::FontFile {
            path: self.font_path.clone(),
            reason,
        };
        let bytes = fs::read(&self.font_path).map_err(|e| font_err(e.to_string()))?;
        FontVec::try_from_vec(bytes).map_err(|e| font_err(e.to_string()))
    }
}

fn cloud_text(ranked: &RankedTerms) -> String {
    let mut words = Vec::new();
    for t in ranked.terms() {
        words.extend(std::iter::repeat(t.term.as_str()).take(t.count as usize));
    }
    words.join(" ")
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
