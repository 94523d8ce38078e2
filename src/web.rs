//! Web front end (axum): URL form page and JSON analysis endpoint.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use base64::Engine as _;
use serde::Serialize;
use serde_json::Value;

use crate::fetch::{Fetch, HttpFetcher};
use crate::freq::RankedTerms;
use crate::pipeline::Pipeline;
use crate::report::{self, Notice, Presenter, Stage};
use crate::viz::WordCloud;

/// Read-only state shared by all requests.
pub struct AppContext<F = HttpFetcher> {
    pub pipeline: Pipeline<F>,
    pub cloud: WordCloud,
}

pub type AppState<F = HttpFetcher> = Arc<AppContext<F>>;

pub fn router<F: Fetch + 'static>(state: AppState<F>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/analyze", get(analyze_handler::<F>))
        .with_state(state)
}

/// Query params for GET /analyze?url=...
#[derive(serde::Deserialize)]
pub struct AnalyzeQuery {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct StagePreview {
    pub stage: Stage,
    pub label: &'static str,
    pub text: String,
}

/// Everything the page renders for one run. `error` is set alone on failure.
#[derive(Debug, Default, Serialize)]
pub struct WebReport {
    pub title: Option<String>,
    pub stages: Vec<StagePreview>,
    pub tokens: Vec<String>,
    pub ranked: RankedTerms,
    pub bar_chart: Option<Value>,
    /// `data:image/png;base64,...` URL of the rendered cloud.
    pub word_cloud_png: Option<String>,
    pub notices: Vec<String>,
    pub error: Option<String>,
}

impl Presenter for WebReport {
    fn stage(&mut self, stage: Stage, preview: &str) {
        self.stages.push(StagePreview {
            stage,
            label: stage.label(),
            text: preview.to_string(),
        });
    }

    fn tokens(&mut self, tokens: &[String]) {
        self.tokens = tokens.to_vec();
    }

    fn ranked(&mut self, ranked: &RankedTerms) {
        self.ranked = ranked.clone();
    }

    fn bar_chart(&mut self, options: &Value) {
        self.bar_chart = Some(options.clone());
    }

    fn word_cloud(&mut self, png: &[u8]) {
        let encoded = base64::engine::general_purpose::STANDARD.encode(png);
        self.word_cloud_png = Some(format!("data:image/png;base64,{encoded}"));
    }

    fn notice(&mut self, notice: &Notice) {
        self.notices.push(notice.message());
    }

    fn error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }
}

/// GET /analyze?url=... -> JSON report. Pipeline failures are part of the
/// report, so the status is always 200.
pub async fn analyze_handler<F: Fetch>(
    State(ctx): State<AppState<F>>,
    Query(params): Query<AnalyzeQuery>,
) -> Json<WebReport> {
    let outcome = ctx.pipeline.run(&params.url).await;
    let mut report = WebReport::default();
    if let Ok(analysis) = &outcome {
        report.title = analysis.title.clone();
    }
    report::present(
        outcome.as_ref(),
        ctx.pipeline.config(),
        &ctx.cloud,
        &mut report,
    );
    Json(report)
}

/// GET / -> static HTML form.
pub async fn index_page() -> axum::response::Html<&'static str> {
    const HTML: &str = r#"
<!DOCTYPE html>
<html lang="zh-CN">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>文本处理示例</title>
  <script src="https://cdn.jsdelivr.net/npm/echarts@5/dist/echarts.min.js"></script>
  <style>
    body { font-family: system-ui, sans-serif; max-width: 960px; margin: 2rem auto; padding: 0 1rem; }
    h1 { font-size: 1.5rem; }
    input[type="url"] { width: 100%; padding: 0.5rem; font-size: 1rem; box-sizing: border-box; }
    button { margin-top: 0.5rem; padding: 0.5rem 1rem; font-size: 1rem; cursor: pointer; }
    h2 { font-size: 1.1rem; margin-top: 1.5rem; }
    pre { white-space: pre-wrap; word-break: break-all; background: #f6f6f6; padding: 0.5rem; }
    table { border-collapse: collapse; }
    td { padding: 0.2rem 0.8rem; border-bottom: 1px solid #eee; }
    #chart { width: 100%; height: 500px; }
    .notice { color: #666; }
    .error { color: #c00; }
  </style>
</head>
<body>
  <h1>文本处理示例 📝</h1>
  <form id="form">
    <input type="url" name="url" id="url" placeholder="请输入 URL" autofocus>
    <button type="submit">分析</button>
  </form>
  <div id="results"></div>
  <script>
    const form = document.getElementById('form');
    const input = document.getElementById('url');
    const results = document.getElementById('results');
    const esc = s => String(s).replace(/[&<>"']/g, c => ({'&':'&amp;','<':'&lt;','>':'&gt;','"':'&quot;',"'":'&#39;'}[c]));
    form.addEventListener('submit', async (e) => {
      e.preventDefault();
      const url = input.value.trim();
      if (!url) { results.innerHTML = ''; return; }
      results.innerHTML = '<p class="notice">处理中...</p>';
      try {
        const r = await fetch('/analyze?url=' + encodeURIComponent(url));
        const report = await r.json();
        if (report.error) {
          results.innerHTML = '<p class="error">出现错误: ' + esc(report.error) + '</p>';
          return;
        }
        let html = '<p>网页内容获取成功' + (report.title ? '：' + esc(report.title) : '') + '</p>';
        for (const s of report.stages) {
          html += '<h2>' + esc(s.label) + '</h2><pre>' + esc(s.text) + '</pre>';
        }
        html += '<h2>分词结果</h2><pre>' + esc(report.tokens.join(' / ')) + '</pre>';
        html += '<h2>词频统计结果</h2><table>' +
          report.ranked.map(t => '<tr><td>' + esc(t.term) + '</td><td>' + t.count + '</td></tr>').join('') +
          '</table>';
        if (report.bar_chart) html += '<div id="chart"></div>';
        if (report.word_cloud_png) html += '<h2>词云图</h2><img alt="词云图" style="max-width: 100%;" src="' + esc(report.word_cloud_png) + '">';
        for (const n of report.notices) html += '<p class="notice">' + esc(n) + '</p>';
        results.innerHTML = html;
        if (report.bar_chart) {
          echarts.init(document.getElementById('chart')).setOption(report.bar_chart);
        }
      } catch (err) {
        results.innerHTML = '<p class="error">出现错误: ' + esc(err) + '</p>';
      }
    });
  </script>
</body>
</html>
"#;
    axum::response::Html(HTML)
}
