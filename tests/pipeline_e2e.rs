use std::io::Write;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::routing::get;
use axum::Router;

use zh_wordfreq::fetch::{Fetch, HttpFetcher};
use zh_wordfreq::viz::WordCloud;
use zh_wordfreq::web::{self, AppContext};
use zh_wordfreq::{Config, Error, ErrorKind, Pipeline, Segmenter};

const PAGE: &str = r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"><title>城市新闻</title>
<style>body { font-size: 14px; }</style>
<script>var tracker = "统计脚本";</script></head>
<body>
  <h1>北京新闻</h1>
  <p>2024年，北京的天气很好。上海的天气也很好！</p>
  <p>北京和上海都是大城市。</p>
</body></html>"#;

async fn fixture_server() -> SocketAddr {
    let app = Router::new()
        .route(
            "/page",
            get(|| async { ([(header::CONTENT_TYPE, "text/html; charset=utf-8")], PAGE) }),
        )
        .route(
            "/missing",
            get(|| async { (StatusCode::NOT_FOUND, "not found") }),
        )
        .route(
            "/gbk",
            get(|| async { ([(header::CONTENT_TYPE, "text/html")], vec![0xc4u8, 0xe3, 0xba, 0xc3]) }),
        );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// An address nothing is listening on.
fn closed_port() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

fn stopwords() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "的\n和\n是\n也\n都\n很").unwrap();
    file
}

fn pipeline(stopwords: &tempfile::NamedTempFile) -> Pipeline {
    let config = Config::with_paths(stopwords.path(), "no-font.ttf");
    Pipeline::from_config(config).unwrap()
}

#[tokio::test]
async fn fetches_and_ranks_a_live_page() {
    let addr = fixture_server().await;
    let sw = stopwords();
    let analysis = pipeline(&sw)
        .run(&format!("http://{addr}/page"))
        .await
        .unwrap();

    assert_eq!(analysis.title.as_deref(), Some("城市新闻"));
    assert!(!analysis.extracted.contains("统计脚本"));
    assert!(!analysis.extracted.contains("font-size"));
    assert!(!analysis.normalized.chars().any(|c| c.is_whitespace() || c.is_ascii_digit()));
    assert!(!analysis.normalized.contains('，'));
    for stop in ["的", "和", "是", "也", "都", "很"] {
        assert!(!analysis.tokens.iter().any(|t| t == stop), "{stop}");
    }

    let top = &analysis.ranked.terms()[0];
    assert_eq!(top.term, "北京");
    assert_eq!(top.count, 3);
}

#[tokio::test]
async fn non_success_status_is_a_fetch_error() {
    let addr = fixture_server().await;
    let sw = stopwords();
    let err = pipeline(&sw)
        .run(&format!("http://{addr}/missing"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 404, .. }));
    assert_eq!(err.kind(), ErrorKind::NetworkFetch);
}

#[tokio::test]
async fn non_utf8_body_is_a_fetch_error() {
    let addr = fixture_server().await;
    let fetcher = HttpFetcher::new(None).unwrap();
    let err = fetcher.fetch(&format!("http://{addr}/gbk")).await.unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
    assert_eq!(err.kind(), ErrorKind::NetworkFetch);
}

#[tokio::test]
async fn connection_refused_is_a_fetch_error() {
    let addr = closed_port();
    let sw = stopwords();
    let err = pipeline(&sw)
        .run(&format!("http://{addr}/"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Fetch { .. }));
    assert_eq!(err.kind(), ErrorKind::NetworkFetch);
}

#[tokio::test]
async fn missing_stopwords_is_a_configuration_error_not_a_fetch_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::with_paths(dir.path().join("stopwords.txt"), "no-font.ttf");
    let pipeline = Pipeline::from_config(config).unwrap();
    let err = pipeline
        .run(&format!("http://{}/", closed_port()))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[tokio::test]
async fn web_endpoint_reports_results_and_errors() {
    let page_addr = fixture_server().await;
    let sw = stopwords();
    // A large file that is not a font: the cloud is skipped and none of
    // these bytes may end up in the response.
    let mut font = tempfile::NamedTempFile::new().unwrap();
    font.write_all(&vec![b'x'; 1 << 20]).unwrap();

    let state = Arc::new(AppContext {
        pipeline: Pipeline::with_parts(
            Config::with_paths(sw.path(), font.path()),
            Segmenter::new(),
            HttpFetcher::new(None).unwrap(),
        ),
        cloud: WordCloud::new(font.path(), 800, 400),
    });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let app_addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, web::router(state)).await.unwrap();
    });

    let client = reqwest::Client::new();
    let body = client
        .get(format!("http://{app_addr}/analyze"))
        .query(&[("url", format!("http://{page_addr}/page"))])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.len() < 64 * 1024, "response is {} bytes", body.len());
    let ok: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert!(ok["error"].is_null());
    assert_eq!(ok["stages"].as_array().unwrap().len(), 3);
    assert_eq!(ok["ranked"][0]["term"], "北京");
    assert!(ok["bar_chart"].is_object());
    assert!(ok["word_cloud_png"].is_null());
    assert!(ok["notices"][0].as_str().unwrap().starts_with("未生成词云图"));

    let failed: serde_json::Value = client
        .get(format!("http://{app_addr}/analyze"))
        .query(&[("url", format!("http://{page_addr}/missing"))])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(failed["error"].as_str().unwrap().contains("404"));
    assert!(failed["bar_chart"].is_null());
    assert!(failed["word_cloud_png"].is_null());
    assert!(failed["stages"].as_array().unwrap().is_empty());

    let page = client
        .get(format!("http://{app_addr}/"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("请输入 URL"));
}
