//! zh-wordfreq: analyze a page from the command line or serve the web UI.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use zh_wordfreq::config::{self, Config};
use zh_wordfreq::freq::DEFAULT_TOP_K;
use zh_wordfreq::report::{self, CliPresenter};
use zh_wordfreq::viz::WordCloud;
use zh_wordfreq::web::{self, AppContext};
use zh_wordfreq::Pipeline;

#[derive(Parser)]
#[command(name = "zh-wordfreq")]
#[command(about = "Segment a Chinese web page and chart its most frequent terms")]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct ConfigArgs {
    /// Stopword list, one term per line.
    #[arg(long, global = true, env = "ZH_WORDFREQ_STOPWORDS", default_value = config::DEFAULT_STOPWORDS_PATH)]
    stopwords: PathBuf,

    /// TrueType/OpenType font with CJK glyphs, used to draw the word cloud.
    #[arg(long, global = true, env = "ZH_WORDFREQ_FONT", default_value = config::DEFAULT_FONT_PATH)]
    font: PathBuf,

    /// Extra jieba dictionary (`word [freq] [tag]` per line).
    #[arg(long, global = true, env = "ZH_WORDFREQ_USER_DICT")]
    user_dict: Option<PathBuf>,

    /// Number of terms to rank (at least 1).
    #[arg(
        long,
        short = 'k',
        global = true,
        default_value_t = DEFAULT_TOP_K,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    top_k: usize,

    /// Fetch timeout in seconds (0 waits indefinitely).
    #[arg(long, global = true, default_value_t = config::DEFAULT_FETCH_TIMEOUT_SECS)]
    timeout_secs: u64,
}

impl From<ConfigArgs> for Config {
    fn from(args: ConfigArgs) -> Self {
        Config {
            stopwords_path: args.stopwords,
            font_path: args.font,
            user_dict_path: args.user_dict,
            top_k: args.top_k,
            fetch_timeout: (args.timeout_secs > 0).then(|| Duration::from_secs(args.timeout_secs)),
            ..Config::default()
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Analyze one page and write the charts to a directory.
    Analyze {
        /// Page to fetch.
        #[arg(required_unless_present = "html_file")]
        url: Option<String>,

        /// Analyze a local HTML file instead of fetching.
        #[arg(long, conflicts_with = "url")]
        html_file: Option<PathBuf>,

        /// Directory for bar_chart.html and wordcloud.png.
        #[arg(long, short, default_value = ".")]
        out: PathBuf,
    },

    /// Serve the web UI.
    Serve {
        /// Port to listen on.
        #[arg(long, short, default_value_t = 3000)]
        port: u16,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from(cli.config);
    config.warn_missing_resources();

    match cli.command {
        Command::Analyze {
            url,
            html_file,
            out,
        } => run_analyze(config, url, html_file, out),
        Command::Serve { port } => run_serve(config, port),
    }
}

fn build(config: Config) -> anyhow::Result<(Pipeline, WordCloud)> {
    let cloud = WordCloud::new(&config.font_path, config.cloud_width, config.cloud_height);
    let pipeline = Pipeline::from_config(config).context("cannot set up pipeline")?;
    Ok((pipeline, cloud))
}

fn run_analyze(
    config: Config,
    url: Option<String>,
    html_file: Option<PathBuf>,
    out: PathBuf,
) -> anyhow::Result<()> {
    let (pipeline, cloud) = build(config)?;

    let (source, outcome) = match (html_file, url) {
        (Some(path), _) => {
            let html = std::fs::read_to_string(&path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            (path.display().to_string(), pipeline.run_html(&html))
        }
        (None, Some(url)) => {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            let outcome = rt.block_on(pipeline.run(&url));
            if outcome.is_ok() {
                println!("网页内容获取成功\n");
            }
            (url, outcome)
        }
        (None, None) => anyhow::bail!("either a URL or --html-file is required"),
    };

    let title = outcome
        .as_ref()
        .ok()
        .and_then(|a| a.title.clone())
        .unwrap_or(source);
    let mut presenter = CliPresenter::new(out, format!("词频统计 - {title}"));
    report::present(outcome.as_ref(), pipeline.config(), &cloud, &mut presenter);
    if presenter.failed {
        std::process::exit(1);
    }
    Ok(())
}

fn run_serve(config: Config, port: u16) -> anyhow::Result<()> {
    let (pipeline, cloud) = build(config)?;
    let state = Arc::new(AppContext { pipeline, cloud });

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let app = web::router(state);
        let addr = format!("127.0.0.1:{}", port);
        tracing::info!("listening on http://{}", addr);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("cannot bind {addr}"))?;
        axum::serve(listener, app).await?;
        Ok::<(), anyhow::Error>(())
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn top_k_must_be_positive() {
        assert!(Cli::try_parse_from(["zh-wordfreq", "-k", "0", "serve"]).is_err());
        assert!(Cli::try_parse_from(["zh-wordfreq", "serve", "--top-k", "0"]).is_err());

        let cli = Cli::try_parse_from(["zh-wordfreq", "-k", "5", "serve"]).unwrap();
        assert_eq!(cli.config.top_k, 5);
        let cli = Cli::try_parse_from(["zh-wordfreq", "serve"]).unwrap();
        assert_eq!(cli.config.top_k, DEFAULT_TOP_K);
    }
}
