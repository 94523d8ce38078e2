//! Error types shared by every pipeline stage.

use std::path::PathBuf;

/// Broad failure category, used to pick the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// URL unreachable, non-success status, or body that is not UTF-8.
    NetworkFetch,
    /// Stopword file, user dictionary or font resource missing/unreadable,
    /// or the word cloud could not be drawn with it.
    Configuration,
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("request to {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },
    #[error("response body of {url} is not valid UTF-8")]
    Decode { url: String },
    #[error("cannot build http client: {0}")]
    HttpClient(#[source] reqwest::Error),
    #[error("cannot read stopword file {}: {source}", .path.display())]
    StopwordFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot load user dictionary {}: {reason}", .path.display())]
    Dictionary { path: PathBuf, reason: String },
    #[error("cannot load font {}: {reason}", .path.display())]
    FontFile { path: PathBuf, reason: String },
    #[error("cannot encode word cloud: {0}")]
    Image(#[source] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidUrl { .. }
            | Error::Fetch { .. }
            | Error::HttpStatus { .. }
            | Error::Decode { .. }
            | Error::HttpClient(_) => ErrorKind::NetworkFetch,
            Error::StopwordFile { .. }
            | Error::Dictionary { .. }
            | Error::FontFile { .. }
            | Error::Image(_) => ErrorKind::Configuration,
        }
    }

    /// Single message shown to the user when a run fails.
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::NetworkFetch => format!("网页获取失败: {self}"),
            ErrorKind::Configuration => format!("配置错误: {self}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_split_network_from_configuration() {
        let net = Error::HttpStatus {
            url: "http://example.com/".into(),
            status: 404,
        };
        assert_eq!(net.kind(), ErrorKind::NetworkFetch);
        assert!(net.user_message().starts_with("网页获取失败"));
        assert!(net.user_message().contains("404"));

        let cfg = Error::StopwordFile {
            path: PathBuf::from("missing.txt"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(cfg.kind(), ErrorKind::Configuration);
        assert!(cfg.user_message().starts_with("配置错误"));
        assert!(cfg.user_message().contains("missing.txt"));
    }
}
