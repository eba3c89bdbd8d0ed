use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use std::time::Duration;

const USER_AGENT: &str = concat!("swmap/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Delivers the raw feed body for a fully-built URL. One call per pipeline run.
pub trait FeedTransport {
    fn fetch(&self, url: &str) -> Result<String>;
}

pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("build http client")?;
        Ok(Self { client })
    }
}

impl FeedTransport for HttpTransport {
    fn fetch(&self, url: &str) -> Result<String> {
        let resp = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("fetch feed {url}"))?;
        let status = resp.status();
        if !status.is_success() {
            bail!("fetch feed {url}: server responded {status}");
        }
        resp.text()
            .with_context(|| format!("read feed body from {url}"))
    }
}

/// Reads a previously saved feed body; the URL is ignored.
pub struct FileTransport {
    path: PathBuf,
}

impl FileTransport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FeedTransport for FileTransport {
    fn fetch(&self, _url: &str) -> Result<String> {
        std::fs::read_to_string(&self.path)
            .with_context(|| format!("read feed file {}", self.path.display()))
    }
}

pub fn transport_for(feed_file: Option<&Path>) -> Result<Box<dyn FeedTransport>> {
    match feed_file {
        Some(path) => Ok(Box::new(FileTransport::new(path))),
        None => Ok(Box::new(HttpTransport::new(DEFAULT_TIMEOUT)?)),
    }
}
