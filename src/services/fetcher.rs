// src/services/fetcher.rs

//! Page fetching.
//!
//! Two interchangeable strategies behind [`PageFetcher`]:
//! - [`HttpFetcher`]: a single GET, for server-rendered pages
//! - [`BrowserFetcher`]: a headless Chromium render, for pages whose
//!   teasers are filled in by scripts
//!
//! Neither retries; the next scheduled run is the retry.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{FetchConfig, FetchStrategy, Target};
use crate::utils::http::create_async_client;

/// Retrieves the HTML of a page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<String>;
}

/// Direct HTTP fetch.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher with the configured user agent and timeout.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        Ok(Self {
            client: create_async_client(config)?,
        })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| AppError::fetch(url.as_str(), describe(&e)))?;

        let status = response.status();
        log::debug!("GET {} -> {}", url, status);
        if !status.is_success() {
            return Err(AppError::fetch(url.as_str(), format!("HTTP {status}")));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::fetch(url.as_str(), describe(&e)))
    }
}

fn describe(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "request timed out".to_string()
    } else {
        e.to_string()
    }
}

/// Headless browser fetch.
///
/// Each call launches its own browser process with `--dump-dom`, reads the
/// serialised document from stdout once the page has loaded, and lets the
/// process exit. The process is killed if the timeout elapses first.
pub struct BrowserFetcher {
    program: PathBuf,
    leading_args: Vec<String>,
    user_agent: String,
    timeout: Duration,
}

impl BrowserFetcher {
    pub fn new(config: &FetchConfig) -> Self {
        Self {
            program: config.browser_path.clone(),
            leading_args: config.browser_args.clone(),
            user_agent: config.user_agent.clone(),
            timeout: config.timeout(),
        }
    }

    fn args(&self, url: &Url) -> Vec<String> {
        let mut args = self.leading_args.clone();
        args.extend([
            "--headless".to_string(),
            "--disable-gpu".to_string(),
            "--no-first-run".to_string(),
            "--disable-extensions".to_string(),
            "--mute-audio".to_string(),
            format!("--user-agent={}", self.user_agent),
            "--dump-dom".to_string(),
            url.to_string(),
        ]);
        args
    }
}

#[async_trait]
impl PageFetcher for BrowserFetcher {
    async fn fetch(&self, url: &Url) -> Result<String> {
        let child = tokio::process::Command::new(&self.program)
            .args(self.args(url))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                AppError::fetch(
                    url.as_str(),
                    format!("failed to launch {}: {e}", self.program.display()),
                )
            })?;

        log::debug!("Rendering {} with {}", url, self.program.display());

        // Dropping the future on timeout drops the child, which kills it.
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result
                .map_err(|e| AppError::fetch(url.as_str(), format!("browser failed: {e}")))?,
            Err(_) => {
                return Err(AppError::fetch(
                    url.as_str(),
                    format!("render timed out after {}s", self.timeout.as_secs()),
                ));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::fetch(
                url.as_str(),
                format!("browser exited with {}: {}", output.status, stderr.trim()),
            ));
        }

        let html = String::from_utf8_lossy(&output.stdout).into_owned();
        if html.trim().is_empty() {
            return Err(AppError::fetch(url.as_str(), "browser returned an empty document"));
        }
        Ok(html)
    }
}

/// Both strategies, dispatched per target.
pub struct FetcherSet {
    default: FetchStrategy,
    direct: Box<dyn PageFetcher>,
    rendered: Box<dyn PageFetcher>,
}

impl FetcherSet {
    pub fn new(
        default: FetchStrategy,
        direct: Box<dyn PageFetcher>,
        rendered: Box<dyn PageFetcher>,
    ) -> Self {
        Self {
            default,
            direct,
            rendered,
        }
    }

    /// Build the HTTP and browser fetchers from configuration.
    pub fn from_config(config: &FetchConfig) -> Result<Self> {
        Ok(Self::new(
            config.strategy,
            Box::new(HttpFetcher::new(config)?),
            Box::new(BrowserFetcher::new(config)),
        ))
    }

    /// Fetcher to use for `target`.
    pub fn for_target(&self, target: &Target) -> &dyn PageFetcher {
        match target.effective_strategy(self.default) {
            FetchStrategy::Direct => self.direct.as_ref(),
            FetchStrategy::Rendered => self.rendered.as_ref(),
        }
    }

    /// Fetch a target's page with its strategy.
    pub async fn fetch_target(&self, target: &Target) -> Result<String> {
        self.for_target(target).fetch(&target.url).await
    }
}
