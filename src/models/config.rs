//! Application configuration structures.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{FetchStrategy, Target};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Plain-text file of already notified links
    #[serde(default = "defaults::ledger_path")]
    pub ledger_path: PathBuf,

    /// Delay after each sent notification in milliseconds
    #[serde(default = "defaults::pacing")]
    pub pacing_ms: u64,

    /// Ledger loading behaviour
    #[serde(default)]
    pub ledger: LedgerConfig,

    /// HTTP and browser settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Bot credentials and destination chat
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Watched pages, evaluated in order
    #[serde(default)]
    pub targets: Vec<Target>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.telegram.token.trim().is_empty() {
            return Err(AppError::validation("telegram.token is empty"));
        }
        if self.telegram.chat_id.trim().is_empty() {
            return Err(AppError::validation("telegram.chat_id is empty"));
        }
        if let Some(alert) = &self.telegram.alert_chat_id {
            if alert.trim().is_empty() {
                return Err(AppError::validation("telegram.alert_chat_id is empty"));
            }
        }
        if self.fetch.user_agent.trim().is_empty() {
            return Err(AppError::validation("fetch.user_agent is empty"));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(AppError::validation("fetch.timeout_secs must be > 0"));
        }
        if self.targets.is_empty() {
            return Err(AppError::validation("No targets defined"));
        }
        for target in &self.targets {
            if !matches!(target.url.scheme(), "http" | "https") {
                return Err(AppError::validation(format!(
                    "target {} is not an http(s) address",
                    target.url
                )));
            }
            if target.link_attr.trim().is_empty() {
                return Err(AppError::validation(format!(
                    "target {} has an empty link_attr",
                    target.url
                )));
            }
        }
        Ok(())
    }

    /// Pause between notifications.
    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ledger_path: defaults::ledger_path(),
            pacing_ms: defaults::pacing(),
            ledger: LedgerConfig::default(),
            fetch: FetchConfig::default(),
            telegram: TelegramConfig::default(),
            targets: defaults::default_targets(),
        }
    }
}

/// What to do when the ledger file exists but cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnreadablePolicy {
    /// Abort the run
    #[default]
    Fail,
    /// Warn and start from an empty ledger
    Empty,
}

/// Ledger settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerConfig {
    #[serde(default)]
    pub on_unreadable: UnreadablePolicy,
}

/// Page retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Strategy for targets without their own
    #[serde(default)]
    pub strategy: FetchStrategy,

    /// User-Agent header for HTTP requests and the browser
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Per-fetch timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Chromium-compatible browser used for rendered fetches
    #[serde(default = "defaults::browser_path")]
    pub browser_path: PathBuf,

    /// Arguments placed before the render flags (e.g. `["run", "org.chromium.Chromium"]`)
    #[serde(default)]
    pub browser_args: Vec<String>,
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            strategy: FetchStrategy::default(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            browser_path: defaults::browser_path(),
            browser_args: Vec::new(),
        }
    }
}

/// Telegram bot settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot API token
    #[serde(default)]
    pub token: String,

    /// Chat receiving article notifications
    #[serde(default)]
    pub chat_id: String,

    /// Chat receiving operator alerts; defaults to `chat_id`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_chat_id: Option<String>,

    /// Bot API base address
    #[serde(default = "defaults::api_base")]
    pub api_base: String,
}

impl TelegramConfig {
    /// Chat that operator alerts are delivered to.
    pub fn alert_chat(&self) -> &str {
        self.alert_chat_id.as_deref().unwrap_or(&self.chat_id)
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            chat_id: String::new(),
            alert_chat_id: None,
            api_base: defaults::api_base(),
        }
    }
}

// Keep the token out of logs.
impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("token", &if self.token.is_empty() { "" } else { "***" })
            .field("chat_id", &self.chat_id)
            .field("alert_chat_id", &self.alert_chat_id)
            .field("api_base", &self.api_base)
            .finish()
    }
}

mod defaults {
    use std::path::PathBuf;

    use crate::models::Target;

    pub fn ledger_path() -> PathBuf {
        PathBuf::from("sent_links.txt")
    }
    pub fn pacing() -> u64 {
        1000
    }

    // Fetch defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36"
            .into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn browser_path() -> PathBuf {
        PathBuf::from("chromium")
    }

    pub fn api_base() -> String {
        "https://api.telegram.org".into()
    }

    // Target defaults
    pub fn default_targets() -> Vec<Target> {
        [
            (
                "https://www.economist.com/topics/finance-and-economics",
                r#"a[data-testid="teaser-card-link"]"#,
            ),
            ("https://www.ft.com/lex", "a.js-teaser-heading-link"),
            (
                "https://www.economist.com/topics/business",
                r#"a[data-testid="teaser-card-link"]"#,
            ),
            (
                "https://www.economist.com/topics/economy",
                r#"a[data-analytics^="collection_"]"#,
            ),
        ]
        .into_iter()
        .filter_map(|(url, selector)| Target::new(url, selector).ok())
        .collect()
    }
}
