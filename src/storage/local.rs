//! Local filesystem ledger implementation.
//!
//! The whole file is read into memory when the ledger is opened; each
//! recorded link is appended to the file and flushed before it is added to
//! the in-memory set.

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::UnreadablePolicy;
use crate::storage::LinkStore;

/// Append-only text file of notified links.
#[derive(Debug, Clone)]
pub struct LocalLedger {
    path: PathBuf,
    links: HashSet<String>,
}

impl LocalLedger {
    /// Open the ledger at `path`, loading all prior entries.
    ///
    /// A missing file is an empty ledger. Any other read failure is handled
    /// according to `policy`.
    pub async fn open(path: impl Into<PathBuf>, policy: UnreadablePolicy) -> Result<Self> {
        let path = path.into();

        let links = match tokio::fs::read_to_string(&path).await {
            Ok(content) => parse_lines(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No ledger at {}, starting empty", path.display());
                HashSet::new()
            }
            Err(e) => match policy {
                UnreadablePolicy::Fail => return Err(AppError::ledger(&path, e)),
                UnreadablePolicy::Empty => {
                    log::warn!(
                        "Ledger at {} is unreadable ({}); starting empty, old links may be sent again",
                        path.display(),
                        e
                    );
                    HashSet::new()
                }
            },
        };

        log::debug!("Loaded {} links from {}", links.len(), path.display());
        Ok(Self { path, links })
    }

    /// Location of the ledger file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot of all loaded links.
    pub fn links(&self) -> &HashSet<String> {
        &self.links
    }

    /// Append one line to the file.
    async fn append_line(&self, link: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| AppError::ledger(&self.path, e))?;
            }
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| AppError::ledger(&self.path, e))?;
        file.write_all(format!("{link}\n").as_bytes())
            .await
            .map_err(|e| AppError::ledger(&self.path, e))?;
        file.flush()
            .await
            .map_err(|e| AppError::ledger(&self.path, e))?;
        Ok(())
    }
}

#[async_trait]
impl LinkStore for LocalLedger {
    fn contains(&self, link: &str) -> bool {
        self.links.contains(link)
    }

    async fn record(&mut self, link: &str) -> Result<bool> {
        if self.links.contains(link) {
            return Ok(false);
        }
        self.append_line(link).await?;
        self.links.insert(link.to_string());
        Ok(true)
    }

    fn len(&self) -> usize {
        self.links.len()
    }
}

/// Parse ledger content, ignoring blank lines and surrounding whitespace.
fn parse_lines(content: &str) -> HashSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
