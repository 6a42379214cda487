//! In-memory ledger used for dry runs and tests.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::error::Result;
use crate::storage::LinkStore;

/// Ledger that never touches the disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    links: HashSet<String>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing set of links.
    pub fn seeded<I, S>(links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            links: links.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl LinkStore for MemoryLedger {
    fn contains(&self, link: &str) -> bool {
        self.links.contains(link)
    }

    async fn record(&mut self, link: &str) -> Result<bool> {
        Ok(self.links.insert(link.to_string()))
    }

    fn len(&self) -> usize {
        self.links.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_and_record() {
        let mut ledger = MemoryLedger::seeded(["https://a.com/1"]);
        assert!(ledger.contains("https://a.com/1"));
        assert!(!ledger.record("https://a.com/1").await.unwrap());
        assert!(ledger.record("https://a.com/2").await.unwrap());
        assert_eq!(ledger.len(), 2);
    }
}
