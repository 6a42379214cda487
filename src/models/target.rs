// src/models/target.rs

//! Watched pages and the rules used to find article links on them.

use std::fmt;

use scraper::Selector;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// How a target page is retrieved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStrategy {
    /// Single HTTP GET
    #[default]
    Direct,
    /// Headless browser render, for pages populated by scripts
    Rendered,
}

impl fmt::Display for FetchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchStrategy::Direct => f.write_str("direct"),
            FetchStrategy::Rendered => f.write_str("rendered"),
        }
    }
}

/// A compiled CSS selector together with its source text.
///
/// Compiled on construction, so a configuration with a bad selector fails
/// to load instead of failing on every pass.
#[derive(Debug, Clone)]
pub struct SelectionRule {
    source: String,
    selector: Selector,
}

impl SelectionRule {
    /// Compile a selector such as `a.js-teaser-heading-link` or
    /// `a[data-analytics^="collection_"]`.
    pub fn parse(source: &str) -> Result<Self> {
        let source = source.trim();
        if source.is_empty() {
            return Err(AppError::selector(source, "selector is empty"));
        }
        let selector =
            Selector::parse(source).map_err(|e| AppError::selector(source, format!("{e:?}")))?;
        Ok(Self {
            source: source.to_string(),
            selector,
        })
    }

    /// The selector as written in the configuration.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }
}

impl PartialEq for SelectionRule {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for SelectionRule {}

impl fmt::Display for SelectionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl Serialize for SelectionRule {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.source)
    }
}

impl<'de> Deserialize<'de> for SelectionRule {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let source = String::deserialize(deserializer)?;
        Self::parse(&source).map_err(serde::de::Error::custom)
    }
}

/// One watched news page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Address of the listing page
    pub url: Url,

    /// Rule locating article teaser elements on the page
    pub selector: SelectionRule,

    /// Per-target override of the global fetch strategy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<FetchStrategy>,

    /// Attribute holding the article link (usually "href")
    #[serde(default = "default_link_attr")]
    pub link_attr: String,
}

fn default_link_attr() -> String {
    "href".to_string()
}

impl Target {
    /// Create a target fetched with the global strategy.
    pub fn new(url: &str, selector: &str) -> Result<Self> {
        Ok(Self {
            url: Url::parse(url)?,
            selector: SelectionRule::parse(selector)?,
            strategy: None,
            link_attr: default_link_attr(),
        })
    }

    /// Pin this target to a specific fetch strategy.
    pub fn with_strategy(mut self, strategy: FetchStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Strategy to use for this target given the global default.
    pub fn effective_strategy(&self, default: FetchStrategy) -> FetchStrategy {
        self.strategy.unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_rule_valid() {
        assert!(SelectionRule::parse("a.js-teaser-heading-link").is_ok());
        assert!(SelectionRule::parse(r#"a[data-test-id="teaser-card-link"]"#).is_ok());
        assert!(SelectionRule::parse(r#"a[data-analytics^="collection_"]"#).is_ok());
    }

    #[test]
    fn test_selection_rule_invalid() {
        assert!(SelectionRule::parse("[[invalid").is_err());
        assert!(SelectionRule::parse("   ").is_err());
    }

    #[test]
    fn test_target_deserializes_with_defaults() {
        let target: Target = toml::from_str(
            r#"
            url = "https://www.ft.com/lex"
            selector = "a.js-teaser-heading-link"
            "#,
        )
        .unwrap();

        assert_eq!(target.url.as_str(), "https://www.ft.com/lex");
        assert_eq!(target.selector.as_str(), "a.js-teaser-heading-link");
        assert_eq!(target.link_attr, "href");
        assert_eq!(target.strategy, None);
        assert_eq!(
            target.effective_strategy(FetchStrategy::Rendered),
            FetchStrategy::Rendered
        );
    }

    #[test]
    fn test_target_rejects_bad_selector_at_load() {
        let result: std::result::Result<Target, _> = toml::from_str(
            r#"
            url = "https://example.com"
            selector = "a[[["
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_target_strategy_override() {
        let target = Target::new("https://example.com/news", "a.story")
            .unwrap()
            .with_strategy(FetchStrategy::Rendered);
        assert_eq!(
            target.effective_strategy(FetchStrategy::Direct),
            FetchStrategy::Rendered
        );
    }
}
