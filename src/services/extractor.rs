// src/services/extractor.rs

//! Article extraction.
//!
//! Applies a target's selection rule to a listing page and turns every
//! matched element into a [`Candidate`], in document order.

use scraper::{ElementRef, Html};
use url::Url;

use crate::models::{Candidate, SelectionRule};
use crate::utils::resolve_link;
use crate::utils::text::normalize_whitespace;

/// A parsed listing page.
pub struct ParsedPage {
    document: Html,
    base_url: Url,
}

impl ParsedPage {
    /// Parse HTML fetched from `base_url`.
    pub fn parse(html: &str, base_url: &Url) -> Self {
        Self {
            document: Html::parse_document(html),
            base_url: base_url.clone(),
        }
    }

    /// Candidates matching `rule`, lazily, in document order.
    ///
    /// Calling this again restarts from the top of the document.
    pub fn candidates<'a>(
        &'a self,
        rule: &'a SelectionRule,
        link_attr: &'a str,
    ) -> impl Iterator<Item = Candidate> + 'a {
        self.document
            .select(rule.selector())
            .map(move |element| self.to_candidate(element, link_attr))
    }

    fn to_candidate(&self, element: ElementRef<'_>, link_attr: &str) -> Candidate {
        let raw_title: String = element.text().collect();
        let raw_link = element
            .value()
            .attr(link_attr)
            .map(str::trim)
            .filter(|href| !href.is_empty())
            .map(str::to_string);
        let link = raw_link
            .as_deref()
            .and_then(|href| resolve_link(&self.base_url, href));

        Candidate {
            title: normalize_whitespace(&raw_title),
            raw_link,
            link,
        }
    }
}

/// Extract all candidates from `html` in document order.
pub fn extract(html: &str, rule: &SelectionRule, link_attr: &str, base_url: &Url) -> Vec<Candidate> {
    ParsedPage::parse(html, base_url)
        .candidates(rule, link_attr)
        .collect()
}
