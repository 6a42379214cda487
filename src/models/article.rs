// src/models/article.rs

//! Article candidates and the notifications built from them.

use url::Url;

use crate::utils::text::{truncate_graphemes, utf16_len};

/// A `(title, link)` pair extracted from a listing page.
///
/// Not yet checked against the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Visible text of the matched element
    pub title: String,

    /// Link attribute as it appeared in the page
    pub raw_link: Option<String>,

    /// Absolute http(s) link, if the raw link resolved to one
    pub link: Option<Url>,
}

impl Candidate {
    /// Build the notification for this candidate, if it has a usable link.
    pub fn to_notification(&self) -> Option<Notification> {
        self.link.as_ref().map(|link| Notification {
            title: self.title.clone(),
            link: link.clone(),
        })
    }
}

/// A message announcing one new article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub link: Url,
}

impl Notification {
    /// Render the message text sent to the chat.
    pub fn format(&self) -> String {
        Self::render(&self.title, &self.link)
    }

    /// Render the message within `limit` UTF-16 code units.
    ///
    /// Only the title is shortened; the link line is always kept whole.
    pub fn format_within(&self, limit: usize) -> String {
        let message = self.format();
        if utf16_len(&message) <= limit {
            return message;
        }
        let frame = utf16_len(&Self::render("", &self.link));
        let title = truncate_graphemes(&self.title, limit.saturating_sub(frame));
        Self::render(&title, &self.link)
    }

    fn render(title: &str, link: &Url) -> String {
        format!("📰 {title}\n🔗 {link}")
    }
}
