/// Post link parsing: item identifiers, author handles and canonical URLs

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Domain every submitted URL is rewritten to
pub const CANONICAL_HOST: &str = "x.com";

/// Href of a status link inside a post, relative or absolute.
/// Trailing segments like `/photo/1` or `/analytics` are ignored.
static STATUS_HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?://[^/]+)?/([^/?#]+)/status/(\d+)(?:[/?#]|$)").expect("valid status href pattern")
});

/// A full post URL typed or pasted by the user, anchored at the start
static POST_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(?:www\.)?(?:twitter\.com|x\.com)/(\w+)/status/(\d+)(?:[/?#].*)?$")
        .expect("valid post url pattern")
});

/// A post URL anywhere inside arbitrary text
static EMBEDDED_POST_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://(?:www\.)?(?:twitter\.com|x\.com)/(\w+)/status/(\d+)")
        .expect("valid embedded post url pattern")
});

/// Why a manually entered URL was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManualInputError {
    #[error("Please enter a tweet URL")]
    Empty,
    #[error("Invalid Twitter/X URL")]
    Invalid,
}

/// The identity of one post: its author handle and numeric status id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostLink {
    pub handle: String,
    pub id: String,
}

impl PostLink {
    pub fn new(handle: impl Into<String>, id: impl Into<String>) -> Self {
        PostLink {
            handle: handle.into(),
            id: id.into(),
        }
    }

    /// Parse the href of a status link found inside a post element.
    ///
    /// Both forms the host page produces are accepted:
    /// - `/alice/status/12345` (attribute value)
    /// - `https://x.com/alice/status/12345/photo/1` (resolved property)
    pub fn from_href(href: &str) -> Option<PostLink> {
        captures_to_link(STATUS_HREF.captures(href.trim())?)
    }

    /// The fixed-domain form accepted by the collection API
    pub fn canonical_url(&self) -> String {
        format!("https://{}/{}/status/{}", CANONICAL_HOST, self.handle, self.id)
    }
}

fn captures_to_link(caps: regex::Captures<'_>) -> Option<PostLink> {
    let handle = caps.get(1)?.as_str();
    let id = caps.get(2)?.as_str();
    Some(PostLink::new(handle, id))
}

/// Validate a URL entered in the popup.
///
/// Query strings, fragments and trailing path segments are dropped.
pub fn parse_post_url(input: &str) -> Result<PostLink, ManualInputError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ManualInputError::Empty);
    }

    POST_URL
        .captures(input)
        .and_then(captures_to_link)
        .ok_or(ManualInputError::Invalid)
}

/// Find the first post URL inside a block of text (clipboard contents)
pub fn find_post_url(text: &str) -> Option<PostLink> {
    captures_to_link(EMBEDDED_POST_URL.captures(text)?)
}

/// Returns the post when the tab address is a single-post view
pub fn detect_post_page(tab_url: &str) -> Option<PostLink> {
    parse_post_url(tab_url).ok()
}
