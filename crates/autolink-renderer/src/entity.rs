//! Located references produced by the tokenizer.

/// Kind of reference an [`Entity`] represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum EntityType {
    /// A URL, possibly shortened.
    Url,
    /// A `#hashtag`.
    Hashtag,
    /// An `@username` or `@username/list` reference.
    Mention,
    /// A `$cashtag`.
    Cashtag,
}

/// A classified reference located in defused text.
///
/// `start..end` is a half-open range of UTF-8 byte offsets into the text the
/// renderer receives. Both ends must fall on `char` boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    /// Byte offset of the first character (the symbol for hashtags, mentions and cashtags).
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
    /// Entity classification.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: EntityType,
    /// Canonical matched text: tag or username without its symbol, or the URL itself.
    pub value: String,
    /// `/listname` suffix when a mention refers to a list.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub list_slug: Option<String>,
    /// Human-facing, possibly elided form of a shortened URL.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub display_url: Option<String>,
    /// Full URL a shortened link redirects to.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub expanded_url: Option<String>,
}

impl Entity {
    /// Create an entity with no auxiliary fields.
    pub fn new(start: usize, end: usize, kind: EntityType, value: impl Into<String>) -> Self {
        Self {
            start,
            end,
            kind,
            value: value.into(),
            list_slug: None,
            display_url: None,
            expanded_url: None,
        }
    }

    /// Create a URL entity.
    pub fn url(start: usize, end: usize, url: impl Into<String>) -> Self {
        Self::new(start, end, EntityType::Url, url)
    }

    /// Create a hashtag entity. `tag` excludes the leading symbol.
    pub fn hashtag(start: usize, end: usize, tag: impl Into<String>) -> Self {
        Self::new(start, end, EntityType::Hashtag, tag)
    }

    /// Create a mention entity. `username` excludes the leading symbol.
    pub fn mention(start: usize, end: usize, username: impl Into<String>) -> Self {
        Self::new(start, end, EntityType::Mention, username)
    }

    /// Create a cashtag entity. `symbol` excludes the leading `$`.
    pub fn cashtag(start: usize, end: usize, symbol: impl Into<String>) -> Self {
        Self::new(start, end, EntityType::Cashtag, symbol)
    }

    /// Mark a mention as a list reference.
    #[must_use]
    pub fn with_list_slug(mut self, slug: impl Into<String>) -> Self {
        self.list_slug = Some(slug.into());
        self
    }

    /// Attach the display and expanded forms of a shortened URL.
    #[must_use]
    pub fn with_display_url(
        mut self,
        display_url: impl Into<String>,
        expanded_url: impl Into<String>,
    ) -> Self {
        self.display_url = Some(display_url.into());
        self.expanded_url = Some(expanded_url.into());
        self
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span is empty.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}
