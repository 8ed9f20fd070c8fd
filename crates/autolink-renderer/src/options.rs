//! Rendering options and extension hooks.

use std::fmt;
use std::sync::Arc;

use crate::attributes::LinkAttributes;
use crate::entity::Entity;

/// Default CSS class for list links.
pub const DEFAULT_LIST_CLASS: &str = "tweet-url list-slug";
/// Default CSS class for username links.
pub const DEFAULT_USERNAME_CLASS: &str = "tweet-url username";
/// Default CSS class for hashtag links.
pub const DEFAULT_HASHTAG_CLASS: &str = "tweet-url hashtag";
/// Default CSS class for cashtag links.
pub const DEFAULT_CASHTAG_CLASS: &str = "tweet-url cashtag";
/// Default href base for username links (username is appended).
pub const DEFAULT_USERNAME_URL_BASE: &str = "https://twitter.com/";
/// Default href base for list links (`username/list` is appended).
pub const DEFAULT_LIST_URL_BASE: &str = "https://twitter.com/";
/// Default href base for hashtag links (tag is appended).
pub const DEFAULT_HASHTAG_URL_BASE: &str = "https://twitter.com/#!/base_dual_pane?q=%23";
/// Default href base for cashtag links (symbol is appended).
pub const DEFAULT_CASHTAG_URL_BASE: &str = "https://twitter.com/#!/base_dual_pane?q=%24";
/// Default attributes for spans that are copied but not displayed.
pub const DEFAULT_INVISIBLE_TAG_ATTRS: &str = "style='position:absolute;left:-9999px;'";

/// Hook that edits a link's attributes before serialization.
///
/// Implemented for any `Fn(&Entity, &mut LinkAttributes)` closure.
pub trait LinkAttributeModifier: Send + Sync {
    fn modify(&self, entity: &Entity, attributes: &mut LinkAttributes);
}

impl<F> LinkAttributeModifier for F
where
    F: Fn(&Entity, &mut LinkAttributes) + Send + Sync,
{
    fn modify(&self, entity: &Entity, attributes: &mut LinkAttributes) {
        self(entity, attributes);
    }
}

/// Hook that rewrites a link's inner HTML before serialization.
///
/// The returned string is inserted as-is; the hook owns escaping of anything it adds.
/// Implemented for any `Fn(&Entity, &str) -> String` closure.
pub trait LinkTextModifier: Send + Sync {
    fn modify(&self, entity: &Entity, text: &str) -> String;
}

impl<F> LinkTextModifier for F
where
    F: Fn(&Entity, &str) -> String + Send + Sync,
{
    fn modify(&self, entity: &Entity, text: &str) -> String {
        self(entity, text)
    }
}

/// Options controlling generated markup.
///
/// Built once, then shared read-only across any number of render calls.
#[derive(Clone)]
pub struct AutolinkOptions {
    /// CSS class for URL links. Omitted when `None` or empty.
    pub url_class: Option<String>,
    /// CSS class for list links.
    pub list_class: String,
    /// CSS class for username links.
    pub username_class: String,
    /// CSS class for hashtag links.
    pub hashtag_class: String,
    /// CSS class for cashtag links.
    pub cashtag_class: String,
    /// Href base for username links.
    pub username_url_base: String,
    /// Href base for list links.
    pub list_url_base: String,
    /// Href base for hashtag links.
    pub hashtag_url_base: String,
    /// Href base for cashtag links.
    pub cashtag_url_base: String,
    /// Raw attribute string placed on invisible spans.
    pub invisible_tag_attrs: String,
    /// Add `rel="nofollow"` to every link.
    pub no_follow: bool,
    /// Keep the `@` inside the anchor for mentions.
    pub username_include_symbol: bool,
    /// Tag wrapped around `#`, `@` and `$` symbols, e.g. `"b"`.
    pub symbol_tag: Option<String>,
    /// Tag wrapped around the text following a symbol.
    pub text_with_symbol_tag: Option<String>,
    /// `target` attribute for URL links.
    pub url_target: Option<String>,
    pub(crate) link_attribute_modifier: Option<Arc<dyn LinkAttributeModifier>>,
    pub(crate) link_text_modifier: Option<Arc<dyn LinkTextModifier>>,
}

impl Default for AutolinkOptions {
    fn default() -> Self {
        Self {
            url_class: None,
            list_class: DEFAULT_LIST_CLASS.to_owned(),
            username_class: DEFAULT_USERNAME_CLASS.to_owned(),
            hashtag_class: DEFAULT_HASHTAG_CLASS.to_owned(),
            cashtag_class: DEFAULT_CASHTAG_CLASS.to_owned(),
            username_url_base: DEFAULT_USERNAME_URL_BASE.to_owned(),
            list_url_base: DEFAULT_LIST_URL_BASE.to_owned(),
            hashtag_url_base: DEFAULT_HASHTAG_URL_BASE.to_owned(),
            cashtag_url_base: DEFAULT_CASHTAG_URL_BASE.to_owned(),
            invisible_tag_attrs: DEFAULT_INVISIBLE_TAG_ATTRS.to_owned(),
            no_follow: true,
            username_include_symbol: false,
            symbol_tag: None,
            text_with_symbol_tag: None,
            url_target: None,
            link_attribute_modifier: None,
            link_text_modifier: None,
        }
    }
}

impl AutolinkOptions {
    /// Enable or disable `rel="nofollow"`.
    #[must_use]
    pub fn with_no_follow(mut self, enabled: bool) -> Self {
        self.no_follow = enabled;
        self
    }

    /// Include the `@` inside mention anchors.
    #[must_use]
    pub fn with_username_include_symbol(mut self, enabled: bool) -> Self {
        self.username_include_symbol = enabled;
        self
    }

    /// Set the CSS class for URL links.
    #[must_use]
    pub fn with_url_class(mut self, class: impl Into<String>) -> Self {
        self.url_class = Some(class.into());
        self
    }

    /// Set the `target` attribute for URL links.
    #[must_use]
    pub fn with_url_target(mut self, target: impl Into<String>) -> Self {
        self.url_target = Some(target.into());
        self
    }

    /// Wrap symbols in `<tag>...</tag>`.
    #[must_use]
    pub fn with_symbol_tag(mut self, tag: impl Into<String>) -> Self {
        self.symbol_tag = Some(tag.into());
        self
    }

    /// Wrap the text after a symbol in `<tag>...</tag>`.
    #[must_use]
    pub fn with_text_with_symbol_tag(mut self, tag: impl Into<String>) -> Self {
        self.text_with_symbol_tag = Some(tag.into());
        self
    }

    /// Install a hook that runs on every link's attributes.
    ///
    /// The hook runs before `rel="nofollow"` is applied, so it cannot remove it.
    #[must_use]
    pub fn with_link_attribute_modifier(
        mut self,
        modifier: impl LinkAttributeModifier + 'static,
    ) -> Self {
        self.link_attribute_modifier = Some(Arc::new(modifier));
        self
    }

    /// Install a hook that runs on every link's inner HTML.
    #[must_use]
    pub fn with_link_text_modifier(mut self, modifier: impl LinkTextModifier + 'static) -> Self {
        self.link_text_modifier = Some(Arc::new(modifier));
        self
    }
}

impl fmt::Debug for AutolinkOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutolinkOptions")
            .field("url_class", &self.url_class)
            .field("list_class", &self.list_class)
            .field("username_class", &self.username_class)
            .field("hashtag_class", &self.hashtag_class)
            .field("cashtag_class", &self.cashtag_class)
            .field("username_url_base", &self.username_url_base)
            .field("list_url_base", &self.list_url_base)
            .field("hashtag_url_base", &self.hashtag_url_base)
            .field("cashtag_url_base", &self.cashtag_url_base)
            .field("invisible_tag_attrs", &self.invisible_tag_attrs)
            .field("no_follow", &self.no_follow)
            .field("username_include_symbol", &self.username_include_symbol)
            .field("symbol_tag", &self.symbol_tag)
            .field("text_with_symbol_tag", &self.text_with_symbol_tag)
            .field("url_target", &self.url_target)
            .field(
                "link_attribute_modifier",
                &self.link_attribute_modifier.is_some(),
            )
            .field("link_text_modifier", &self.link_text_modifier.is_some())
            .finish()
    }
}
