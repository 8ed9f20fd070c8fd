//! Link rendering for short social-media text.
//!
//! This crate turns text plus a list of pre-located [`Entity`] references
//! (URLs, `#hashtags`, `@mentions` and `@user/lists`, `$cashtags`) into an
//! HTML fragment where every reference is an anchor and all other text is
//! left untouched.
//!
//! Locating entities is not done here: a tokenizer runs over text whose
//! angle brackets were defused with [`escape_brackets`] and hands the
//! resulting spans to [`Autolinker::render`].
//!
//! # Architecture
//!
//! - [`Autolinker`]: walks entities in order and dispatches per [`EntityType`]
//! - [`AutolinkOptions`]: CSS classes, href bases, wrapper tags and hooks
//! - [`LinkAttributes`]: insertion-ordered attribute map handed to hooks
//!
//! Shortened URLs carrying both a display and an expanded form are rendered
//! so that copying the visible link yields the expanded URL.
//!
//! # Example
//!
//! ```
//! use autolink_renderer::{Autolinker, Entity, escape_brackets};
//!
//! let text = escape_brackets("<3 #rust");
//! let html = Autolinker::default()
//!     .render(&text, &[Entity::hashtag(6, 11, "rust")])
//!     .unwrap();
//! assert!(html.starts_with("&lt;3 <a href="));
//! assert!(html.ends_with(r#"rel="nofollow">#rust</a>"#));
//! ```

mod attributes;
mod autolink;
mod entity;
mod error;
mod escape;
mod options;

pub use attributes::LinkAttributes;
pub use autolink::Autolinker;
pub use entity::{Entity, EntityType};
pub use error::{RangeViolation, RenderError};
pub use escape::{escape_brackets, escape_html};
pub use options::{
    AutolinkOptions, DEFAULT_CASHTAG_CLASS, DEFAULT_CASHTAG_URL_BASE, DEFAULT_HASHTAG_CLASS,
    DEFAULT_HASHTAG_URL_BASE, DEFAULT_INVISIBLE_TAG_ATTRS, DEFAULT_LIST_CLASS,
    DEFAULT_LIST_URL_BASE, DEFAULT_USERNAME_CLASS, DEFAULT_USERNAME_URL_BASE,
    LinkAttributeModifier, LinkTextModifier,
};
