//! Entity-driven link rendering.

use crate::attributes::LinkAttributes;
use crate::entity::{Entity, EntityType};
use crate::error::{RangeViolation, RenderError};
use crate::escape::{escape_html, push_escaped};
use crate::options::AutolinkOptions;

/// Marker used by display URLs to show elided parts.
const ELLIPSIS: char = '…';

/// Characters recognized as mention symbols.
const AT_SIGNS: [char; 2] = ['@', '\u{FF20}'];

/// Class of spans that are displayed but excluded from copies.
const ELLIPSIS_CLASS: &str = "tco-ellipsis";

/// Class of the span holding the displayed part of a shortened URL.
const DISPLAY_URL_CLASS: &str = "js-display-url";

/// Renders text and pre-located entities into HTML.
///
/// Text between entities is copied verbatim. The text must already have its
/// angle brackets defused (see [`escape_brackets`](crate::escape_brackets)),
/// and entity offsets must refer to that defused text.
///
/// # Example
///
/// ```
/// use autolink_renderer::{AutolinkOptions, Autolinker, Entity};
///
/// let autolinker = Autolinker::new(AutolinkOptions::default().with_no_follow(false));
/// let html = autolinker
///     .render("hi @bob", &[Entity::mention(3, 7, "bob")])
///     .unwrap();
/// assert_eq!(
///     html,
///     r#"hi @<a class="tweet-url username" href="https://twitter.com/bob">bob</a>"#
/// );
/// ```
#[derive(Clone, Debug, Default)]
pub struct Autolinker {
    options: AutolinkOptions,
}

impl Autolinker {
    /// Create a renderer with the given options.
    pub fn new(options: AutolinkOptions) -> Self {
        Self { options }
    }

    /// Options used by this renderer.
    pub fn options(&self) -> &AutolinkOptions {
        &self.options
    }

    /// Replace every entity span in `text` with its link markup.
    ///
    /// Entities must be sorted by `start`, non-overlapping, non-empty and on
    /// `char` boundaries within `text`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidEntityRange`] for the first entity that
    /// violates these preconditions. No output is produced in that case.
    pub fn render(&self, text: &str, entities: &[Entity]) -> Result<String, RenderError> {
        self.render_iter(text, entities.iter().enumerate())
    }

    /// Render only the entities of one type, leaving the rest as plain text.
    ///
    /// # Errors
    ///
    /// See [`render`](Self::render). Only the selected entities are validated,
    /// and the reported index is the entity's position in `entities`.
    pub fn render_only(
        &self,
        text: &str,
        entities: &[Entity],
        kind: EntityType,
    ) -> Result<String, RenderError> {
        self.render_iter(
            text,
            entities
                .iter()
                .enumerate()
                .filter(move |(_, e)| e.kind == kind),
        )
    }

    /// Render only URL entities.
    ///
    /// # Errors
    ///
    /// See [`render`](Self::render).
    pub fn render_urls(&self, text: &str, entities: &[Entity]) -> Result<String, RenderError> {
        self.render_only(text, entities, EntityType::Url)
    }

    /// Render only hashtag entities.
    ///
    /// # Errors
    ///
    /// See [`render`](Self::render).
    pub fn render_hashtags(&self, text: &str, entities: &[Entity]) -> Result<String, RenderError> {
        self.render_only(text, entities, EntityType::Hashtag)
    }

    /// Render only mention and list entities.
    ///
    /// # Errors
    ///
    /// See [`render`](Self::render).
    pub fn render_mentions(&self, text: &str, entities: &[Entity]) -> Result<String, RenderError> {
        self.render_only(text, entities, EntityType::Mention)
    }

    /// Render only cashtag entities.
    ///
    /// # Errors
    ///
    /// See [`render`](Self::render).
    pub fn render_cashtags(&self, text: &str, entities: &[Entity]) -> Result<String, RenderError> {
        self.render_only(text, entities, EntityType::Cashtag)
    }

    fn render_iter<'a, I>(&self, text: &str, entities: I) -> Result<String, RenderError>
    where
        I: Iterator<Item = (usize, &'a Entity)> + Clone,
    {
        validate_entities(text, entities.clone())?;

        let mut out = String::with_capacity(text.len() * 2);
        let mut cursor = 0;
        let mut count = 0usize;

        for (_, entity) in entities {
            out.push_str(&text[cursor..entity.start]);
            match entity.kind {
                EntityType::Url => self.link_to_url(entity, &mut out),
                EntityType::Hashtag => self.link_to_tag(
                    entity,
                    leading_symbol(text, entity, '#'),
                    '#',
                    &self.options.hashtag_url_base,
                    &self.options.hashtag_class,
                    &mut out,
                ),
                EntityType::Mention => self.link_to_mention(entity, text, &mut out),
                EntityType::Cashtag => self.link_to_tag(
                    entity,
                    leading_symbol(text, entity, '$'),
                    '$',
                    &self.options.cashtag_url_base,
                    &self.options.cashtag_class,
                    &mut out,
                ),
            }
            cursor = entity.end;
            count += 1;
        }
        out.push_str(&text[cursor..]);

        tracing::trace!(
            entities = count,
            input_len = text.len(),
            output_len = out.len(),
            "Rendered links"
        );
        Ok(out)
    }

    /// Hashtags and cashtags: symbol always inside the anchor.
    fn link_to_tag(
        &self,
        entity: &Entity,
        symbol: char,
        title_symbol: char,
        url_base: &str,
        class: &str,
        out: &mut String,
    ) {
        let value = &entity.value;
        let mut attrs = LinkAttributes::new();
        attrs.insert("href", format!("{url_base}{value}"));
        attrs.insert("title", format!("{title_symbol}{value}"));
        attrs.insert("class", class);

        self.link_to_text_with_symbol(entity, symbol, value, attrs, true, out);
    }

    fn link_to_mention(&self, entity: &Entity, text: &str, out: &mut String) {
        let symbol = leading_symbol(text, entity, '@');
        let mut attrs = LinkAttributes::new();

        let mention = match &entity.list_slug {
            Some(slug) => {
                let mention = format!("{}{slug}", entity.value);
                attrs.insert("class", self.options.list_class.as_str());
                attrs.insert("href", format!("{}{mention}", self.options.list_url_base));
                mention
            }
            None => {
                attrs.insert("class", self.options.username_class.as_str());
                attrs.insert(
                    "href",
                    format!("{}{}", self.options.username_url_base, entity.value),
                );
                entity.value.clone()
            }
        };

        // An unrecognized symbol stays inside the link so it is never dropped from view.
        let include_symbol = self.options.username_include_symbol || !AT_SIGNS.contains(&symbol);
        self.link_to_text_with_symbol(entity, symbol, &mention, attrs, include_symbol, out);
    }

    fn link_to_url(&self, entity: &Entity, out: &mut String) {
        let url = &entity.value;
        let link_text = match (entity.display_url.as_deref(), entity.expanded_url.as_deref()) {
            (Some(display_url), Some(expanded_url)) => {
                self.display_url_markup(display_url, expanded_url)
            }
            _ => escape_html(url),
        };

        let mut attrs = LinkAttributes::new();
        attrs.insert("href", url.as_str());
        if let Some(class) = non_empty(self.options.url_class.as_deref()) {
            attrs.insert("class", class);
        }
        if let Some(target) = non_empty(self.options.url_target.as_deref()) {
            attrs.insert("target", target);
        }

        self.link_to_text(entity, link_text, attrs, out);
    }

    /// Build link text for a shortened URL so that copying it yields the expanded URL.
    ///
    /// The parts of `expanded_url` outside the display form go into invisible
    /// spans, which are copied but not shown. Ellipses sit in spans that are
    /// shown but excluded from copies, each padded with an invisible `&nbsp;`
    /// that keeps the ellipsis off the URL if the copy handler never runs.
    ///
    /// When the display form is not a substring of `expanded_url` (media
    /// links, for example) the display form is shown as-is.
    fn display_url_markup(&self, display_url: &str, expanded_url: &str) -> String {
        let leading_ellipsis = display_url.starts_with(ELLIPSIS);
        let trailing_ellipsis = display_url.ends_with(ELLIPSIS);
        let shown = display_url.strip_prefix(ELLIPSIS).unwrap_or(display_url);
        let shown = shown.strip_suffix(ELLIPSIS).unwrap_or(shown);

        let Some(index) = expanded_url.find(shown) else {
            tracing::debug!(
                display_url,
                expanded_url,
                "Display URL not found in expanded URL, showing display URL"
            );
            return escape_html(display_url);
        };
        let before = &expanded_url[..index];
        let after = &expanded_url[index + shown.len()..];

        let invisible_open = format!("<span {}>", self.options.invisible_tag_attrs);
        let ellipsis_open = format!("<span class='{ELLIPSIS_CLASS}'>");

        let mut html = String::with_capacity(expanded_url.len() * 2 + invisible_open.len() * 5);

        html.push_str(&ellipsis_open);
        if leading_ellipsis {
            html.push(ELLIPSIS);
        }
        html.push_str(&invisible_open);
        html.push_str("&nbsp;</span></span>");

        html.push_str(&invisible_open);
        push_escaped(before, &mut html);
        html.push_str("</span>");

        html.push_str("<span class='");
        html.push_str(DISPLAY_URL_CLASS);
        html.push_str("'>");
        push_escaped(shown, &mut html);
        html.push_str("</span>");

        html.push_str(&invisible_open);
        push_escaped(after, &mut html);
        html.push_str("</span>");

        html.push_str(&ellipsis_open);
        html.push_str(&invisible_open);
        html.push_str("&nbsp;</span>");
        if trailing_ellipsis {
            html.push(ELLIPSIS);
        }
        html.push_str("</span>");

        html
    }

    /// Compose symbol and text, placing the symbol inside or before the anchor.
    fn link_to_text_with_symbol(
        &self,
        entity: &Entity,
        symbol: char,
        text: &str,
        attrs: LinkAttributes,
        include_symbol: bool,
        out: &mut String,
    ) {
        let mut buf = [0u8; 4];
        let tagged_symbol = wrap_in_tag(
            self.options.symbol_tag.as_deref(),
            escape_html(symbol.encode_utf8(&mut buf)),
        );
        let tagged_text = wrap_in_tag(
            self.options.text_with_symbol_tag.as_deref(),
            escape_html(text),
        );

        if include_symbol {
            self.link_to_text(entity, tagged_symbol + &tagged_text, attrs, out);
        } else {
            out.push_str(&tagged_symbol);
            self.link_to_text(entity, tagged_text, attrs, out);
        }
    }

    /// Serialize the anchor. `text` is inserted without further escaping.
    fn link_to_text(
        &self,
        entity: &Entity,
        text: String,
        mut attrs: LinkAttributes,
        out: &mut String,
    ) {
        if let Some(modifier) = &self.options.link_attribute_modifier {
            modifier.modify(entity, &mut attrs);
        }
        if self.options.no_follow {
            attrs.insert("rel", "nofollow");
        }
        let text = match &self.options.link_text_modifier {
            Some(modifier) => modifier.modify(entity, &text),
            None => text,
        };

        out.push_str("<a");
        for (name, value) in attrs.iter() {
            out.push(' ');
            push_escaped(name, out);
            out.push_str("=\"");
            push_escaped(value, out);
            out.push('"');
        }
        out.push('>');
        out.push_str(&text);
        out.push_str("</a>");
    }
}

/// Check that entities are well-formed, in order and non-overlapping.
///
/// Each entity is paired with its position in the caller's input list.
fn validate_entities<'a>(
    text: &str,
    entities: impl Iterator<Item = (usize, &'a Entity)>,
) -> Result<(), RenderError> {
    let mut previous_end = 0;

    for (index, entity) in entities {
        let reason = if entity.start >= entity.end {
            Some(RangeViolation::Empty)
        } else if entity.end > text.len() {
            Some(RangeViolation::OutOfBounds { len: text.len() })
        } else if !text.is_char_boundary(entity.start) || !text.is_char_boundary(entity.end) {
            Some(RangeViolation::NotCharBoundary)
        } else if entity.start < previous_end {
            Some(RangeViolation::Overlaps { previous_end })
        } else {
            None
        };

        if let Some(reason) = reason {
            tracing::debug!(
                index,
                start = entity.start,
                end = entity.end,
                %reason,
                "Rejected entity"
            );
            return Err(RenderError::InvalidEntityRange {
                index,
                start: entity.start,
                end: entity.end,
                reason,
            });
        }
        previous_end = entity.end;
    }

    Ok(())
}

/// First character of the entity span, which may be a full-width symbol.
fn leading_symbol(text: &str, entity: &Entity, fallback: char) -> char {
    text[entity.start..entity.end].chars().next().unwrap_or(fallback)
}

fn wrap_in_tag(tag: Option<&str>, content: String) -> String {
    match non_empty(tag) {
        Some(tag) => format!("<{tag}>{content}</{tag}>"),
        None => content,
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use regex::Regex;

    use super::*;

    const INVISIBLE: &str = "<span style='position:absolute;left:-9999px;'>";

    fn render(text: &str, entities: &[Entity]) -> String {
        Autolinker::default().render(text, entities).unwrap()
    }

    fn render_with(options: AutolinkOptions, text: &str, entities: &[Entity]) -> String {
        Autolinker::new(options).render(text, entities).unwrap()
    }

    /// Text a reader gets when copying: invisible and display spans, no ellipsis wrappers.
    fn copied_url(html: &str) -> String {
        let re = Regex::new(concat!(
            r"</span></span><span [^>]*>([^<]*)</span>",
            r"<span class='js-display-url'>([^<]*)</span>",
            r"<span [^>]*>([^<]*)</span><span class='tco-ellipsis'>",
        ))
        .unwrap();
        let caps = re.captures(html).expect("copy-paste spans present");
        format!("{}{}{}", &caps[1], &caps[2], &caps[3])
    }

    #[test]
    fn test_no_entities_returns_text() {
        assert_eq!(render("just text &lt;b&gt;", &[]), "just text &lt;b&gt;");
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(render("", &[]), "");
    }

    #[test]
    fn test_hashtag() {
        assert_eq!(
            render("#rust rocks", &[Entity::hashtag(0, 5, "rust")]),
            r##"<a href="https://twitter.com/#!/base_dual_pane?q=%23rust" title="#rust" class="tweet-url hashtag" rel="nofollow">#rust</a> rocks"##
        );
    }

    #[test]
    fn test_hashtag_full_width_symbol_kept_in_text() {
        let html = render("＃日本", &[Entity::hashtag(0, 9, "日本")]);
        assert!(html.contains(r##"title="#日本""##));
        assert!(html.ends_with(">＃日本</a>"));
    }

    #[test]
    fn test_cashtag_full_width_symbol_kept_in_text() {
        let html = render("＄TW", &[Entity::cashtag(0, 5, "TW")]);
        assert!(html.contains(r#"title="$TW""#));
        assert!(html.ends_with(">＄TW</a>"));
    }

    #[test]
    fn test_hashtag_value_escaped() {
        let html = render("#a&b", &[Entity::hashtag(0, 4, "a&b")]);
        assert!(html.contains(r##"title="#a&amp;b""##));
        assert!(html.contains(r#"href="https://twitter.com/#!/base_dual_pane?q=%23a&amp;b""#));
        assert!(html.ends_with(">#a&amp;b</a>"));
    }

    #[test]
    fn test_adversarial_value_never_unescaped() {
        let value = r#"x"'<>&"#;
        let text = format!("#{value}");
        let html = render(&text, &[Entity::hashtag(0, text.len(), value)]);
        assert!(!html.contains(value));
        assert!(html.contains("x&quot;&#39;&lt;&gt;&amp;"));
    }

    #[test]
    fn test_cashtag() {
        assert_eq!(
            render("$TWTR up", &[Entity::cashtag(0, 5, "TWTR")]),
            r#"<a href="https://twitter.com/#!/base_dual_pane?q=%24TWTR" title="$TWTR" class="tweet-url cashtag" rel="nofollow">$TWTR</a> up"#
        );
    }

    #[test]
    fn test_mention_symbol_outside_link() {
        assert_eq!(
            render("hi @bob", &[Entity::mention(3, 7, "bob")]),
            r#"hi @<a class="tweet-url username" href="https://twitter.com/bob" rel="nofollow">bob</a>"#
        );
    }

    #[test]
    fn test_mention_list() {
        let entity = Entity::mention(3, 15, "bob").with_list_slug("/friends");
        assert_eq!(
            render("hi @bob/friends", &[entity]),
            r#"hi @<a class="tweet-url list-slug" href="https://twitter.com/bob/friends" rel="nofollow">bob/friends</a>"#
        );
    }

    #[test]
    fn test_mention_include_symbol() {
        let options = AutolinkOptions::default().with_username_include_symbol(true);
        assert_eq!(
            render_with(options, "hi @bob", &[Entity::mention(3, 7, "bob")]),
            r#"hi <a class="tweet-url username" href="https://twitter.com/bob" rel="nofollow">@bob</a>"#
        );
    }

    #[test]
    fn test_mention_full_width_at_sign_outside_link() {
        let html = render("＠bob", &[Entity::mention(0, 6, "bob")]);
        assert!(html.starts_with("＠<a "));
        assert!(html.ends_with(">bob</a>"));
    }

    #[test]
    fn test_mention_unrecognized_symbol_kept_inside_link() {
        let html = render("~bob", &[Entity::mention(0, 4, "bob")]);
        assert!(html.starts_with("<a "));
        assert!(html.ends_with(">~bob</a>"));
    }

    #[test]
    fn test_symbol_and_text_tags() {
        let options = AutolinkOptions::default()
            .with_no_follow(false)
            .with_symbol_tag("s")
            .with_text_with_symbol_tag("b");
        let html = render_with(
            options,
            "#tag @bob",
            &[Entity::hashtag(0, 4, "tag"), Entity::mention(5, 9, "bob")],
        );
        assert_eq!(
            html,
            concat!(
                r##"<a href="https://twitter.com/#!/base_dual_pane?q=%23tag" title="#tag" class="tweet-url hashtag"><s>#</s><b>tag</b></a>"##,
                r#" <s>@</s><a class="tweet-url username" href="https://twitter.com/bob"><b>bob</b></a>"#,
            )
        );
    }

    #[test]
    fn test_empty_tags_ignored() {
        let options = AutolinkOptions::default()
            .with_symbol_tag("")
            .with_text_with_symbol_tag("");
        let html = render_with(options, "#tag", &[Entity::hashtag(0, 4, "tag")]);
        assert!(html.ends_with(">#tag</a>"));
    }

    #[test]
    fn test_url_plain() {
        let url = "http://example.com/?a=1&b=2";
        assert_eq!(
            render(&format!("see {url}"), &[Entity::url(4, 31, url)]),
            r#"see <a href="http://example.com/?a=1&amp;b=2" rel="nofollow">http://example.com/?a=1&amp;b=2</a>"#
        );
    }

    #[test]
    fn test_url_class_and_target() {
        let options = AutolinkOptions::default()
            .with_no_follow(false)
            .with_url_class("link")
            .with_url_target("_blank");
        assert_eq!(
            render_with(options, "http://a.co", &[Entity::url(0, 11, "http://a.co")]),
            r#"<a href="http://a.co" class="link" target="_blank">http://a.co</a>"#
        );
    }

    #[test]
    fn test_url_empty_class_and_target_omitted() {
        let options = AutolinkOptions::default()
            .with_no_follow(false)
            .with_url_class("")
            .with_url_target("");
        assert_eq!(
            render_with(options, "http://a.co", &[Entity::url(0, 11, "http://a.co")]),
            r#"<a href="http://a.co">http://a.co</a>"#
        );
    }

    #[test]
    fn test_shortened_url_leading_ellipsis() {
        let entity = Entity::url(3, 18, "http://t.co/xyz")
            .with_display_url("…long/path", "http://example.com/very/long/path");
        let html = render("go http://t.co/xyz", &[entity]);

        let expected_text = format!(
            "<span class='tco-ellipsis'>…{INVISIBLE}&nbsp;</span></span>\
             {INVISIBLE}http://example.com/very/</span>\
             <span class='js-display-url'>long/path</span>\
             {INVISIBLE}</span>\
             <span class='tco-ellipsis'>{INVISIBLE}&nbsp;</span></span>"
        );
        assert_eq!(
            html,
            format!(r#"go <a href="http://t.co/xyz" rel="nofollow">{expected_text}</a>"#)
        );
        assert_eq!(copied_url(&html), "http://example.com/very/long/path");
    }

    #[test]
    fn test_shortened_url_trailing_ellipsis() {
        let entity = Entity::url(0, 15, "http://t.co/abc")
            .with_display_url("example.com/very…", "http://example.com/very/long/path");
        let html = render("http://t.co/abc", &[entity]);

        assert!(html.contains(&format!("{INVISIBLE}http://</span>")));
        assert!(html.contains("<span class='js-display-url'>example.com/very</span>"));
        assert!(html.contains(&format!(
            "{INVISIBLE}/long/path</span><span class='tco-ellipsis'>{INVISIBLE}&nbsp;</span>…</span>"
        )));
        assert!(html.starts_with(&format!(
            r#"<a href="http://t.co/abc" rel="nofollow"><span class='tco-ellipsis'>{INVISIBLE}&nbsp;</span></span>"#
        )));
        assert_eq!(copied_url(&html), "http://example.com/very/long/path");
    }

    #[test]
    fn test_shortened_url_parts_escaped() {
        let entity = Entity::url(0, 15, "http://t.co/abc")
            .with_display_url("example.com/?a=1&b…", "https://example.com/?a=1&b=2");
        let html = render("http://t.co/abc", &[entity]);

        assert!(html.contains("<span class='js-display-url'>example.com/?a=1&amp;b</span>"));
        assert!(html.contains(&format!("{INVISIBLE}=2</span>")));
    }

    #[test]
    fn test_shortened_url_custom_invisible_attrs() {
        let options = AutolinkOptions {
            invisible_tag_attrs: "style='font-size:0'".to_owned(),
            ..AutolinkOptions::default()
        };
        let entity = Entity::url(0, 15, "http://t.co/abc")
            .with_display_url("example.com", "http://example.com");
        let html = render_with(options, "http://t.co/abc", &[entity]);
        assert!(html.contains("<span style='font-size:0'>http://</span>"));
        assert!(!html.contains("-9999px"));
    }

    #[test]
    fn test_display_url_not_in_expanded_url_falls_back() {
        let entity = Entity::url(0, 15, "http://t.co/pic").with_display_url(
            "pic.twitter.com/abc",
            "https://twitter.com/user/status/1/photo/1",
        );
        assert_eq!(
            render("http://t.co/pic", &[entity]),
            r#"<a href="http://t.co/pic" rel="nofollow">pic.twitter.com/abc</a>"#
        );
    }

    #[test]
    fn test_display_url_fallback_escaped() {
        let entity =
            Entity::url(0, 15, "http://t.co/pic").with_display_url("a<b", "http://other.example");
        let html = render("http://t.co/pic", &[entity]);
        assert!(html.ends_with(">a&lt;b</a>"));
        assert!(!html.contains("tco-ellipsis"));
    }

    #[test]
    fn test_display_url_without_expanded_url_uses_raw_url() {
        let mut entity = Entity::url(0, 15, "http://t.co/pic");
        entity.display_url = Some("example.com".to_owned());
        assert_eq!(
            render("http://t.co/pic", &[entity]),
            r#"<a href="http://t.co/pic" rel="nofollow">http://t.co/pic</a>"#
        );
    }

    #[test]
    fn test_no_follow_disabled() {
        let options = AutolinkOptions::default().with_no_follow(false);
        let html = render_with(
            options,
            "#a @b $C http://d.co",
            &[
                Entity::hashtag(0, 2, "a"),
                Entity::mention(3, 5, "b"),
                Entity::cashtag(6, 8, "C"),
                Entity::url(9, 20, "http://d.co"),
            ],
        );
        assert!(!html.contains("rel="));
        assert_eq!(html.matches("<a ").count(), 4);
    }

    #[test]
    fn test_no_follow_wins_over_attribute_modifier() {
        let options = AutolinkOptions::default().with_link_attribute_modifier(
            |_: &Entity, attrs: &mut LinkAttributes| {
                attrs.insert("rel", "me");
                attrs.insert("data-x", "1");
            },
        );
        assert_eq!(
            render_with(options, "#a", &[Entity::hashtag(0, 2, "a")]),
            r##"<a href="https://twitter.com/#!/base_dual_pane?q=%23a" title="#a" class="tweet-url hashtag" rel="nofollow" data-x="1">#a</a>"##
        );
    }

    #[test]
    fn test_attribute_modifier_rel_kept_without_no_follow() {
        let options = AutolinkOptions::default()
            .with_no_follow(false)
            .with_link_attribute_modifier(|entity: &Entity, attrs: &mut LinkAttributes| {
                if entity.kind == EntityType::Url {
                    attrs.insert("rel", "me");
                }
            });
        assert_eq!(
            render_with(options, "http://a.co", &[Entity::url(0, 11, "http://a.co")]),
            r#"<a href="http://a.co" rel="me">http://a.co</a>"#
        );
    }

    #[test]
    fn test_attribute_modifier_values_escaped() {
        let options = AutolinkOptions::default()
            .with_no_follow(false)
            .with_link_attribute_modifier(|_: &Entity, attrs: &mut LinkAttributes| {
                attrs.remove("class");
                attrs.insert("data-q", r#""quoted""#);
            });
        assert_eq!(
            render_with(options, "hi @bob", &[Entity::mention(3, 7, "bob")]),
            r#"hi @<a href="https://twitter.com/bob" data-q="&quot;quoted&quot;">bob</a>"#
        );
    }

    #[test]
    fn test_text_modifier() {
        let options = AutolinkOptions::default()
            .with_no_follow(false)
            .with_link_text_modifier(|entity: &Entity, text: &str| match entity.kind {
                EntityType::Hashtag => format!("<em>{text}</em>"),
                _ => text.to_owned(),
            });
        let html = render_with(
            options,
            "#a @b",
            &[Entity::hashtag(0, 2, "a"), Entity::mention(3, 5, "b")],
        );
        assert!(html.contains("><em>#a</em></a>"));
        assert!(html.ends_with(">b</a>"));
    }

    #[test]
    fn test_text_between_entities_verbatim() {
        let html = render(
            "a &amp; #x b @y c",
            &[Entity::hashtag(8, 10, "x"), Entity::mention(13, 15, "y")],
        );
        assert!(html.starts_with("a &amp; <a "));
        assert!(html.contains("</a> b @<a "));
        assert!(html.ends_with("</a> c"));
    }

    #[test]
    fn test_multibyte_prefix_offsets() {
        let text = "日本 #tag";
        let html = render(text, &[Entity::hashtag(7, 11, "tag")]);
        assert!(html.starts_with("日本 <a "));
        assert!(html.ends_with(">#tag</a>"));
    }

    #[test]
    fn test_render_only_hashtags() {
        let entities = [Entity::hashtag(0, 2, "a"), Entity::mention(3, 5, "b")];
        let html = Autolinker::default()
            .render_hashtags("#a @b", &entities)
            .unwrap();
        assert!(html.ends_with("</a> @b"));
        assert_eq!(html.matches("<a ").count(), 1);
    }

    #[test]
    fn test_render_only_each_type() {
        let text = "#a @b $C http://d.co";
        let entities = [
            Entity::hashtag(0, 2, "a"),
            Entity::mention(3, 5, "b"),
            Entity::cashtag(6, 8, "C"),
            Entity::url(9, 20, "http://d.co"),
        ];
        let autolinker = Autolinker::default();

        let urls = autolinker.render_urls(text, &entities).unwrap();
        assert!(urls.starts_with("#a @b $C <a "));

        let mentions = autolinker.render_mentions(text, &entities).unwrap();
        assert!(mentions.starts_with("#a @<a class=\"tweet-url username\""));
        assert!(mentions.ends_with("</a> $C http://d.co"));

        let cashtags = autolinker.render_cashtags(text, &entities).unwrap();
        assert!(cashtags.contains(r#"title="$C""#));
        assert_eq!(cashtags.matches("<a ").count(), 1);
    }

    #[test]
    fn test_render_only_skips_validation_of_other_types() {
        // The mention overlaps the hashtag but is not rendered.
        let entities = [Entity::hashtag(0, 2, "a"), Entity::mention(1, 3, "b")];
        assert!(Autolinker::default().render_hashtags("#ab", &entities).is_ok());
    }

    #[test]
    fn test_render_only_reports_input_list_index() {
        let entities = [
            Entity::mention(0, 2, "a"),
            Entity::mention(3, 5, "b"),
            Entity::hashtag(6, 99, "x"),
        ];
        let err = Autolinker::default()
            .render_hashtags("@a @b #x", &entities)
            .unwrap_err();
        assert_eq!(
            err,
            RenderError::InvalidEntityRange {
                index: 2,
                start: 6,
                end: 99,
                reason: RangeViolation::OutOfBounds { len: 8 },
            }
        );
    }

    #[test]
    fn test_rejects_out_of_order() {
        let err = Autolinker::default()
            .render(
                "#a #b",
                &[Entity::hashtag(3, 5, "b"), Entity::hashtag(0, 2, "a")],
            )
            .unwrap_err();
        assert_eq!(
            err,
            RenderError::InvalidEntityRange {
                index: 1,
                start: 0,
                end: 2,
                reason: RangeViolation::Overlaps { previous_end: 5 },
            }
        );
    }

    #[test]
    fn test_rejects_overlap() {
        let err = Autolinker::default()
            .render(
                "#abc",
                &[Entity::hashtag(0, 3, "ab"), Entity::hashtag(2, 4, "c")],
            )
            .unwrap_err();
        assert!(matches!(
            err,
            RenderError::InvalidEntityRange {
                reason: RangeViolation::Overlaps { previous_end: 3 },
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_out_of_bounds() {
        let err = Autolinker::default()
            .render("#a", &[Entity::hashtag(0, 9, "a")])
            .unwrap_err();
        assert!(matches!(
            err,
            RenderError::InvalidEntityRange {
                reason: RangeViolation::OutOfBounds { len: 2 },
                ..
            }
        ));
        assert!(err.to_string().contains("0..9"));
    }

    #[test]
    fn test_rejects_empty_span() {
        let err = Autolinker::default()
            .render("#a", &[Entity::hashtag(1, 1, "a")])
            .unwrap_err();
        assert!(matches!(
            err,
            RenderError::InvalidEntityRange {
                reason: RangeViolation::Empty,
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_split_character() {
        let err = Autolinker::default()
            .render("＃tag", &[Entity::hashtag(1, 6, "tag")])
            .unwrap_err();
        assert!(matches!(
            err,
            RenderError::InvalidEntityRange {
                reason: RangeViolation::NotCharBoundary,
                ..
            }
        ));
    }

    #[test]
    fn test_adjacent_entities_allowed() {
        let html = render("#a#b", &[Entity::hashtag(0, 2, "a"), Entity::hashtag(2, 4, "b")]);
        assert_eq!(html.matches("</a><a ").count(), 1);
    }
}
