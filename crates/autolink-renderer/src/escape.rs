//! HTML escaping helpers.

use std::borrow::Cow;

/// Escape text for use in HTML content or a double-quoted attribute value.
///
/// Replaces `&`, `<`, `>`, `"` and `'` with their entity references.
///
/// # Examples
///
/// ```
/// use autolink_renderer::escape_html;
///
/// assert_eq!(escape_html("a&b"), "a&amp;b");
/// assert_eq!(escape_html(r#"<"it's">"#), "&lt;&quot;it&#39;s&quot;&gt;");
/// ```
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    push_escaped(s, &mut result);
    result
}

/// Append the escaped form of `s` to `out`.
pub(crate) fn push_escaped(s: &str, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

/// Defuse literal angle brackets before entities are located.
///
/// Only `<` and `>` are replaced. Entity offsets handed to the renderer are
/// computed against the returned text, not the raw input.
///
/// # Examples
///
/// ```
/// use autolink_renderer::escape_brackets;
///
/// assert_eq!(escape_brackets("a <b> & c"), "a &lt;b&gt; & c");
/// ```
pub fn escape_brackets(text: &str) -> Cow<'_, str> {
    if !text.contains(['<', '>']) {
        return Cow::Borrowed(text);
    }

    let mut result = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}
