use aho_corasick::{AhoCorasick, MatchKind};
use once_cell::sync::Lazy;
use std::fmt::Write as FmtWrite;

// Static initialization: automaton is built only once, thread-safe
static XML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "'"])
        .expect("Failed to build XML escaper")
});

// LeftmostLongest so "&amp;lt;" decodes to "&lt;" rather than "<"
static XML_UNESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostLongest)
        .build(["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"])
        .expect("Failed to build XML unescaper")
});

/// Escape the five XML special characters.
///
/// The result is safe both as element text and as a double-quoted attribute value.
///
/// # Examples
///
/// ```
/// use slidepack::common::xml::escape_xml;
/// assert_eq!(escape_xml("GDP & CO2"), "GDP &amp; CO2");
/// assert_eq!(escape_xml("<a:t>\"x\"</a:t>"), "&lt;a:t&gt;&quot;x&quot;&lt;/a:t&gt;");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    XML_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"])
}

/// Unescape the five standard XML entities.
///
/// Unknown or malformed entities are left unchanged.
///
/// # Examples
///
/// ```
/// use slidepack::common::xml::unescape_xml;
/// assert_eq!(unescape_xml("&lt;b&gt; &amp; c"), "<b> & c");
/// assert_eq!(unescape_xml("&amp;lt;"), "&lt;");
/// assert_eq!(unescape_xml("&nbsp;"), "&nbsp;");
/// ```
#[inline]
pub fn unescape_xml(s: &str) -> String {
    XML_UNESCAPER.replace_all(s, &["&", "<", ">", "\"", "'"])
}

/// Escape text for a DrawingML run (`<a:t>`) or attribute value.
///
/// On top of [`escape_xml`], C0 control characters that XML 1.0 forbids
/// (everything below U+0020 except tab, line feed and carriage return) become
/// `_xHHHH_`. An underscore that would otherwise read as such an escape is
/// itself written as `_x005F_`.
///
/// # Examples
///
/// ```
/// use slidepack::common::xml::escape_text;
/// assert_eq!(escape_text("a\u{1}b"), "a_x0001_b");
/// assert_eq!(escape_text("_x0041_"), "_x005F_x0041_");
/// assert_eq!(escape_text("snake_case & co"), "snake_case &amp; co");
/// ```
pub fn escape_text(s: &str) -> String {
    let escaped = escape_xml(s);
    if !escaped.chars().any(is_forbidden_control) && !escaped.contains("_x") {
        return escaped;
    }

    let mut out = String::with_capacity(escaped.len() + 16);
    for (i, c) in escaped.char_indices() {
        if is_forbidden_control(c) || (c == '_' && decode_hex_escape(&escaped[i..]).is_some()) {
            let _ = write!(out, "_x{:04X}_", c as u32);
        } else {
            out.push(c);
        }
    }
    out
}

/// Reverse [`escape_text`] on text that has already been entity-decoded.
///
/// # Examples
///
/// ```
/// use slidepack::common::xml::unescape_text;
/// assert_eq!(unescape_text("a_x0001_b"), "a\u{1}b");
/// assert_eq!(unescape_text("_x005F_x0041_"), "_x0041_");
/// assert_eq!(unescape_text("_xZZZZ_"), "_xZZZZ_");
/// ```
pub fn unescape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find("_x") {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match decode_hex_escape(tail) {
            Some(c) => {
                out.push(c);
                rest = &tail[7..];
            },
            None => {
                out.push('_');
                rest = &tail[1..];
            },
        }
    }
    out.push_str(rest);
    out
}

#[inline]
fn is_forbidden_control(c: char) -> bool {
    c < '\u{20}' && !matches!(c, '\t' | '\n' | '\r')
}

/// Decode a leading `_xHHHH_`.
fn decode_hex_escape(s: &str) -> Option<char> {
    let bytes = s.as_bytes();
    if bytes.len() < 7 || !s.starts_with("_x") || bytes[6] != b'_' {
        return None;
    }
    let hex = s.get(2..6)?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_leaves_cjk_untouched() {
        let text = "碳排放驱动与 GDP 脱钩路径";
        assert_eq!(escape_xml(text), text);
    }

    #[test]
    fn test_escape_then_unescape() {
        let text = r#"Identify -> Analyze -> "Propose" & 'Monitor' <done>"#;
        assert_eq!(unescape_xml(&escape_xml(text)), text);
    }

    #[test]
    fn test_escape_text_control_characters() {
        let text = "bell\u{7} form\u{C} tab\tkept";
        let escaped = escape_text(text);
        assert_eq!(escaped, "bell_x0007_ form_x000C_ tab\tkept");
        assert!(!escaped.chars().any(is_forbidden_control));
        assert_eq!(unescape_text(&escaped), text);
    }

    #[test]
    fn test_escape_text_literal_escape_sequences() {
        let text = "_x000B_ and _x_ and __x1234_";
        let escaped = escape_text(text);
        assert_eq!(escaped, "_x005F_x000B_ and _x_ and __x005F_x1234_");
        assert_eq!(unescape_text(&escaped), text);
    }
}
