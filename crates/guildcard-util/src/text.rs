/// Approximate advance width of one glyph at the stats font size, in pixels.
/// There are no font metrics at render time, so layout offsets use this.
pub const CHAR_WIDTH: u32 = 7;

/// Escape the five XML special characters. `&` is replaced first so the
/// entities produced for the other four are not escaped twice.
pub fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Cut `text` to at most `max_chars` characters, appending `ellipsis` when
/// anything was removed. Both parts are escaped, so the result can be placed
/// directly into markup.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize, ellipsis: &str) -> String {
    if text.chars().count() <= max_chars {
        return escape_xml(text);
    }
    let prefix: String = text.chars().take(max_chars).collect();
    format!("{}{}", escape_xml(&prefix), escape_xml(ellipsis))
}

/// Format a count with en-US digit grouping: `1234567` -> `"1,234,567"`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Estimated rendered width of `text`, counted per character.
pub fn estimate_text_width(text: &str) -> u32 {
    text.chars().count() as u32 * CHAR_WIDTH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_all_five_characters() {
        assert_eq!(
            escape_xml(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&apos;s&lt;/a&gt;"
        );
    }

    #[test]
    fn escaping_does_not_double_encode_ampersands() {
        assert_eq!(escape_xml("&lt;"), "&amp;lt;");
        assert_eq!(escape_xml("plain"), "plain");
    }

    #[test]
    fn short_text_is_kept_whole() {
        assert_eq!(truncate_with_ellipsis("Rustaceans", 10, "..."), "Rustaceans");
    }

    #[test]
    fn long_text_is_cut_and_suffixed() {
        assert_eq!(
            truncate_with_ellipsis("The Very Long Guild Name", 8, "..."),
            "The Very..."
        );
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        assert_eq!(truncate_with_ellipsis("ñandú ñandú", 5, "…"), "ñandú…");
    }

    #[test]
    fn truncation_never_splits_an_entity() {
        // The cut happens before escaping, so "&" becomes a whole "&amp;".
        assert_eq!(truncate_with_ellipsis("a&b&c", 2, "<>"), "a&amp;&lt;&gt;");
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(12_345), "12,345");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn width_is_seven_pixels_per_char() {
        assert_eq!(estimate_text_width("5 online"), 56);
        assert_eq!(estimate_text_width(""), 0);
    }
}
