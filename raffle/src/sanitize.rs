// Copyright (c) 2020-present, UMD Database Group.
//
// This program is free software: you can use, redistribute, and/or modify
// it under the terms of the GNU Affero General Public License, version 3
// or later ("AGPL"), as published by the Free Software Foundation.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
// FITNESS FOR A PARTICULAR PURPOSE.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! Sanitization of the submitted form fields.
//!
//! A field is accepted when it is present, not longer than the maximum
//! length, and still at least the minimum length once it has been
//! HTML-escaped, reduced to printable ASCII and had its whitespace
//! collapsed. The stored value is always that cleaned form.

use crate::config::{RAFFLE_MAX_FIELD_LENGTH, RAFFLE_MIN_FIELD_LENGTH};

/// Entities the escaper emits, without the leading `&`.
const ENTITIES: [&str; 5] = ["amp;", "lt;", "gt;", "quot;", "#x27;"];

/// Sanitizes a field with the default bounds (1 to 255 characters).
pub fn sanitize_field(raw: Option<&str>) -> Option<String> {
    sanitize(raw, *RAFFLE_MIN_FIELD_LENGTH, *RAFFLE_MAX_FIELD_LENGTH)
}

/// Sanitizes `raw`, returning `None` if the value must be rejected.
///
/// # Arguments
/// * `raw` - The submitted value, if any.
/// * `min_length` - The minimum length of the cleaned value.
/// * `max_length` - The maximum length of the raw value, in characters.
///
/// # Returns
/// The escaped, ASCII-only, whitespace-collapsed value.
///
/// Sanitizing an already sanitized value returns it unchanged, as long as it
/// is still within `max_length`: an `&` that already starts one of the
/// emitted entities is not escaped a second time.
pub fn sanitize(raw: Option<&str>, min_length: usize, max_length: usize) -> Option<String> {
    let raw = raw.filter(|value| !value.is_empty())?;
    if raw.chars().count() > max_length {
        return None;
    }

    let printable: String = escape_html(raw).chars().filter(is_printable).collect();
    let cleaned = collapse_whitespace(&printable);

    if cleaned.is_empty() || cleaned.len() < min_length {
        None
    } else {
        Some(cleaned)
    }
}

/// Escapes `&`, `<`, `>`, `"` and `'`.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for (i, c) in value.char_indices() {
        match c {
            '&' if starts_entity(&value[i + 1..]) => escaped.push('&'),
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn starts_entity(rest: &str) -> bool {
    ENTITIES.iter().any(|entity| rest.starts_with(entity))
}

/// Printable 7-bit ASCII, including the whitespace controls.
fn is_printable(c: &char) -> bool {
    c.is_ascii_graphic() || is_ascii_space(*c)
}

fn is_ascii_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

fn collapse_whitespace(value: &str) -> String {
    value
        .split(is_ascii_space)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_non_ascii() {
        assert_eq!(Some("caf".to_string()), sanitize_field(Some("café")));
        assert_eq!(
            Some("Zo Saldaa".to_string()),
            sanitize_field(Some("Zoë Saldaña"))
        );
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(Some("a b".to_string()), sanitize_field(Some("  a   b ")));
        assert_eq!(
            Some("first second third".to_string()),
            sanitize_field(Some("first\t\tsecond\r\n third\x0b"))
        );
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            Some("&lt;b&gt;hi&lt;/b&gt;".to_string()),
            sanitize_field(Some("<b>hi</b>"))
        );
        assert_eq!(
            Some("Tom &amp; Jerry&#x27;s &quot;cheese&quot;".to_string()),
            sanitize_field(Some("Tom & Jerry's \"cheese\""))
        );
    }

    #[test]
    fn rejects_missing_and_empty() {
        assert_eq!(None, sanitize_field(None));
        assert_eq!(None, sanitize_field(Some("")));
        assert_eq!(None, sanitize_field(Some("   \t\n ")));
        assert_eq!(None, sanitize_field(Some("日本語")));
        assert_eq!(None, sanitize_field(Some("\u{00a0}\u{2003}")));
    }

    #[test]
    fn enforces_length_bounds() {
        let longest = "x".repeat(255);
        assert_eq!(Some(longest.clone()), sanitize_field(Some(longest.as_str())));
        assert_eq!(None, sanitize_field(Some("x".repeat(256).as_str())));

        // The raw length is measured in characters, before anything is stripped.
        assert_eq!(None, sanitize_field(Some("é".repeat(256).as_str())));
        assert_eq!(Some("ab".to_string()), sanitize(Some("ab"), 2, 255));
        assert_eq!(None, sanitize(Some("a é"), 2, 255));
    }

    #[test]
    fn sanitize_is_idempotent() {
        let inputs = [
            "Ada Lovelace",
            "  a   b ",
            "café au lait",
            "<script>alert('x')</script>",
            "Tom & Jerry",
            "&amp;",
            "&éamp;",
            "R&D <team> \"quoted\"",
            "tabs\tand\nnewlines",
            "ada@example.com",
        ];
        for input in inputs {
            let once = sanitize_field(Some(input)).unwrap();
            assert_eq!(Some(once.clone()), sanitize_field(Some(once.as_str())), "{}", input);
        }
    }

    #[test]
    fn existing_entities_are_kept() {
        assert_eq!("&lt;b&gt;", escape_html("&lt;b&gt;"));
        assert_eq!("&amp;copy;", escape_html("&copy;"));
        assert_eq!("&amp;", escape_html("&"));
    }

    #[test]
    fn escaping_can_exceed_max_length() {
        let raw = format!("{}<<", "a".repeat(250));
        let once = sanitize_field(Some(raw.as_str())).unwrap();
        assert_eq!(258, once.len());
        assert_eq!(format!("{}&lt;&lt;", "a".repeat(250)), once);

        // The escaped value is now over the raw limit and fails a second pass.
        assert_eq!(None, sanitize_field(Some(once.as_str())));
    }
}
