//! Recoloring of `@tag` tokens in rendered text

use crate::domain::color::escape_regex;

/// Characters that end a tag token
fn ends_tag(c: char) -> bool {
    c.is_whitespace() || c == '(' || c == '\x1b'
}

/// Wrap every `@tag` in `tag_escape`, closing each with the color escape
/// that was last seen before it (or `default_escape` if none was).
///
/// A tag starts at an `@` at the beginning of the text, after whitespace,
/// or directly after an escape sequence.
pub fn recolor_tags(text: &str, tag_escape: &str, default_escape: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_color = default_escape;
    let mut at_boundary = true;
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];

        if let Some(m) = rest
            .starts_with('\x1b')
            .then(|| escape_regex().find(rest))
            .flatten()
            .filter(|m| m.start() == 0)
        {
            last_color = &rest[..m.end()];
            out.push_str(last_color);
            pos += m.end();
            at_boundary = true;
            continue;
        }

        let Some(c) = rest.chars().next() else {
            break;
        };

        if c == '@' && at_boundary {
            let len = rest[1..]
                .find(ends_tag)
                .map(|i| i + 1)
                .unwrap_or(rest.len());
            if len > 1 {
                out.push_str(tag_escape);
                out.push_str(&rest[..len]);
                out.push_str(last_color);
                pos += len;
                at_boundary = false;
                continue;
            }
        }

        out.push(c);
        pos += c.len_utf8();
        at_boundary = c.is_whitespace();
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const TAG: &str = "\x1b[33m";
    const DEFAULT: &str = "\x1b[0;39m";

    #[test]
    fn test_tag_without_prior_color_closes_with_default() {
        let out = recolor_tags("Fixed the @bug now", TAG, DEFAULT);
        assert_eq!(out, format!("Fixed the {}@bug{} now", TAG, DEFAULT));
    }

    #[test]
    fn test_tag_closes_with_last_seen_color() {
        let input = "\x1b[1;37mtitle @one \x1b[32mmore @two";
        let out = recolor_tags(input, TAG, DEFAULT);
        assert_eq!(
            out,
            format!(
                "\x1b[1;37mtitle {TAG}@one\x1b[1;37m \x1b[32mmore {TAG}@two\x1b[32m"
            )
        );
    }

    #[test]
    fn test_tag_stops_at_parenthesis() {
        let out = recolor_tags("x @done(2024-01-15 10:00)", TAG, DEFAULT);
        assert_eq!(out, format!("x {TAG}@done{DEFAULT}(2024-01-15 10:00)"));
    }

    #[test]
    fn test_email_untouched() {
        let out = recolor_tags("mail me@example.com", TAG, DEFAULT);
        assert_eq!(out, "mail me@example.com");
    }

    #[test]
    fn test_lone_at_sign_untouched() {
        assert_eq!(recolor_tags("a @ b", TAG, DEFAULT), "a @ b");
    }

    #[test]
    fn test_tag_right_after_escape() {
        let out = recolor_tags("\x1b[31m@urgent", TAG, DEFAULT);
        assert_eq!(out, format!("\x1b[31m{TAG}@urgent\x1b[31m"));
    }

    #[test]
    fn test_multibyte_text() {
        let out = recolor_tags("— @tag —", TAG, DEFAULT);
        assert_eq!(out, format!("— {TAG}@tag{DEFAULT} —"));
    }
}
