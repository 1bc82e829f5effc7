//! Parser for the note directive family
//!
//! Grammar, after the leading `%`:
//!
//! ```text
//! note-directive := "note" | "idnote" | "odnote" | "chompnote"
//!                 | marker? indent? prefix? "note"
//! marker         := "^" <any char>
//! indent         := <indent char>? <digits>
//! prefix         := <any char> (" " | "_" | "t")?
//! ```
//!
//! An indent character of `t` means tab; any other allowed character (or
//! none) means space.

use crate::domain::note::{Indent, NoteStyle};
use std::ops::Range;

const KEYWORD: &str = "note";

/// One note directive found in a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDirective {
    pub style: NoteStyle,
    /// Byte range of the directive in the template, including the `%`
    pub span: Range<usize>,
}

/// Find every note directive in `template`, left to right
pub fn find_note_directives(template: &str) -> Vec<NoteDirective> {
    let mut found = Vec::new();
    let mut offset = 0;

    while let Some(rel) = template[offset..].find('%') {
        let start = offset + rel;
        let body = &template[start + 1..];
        match parse_note_directive(body) {
            Some((style, len)) => {
                let end = start + 1 + len;
                found.push(NoteDirective {
                    style,
                    span: start..end,
                });
                offset = end;
            }
            None => offset = start + 1,
        }
    }

    found
}

/// Replace every note directive in `template` with the output of `render`
pub fn replace_note_directives<F>(template: &str, mut render: F) -> String
where
    F: FnMut(&NoteStyle) -> String,
{
    let mut out = String::with_capacity(template.len());
    let mut last = 0;
    for directive in find_note_directives(template) {
        out.push_str(&template[last..directive.span.start]);
        out.push_str(&render(&directive.style));
        last = directive.span.end;
    }
    out.push_str(&template[last..]);
    out
}

/// Parse a note directive at the start of `body` (the text after `%`).
///
/// Returns the style and the number of bytes consumed.
pub fn parse_note_directive(body: &str) -> Option<(NoteStyle, usize)> {
    for (word, style) in [
        ("chompnote", NoteStyle::Chomped),
        ("idnote", NoteStyle::Indented),
        ("odnote", NoteStyle::Outdented),
        ("note", NoteStyle::Plain),
    ] {
        if body.starts_with(word) {
            return Some((style, word.len()));
        }
    }

    parse_prefixed(body)
}

fn parse_prefixed(body: &str) -> Option<(NoteStyle, usize)> {
    let mut cursor = Cursor::new(body);

    let marker = if cursor.peek() == Some('^') {
        cursor.bump();
        Some(cursor.bump()?)
    } else {
        None
    };

    let indent = parse_indent(&mut cursor);

    let prefix = if cursor.rest().starts_with(KEYWORD) {
        String::new()
    } else {
        let first = cursor.bump()?;
        let mut prefix = first.to_string();
        if !cursor.rest().starts_with(KEYWORD) {
            let second = cursor.bump()?;
            prefix.push(match second {
                ' ' | '_' => ' ',
                't' => '\t',
                _ => return None,
            });
        }
        prefix
    };

    if !cursor.rest().starts_with(KEYWORD) {
        return None;
    }
    let consumed = cursor.pos + KEYWORD.len();

    Some((
        NoteStyle::Prefixed {
            marker,
            indent,
            prefix,
        },
        consumed,
    ))
}

/// Optional indent: an indent character followed by a count, or a bare count
fn parse_indent(cursor: &mut Cursor) -> Option<Indent> {
    let mut probe = cursor.clone();
    let ch = match probe.peek()? {
        c if c.is_ascii_digit() => None,
        c if is_indent_char(c) => {
            probe.bump();
            Some(c)
        }
        _ => return None,
    };

    let digits: String = probe.rest().chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let count = digits.parse().ok()?;
    probe.pos += digits.len();
    *cursor = probe;

    Some(Indent {
        ch: if ch == Some('t') { '\t' } else { ' ' },
        count,
    })
}

fn is_indent_char(c: char) -> bool {
    matches!(c, ' ' | '_' | 't') || !c.is_ascii_alphanumeric()
}

#[derive(Debug, Clone)]
struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Cursor { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }
}
