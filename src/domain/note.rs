//! Note formatting: cleanup, bullets, wrapping and indentation

use crate::domain::wrap::wrap;

/// Bullet placed in front of every note line
pub const BULLET: &str = "— ";

/// Indentation made of a repeated character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indent {
    pub ch: char,
    pub count: usize,
}

impl Indent {
    pub fn render(&self) -> String {
        std::iter::repeat(self.ch).take(self.count).collect()
    }
}

/// How a note block is laid out in the rendered output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteStyle {
    /// `%note`: one tab per line
    Plain,
    /// `%idnote`: two tabs per line
    Indented,
    /// `%odnote`: no indentation
    Outdented,
    /// `%chompnote`: all lines collapsed into one
    Chomped,
    /// `%^>t2-note` and friends: marker, indent and prefix before each line
    Prefixed {
        marker: Option<char>,
        indent: Option<Indent>,
        prefix: String,
    },
}

impl NoteStyle {
    /// Text placed before each line of the note block
    pub fn line_prefix(&self) -> String {
        match self {
            NoteStyle::Plain => "\t".to_string(),
            NoteStyle::Indented => "\t\t".to_string(),
            NoteStyle::Outdented | NoteStyle::Chomped => String::new(),
            NoteStyle::Prefixed {
                marker,
                indent,
                prefix,
            } => {
                let mut out = String::new();
                if let Some(m) = marker {
                    out.push(*m);
                }
                if let Some(indent) = indent {
                    out.push_str(&indent.render());
                }
                out.push_str(prefix);
                out
            }
        }
    }
}

/// Normalize one note line: drop leading tabs and any existing bullet,
/// then put the standard bullet in front.
pub fn normalize_line(line: &str) -> String {
    let body = line.trim();
    let body = body
        .strip_prefix(BULLET)
        .or_else(|| body.strip_prefix("- "))
        .unwrap_or(body);
    format!("{}{}", BULLET, body.trim_start())
}

/// A note ready for display: cleaned, bulleted and wrapped lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormattedNote {
    lines: Vec<String>,
}

impl FormattedNote {
    /// Clean up raw note lines. Lines that are blank after trimming are
    /// dropped; a positive `wrap_width` wraps each line on its own.
    pub fn new<S: AsRef<str>>(raw: &[S], wrap_width: usize) -> Self {
        let lines = raw
            .iter()
            .map(|line| line.as_ref().trim())
            .filter(|line| !line.is_empty())
            .map(normalize_line)
            .flat_map(|line| wrap(&line, wrap_width))
            .collect();

        FormattedNote { lines }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Lines with the style's prefix applied and two trailing spaces
    pub fn indented_lines(&self, style: &NoteStyle) -> Vec<String> {
        let prefix = style.line_prefix();
        self.lines
            .iter()
            .map(|line| format!("{}{}  ", prefix, line.trim()))
            .collect()
    }

    /// Single-line form: joined with spaces, whitespace runs collapsed
    pub fn chomped(&self) -> String {
        self.lines
            .iter()
            .flat_map(|line| line.split_whitespace())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Text that replaces a note directive of the given style
    pub fn render(&self, style: &NoteStyle) -> String {
        match style {
            NoteStyle::Chomped => self.chomped(),
            _ => format!("\n{}", self.indented_lines(style).join("\n")),
        }
    }
}
