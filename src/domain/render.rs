//! Template rendering for entries
//!
//! A template is free text with `%directive` placeholders. Rendering runs a
//! fixed sequence of substitution passes; each pass takes the previous
//! pass's output and returns a new string:
//!
//! 1. `%colorname` and `{xy}` color shorthand
//! 2. `%date`
//! 3. `%interval`
//! 4. `%shortdate`
//! 5. `%title` (wrapped, optionally highlighted)
//! 6. `%section`
//! 7. `@tag` recoloring, when a tag color is configured
//! 8. note directives (`%note`, `%idnote`, `%odnote`, `%chompnote`, `%^>t2-note`, ...)
//! 9. `%hr`, `%hr_under`
//! 10. `%n`, `%t`
//!
//! Unknown `%word` tokens are left in place. Text taken from the entry
//! is never read as a directive by a later pass: a `%` inside a title,
//! section or note stays literal.

use crate::domain::color::Palette;
use crate::domain::directive::replace_note_directives;
use crate::domain::entry::Entry;
use crate::domain::note::FormattedNote;
use crate::domain::relative_time::{humanize, relative};
use crate::domain::tag_color::recolor_tags;
use crate::domain::totals::{summarize, SortOrder};
use crate::domain::wrap::wrap_joined;
use chrono::{Local, NaiveDateTime};
use log::warn;
use regex::{Captures, Regex, RegexBuilder};
use std::fmt::Write;
use std::sync::OnceLock;

/// Date format used when a configured one cannot be rendered
pub const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Columns used for `%hr` when the terminal width is unknown
pub const FALLBACK_COLUMNS: usize = 80;

/// Separator between wrapped title lines
const TITLE_CONTINUATION: &str = "\n\t ";

/// Stands in for `%` in inserted field text until the last pass
const PROTECTED_PERCENT: char = '\u{E000}';

fn protect(text: &str) -> String {
    text.replace('%', &PROTECTED_PERCENT.to_string())
}

fn unprotect(text: &str) -> String {
    text.replace(PROTECTED_PERCENT, "%")
}

fn rule_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"%hr(_under)?").unwrap())
}

/// Environment a render runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    /// Emit color escapes
    pub coloring: bool,
    /// Width for horizontal rules
    pub columns: usize,
    /// Reference time for `%shortdate`
    pub now: NaiveDateTime,
}

impl RenderContext {
    pub fn new(coloring: bool, columns: Option<usize>) -> Self {
        RenderContext {
            coloring,
            columns: columns.filter(|c| *c > 0).unwrap_or(FALLBACK_COLUMNS),
            now: Local::now().naive_local(),
        }
    }

    pub fn at(mut self, now: NaiveDateTime) -> Self {
        self.now = now;
        self
    }

    pub fn palette(&self) -> Palette {
        Palette::new(self.coloring)
    }
}

/// Formatting choices for one render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub template: String,
    pub date_format: String,
    /// Zero disables wrapping
    pub wrap_width: usize,
    pub highlight: bool,
    pub marker_tag: String,
    pub marker_color: String,
    pub tags_color: Option<String>,
    pub include_notes: bool,
    pub times: bool,
    pub totals: bool,
    /// Sort tag totals by name (`true`) or by time
    pub sort_tags: bool,
    pub tag_order: SortOrder,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            template: "%date | %title%note".to_string(),
            date_format: FALLBACK_DATE_FORMAT.to_string(),
            wrap_width: 0,
            highlight: false,
            marker_tag: "flagged".to_string(),
            marker_color: "red".to_string(),
            tags_color: None,
            include_notes: true,
            times: false,
            totals: false,
            sort_tags: true,
            tag_order: SortOrder::Asc,
        }
    }
}

impl RenderOptions {
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }
}

/// Format a date, falling back to a fixed format when `fmt` is invalid
pub fn format_date(date: NaiveDateTime, fmt: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(fmt)).is_err() {
        warn!("Invalid date format '{}', using '{}'", fmt, FALLBACK_DATE_FORMAT);
        return date.format(FALLBACK_DATE_FORMAT).to_string();
    }
    out
}

/// Renders entries through a template
pub struct Renderer<'a> {
    options: &'a RenderOptions,
    context: RenderContext,
    palette: Palette,
}

impl<'a> Renderer<'a> {
    pub fn new(options: &'a RenderOptions, context: RenderContext) -> Self {
        Renderer {
            options,
            context,
            palette: context.palette(),
        }
    }

    /// Render one entry into one block of text
    pub fn render_entry(&self, entry: &Entry) -> String {
        let output = self.substitute_colors(&self.options.template);
        let output = self.substitute_date(&output, entry);
        let output = self.substitute_interval(&output, entry);
        let output = self.substitute_shortdate(&output, entry);
        let output = self.substitute_title(&output, entry);
        let output = self.substitute_section(&output, entry);
        let output = self.recolor(&output);
        let output = self.substitute_note(&output, entry);
        let output = self.substitute_rules(&output);
        unprotect(&substitute_escapes(&output))
    }

    /// Render a batch: each block followed by a newline, plus the tag
    /// totals summary when requested
    pub fn render_batch(&self, entries: &[Entry]) -> String {
        let mut out = String::new();
        for entry in entries {
            out.push_str(&self.render_entry(entry));
            out.push('\n');
        }
        if self.options.totals {
            out.push_str(&summarize(
                entries,
                self.options.sort_tags,
                self.options.tag_order,
            ));
        }
        out
    }

    fn substitute_colors(&self, template: &str) -> String {
        let named = self.palette.substitute_names(template);
        self.palette.expand_shorthand(&named)
    }

    fn substitute_date(&self, output: &str, entry: &Entry) -> String {
        if !output.contains("%date") {
            return output.to_string();
        }
        let date = format_date(entry.date, &self.options.date_format);
        output.replacen("%date", &protect(&date), 1)
    }

    fn substitute_interval(&self, output: &str, entry: &Entry) -> String {
        if !output.contains("%interval") {
            return output.to_string();
        }
        let interval = if self.options.times {
            entry.interval_seconds().map(humanize).unwrap_or_default()
        } else {
            String::new()
        };
        output.replacen("%interval", &protect(&interval), 1)
    }

    fn substitute_shortdate(&self, output: &str, entry: &Entry) -> String {
        if !output.contains("%shortdate") {
            return output.to_string();
        }
        output.replacen("%shortdate", &relative(entry.date, self.context.now), 1)
    }

    fn substitute_title(&self, output: &str, entry: &Entry) -> String {
        if !output.contains("%title") {
            return output.to_string();
        }

        let title = entry.title.trim_end_matches('\n');
        let title = if self.options.wrap_width > 0 {
            wrap_joined(title, self.options.wrap_width, TITLE_CONTINUATION)
        } else {
            title.to_string()
        };
        let title = protect(&title);

        let title = if self.is_highlighted(entry) {
            format!(
                "{}{}{}",
                self.palette.resolve(&self.options.marker_color),
                title,
                self.palette.resolve("default")
            )
        } else {
            title
        };

        output.replacen("%title", &title, 1)
    }

    fn is_highlighted(&self, entry: &Entry) -> bool {
        if !self.options.highlight || self.options.marker_tag.is_empty() {
            return false;
        }
        let pattern = format!(r"@{}\b", regex::escape(&self.options.marker_tag));
        RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map(|re| re.is_match(&entry.title))
            .unwrap_or(false)
    }

    fn substitute_section(&self, output: &str, entry: &Entry) -> String {
        match &entry.section {
            Some(section) if output.contains("%section") => {
                output.replacen("%section", &protect(section), 1)
            }
            _ => output.to_string(),
        }
    }

    fn recolor(&self, output: &str) -> String {
        let Some(name) = &self.options.tags_color else {
            return output.to_string();
        };
        let Some(tag_escape) = self.palette.lookup(name) else {
            warn!("Unknown tags_color '{}', leaving tags uncolored", name);
            return output.to_string();
        };
        if tag_escape.is_empty() {
            return output.to_string();
        }
        recolor_tags(output, tag_escape, self.palette.resolve("default"))
    }

    fn substitute_note(&self, output: &str, entry: &Entry) -> String {
        let note = if self.options.include_notes {
            FormattedNote::new(&entry.note, self.options.wrap_width)
        } else {
            FormattedNote::default()
        };

        if note.is_empty() {
            replace_note_directives(output, |_| String::new())
        } else {
            replace_note_directives(output, |style| protect(&note.render(style)))
        }
    }

    fn substitute_rules(&self, output: &str) -> String {
        let columns = self.context.columns;
        rule_regex()
            .replace_all(output, |caps: &Captures| {
                let ch = if caps.get(1).is_some() { "_" } else { "-" };
                ch.repeat(columns)
            })
            .into_owned()
    }
}

fn substitute_escapes(output: &str) -> String {
    output.replace("%n", "\n").replace("%t", "\t")
}

/// Render one entry with the given options and context
pub fn render_entry(entry: &Entry, options: &RenderOptions, context: RenderContext) -> String {
    Renderer::new(options, context).render_entry(entry)
}

/// Render a batch of entries with the given options and context
pub fn render_batch(entries: &[Entry], options: &RenderOptions, context: RenderContext) -> String {
    Renderer::new(options, context).render_batch(entries)
}
