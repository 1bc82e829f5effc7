//! Logged activity entries

use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::OnceLock;

const DONE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Regex for `@tag` tokens, optionally followed by a `(value)`
fn tag_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?:^|\s)@([\w.-]+)(?:\(([^)]*)\))?").unwrap())
}

/// One logged activity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub date: NaiveDateTime,
    pub title: String,
    pub note: Vec<String>,
    pub section: Option<String>,
}

impl Entry {
    pub fn new(date: NaiveDateTime, title: impl Into<String>) -> Self {
        Entry {
            date,
            title: title.into(),
            note: Vec::new(),
            section: None,
        }
    }

    pub fn with_note<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.note = lines.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Tags in the title, lowercased, without duplicates, in order of appearance
    pub fn tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        for caps in tag_regex().captures_iter(&self.title) {
            let tag = caps[1].to_lowercase();
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        tags
    }

    /// Completion time recorded in a `@done(YYYY-MM-DD HH:MM)` tag
    pub fn done_date(&self) -> Option<NaiveDateTime> {
        tag_regex()
            .captures_iter(&self.title)
            .filter(|caps| caps[1].eq_ignore_ascii_case("done"))
            .find_map(|caps| {
                let value = caps.get(2)?.as_str().trim();
                NaiveDateTime::parse_from_str(value, DONE_FORMAT).ok()
            })
    }

    /// Seconds between the entry's start and its `@done` date
    pub fn interval_seconds(&self) -> Option<i64> {
        let done = self.done_date()?;
        let seconds = (done - self.date).num_seconds();
        (seconds >= 0).then_some(seconds)
    }
}
