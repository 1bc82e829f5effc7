//! Read-only access to the plain-text activity log
//!
//! ```text
//! Currently:
//! 	- 2024-01-15 09:30 | Fixed the @bug in parser <6a1c...>
//! 		A note line
//! Archive:
//! 	- 2024-01-14 17:00 | Older entry @done(2024-01-14 18:00)
//! ```

use crate::domain::Entry;
use crate::error::{Result, WwidError};
use chrono::NaiveDateTime;
use log::{debug, warn};
use regex::Regex;
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

const ENTRY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

fn entry_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^\s*- (\d{4}-\d{2}-\d{2} \d{2}:\d{2}) \| (.*?)(?:\s+<[a-f0-9]{32}>)?\s*$")
            .unwrap()
    })
}

/// Sections and entries read from a log, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityLog {
    pub sections: Vec<String>,
    pub entries: Vec<Entry>,
}

impl ActivityLog {
    /// Parse log text. Malformed entry lines are skipped.
    pub fn parse(content: &str) -> Self {
        let mut log = ActivityLog::default();
        let mut section: Option<String> = None;

        for (idx, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let indented = line.starts_with(char::is_whitespace);
            if !indented && line.trim_end().ends_with(':') {
                let name = line.trim_end().trim_end_matches(':').trim().to_string();
                if !log.sections.contains(&name) {
                    log.sections.push(name.clone());
                }
                section = Some(name);
                continue;
            }

            let Some(current) = &section else {
                debug!("Line {} is outside any section, skipping", idx + 1);
                continue;
            };

            if let Some(caps) = entry_regex().captures(line) {
                match NaiveDateTime::parse_from_str(&caps[1], ENTRY_DATE_FORMAT) {
                    Ok(date) => log
                        .entries
                        .push(Entry::new(date, caps[2].trim()).with_section(current.clone())),
                    Err(e) => warn!("Line {}: invalid entry date '{}': {}", idx + 1, &caps[1], e),
                }
                continue;
            }

            match log.entries.last_mut() {
                Some(entry) if indented && entry.section.as_deref() == Some(current.as_str()) => {
                    entry.note.push(line.trim().to_string());
                }
                _ => warn!("Line {} is not an entry or note, skipping", idx + 1),
            }
        }

        log
    }

    /// Resolve a section name: exact match ignoring case, then prefix match
    pub fn guess_section(&self, name: &str) -> Option<&str> {
        let wanted = name.to_lowercase();
        self.sections
            .iter()
            .find(|s| s.to_lowercase() == wanted)
            .or_else(|| {
                self.sections
                    .iter()
                    .find(|s| s.to_lowercase().starts_with(&wanted))
            })
            .map(String::as_str)
    }
}

/// Source of logged entries
pub trait EntryStore {
    /// Read every section and entry
    fn load(&self) -> Result<ActivityLog>;
}

/// Activity log stored in a text file
#[derive(Debug, Clone)]
pub struct DoingFile {
    path: PathBuf,
}

impl DoingFile {
    pub fn new(path: PathBuf) -> Self {
        DoingFile { path }
    }
}

impl EntryStore for DoingFile {
    fn load(&self) -> Result<ActivityLog> {
        let contents = fs::read_to_string(&self.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                WwidError::DoingFileNotFound(self.path.clone())
            } else {
                WwidError::Io(e)
            }
        })?;

        let log = ActivityLog::parse(&contents);
        debug!(
            "Loaded {} entries in {} sections from {}",
            log.entries.len(),
            log.sections.len(),
            self.path.display()
        );
        Ok(log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = "\
Currently:
\t- 2024-01-15 09:30 | Fixed the @bug in parser <6a1c2f0d9e8b7a6c5d4e3f2a1b0c9d8e>
\t\tfirst line
\t\t- second line
\t- 2024-01-15 11:00 | Review PR
Later:
Archive:
\t- 2024-01-14 17:00 | Older entry @done(2024-01-14 18:00)
\t- 2024-13-99 25:00 | Bad date
";

    #[test]
    fn test_parse_sections_and_entries() {
        let log = ActivityLog::parse(SAMPLE);
        assert_eq!(log.sections, vec!["Currently", "Later", "Archive"]);
        assert_eq!(log.entries.len(), 3);

        let first = &log.entries[0];
        assert_eq!(first.title, "Fixed the @bug in parser");
        assert_eq!(first.note, vec!["first line", "- second line"]);
        assert_eq!(first.section.as_deref(), Some("Currently"));

        assert!(log.entries[1].note.is_empty());
        assert_eq!(log.entries[2].section.as_deref(), Some("Archive"));
        assert_eq!(log.entries[2].interval_seconds(), Some(3_600));
    }

    #[test]
    fn test_lines_outside_sections_ignored() {
        let log = ActivityLog::parse("\t- 2024-01-15 09:30 | Orphan\nCurrently:\n");
        assert!(log.entries.is_empty());
        assert_eq!(log.sections, vec!["Currently"]);
    }

    #[test]
    fn test_guess_section() {
        let log = ActivityLog::parse(SAMPLE);
        assert_eq!(log.guess_section("currently"), Some("Currently"));
        assert_eq!(log.guess_section("arch"), Some("Archive"));
        assert_eq!(log.guess_section("nope"), None);
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let store = DoingFile::new(temp.path().join("missing.md"));
        match store.load() {
            Err(WwidError::DoingFileNotFound(path)) => assert!(path.ends_with("missing.md")),
            other => panic!("Expected DoingFileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_load_from_disk() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("doing.md");
        fs::write(&path, SAMPLE).unwrap();
        let log = DoingFile::new(path).load().unwrap();
        assert_eq!(log.entries.len(), 3);
    }
}
