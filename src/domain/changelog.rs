//! Changelog parsing and version lookup

use crate::error::{Result, WwidError};
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::sync::OnceLock;

fn heading_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?m)^### (\d+\.\d+\.\d+\w*)[^\n]*$").unwrap())
}

fn version_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(\d+)(?:\.(\d+))?(?:\.(\d+))?([a-zA-Z]\w*)?").unwrap())
}

fn range_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^([\d.]+) *-+ *([\d.]+)$").unwrap())
}

fn comparison_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"[<>] *[\d.]+").unwrap())
}

/// How a change's version must relate to a queried version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Older,
    Newer,
    Equal,
}

/// A release version. Omitted minor/patch components act as wildcards
/// when comparing for equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub major: u32,
    pub minor: Option<u32>,
    pub patch: Option<u32>,
    pub suffix: String,
}

impl Version {
    pub fn parse(input: &str) -> Result<Self> {
        let caps = version_regex()
            .captures(input)
            .ok_or_else(|| WwidError::InvalidVersion(input.to_string()))?;

        let number = |idx: usize| -> Result<Option<u32>> {
            caps.get(idx)
                .map(|m| {
                    m.as_str()
                        .parse()
                        .map_err(|_| WwidError::InvalidVersion(input.to_string()))
                })
                .transpose()
        };

        Ok(Version {
            major: number(1)?.unwrap_or(0),
            minor: number(2)?,
            patch: number(3)?,
            suffix: caps.get(4).map(|m| m.as_str().to_string()).unwrap_or_default(),
        })
    }

    fn components(&self) -> (u32, u32, u32) {
        (
            self.major,
            self.minor.unwrap_or(0),
            self.patch.unwrap_or(0),
        )
    }

    fn matches(&self, query: &Version) -> bool {
        self.major == query.major
            && query.minor.is_none_or(|m| Some(m) == self.minor)
            && query.patch.is_none_or(|p| Some(p) == self.patch)
    }

    /// Does this version relate to `other` as `comparison` asks?
    pub fn compare(&self, other: &Version, comparison: Comparison) -> bool {
        match comparison {
            Comparison::Equal => self.matches(other),
            Comparison::Older => self.components().cmp(&other.components()) == Ordering::Less,
            Comparison::Newer => self.components().cmp(&other.components()) == Ordering::Greater,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.major)?;
        if let Some(minor) = self.minor {
            write!(f, ".{}", minor)?;
        }
        if let Some(patch) = self.patch {
            write!(f, ".{}", patch)?;
        }
        write!(f, "{}", self.suffix)
    }
}

/// One release section of a changelog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub version: Version,
    pub body: String,
    /// Entries kept by a search; `None` keeps everything
    filter: Option<Vec<String>>,
}

impl Change {
    pub fn new(version: Version, body: impl Into<String>) -> Self {
        Change {
            version,
            body: body.into(),
            filter: None,
        }
    }

    /// Bullet entries (`- ` or `* ` lines), filtered by any search
    pub fn entries(&self) -> Vec<String> {
        if let Some(kept) = &self.filter {
            return kept.clone();
        }
        self.body
            .lines()
            .map(str::trim)
            .filter(|line| line.starts_with("- ") || line.starts_with("* "))
            .map(|line| line[2..].trim().to_string())
            .collect()
    }

    fn search(&mut self, query: &str) -> bool {
        let needle = query.to_lowercase();
        let kept: Vec<String> = self
            .entries()
            .into_iter()
            .filter(|entry| entry.to_lowercase().contains(&needle))
            .collect();
        let any = !kept.is_empty();
        self.filter = Some(kept);
        any
    }

    /// Entries only, one bullet per line
    pub fn changes_only(&self) -> String {
        self.entries()
            .iter()
            .map(|e| format!("- {}\n", e))
            .collect()
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {}", self.version)?;
        writeln!(f)?;
        match &self.filter {
            Some(_) => write!(f, "{}", self.changes_only().trim_end()),
            None => write!(f, "{}", self.body),
        }
    }
}

/// A parsed changelog, newest release first as written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Changes {
    pub changes: Vec<Change>,
    pub changes_only: bool,
}

impl Changes {
    /// Split changelog text on `### X.Y.Z` headings
    pub fn parse(content: &str) -> Result<Self> {
        let headings: Vec<_> = heading_regex().captures_iter(content).collect();
        if headings.is_empty() {
            return Err(WwidError::Changelog(
                "No version headings (### X.Y.Z) found".to_string(),
            ));
        }

        let mut changes = Vec::with_capacity(headings.len());
        for (idx, caps) in headings.iter().enumerate() {
            let heading = caps.get(0).map(|m| m.end()).unwrap_or(0);
            let end = headings
                .get(idx + 1)
                .and_then(|next| next.get(0))
                .map(|m| m.start())
                .unwrap_or(content.len());
            let version = Version::parse(&caps[1])?;
            changes.push(Change::new(version, content[heading..end].trim()));
        }

        Ok(Changes {
            changes,
            changes_only: false,
        })
    }

    /// Keep only changes matching a version query such as `1.2`, `< 2.0`,
    /// `since 1.4`, `1.0 - 1.3` or `> 1.0 < 2.0`
    pub fn lookup(&mut self, query: &str) -> Result<()> {
        let query = query.trim();

        if let Some(caps) = range_regex().captures(query) {
            self.lookup(&format!("> {}", &caps[1]))?;
            return self.lookup(&format!("< {}", &caps[2]));
        }

        let comparisons: Vec<&str> = comparison_regex()
            .find_iter(query)
            .map(|m| m.as_str())
            .collect();
        if comparisons.len() > 1 {
            for part in comparisons {
                self.lookup(part)?;
            }
            return Ok(());
        }

        let comparison = if ["<", "prior", "before", "older"]
            .iter()
            .any(|w| query.contains(w))
        {
            Comparison::Older
        } else if [">", "since", "after", "newer"].iter().any(|w| query.contains(w)) {
            Comparison::Newer
        } else {
            Comparison::Equal
        };

        let version = Version::parse(query)?;
        self.changes
            .retain(|change| change.version.compare(&version, comparison));
        Ok(())
    }

    /// Keep only entries containing `query` (case-insensitive); drop
    /// changes left without entries
    pub fn search(&mut self, query: &str) {
        self.changes.retain_mut(|change| change.search(query));
    }

    /// Most recent change
    pub fn latest(&self) -> Option<String> {
        let change = self.changes.first()?;
        Some(if self.changes_only {
            change.changes_only()
        } else {
            change.to_string()
        })
    }
}

impl fmt::Display for Changes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .changes
            .iter()
            .map(|c| {
                if self.changes_only {
                    c.changes_only()
                } else {
                    c.to_string()
                }
            })
            .collect();
        let sep = if self.changes_only { "" } else { "\n\n" };
        write!(f, "{}", rendered.join(sep))
    }
}
