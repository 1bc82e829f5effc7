//! Time totals per tag

use crate::domain::entry::Entry;
use crate::domain::relative_time::clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Sort direction for tag totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            _ => Err(format!(
                "Invalid sort order: '{}'. Valid orders are: asc, desc",
                s
            )),
        }
    }
}

/// Accumulated seconds for every tag, excluding `done`
pub fn tag_times(entries: &[Entry]) -> BTreeMap<String, i64> {
    let mut totals = BTreeMap::new();
    for entry in entries {
        let Some(seconds) = entry.interval_seconds() else {
            continue;
        };
        for tag in entry.tags().into_iter().filter(|t| t != "done") {
            *totals.entry(tag).or_insert(0) += seconds;
        }
    }
    totals
}

/// Text summary of time spent per tag.
///
/// Tags are sorted by name or by total time, in `order`. Returns an empty
/// string when no entry carries a usable `@done` date.
pub fn summarize(entries: &[Entry], sort_by_name: bool, order: SortOrder) -> String {
    let total: i64 = entries.iter().filter_map(Entry::interval_seconds).sum();
    if total == 0 {
        return String::new();
    }

    let mut rows: Vec<(String, i64)> = tag_times(entries).into_iter().collect();
    if sort_by_name {
        rows.sort_by(|a, b| a.0.cmp(&b.0));
    } else {
        rows.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    }
    if order == SortOrder::Desc {
        rows.reverse();
    }

    let width = rows.iter().map(|(tag, _)| tag.len()).max().unwrap_or(0) + 1;

    let mut output = String::from("\n--- Tag Totals ---\n");
    for (tag, seconds) in &rows {
        let label = format!("{}:", tag);
        output.push_str(&format!("{:<width$} {}\n", label, clock(*seconds), width = width));
    }
    output.push_str(&format!("\nTotal tracked: {}\n", clock(total)));
    output
}
