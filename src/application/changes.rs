//! Changelog viewing use case

use crate::domain::Changes;
use crate::error::{Result, WwidError};
use log::debug;
use std::fs;
use std::path::PathBuf;

/// Options for viewing a changelog
#[derive(Debug, Clone, Default)]
pub struct ChangesOptions {
    /// Version query, e.g. `2.1`, `> 1.0`, `1.0 - 1.3`
    pub lookup: Option<String>,

    /// Only keep entries containing this text
    pub search: Option<String>,

    /// Print bullet entries without version headings
    pub changes_only: bool,

    /// Only the newest remaining release
    pub latest: bool,
}

/// Service for reading a changelog file
pub struct ChangesService {
    path: PathBuf,
}

impl ChangesService {
    pub fn new(path: PathBuf) -> Self {
        ChangesService { path }
    }

    /// Read, filter and render the changelog
    pub fn execute(&self, options: &ChangesOptions) -> Result<String> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            WwidError::Changelog(format!(
                "Error locating changelog {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let mut changes = Changes::parse(&content)?;
        changes.changes_only = options.changes_only;

        if let Some(query) = &options.lookup {
            changes.lookup(query)?;
        }
        if let Some(query) = &options.search {
            changes.search(query);
        }
        debug!("{} changelog sections selected", changes.changes.len());

        if options.latest {
            return Ok(changes.latest().unwrap_or_default());
        }
        Ok(changes.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CHANGELOG: &str = "### 1.1.0\n\n- Added recent\n\n### 1.0.0\n\n- First\n";

    fn service(temp: &TempDir) -> ChangesService {
        let path = temp.path().join("CHANGELOG.md");
        fs::write(&path, CHANGELOG).unwrap();
        ChangesService::new(path)
    }

    #[test]
    fn test_execute_full() {
        let temp = TempDir::new().unwrap();
        let out = service(&temp).execute(&ChangesOptions::default()).unwrap();
        assert_eq!(out, "### 1.1.0\n\n- Added recent\n\n### 1.0.0\n\n- First");
    }

    #[test]
    fn test_execute_lookup_changes_only() {
        let temp = TempDir::new().unwrap();
        let options = ChangesOptions {
            lookup: Some("1.1".to_string()),
            changes_only: true,
            ..Default::default()
        };
        let out = service(&temp).execute(&options).unwrap();
        assert_eq!(out, "- Added recent\n");
    }

    #[test]
    fn test_execute_latest() {
        let temp = TempDir::new().unwrap();
        let options = ChangesOptions {
            latest: true,
            ..Default::default()
        };
        let out = service(&temp).execute(&options).unwrap();
        assert_eq!(out, "### 1.1.0\n\n- Added recent");
    }

    #[test]
    fn test_execute_latest_after_search_without_match() {
        let temp = TempDir::new().unwrap();
        let options = ChangesOptions {
            search: Some("nothing like this".to_string()),
            latest: true,
            ..Default::default()
        };
        assert_eq!(service(&temp).execute(&options).unwrap(), "");
    }

    #[test]
    fn test_missing_changelog() {
        let temp = TempDir::new().unwrap();
        let result = ChangesService::new(temp.path().join("nope.md")).execute(&ChangesOptions::default());
        assert!(matches!(result, Err(WwidError::Changelog(_))));
    }
}
