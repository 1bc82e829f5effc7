//! Error types for wwid

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the wwid application
#[derive(Debug, Error)]
pub enum WwidError {
    #[error("Activity log not found: {0}")]
    DoingFileNotFound(PathBuf),

    #[error("Section not found: {0}")]
    SectionNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Changelog error: {0}")]
    Changelog(String),

    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl WwidError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            WwidError::DoingFileNotFound(_) => 2,
            WwidError::SectionNotFound(_) => 3,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            WwidError::DoingFileNotFound(path) => {
                format!(
                    "Activity log not found: {}\n\n\
                    Suggestions:\n\
                    • Pass the log location explicitly: wwid --file ~/what_was_i_doing.md recent\n\
                    • Set doing_file in your config (wwid config doing_file shows the current value)\n\
                    • Set WWID_CONFIG to point at a config file that names your log",
                    path.display()
                )
            }
            WwidError::SectionNotFound(name) => {
                format!(
                    "No section matching '{}'\n\n\
                    Suggestions:\n\
                    • Section names are case-insensitive and may be abbreviated\n\
                    • Use --section All to list entries from every section",
                    name
                )
            }
            WwidError::InvalidVersion(version) => {
                format!(
                    "Invalid version: '{}'\n\n\
                    Valid lookups:\n\
                    • 1.2.3, 1.2 or 1\n\
                    • < 1.2, > 1.2, before 1.2, since 1.2\n\
                    • 1.0 - 1.3 (range)",
                    version
                )
            }
            WwidError::Config(msg) => {
                if msg.contains("Failed to parse") {
                    format!(
                        "{}\n\n\
                        Config files are TOML. Check the file named above for syntax errors.",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using WwidError
pub type Result<T> = std::result::Result<T, WwidError>;
