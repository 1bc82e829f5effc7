//! Infrastructure layer - Configuration, log file and terminal access

pub mod config;
pub mod doing_file;
pub mod terminal;

pub use config::{Settings, TagSort, TemplateSettings};
pub use doing_file::{ActivityLog, DoingFile, EntryStore};
pub use terminal::ColorChoice;
