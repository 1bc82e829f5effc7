//! wwid - What was I doing?
//!
//! A command-line activity log reader that renders timestamped entries
//! through user-configurable templates.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::WwidError;
