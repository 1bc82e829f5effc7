//! Application layer - Use cases and orchestration

pub mod changes;
pub mod recent;
pub mod show_config;

pub use changes::{ChangesOptions, ChangesService};
pub use recent::{RecentOptions, RecentService};
pub use show_config::ConfigService;
