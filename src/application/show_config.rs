//! Config inspection use case

use crate::error::Result;
use crate::infrastructure::Settings;

/// Service for reading merged configuration values
pub struct ConfigService {
    settings: Settings,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(settings: Settings) -> Self {
        ConfigService { settings }
    }

    /// Get a single value by dotted key
    pub fn get(&self, key: &str) -> Result<String> {
        self.settings.get(key)
    }

    /// All settings as TOML
    pub fn list(&self) -> Result<String> {
        self.settings.to_toml()
    }
}
