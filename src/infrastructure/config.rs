//! Configuration management
//!
//! Settings are layered, later layers winning key by key:
//! built-in defaults, the user file, then every `.wwid.toml` between the
//! filesystem root and the working directory (nearest last).

use crate::domain::SortOrder;
use crate::error::{Result, WwidError};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Environment variable naming the user config file
pub const CONFIG_ENV: &str = "WWID_CONFIG";

/// File name of per-directory overrides
pub const LOCAL_CONFIG_NAME: &str = ".wwid.toml";

/// Template used when a named template is absent
pub const DEFAULT_TEMPLATE: &str = "default";

/// How tag totals are sorted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagSort {
    #[default]
    Name,
    Time,
}

impl FromStr for TagSort {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(TagSort::Name),
            "time" => Ok(TagSort::Time),
            _ => Err(format!(
                "Invalid tag sort: '{}'. Valid values are: name, time",
                s
            )),
        }
    }
}

/// One named output template. Unset keys inherit from `templates.default`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrap_width: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags_color: Option<String>,
}

impl TemplateSettings {
    fn new(date_format: &str, template: &str, wrap_width: usize) -> Self {
        TemplateSettings {
            date_format: Some(date_format.to_string()),
            template: Some(template.to_string()),
            wrap_width: Some(wrap_width),
            ..Default::default()
        }
    }

    /// Fill unset keys from `base`
    pub fn merged_over(&self, base: &TemplateSettings) -> TemplateSettings {
        TemplateSettings {
            date_format: self.date_format.clone().or_else(|| base.date_format.clone()),
            template: self.template.clone().or_else(|| base.template.clone()),
            wrap_width: self.wrap_width.or(base.wrap_width),
            order: self.order.or(base.order),
            count: self.count.or(base.count),
            tags_color: self.tags_color.clone().or_else(|| base.tags_color.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub doing_file: String,
    pub current_section: String,
    pub marker_tag: String,
    pub marker_color: String,
    pub include_notes: bool,
    pub tag_sort: TagSort,
    pub templates: BTreeMap<String, TemplateSettings>,
}

impl Default for Settings {
    fn default() -> Self {
        let mut templates = BTreeMap::new();
        templates.insert(
            DEFAULT_TEMPLATE.to_string(),
            TemplateSettings {
                order: Some(SortOrder::Asc),
                ..TemplateSettings::new("%Y-%m-%d %H:%M", "%date | %title%note", 0)
            },
        );
        templates.insert(
            "today".to_string(),
            TemplateSettings {
                order: Some(SortOrder::Asc),
                ..TemplateSettings::new("%_I:%M%P", "%date: %title %interval%note", 0)
            },
        );
        templates.insert(
            "last".to_string(),
            TemplateSettings::new("%-I:%M%P on %a", "%title (at %date)%odnote", 88),
        );
        templates.insert(
            "recent".to_string(),
            TemplateSettings {
                order: Some(SortOrder::Asc),
                count: Some(10),
                ..TemplateSettings::new("%_I:%M%P", "%shortdate: %title (%section)", 88)
            },
        );

        Settings {
            doing_file: "~/what_was_i_doing.md".to_string(),
            current_section: "Currently".to_string(),
            marker_tag: "flagged".to_string(),
            marker_color: "red".to_string(),
            include_notes: true,
            tag_sort: TagSort::Name,
            templates,
        }
    }
}

impl Settings {
    /// Load settings for the current process: user file from
    /// `WWID_CONFIG` (or the platform config dir) and local overrides
    /// found from the working directory upward
    pub fn load() -> Result<Self> {
        let cwd = std::env::current_dir()?;
        Self::load_from(user_config_path().as_deref(), &cwd)
    }

    /// Load settings from an explicit user file and starting directory
    pub fn load_from(user_file: Option<&Path>, start: &Path) -> Result<Self> {
        let mut layers = Vec::new();

        match user_file {
            Some(path) if path.is_file() => {
                debug!("Reading user config {}", path.display());
                layers.push(read_table(path)?);
            }
            Some(path) => info!(
                "Config file {} doesn't exist, using default configuration",
                path.display()
            ),
            None => info!("No config directory, using default configuration"),
        }

        let locals = find_local_configs(start, user_file);
        if !locals.is_empty() {
            let list: Vec<String> = locals.iter().map(|p| p.display().to_string()).collect();
            debug!("Local config files found: {}", list.join(", "));
        }
        for path in &locals {
            layers.push(read_table(path)?);
        }

        Self::from_layers(layers)
    }

    /// Merge TOML tables over the defaults, in order
    pub fn from_layers(layers: Vec<toml::Table>) -> Result<Self> {
        let mut merged = toml::Table::try_from(Settings::default())?;
        for layer in layers {
            deep_merge(&mut merged, layer);
        }
        Ok(toml::Value::Table(merged).try_into()?)
    }

    /// A named template merged over `templates.default`
    pub fn template(&self, name: &str) -> TemplateSettings {
        let base = self
            .templates
            .get(DEFAULT_TEMPLATE)
            .cloned()
            .unwrap_or_default();
        match self.templates.get(name) {
            Some(named) => named.merged_over(&base),
            None => base,
        }
    }

    /// Path of the activity log, with `~` expanded
    pub fn doing_file_path(&self) -> PathBuf {
        expand_home(&self.doing_file)
    }

    /// Look up a dotted key such as `templates.recent.template`
    pub fn get(&self, key: &str) -> Result<String> {
        let root = toml::Value::try_from(self)?;
        let mut current = &root;
        for part in key.split('.') {
            current = current
                .get(part)
                .ok_or_else(|| WwidError::Config(format!("Unknown config key: '{}'", key)))?;
        }

        match current {
            toml::Value::String(s) => Ok(s.clone()),
            toml::Value::Table(table) => Ok(toml::to_string_pretty(table)?.trim_end().to_string()),
            other => Ok(other.to_string()),
        }
    }

    /// The merged settings as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// User config location: `$WWID_CONFIG`, else `<config dir>/wwid/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("wwid").join("config.toml"))
}

/// Every `.wwid.toml` from `start` up to the root, farthest first
fn find_local_configs(start: &Path, exclude: Option<&Path>) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = start
        .ancestors()
        .map(|dir| dir.join(LOCAL_CONFIG_NAME))
        .filter(|path| path.is_file())
        .filter(|path| Some(path.as_path()) != exclude)
        .collect();
    found.reverse();
    found
}

fn read_table(path: &Path) -> Result<toml::Table> {
    let contents = fs::read_to_string(path)?;
    contents
        .parse::<toml::Table>()
        .map_err(|e| WwidError::Config(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Merge `overlay` into `base`; nested tables merge, other values replace
fn deep_merge(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                deep_merge(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
