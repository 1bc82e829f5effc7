//! Recent entries use case

use crate::domain::{render_batch, Entry, RenderContext, RenderOptions, SortOrder};
use crate::error::{Result, WwidError};
use crate::infrastructure::{EntryStore, Settings, TagSort};
use log::{debug, info};

/// Template used by the recent listing unless another is requested
pub const RECENT_TEMPLATE: &str = "recent";

/// Entries shown when neither the caller nor the config sets a count
pub const DEFAULT_COUNT: usize = 10;

/// Options for the recent listing
#[derive(Debug, Clone)]
pub struct RecentOptions {
    /// Number of entries (None = config value, 0 = all)
    pub count: Option<usize>,

    /// Section name, or `All`
    pub section: String,

    /// Template string overriding the configured one
    pub template: Option<String>,

    /// Named template from the config to use instead of `recent`
    pub config_template: Option<String>,

    /// Show intervals for `@done` entries
    pub times: bool,

    /// Append tag time totals
    pub totals: bool,

    pub tag_sort: Option<TagSort>,
    pub tag_order: Option<SortOrder>,

    /// Color titles carrying the marker tag
    pub highlight: bool,
}

impl Default for RecentOptions {
    fn default() -> Self {
        RecentOptions {
            count: None,
            section: "All".to_string(),
            template: None,
            config_template: None,
            times: false,
            totals: false,
            tag_sort: None,
            tag_order: None,
            highlight: false,
        }
    }
}

/// Service for listing recent entries
pub struct RecentService<S: EntryStore> {
    store: S,
    settings: Settings,
}

impl<S: EntryStore> RecentService<S> {
    /// Create a new recent service
    pub fn new(store: S, settings: Settings) -> Self {
        RecentService { store, settings }
    }

    /// Resolve the render options for a listing
    pub fn render_options(&self, options: &RecentOptions) -> RenderOptions {
        let name = options
            .config_template
            .as_deref()
            .unwrap_or(RECENT_TEMPLATE);
        let template = self.settings.template(name);
        let defaults = RenderOptions::default();

        RenderOptions {
            template: options
                .template
                .clone()
                .or(template.template)
                .unwrap_or(defaults.template),
            date_format: template.date_format.unwrap_or(defaults.date_format),
            wrap_width: template.wrap_width.unwrap_or(defaults.wrap_width),
            highlight: options.highlight,
            marker_tag: self.settings.marker_tag.clone(),
            marker_color: self.settings.marker_color.clone(),
            tags_color: template.tags_color,
            include_notes: self.settings.include_notes,
            times: options.times || options.totals,
            totals: options.totals,
            sort_tags: options.tag_sort.unwrap_or(self.settings.tag_sort) == TagSort::Name,
            tag_order: options.tag_order.unwrap_or_default(),
        }
    }

    /// Select the entries a listing shows, in display order
    pub fn select(&self, options: &RecentOptions) -> Result<Vec<Entry>> {
        let log = self.store.load()?;

        let mut entries = if options.section.eq_ignore_ascii_case("all") {
            log.entries.clone()
        } else {
            let section = log
                .guess_section(&options.section)
                .ok_or_else(|| WwidError::SectionNotFound(options.section.clone()))?;
            debug!("Section '{}' resolved to '{}'", options.section, section);
            log.entries
                .iter()
                .filter(|e| e.section.as_deref() == Some(section))
                .cloned()
                .collect()
        };

        entries.sort_by_key(|e| e.date);

        let template = self.settings.template(
            options
                .config_template
                .as_deref()
                .unwrap_or(RECENT_TEMPLATE),
        );
        let count = options.count.or(template.count).unwrap_or(DEFAULT_COUNT);
        if count > 0 && entries.len() > count {
            entries.drain(..entries.len() - count);
        }
        if template.order == Some(SortOrder::Desc) {
            entries.reverse();
        }

        Ok(entries)
    }

    /// Render the listing
    pub fn execute(&self, options: &RecentOptions, context: RenderContext) -> Result<String> {
        let entries = self.select(options)?;
        info!("Rendering {} recent entries", entries.len());
        let render_options = self.render_options(options);
        Ok(render_batch(&entries, &render_options, context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ActivityLog;
    use chrono::{NaiveDate, NaiveDateTime};

    struct MemoryStore(String);

    impl EntryStore for MemoryStore {
        fn load(&self) -> Result<ActivityLog> {
            Ok(ActivityLog::parse(&self.0))
        }
    }

    const LOG: &str = "\
Currently:
\t- 2024-01-15 11:00 | Third @flagged
\t- 2024-01-15 09:00 | First
\t\tA note
Archive:
\t- 2024-01-15 10:00 | Second @work @done(2024-01-15 10:30)
";

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap()
    }

    fn service() -> RecentService<MemoryStore> {
        RecentService::new(MemoryStore(LOG.to_string()), Settings::default())
    }

    fn titles(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn test_select_all_sections_chronological() {
        let entries = service().select(&RecentOptions::default()).unwrap();
        assert_eq!(
            titles(&entries),
            vec!["First", "Second @work @done(2024-01-15 10:30)", "Third @flagged"]
        );
    }

    #[test]
    fn test_select_count_keeps_latest() {
        let options = RecentOptions {
            count: Some(2),
            ..Default::default()
        };
        let entries = service().select(&options).unwrap();
        assert_eq!(
            titles(&entries),
            vec!["Second @work @done(2024-01-15 10:30)", "Third @flagged"]
        );
    }

    #[test]
    fn test_select_section_prefix() {
        let options = RecentOptions {
            section: "arch".to_string(),
            ..Default::default()
        };
        let entries = service().select(&options).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].section.as_deref(), Some("Archive"));
    }

    #[test]
    fn test_select_unknown_section() {
        let options = RecentOptions {
            section: "Someday".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            service().select(&options),
            Err(WwidError::SectionNotFound(_))
        ));
    }

    #[test]
    fn test_render_options_from_recent_template() {
        let opts = service().render_options(&RecentOptions::default());
        assert_eq!(opts.template, "%shortdate: %title (%section)");
        assert_eq!(opts.wrap_width, 88);
        assert!(!opts.times);
        assert!(opts.sort_tags);
    }

    #[test]
    fn test_totals_imply_times() {
        let options = RecentOptions {
            totals: true,
            tag_sort: Some(TagSort::Time),
            ..Default::default()
        };
        let opts = service().render_options(&options);
        assert!(opts.times);
        assert!(!opts.sort_tags);
    }

    #[test]
    fn test_execute_renders_each_entry() {
        let options = RecentOptions {
            template: Some("%title%note".to_string()),
            ..Default::default()
        };
        let context = RenderContext::new(false, Some(40)).at(now());
        let out = service().execute(&options, context).unwrap();
        assert_eq!(
            out,
            "First\n\t— A note  \nSecond @work @done(2024-01-15 10:30)\nThird @flagged\n"
        );
    }

    #[test]
    fn test_execute_default_template() {
        let options = RecentOptions {
            count: Some(1),
            ..Default::default()
        };
        let context = RenderContext::new(false, None).at(now());
        let out = service().execute(&options, context).unwrap();
        assert_eq!(out, "11:00am: Third @flagged (Currently)\n");
    }
}
