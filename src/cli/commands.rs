//! CLI command definitions

use crate::domain::SortOrder;
use crate::infrastructure::{ColorChoice, TagSort};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "wwid")]
#[command(about = "What was I doing? A plain-text activity log", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Activity log to read (default: doing_file from config)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// When to color output
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Log debug information to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List recent entries
    Recent {
        /// Number of entries to show (0 for all)
        #[arg(value_name = "COUNT")]
        count: Option<usize>,

        /// Section to list, or All
        #[arg(short, long, default_value = "All")]
        section: String,

        /// Output template, e.g. "%date | %title%note"
        #[arg(long)]
        template: Option<String>,

        /// Named template from the config
        #[arg(long, value_name = "NAME")]
        config_template: Option<String>,

        /// Show time intervals on @done entries
        #[arg(short, long)]
        times: bool,

        /// Show time totals per tag (implies --times)
        #[arg(long)]
        totals: bool,

        /// Sort tag totals by name or time
        #[arg(long, value_name = "KEY", value_parser = parse_tag_sort)]
        tag_sort: Option<TagSort>,

        /// Tag totals order (asc, desc)
        #[arg(long, value_name = "ORDER", value_parser = parse_sort_order)]
        tag_order: Option<SortOrder>,

        /// Highlight entries carrying the marker tag
        #[arg(long)]
        highlight: bool,
    },

    /// Show changelog entries
    Changes {
        /// Changelog to read
        #[arg(long, default_value = "CHANGELOG.md", value_name = "PATH")]
        changelog: PathBuf,

        /// Version query: 1.2, "> 1.0", "since 1.2", "1.0 - 1.3"
        #[arg(short, long)]
        lookup: Option<String>,

        /// Only entries containing this text
        #[arg(long)]
        search: Option<String>,

        /// Print entries without version headings
        #[arg(long)]
        only: bool,

        /// Show only the newest matching release
        #[arg(long)]
        latest: bool,
    },

    /// Show configuration
    Config {
        /// Dotted key to show, e.g. templates.recent.template
        key: Option<String>,
    },
}

fn parse_tag_sort(value: &str) -> Result<TagSort, String> {
    value.parse()
}

fn parse_sort_order(value: &str) -> Result<SortOrder, String> {
    value.parse()
}
