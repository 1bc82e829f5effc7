//! Domain layer - Entries, templates and the rendering engine

pub mod changelog;
pub mod color;
pub mod directive;
pub mod entry;
pub mod note;
pub mod relative_time;
pub mod render;
pub mod tag_color;
pub mod totals;
pub mod wrap;

pub use changelog::{Changes, Version};
pub use color::Palette;
pub use entry::Entry;
pub use note::{FormattedNote, NoteStyle};
pub use render::{render_batch, render_entry, RenderContext, RenderOptions, Renderer};
pub use totals::{summarize, SortOrder};
