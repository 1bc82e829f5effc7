//! Terminal capabilities

use crate::domain::RenderContext;
use clap::ValueEnum;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

/// When to emit color escapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Color when stdout is a terminal and NO_COLOR is unset
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn enabled(self) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => color_supported(),
        }
    }
}

/// Stdout is a terminal and the user hasn't opted out via NO_COLOR
pub fn color_supported() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

/// Current terminal width in columns, if stdout is a terminal
pub fn columns() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Build a render context from the environment
pub fn render_context(color: ColorChoice) -> RenderContext {
    RenderContext::new(color.enabled(), columns())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::render::FALLBACK_COLUMNS;

    #[test]
    fn test_explicit_color_choices() {
        assert!(ColorChoice::Always.enabled());
        assert!(!ColorChoice::Never.enabled());
    }

    #[test]
    fn test_render_context_has_usable_width() {
        let context = render_context(ColorChoice::Never);
        assert!(!context.coloring);
        assert!(context.columns > 0);
        if columns().is_none() {
            assert_eq!(context.columns, FALLBACK_COLUMNS);
        }
    }
}
