//! Greedy word wrapping

use textwrap::{Options, WordSeparator, WordSplitter, WrapAlgorithm};

fn wrap_options(width: usize) -> Options<'static> {
    Options::new(width)
        .break_words(false)
        .word_separator(WordSeparator::AsciiSpace)
        .word_splitter(WordSplitter::NoHyphenation)
        .wrap_algorithm(WrapAlgorithm::FirstFit)
}

/// Wrap `text` to `width` columns. A width of zero disables wrapping and
/// returns the text as a single line. Words longer than `width` get a line
/// of their own and are never split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    textwrap::wrap(text, wrap_options(width))
        .into_iter()
        .map(|line| line.trim_end().to_string())
        .collect()
}

/// Wrap and join the lines with `separator`
pub fn wrap_joined(text: &str, width: usize, separator: &str) -> String {
    wrap(text, width).join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_width_disables_wrapping() {
        let text = "a long line that would otherwise be wrapped somewhere";
        assert_eq!(wrap(text, 0), vec![text.to_string()]);
        assert_eq!(wrap("", 0), vec![String::new()]);
    }

    #[test]
    fn test_lines_fit_width() {
        let text = "the quick brown fox jumps over the lazy dog and keeps running";
        for width in [5, 10, 16, 30] {
            for line in wrap(text, width) {
                assert!(
                    line.len() <= width || !line.contains(' '),
                    "line {:?} exceeds {}",
                    line,
                    width
                );
            }
        }
    }

    #[test]
    fn test_greedy_breaks() {
        assert_eq!(
            wrap("aaa bbb ccc ddd", 7),
            vec!["aaa bbb".to_string(), "ccc ddd".to_string()]
        );
    }

    #[test]
    fn test_long_word_kept_whole() {
        let lines = wrap("see supercalifragilistic now", 8);
        assert_eq!(
            lines,
            vec![
                "see".to_string(),
                "supercalifragilistic".to_string(),
                "now".to_string()
            ]
        );
    }

    #[test]
    fn test_hyphenated_word_not_split() {
        let lines = wrap("a well-established fact", 10);
        assert!(lines.contains(&"well-established".to_string()));
    }

    #[test]
    fn test_wrap_joined() {
        assert_eq!(wrap_joined("aaa bbb ccc", 3, "\n\t "), "aaa\n\t bbb\n\t ccc");
    }
}
