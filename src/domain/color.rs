//! Named terminal colors and ANSI escape handling

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Every color name a template may reference, with its SGR parameters.
const ATTRIBUTES: &[(&str, &str)] = &[
    ("clear", "0"),
    ("reset", "0"),
    ("bold", "1"),
    ("dark", "2"),
    ("italic", "3"),
    ("underline", "4"),
    ("underscore", "4"),
    ("blink", "5"),
    ("rapidblink", "6"),
    ("negative", "7"),
    ("concealed", "8"),
    ("strikethrough", "9"),
    ("strike", "9"),
    ("black", "30"),
    ("red", "31"),
    ("green", "32"),
    ("yellow", "33"),
    ("blue", "34"),
    ("magenta", "35"),
    ("purple", "35"),
    ("cyan", "36"),
    ("white", "37"),
    ("bgblack", "40"),
    ("bgred", "41"),
    ("bggreen", "42"),
    ("bgyellow", "43"),
    ("bgblue", "44"),
    ("bgmagenta", "45"),
    ("bgpurple", "45"),
    ("bgcyan", "46"),
    ("bgwhite", "47"),
    ("boldblack", "90"),
    ("boldred", "91"),
    ("boldgreen", "92"),
    ("boldyellow", "93"),
    ("boldblue", "94"),
    ("boldmagenta", "95"),
    ("boldpurple", "95"),
    ("boldcyan", "96"),
    ("boldwhite", "97"),
    ("boldbgblack", "100"),
    ("boldbgred", "101"),
    ("boldbggreen", "102"),
    ("boldbgyellow", "103"),
    ("boldbgblue", "104"),
    ("boldbgmagenta", "105"),
    ("boldbgpurple", "105"),
    ("boldbgcyan", "106"),
    ("boldbgwhite", "107"),
    ("softpurple", "0;35;40"),
    ("hotpants", "7;34;40"),
    ("knightrider", "7;30;40"),
    ("flamingo", "7;31;47"),
    ("yeller", "1;37;43"),
    ("whiteboard", "1;30;47"),
    ("chalkboard", "1;37;40"),
    ("led", "0;32;40"),
    ("redacted", "0;30;40"),
    ("alert", "1;31;43"),
    ("error", "1;37;41"),
    ("default", "0;39"),
];

/// Single-letter codes usable inside `{...}` groups.
const SHORTHAND: &[(char, &str)] = &[
    ('w', "white"),
    ('k', "black"),
    ('g', "green"),
    ('l', "blue"),
    ('y', "yellow"),
    ('c', "cyan"),
    ('m', "magenta"),
    ('r', "red"),
    ('W', "bgwhite"),
    ('K', "bgblack"),
    ('G', "bggreen"),
    ('L', "bgblue"),
    ('Y', "bgyellow"),
    ('C', "bgcyan"),
    ('M', "bgmagenta"),
    ('R', "bgred"),
    ('b', "bold"),
    ('u', "underline"),
    ('i', "italic"),
    ('x', "reset"),
];

fn escape_table() -> &'static HashMap<&'static str, String> {
    static TABLE: OnceLock<HashMap<&'static str, String>> = OnceLock::new();
    TABLE.get_or_init(|| {
        ATTRIBUTES
            .iter()
            .map(|(name, code)| (*name, format!("\x1b[{}m", code)))
            .collect()
    })
}

/// Regex matching one SGR escape sequence: `ESC [ params m`
pub(crate) fn escape_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\x1b\[[0-9;]*m").unwrap())
}

fn color_token_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"%([a-z_]+)").unwrap())
}

fn shorthand_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\{(\w+)\}").unwrap())
}

/// Normalize a color name: drop underscores, accept `bright` for `bold`
/// and `bgbold` for `boldbg`.
pub fn normalize_name(name: &str) -> String {
    name.replace('_', "")
        .replacen("bright", "bold", 1)
        .replacen("bgbold", "boldbg", 1)
}

/// Remove every ANSI SGR sequence from `text`.
///
/// Repeats until nothing matches so sequences split around an inner one
/// cannot reassemble.
pub fn strip(text: &str) -> String {
    let mut current = text.to_string();
    while escape_regex().is_match(&current) {
        current = escape_regex().replace_all(&current, "").into_owned();
    }
    current
}

/// Resolves color names to escape sequences, honoring whether coloring is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Palette { enabled }
    }

    /// Look up a color. `None` for unknown names; `Some("")` for known
    /// names when coloring is disabled.
    pub fn lookup(&self, name: &str) -> Option<&'static str> {
        let escape = escape_table().get(normalize_name(name).as_str())?;
        if self.enabled {
            Some(escape.as_str())
        } else {
            Some("")
        }
    }

    /// Escape sequence for `name`, empty for unknown names or when disabled
    pub fn resolve(&self, name: &str) -> &'static str {
        self.lookup(name).unwrap_or("")
    }

    /// Replace `%colorname` tokens in a template. Unknown `%word` tokens
    /// are left as written.
    pub fn substitute_names(&self, template: &str) -> String {
        color_token_regex()
            .replace_all(template, |caps: &Captures| match self.lookup(&caps[1]) {
                Some(escape) => escape.to_string(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }

    /// Expand `{Rwb}`-style shorthand groups. Uppercase letters are
    /// backgrounds; a group with any unknown letter is left untouched.
    pub fn expand_shorthand(&self, template: &str) -> String {
        shorthand_regex()
            .replace_all(template, |caps: &Captures| {
                let mut out = String::new();
                for letter in caps[1].chars() {
                    match SHORTHAND.iter().find(|(code, _)| *code == letter) {
                        Some((_, name)) => out.push_str(self.resolve(name)),
                        None => return caps[0].to_string(),
                    }
                }
                out
            })
            .into_owned()
    }
}

/// All known color names, in table order
pub fn names() -> impl Iterator<Item = &'static str> {
    ATTRIBUTES.iter().map(|(name, _)| *name)
}
