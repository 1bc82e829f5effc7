//! Rendering behavior through the public library API

use chrono::{NaiveDate, NaiveDateTime};
use wwid::domain::color::{self, Palette};
use wwid::domain::wrap::wrap;
use wwid::domain::{render_batch, render_entry, Entry, FormattedNote, RenderContext, RenderOptions};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn entry() -> Entry {
    Entry::new(at(2024, 1, 15, 9, 30), "Fixed the @bug in parser").with_section("Currently")
}

fn context(coloring: bool) -> RenderContext {
    RenderContext::new(coloring, Some(20)).at(at(2024, 1, 15, 18, 0))
}

fn options(template: &str) -> RenderOptions {
    RenderOptions::default().with_template(template)
}

#[test]
fn test_wrap_lines_fit_or_are_single_words() {
    let text = "a bb ccc dddddddddddd ee fff g hhhhhhh";
    assert_eq!(wrap(text, 0), vec![text.to_string()]);

    for width in 1..20 {
        for line in wrap(text, width) {
            assert!(
                line.len() <= width || !line.contains(' '),
                "width {} produced {:?}",
                width,
                line
            );
        }
    }
}

#[test]
fn test_every_color_strips_back_to_text() {
    let palette = Palette::new(true);
    for name in color::names() {
        let colored = format!("{}x{}", palette.resolve(name), palette.resolve("reset"));
        assert_eq!(color::strip(&colored), "x", "color {}", name);
    }
}

#[test]
fn test_disabled_palette_resolves_nothing() {
    let palette = Palette::new(false);
    assert!(color::names().all(|name| palette.resolve(name).is_empty()));
}

#[test]
fn test_note_bullets_are_not_doubled() {
    let once = FormattedNote::new(&["  - a thought  "], 0);
    let twice = FormattedNote::new(once.lines(), 0);
    assert_eq!(once.lines(), twice.lines());
    assert_eq!(once.lines(), ["— a thought"]);
}

#[test]
fn test_date_title_scenario() {
    let opts = options("%date | %title");
    assert_eq!(
        render_entry(&entry(), &opts, context(false)),
        "2024-01-15 09:30 | Fixed the @bug in parser"
    );
}

#[test]
fn test_title_note_scenario() {
    let e = entry().with_note(["first line", "second line"]);
    assert_eq!(
        render_entry(&e, &options("%title%note"), context(false)),
        "Fixed the @bug in parser\n\t— first line  \n\t— second line  "
    );
}

#[test]
fn test_empty_note_matches_bare_title() {
    let e = entry();
    assert_eq!(
        render_entry(&e, &options("%title%note"), context(true)),
        render_entry(&e, &options("%title"), context(true))
    );
}

#[test]
fn test_unknown_directive_kept() {
    let out = render_entry(&entry(), &options("%title %unknowndirective"), context(false));
    assert!(out.ends_with(" %unknowndirective"));
}

#[test]
fn test_same_template_under_both_color_states() {
    let opts = options("%cyan%date%reset %title");
    let plain = render_entry(&entry(), &opts, context(false));
    let colored = render_entry(&entry(), &opts, context(true));
    assert_ne!(plain, colored);
    assert_eq!(color::strip(&colored), plain);
}

#[test]
fn test_tag_closes_with_surrounding_color() {
    let palette = Palette::new(true);
    let mut opts = options("%boldwhite%title");
    opts.tags_color = Some("yellow".to_string());

    let out = render_entry(&entry(), &opts, context(true));
    let expected = format!(
        "{white}Fixed the {yellow}@bug{white} in parser",
        white = palette.resolve("boldwhite"),
        yellow = palette.resolve("yellow"),
    );
    assert_eq!(out, expected);
}

#[test]
fn test_tag_without_prior_color_closes_with_default() {
    let palette = Palette::new(true);
    let mut opts = options("%title");
    opts.tags_color = Some("yellow".to_string());

    let out = render_entry(&entry(), &opts, context(true));
    assert_eq!(
        out,
        format!(
            "Fixed the {}@bug{} in parser",
            palette.resolve("yellow"),
            palette.resolve("default")
        )
    );
}

#[test]
fn test_rules_and_literal_escapes() {
    let out = render_entry(&entry(), &options("%hr%n%t%title"), context(false));
    assert_eq!(out, format!("{}\n\tFixed the @bug in parser", "-".repeat(20)));
}

#[test]
fn test_batch_appends_newline_per_entry() {
    let entries = vec![
        entry(),
        Entry::new(at(2024, 1, 15, 11, 0), "Review PR").with_section("Currently"),
    ];
    let out = render_batch(&entries, &options("%shortdate %title"), context(false));
    assert_eq!(out, "9:30am Fixed the @bug in parser\n11:00am Review PR\n");
}

#[test]
fn test_batch_totals_summary() {
    let entries = vec![
        Entry::new(at(2024, 1, 15, 9, 0), "Write docs @writing @done(2024-01-15 10:30)"),
        Entry::new(at(2024, 1, 15, 11, 0), "Edit @writing @done(2024-01-15 11:30)"),
    ];
    let mut opts = options("%title");
    opts.times = true;
    opts.totals = true;

    let out = render_batch(&entries, &opts, context(false));
    assert!(out.contains("--- Tag Totals ---\nwriting: 02:00:00\n"));
    assert!(out.ends_with("\nTotal tracked: 02:00:00\n"));
}
