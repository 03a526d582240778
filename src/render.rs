//! Turn a sheet into plain terminal rows. Pure; the viewer does the drawing.

use crate::layout::{self, Size};
use crate::sheet::{Sheet, Span};
use crate::view::ViewState;

/// Render each body line as a chord row above its lyric row.
///
/// Terminal cells can't grow, so font scale shows up as line spacing:
/// every full 100% above normal adds one blank row after each line.
pub fn sheet_rows(sheet: &Sheet, font_percent: u32) -> Vec<String> {
    let spacing = (font_percent / 100).saturating_sub(1) as usize;
    let mut rows = Vec::new();

    for line in &sheet.lines {
        if line.is_empty() {
            rows.push(String::new());
            continue;
        }

        let mut chords = String::new();
        let mut lyric = String::new();
        // tracked in chars, not bytes
        let mut chord_len = 0;
        let mut lyric_len = 0;

        for span in &line.spans {
            match span {
                Span::Text(t) => {
                    lyric.push_str(t);
                    lyric_len += t.chars().count();
                }
                Span::Chord(c) => {
                    let min_pos = if chord_len == 0 { 0 } else { chord_len + 1 };
                    let pos = lyric_len.max(min_pos);
                    pad_to(&mut chords, &mut chord_len, pos);
                    pad_to(&mut lyric, &mut lyric_len, pos);
                    chords.push_str(c);
                    chord_len += c.chars().count();
                }
            }
        }

        if line.has_chords() {
            rows.push(chords);
        }
        let lyric = lyric.trim_end();
        if !lyric.is_empty() {
            rows.push(lyric.to_string());
        }
        rows.extend(std::iter::repeat_n(String::new(), spacing));
    }

    rows
}

fn pad_to(s: &mut String, len: &mut usize, pos: usize) {
    while *len < pos {
        s.push(' ');
        *len += 1;
    }
}

/// Flow rows into two side-by-side columns, left column first.
pub fn into_columns(rows: &[String], gap: u16) -> Vec<String> {
    let split = rows.len().div_ceil(2);
    let (left, right) = rows.split_at(split);
    let width = left.iter().map(|r| r.chars().count()).max().unwrap_or(0);
    let gap = gap as usize;

    left.iter()
        .enumerate()
        .map(|(i, l)| match right.get(i) {
            Some(r) if !r.is_empty() => {
                let pad = width - l.chars().count() + gap;
                format!("{}{}{}", l, " ".repeat(pad), r)
            }
            _ => l.clone(),
        })
        .collect()
}

/// Body rows for the current view: transposed, scaled, maybe in columns.
pub fn body_rows(sheet: &Sheet, view: &ViewState, gap: u16) -> Vec<String> {
    let shown = sheet.transposed(view.transpose);
    let rows = sheet_rows(&shown, view.font_percent);
    if view.columns {
        into_columns(&rows, gap)
    } else {
        rows
    }
}

/// Recompute column mode for a viewport and store it on the view.
pub fn relayout(sheet: &Sheet, view: &mut ViewState, viewport: Size) -> bool {
    // The key never changes the width much; measure the untransposed sheet.
    let rows = sheet_rows(sheet, 100);
    let song = layout::measure(&rows, view.font_percent);
    let columns = layout::needs_column(song, viewport);
    if columns != view.columns {
        log::debug!("column mode {} (song {:?}, viewport {:?})", columns, song, viewport);
    }
    view.set_columns(columns);
    columns
}

/// One-line status: title, key/transpose, font size, fullscreen marker
pub fn status_line(sheet: &Sheet, view: &ViewState) -> String {
    let title = match (&sheet.title, &sheet.artist) {
        (Some(t), Some(a)) => format!("{} - {}  ", t, a),
        (Some(t), None) => format!("{}  ", t),
        (None, Some(a)) => format!("{}  ", a),
        (None, None) => String::new(),
    };
    let label = if sheet.key.is_some() { "Key" } else { "Transpose" };
    format!(
        "{}{}: {}  Font: {}%{}",
        title,
        label,
        view.transpose_display(sheet),
        view.font_percent,
        if view.fullscreen { "  [fullscreen]" } else { "" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet;
    use std::cell::Cell;
    use std::sync::Once;

    thread_local! {
        static WARNINGS: Cell<usize> = const { Cell::new(0) };
    }

    /// Counts warn/error records logged on the current thread
    struct WarnCounter;

    impl log::Log for WarnCounter {
        fn enabled(&self, _: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            if record.level() <= log::Level::Warn {
                WARNINGS.with(|w| w.set(w.get() + 1));
            }
        }

        fn flush(&self) {}
    }

    fn count_warnings<F: FnOnce()>(f: F) -> usize {
        static INSTALL: Once = Once::new();
        INSTALL.call_once(|| {
            let _ = log::set_logger(&WarnCounter);
            log::set_max_level(log::LevelFilter::Trace);
        });
        WARNINGS.with(|w| w.set(0));
        f();
        WARNINGS.with(|w| w.get())
    }

    #[test]
    fn test_chords_above_lyrics() {
        let sheet = sheet::parse("A[G]mazing [G7]grace").unwrap();
        let rows = sheet_rows(&sheet, 100);
        assert_eq!(rows, [" G      G7", "Amazing grace"]);
    }

    #[test]
    fn test_adjacent_chords_do_not_overlap() {
        let sheet = sheet::parse("[Am7][D7]la").unwrap();
        let rows = sheet_rows(&sheet, 100);
        assert_eq!(rows, ["Am7 D7", "    la"]);
    }

    #[test]
    fn test_chord_only_and_blank_lines() {
        let sheet = sheet::parse("[C] [G]\n\nla la").unwrap();
        let rows = sheet_rows(&sheet, 100);
        assert_eq!(rows, ["C G", "", "la la"]);
    }

    #[test]
    fn test_font_spacing() {
        let sheet = sheet::parse("la\nli").unwrap();
        assert_eq!(sheet_rows(&sheet, 190), ["la", "li"]);
        assert_eq!(sheet_rows(&sheet, 200), ["la", "", "li", ""]);
    }

    #[test]
    fn test_into_columns() {
        let rows: Vec<String> = ["a", "bbb", "c", "d", "e"].iter().map(|s| s.to_string()).collect();
        let cols = into_columns(&rows, 2);
        assert_eq!(cols, ["a    d", "bbb  e", "c"]);
    }

    #[test]
    fn test_body_rows_transposed() {
        let sheet = sheet::parse("key: C\n[C]la [G/B]li").unwrap();
        let mut view = ViewState::default();
        view.transpose_by(2);
        assert_eq!(body_rows(&sheet, &view, 4), ["D  A/C#", "la li"]);
    }

    #[test]
    fn test_relayout() {
        let body = "[C]la\n".repeat(30);
        let sheet = sheet::parse(&body).unwrap();
        let mut view = ViewState::default();
        assert!(relayout(&sheet, &mut view, Size::new(80, 24)));
        assert!(view.columns);
        assert!(!relayout(&sheet, &mut view, Size::new(80, 100)));
        assert!(!view.columns);
    }

    #[test]
    fn test_status_line() {
        let sheet = sheet::parse("title: Grace\nkey: G\n[G]x").unwrap();
        let mut view = ViewState::default();
        view.transpose_more();
        view.set_fullscreen(true);
        assert_eq!(
            status_line(&sheet, &view),
            "Grace  Key: G#  Font: 100%  [fullscreen]"
        );

        let bare = sheet::parse("[C]x").unwrap();
        assert_eq!(
            status_line(&bare, &ViewState::default()),
            "Transpose: 0  Font: 100%"
        );
    }

    #[test]
    fn test_bad_chord_warns_once_not_per_redraw() {
        let mut parsed = None;
        let at_parse = count_warnings(|| parsed = Some(sheet::parse("[N.C.] la [C]li").unwrap()));
        assert_eq!(at_parse, 1);

        let sheet = parsed.unwrap();
        let mut view = ViewState::default();
        let on_redraw = count_warnings(|| {
            for _ in 0..5 {
                view.transpose_more();
                let rows = body_rows(&sheet, &view, 4);
                assert!(rows[0].starts_with("N.C."));
                status_line(&sheet, &view);
            }
        });
        assert_eq!(on_redraw, 0);
    }
}
