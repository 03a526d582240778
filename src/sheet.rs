//! Chord sheets: lyrics with inline `[Chord]` tokens.
//!
//! The format is deliberately small:
//!
//! ```text
//! # comment
//! title: Amazing Grace
//! key: G
//!
//! A[G]mazing [G7]grace, how [C]sweet the [G]sound
//! ```
//!
//! Header directives (`title:`, `artist:`, `key:`) are read until the first
//! body line. Everything after that is lyrics and chords.

use thiserror::Error;

use crate::chord;

/// Parse errors with location info
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

/// A piece of a body line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Text(String),
    Chord(String),
}

/// One line of the sheet body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn has_chords(&self) -> bool {
        self.spans.iter().any(|s| matches!(s, Span::Chord(_)))
    }
}

/// A parsed chord sheet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    pub title: Option<String>,
    pub artist: Option<String>,
    /// Musical key as written, e.g. `Am` or `Eb`
    pub key: Option<String>,
    pub lines: Vec<Line>,
}

impl Sheet {
    /// Every chord token in document order
    pub fn chords(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().flat_map(|line| {
            line.spans.iter().filter_map(|span| match span {
                Span::Chord(c) => Some(c.as_str()),
                Span::Text(_) => None,
            })
        })
    }

    /// Copy of the sheet with every chord shifted by `total` semitones.
    ///
    /// Always call this on the original sheet with the cumulative offset.
    /// Chords that cannot be transposed are kept as written.
    pub fn transposed(&self, total: i32) -> Sheet {
        let lines = self
            .lines
            .iter()
            .map(|line| Line {
                spans: line
                    .spans
                    .iter()
                    .map(|span| match span {
                        Span::Chord(c) => Span::Chord(transpose_or_keep(c, total)),
                        Span::Text(t) => Span::Text(t.clone()),
                    })
                    .collect(),
            })
            .collect();

        Sheet {
            title: self.title.clone(),
            artist: self.artist.clone(),
            key: self.key.clone(),
            lines,
        }
    }

    /// The musical key shifted by `total` semitones, if the sheet has one
    pub fn transposed_key(&self, total: i32) -> Option<String> {
        self.key.as_deref().map(|k| transpose_or_keep(k, total))
    }
}

fn transpose_or_keep(chord: &str, semitones: i32) -> String {
    match chord::transpose(chord, semitones) {
        Ok(c) => c,
        Err(e) => {
            // Already reported once by `parse`; this runs on every redraw.
            log::debug!("Leaving chord untransposed: {}", e);
            chord.to_string()
        }
    }
}

/// Parse a chord sheet
pub fn parse(input: &str) -> Result<Sheet, ParseError> {
    let mut sheet = Sheet::default();
    let mut in_body = false;

    for (line_idx, line) in input.lines().enumerate() {
        let line_num = line_idx + 1;
        let trimmed = line.trim();

        if trimmed.starts_with('#') {
            continue;
        }

        if !in_body {
            if trimmed.is_empty() {
                continue;
            }
            if let Some(value) = trimmed.strip_prefix("title:") {
                sheet.title = Some(value.trim().to_string());
                continue;
            }
            if let Some(value) = trimmed.strip_prefix("artist:") {
                sheet.artist = Some(value.trim().to_string());
                continue;
            }
            if let Some(value) = trimmed.strip_prefix("key:") {
                let key = value.trim();
                chord::canonical(key).map_err(|e| ParseError {
                    line: line_num,
                    message: format!("invalid key: {}", e),
                })?;
                sheet.key = Some(key.to_string());
                continue;
            }
            in_body = true;
        }

        sheet.lines.push(parse_line(line.trim_end(), line_num)?);
    }

    // Trailing blank lines carry nothing to display
    while sheet.lines.last().is_some_and(Line::is_empty) {
        sheet.lines.pop();
    }

    log::debug!(
        "Parsed sheet {:?}: {} lines, {} chords",
        sheet.title,
        sheet.lines.len(),
        sheet.chords().count()
    );

    Ok(sheet)
}

/// Split a single body line into text and chord spans
fn parse_line(line: &str, line_num: usize) -> Result<Line, ParseError> {
    let mut spans = Vec::new();
    let mut text = String::new();
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        if c != '[' {
            text.push(c);
            continue;
        }

        let mut token = String::new();
        let mut closed = false;
        for inner in chars.by_ref() {
            if inner == ']' {
                closed = true;
                break;
            }
            token.push(inner);
        }

        if !closed {
            return Err(ParseError {
                line: line_num,
                message: format!("unterminated chord: [{}", token),
            });
        }
        let token = token.trim();
        if token.is_empty() {
            return Err(ParseError {
                line: line_num,
                message: "empty chord []".into(),
            });
        }

        if !text.is_empty() {
            spans.push(Span::Text(std::mem::take(&mut text)));
        }
        if let Err(e) = chord::canonical(token) {
            log::warn!("line {}: {}, shown as written", line_num, e);
        }
        spans.push(Span::Chord(token.to_string()));
    }

    if !text.is_empty() {
        spans.push(Span::Text(text));
    }

    Ok(Line { spans })
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRACE: &str = "\
# traditional
title: Amazing Grace
artist: John Newton
key: G

A[G]mazing [G7]grace, how [C]sweet the [G]sound

That [G]saved a [Em]wretch like [D/F#]me
";

    #[test]
    fn test_parse_headers() {
        let sheet = parse(GRACE).unwrap();
        assert_eq!(sheet.title.as_deref(), Some("Amazing Grace"));
        assert_eq!(sheet.artist.as_deref(), Some("John Newton"));
        assert_eq!(sheet.key.as_deref(), Some("G"));
        assert_eq!(sheet.lines.len(), 3);
        assert!(sheet.lines[1].is_empty());
    }

    #[test]
    fn test_parse_spans() {
        let sheet = parse("A[G]mazing [G7]grace").unwrap();
        assert_eq!(
            sheet.lines[0].spans,
            vec![
                Span::Text("A".into()),
                Span::Chord("G".into()),
                Span::Text("mazing ".into()),
                Span::Chord("G7".into()),
                Span::Text("grace".into()),
            ]
        );
    }

    #[test]
    fn test_chords_in_order() {
        let sheet = parse(GRACE).unwrap();
        let chords: Vec<&str> = sheet.chords().collect();
        assert_eq!(chords, ["G", "G7", "C", "G", "G", "Em", "D/F#"]);
    }

    #[test]
    fn test_directives_only_in_header() {
        let sheet = parse("[C]hello\nkey: D").unwrap();
        assert_eq!(sheet.key, None);
        assert_eq!(sheet.lines.len(), 2);
    }

    #[test]
    fn test_unterminated_chord() {
        let err = parse("title: x\n\n[C]ok\n[Am oops").unwrap_err();
        assert_eq!(err.line, 4);
        assert!(err.message.contains("unterminated"));
    }

    #[test]
    fn test_empty_chord() {
        let err = parse("la [] la").unwrap_err();
        assert_eq!(err.line, 1);
    }

    #[test]
    fn test_invalid_key() {
        let err = parse("key: H\n[C]x").unwrap_err();
        assert_eq!(err.line, 1);
        assert!(err.message.contains("invalid key"));
    }

    #[test]
    fn test_transposed_from_original() {
        let sheet = parse(GRACE).unwrap();
        let up = sheet.transposed(2);
        let chords: Vec<&str> = up.chords().collect();
        assert_eq!(chords, ["A", "A7", "D", "A", "A", "F#m", "E/G#"]);

        // cumulative offsets applied to the original, not chained
        let back = sheet.transposed(2 - 2);
        assert_eq!(back.chords().collect::<Vec<_>>(), sheet.chords().collect::<Vec<_>>());
        assert_eq!(sheet.transposed_key(-1).as_deref(), Some("F#"));
    }

    #[test]
    fn test_bad_chord_kept_when_transposing() {
        let sheet = parse("[N.C.] then [C]").unwrap();
        let up = sheet.transposed(1);
        assert_eq!(up.chords().collect::<Vec<_>>(), ["N.C.", "C#"]);
    }

    #[test]
    fn test_no_key() {
        let sheet = parse("[C]x").unwrap();
        assert_eq!(sheet.transposed_key(3), None);
    }
}
