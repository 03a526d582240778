//! Chord symbol transposition.
//!
//! A chord symbol is a root note (`C`, `F#`, `Bb`...), an opaque suffix
//! (`m7`, `maj7`, `sus4`...) and an optional `/bass` note written in the
//! same grammar. Only the root and bass are rewritten; the suffix is kept.

use thiserror::Error;

use crate::note::NoteName;

/// Errors from chord transposition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChordError {
    /// The leading note token is not one of the accepted spellings
    #[error("invalid chord root: {token:?}")]
    InvalidRoot { token: String },
}

/// Split a chord into its root token and the remaining text.
/// The token is the first character plus a following `#` or `b`.
fn split_root(chord: &str) -> (&str, &str) {
    let mut chars = chord.char_indices();
    let end = match chars.next() {
        None => 0,
        Some((_, first)) => match chars.next() {
            Some((i, '#' | 'b')) => i + 1,
            _ => first.len_utf8(),
        },
    };
    chord.split_at(end)
}

/// Transpose a chord symbol by `semitones`, normalizing to sharp spelling.
///
/// Any shift is accepted, including negatives and shifts of an octave or
/// more. A bass note after `/` is transposed by the same amount. Fails if the
/// root (or bass) note is not a recognized spelling.
pub fn transpose(chord: &str, semitones: i32) -> Result<String, ChordError> {
    let (token, rest) = split_root(chord);
    let root = NoteName::from_spelling(token).ok_or_else(|| ChordError::InvalidRoot {
        token: token.to_string(),
    })?;

    let mut out = String::with_capacity(chord.len() + 1);
    out.push_str(root.transpose(semitones).as_str());

    match rest.find('/') {
        Some(slash) if slash + 1 < rest.len() => {
            out.push_str(&rest[..=slash]);
            out.push_str(&transpose(&rest[slash + 1..], semitones)?);
        }
        _ => out.push_str(rest),
    }

    Ok(out)
}

/// Sharp-spelled form of a chord (`Db7` -> `C#7`)
pub fn canonical(chord: &str) -> Result<String, ChordError> {
    transpose(chord, 0)
}
