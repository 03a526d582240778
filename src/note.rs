use std::fmt;

/// Musical note names (chromatic scale), spelled with sharps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteName {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

/// All pitch classes in chromatic order, C first
pub const CHROMATIC: [NoteName; 12] = [
    NoteName::C,
    NoteName::CSharp,
    NoteName::D,
    NoteName::DSharp,
    NoteName::E,
    NoteName::F,
    NoteName::FSharp,
    NoteName::G,
    NoteName::GSharp,
    NoteName::A,
    NoteName::ASharp,
    NoteName::B,
];

impl NoteName {
    /// Pitch class within an octave (C=0, B=11)
    pub fn index(self) -> u8 {
        match self {
            NoteName::C => 0,
            NoteName::CSharp => 1,
            NoteName::D => 2,
            NoteName::DSharp => 3,
            NoteName::E => 4,
            NoteName::F => 5,
            NoteName::FSharp => 6,
            NoteName::G => 7,
            NoteName::GSharp => 8,
            NoteName::A => 9,
            NoteName::ASharp => 10,
            NoteName::B => 11,
        }
    }

    /// Pitch class for any integer, wrapped into 0..=11
    pub fn from_index(i: i64) -> NoteName {
        CHROMATIC[i.rem_euclid(12) as usize]
    }

    /// Look up an accepted spelling. Naturals, sharps and the five common
    /// flats are recognized; enharmonic spellings share a pitch class.
    pub fn from_spelling(s: &str) -> Option<NoteName> {
        let note = match s {
            "C" => NoteName::C,
            "C#" | "Db" => NoteName::CSharp,
            "D" => NoteName::D,
            "D#" | "Eb" => NoteName::DSharp,
            "E" => NoteName::E,
            "F" => NoteName::F,
            "F#" | "Gb" => NoteName::FSharp,
            "G" => NoteName::G,
            "G#" | "Ab" => NoteName::GSharp,
            "A" => NoteName::A,
            "A#" | "Bb" => NoteName::ASharp,
            "B" => NoteName::B,
            _ => return None,
        };
        Some(note)
    }

    /// Shift by a number of semitones, wrapping around the octave.
    /// Widened to i64 so extreme shifts cannot overflow.
    pub fn transpose(self, semitones: i32) -> NoteName {
        NoteName::from_index(self.index() as i64 + semitones as i64)
    }

    /// Canonical display spelling (always sharps)
    pub fn as_str(self) -> &'static str {
        match self {
            NoteName::C => "C",
            NoteName::CSharp => "C#",
            NoteName::D => "D",
            NoteName::DSharp => "D#",
            NoteName::E => "E",
            NoteName::F => "F",
            NoteName::FSharp => "F#",
            NoteName::G => "G",
            NoteName::GSharp => "G#",
            NoteName::A => "A",
            NoteName::ASharp => "A#",
            NoteName::B => "B",
        }
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
