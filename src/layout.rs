//! Sheet measurement and the one-vs-two column decision.

/// A size in terminal cells
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Size the rendered rows would take at `font_percent`
pub fn measure<S: AsRef<str>>(rows: &[S], font_percent: u32) -> Size {
    let width = rows
        .iter()
        .map(|r| r.as_ref().chars().count() as u64)
        .max()
        .unwrap_or(0);
    let height = rows.len() as u64;
    let scale = |v: u64| (v * font_percent as u64 / 100).min(u32::MAX as u64) as u32;
    Size::new(scale(width), scale(height))
}

/// Two columns pay off when the song is narrower than half the viewport
/// and too tall to fit in it.
pub fn needs_column(song: Size, viewport: Size) -> bool {
    song.width < viewport.width / 2 && song.height > viewport.height
}
