//! View state owned by the caller: font size, transpose offset, fullscreen
//! and column mode. Nothing here touches the terminal.

use crate::config::FontConfig;
use crate::sheet::Sheet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub font_percent: u32,
    font_step: u32,
    font_min: u32,
    /// Cumulative semitone shift for this session
    pub transpose: i32,
    pub fullscreen: bool,
    pub columns: bool,
}

impl ViewState {
    pub fn new(font: &FontConfig) -> Self {
        let font_min = font.min_percent.max(1);
        Self {
            font_percent: font.initial_percent.max(font_min),
            font_step: font.step_percent,
            font_min,
            transpose: 0,
            fullscreen: false,
            columns: false,
        }
    }

    pub fn bigger(&mut self) {
        self.font_percent = self.font_percent.saturating_add(self.font_step);
    }

    pub fn smaller(&mut self) {
        self.font_percent = self
            .font_percent
            .saturating_sub(self.font_step)
            .max(self.font_min);
    }

    /// Jump straight to a size, respecting the same floor as `smaller`
    pub fn set_font(&mut self, percent: u32) {
        self.font_percent = percent.max(self.font_min);
    }

    pub fn transpose_by(&mut self, delta: i32) {
        self.transpose = self.transpose.saturating_add(delta);
    }

    pub fn transpose_more(&mut self) {
        self.transpose_by(1);
    }

    pub fn transpose_less(&mut self) {
        self.transpose_by(-1);
    }

    pub fn set_fullscreen(&mut self, on: bool) {
        self.fullscreen = on;
    }

    pub fn set_columns(&mut self, on: bool) {
        self.columns = on;
    }

    /// Key label for the transpose control: the sheet's key shifted by the
    /// running offset, or the signed offset when the sheet has no key.
    pub fn transpose_display(&self, sheet: &Sheet) -> String {
        match sheet.transposed_key(self.transpose) {
            Some(key) => key,
            None if self.transpose > 0 => format!("+{}", self.transpose),
            None => self.transpose.to_string(),
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(&FontConfig::default())
    }
}
