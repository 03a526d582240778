//! Fullscreen capability adapter.
//!
//! A terminal has no real fullscreen; the closest thing is the alternate
//! screen, which hides the shell scrollback while the viewer is up.

use std::io::{self, Write};

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};

pub trait FullscreenBackend {
    fn is_fullscreen(&self) -> bool;
    fn request(&mut self) -> io::Result<()>;
    fn exit(&mut self) -> io::Result<()>;
}

/// Flip fullscreen and return the new state
pub fn toggle(backend: &mut dyn FullscreenBackend) -> io::Result<bool> {
    if backend.is_fullscreen() {
        backend.exit()?;
    } else {
        backend.request()?;
    }
    log::debug!("fullscreen now {}", backend.is_fullscreen());
    Ok(backend.is_fullscreen())
}

/// Terminal alternate screen
pub struct AlternateScreen<W: Write> {
    out: W,
    active: bool,
}

impl<W: Write> AlternateScreen<W> {
    pub fn new(out: W) -> Self {
        Self { out, active: false }
    }
}

impl<W: Write> FullscreenBackend for AlternateScreen<W> {
    fn is_fullscreen(&self) -> bool {
        self.active
    }

    fn request(&mut self) -> io::Result<()> {
        if !self.active {
            execute!(self.out, EnterAlternateScreen)?;
            self.active = true;
        }
        Ok(())
    }

    fn exit(&mut self) -> io::Result<()> {
        if self.active {
            execute!(self.out, LeaveAlternateScreen)?;
            self.active = false;
        }
        Ok(())
    }
}

impl<W: Write> Drop for AlternateScreen<W> {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

/// No display at all; only tracks the flag (print mode, tests)
#[derive(Debug, Default)]
pub struct Headless {
    active: bool,
}

impl FullscreenBackend for Headless {
    fn is_fullscreen(&self) -> bool {
        self.active
    }

    fn request(&mut self) -> io::Result<()> {
        self.active = true;
        Ok(())
    }

    fn exit(&mut self) -> io::Result<()> {
        self.active = false;
        Ok(())
    }
}
