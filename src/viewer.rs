use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{execute, queue};

use crate::config::{Keybindings, ViewerConfig};
use crate::fullscreen::{self, AlternateScreen, FullscreenBackend};
use crate::layout::Size;
use crate::render;
use crate::sheet::Sheet;
use crate::view::ViewState;

/// Something the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Bigger,
    Smaller,
    ToggleFullscreen,
    TransposeMore,
    TransposeLess,
    ScrollUp,
    ScrollDown,
    Quit,
}

/// Map a configured key name to a key code
pub fn parse_key(name: &str) -> Option<KeyCode> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c));
    }
    match name {
        "Up" => Some(KeyCode::Up),
        "Down" => Some(KeyCode::Down),
        "Left" => Some(KeyCode::Left),
        "Right" => Some(KeyCode::Right),
        "PageUp" => Some(KeyCode::PageUp),
        "PageDown" => Some(KeyCode::PageDown),
        "Home" => Some(KeyCode::Home),
        "End" => Some(KeyCode::End),
        "Esc" => Some(KeyCode::Esc),
        "Enter" => Some(KeyCode::Enter),
        "Tab" => Some(KeyCode::Tab),
        "Space" => Some(KeyCode::Char(' ')),
        _ => None,
    }
}

/// Resolved key bindings
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: Vec<(KeyCode, Action)>,
}

impl Keymap {
    pub fn from_config(keys: &Keybindings) -> Self {
        let groups = [
            (&keys.bigger, Action::Bigger),
            (&keys.smaller, Action::Smaller),
            (&keys.fullscreen, Action::ToggleFullscreen),
            (&keys.transpose_more, Action::TransposeMore),
            (&keys.transpose_less, Action::TransposeLess),
            (&keys.scroll_up, Action::ScrollUp),
            (&keys.scroll_down, Action::ScrollDown),
            (&keys.quit, Action::Quit),
        ];

        let mut bindings = Vec::new();
        for (names, action) in groups {
            for name in names {
                match parse_key(name) {
                    Some(code) => bindings.push((code, action)),
                    None => log::warn!("Ignoring unknown key name {:?} for {:?}", name, action),
                }
            }
        }
        Self { bindings }
    }

    /// First binding wins when a key is bound twice
    pub fn action_for(&self, code: KeyCode) -> Option<Action> {
        self.bindings
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, action)| *action)
    }
}

/// Apply an action to the view. Returns false when the viewer should exit.
pub fn apply(
    action: Action,
    view: &mut ViewState,
    scroll: &mut usize,
    backend: &mut dyn FullscreenBackend,
) -> io::Result<bool> {
    match action {
        Action::Bigger => view.bigger(),
        Action::Smaller => view.smaller(),
        Action::ToggleFullscreen => {
            let on = fullscreen::toggle(backend)?;
            view.set_fullscreen(on);
        }
        Action::TransposeMore => view.transpose_more(),
        Action::TransposeLess => view.transpose_less(),
        Action::ScrollUp => *scroll = scroll.saturating_sub(1),
        Action::ScrollDown => *scroll = scroll.saturating_add(1),
        Action::Quit => return Ok(false),
    }
    Ok(true)
}

/// Run the interactive viewer until the user quits
pub fn run(sheet: &Sheet, config: &ViewerConfig, mut view: ViewState) -> Result<()> {
    let keymap = Keymap::from_config(&config.keys);
    let mut stdout = io::stdout();
    let mut screen = AlternateScreen::new(io::stdout());

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    execute!(stdout, Hide).context("failed to hide cursor")?;

    let result = event_loop(sheet, config, &keymap, &mut view, &mut screen, &mut stdout);

    // Restore terminal
    let _ = screen.exit();
    let _ = execute!(stdout, Clear(ClearType::All), MoveTo(0, 0), Show);
    let _ = terminal::disable_raw_mode();

    log::info!(
        "viewer closed (transpose {}, font {}%)",
        view.transpose,
        view.font_percent
    );
    result
}

fn event_loop(
    sheet: &Sheet,
    config: &ViewerConfig,
    keymap: &Keymap,
    view: &mut ViewState,
    screen: &mut AlternateScreen<io::Stdout>,
    stdout: &mut io::Stdout,
) -> Result<()> {
    let (w, h) = terminal::size().context("failed to read terminal size")?;
    let mut viewport = body_viewport(w, h);
    let mut scroll = 0usize;
    render::relayout(sheet, view, viewport);
    draw(stdout, sheet, view, config, w, h, &mut scroll)?;

    let (mut w, mut h) = (w, h);
    loop {
        if !event::poll(Duration::from_millis(250)).context("event poll error")? {
            continue;
        }

        match event::read().context("event read error")? {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => {
                let Some(action) = keymap.action_for(code) else {
                    continue;
                };
                log::debug!("key {:?} -> {:?}", code, action);
                if !apply(action, view, &mut scroll, screen)? {
                    return Ok(());
                }
                if matches!(action, Action::Bigger | Action::Smaller) {
                    render::relayout(sheet, view, viewport);
                }
            }

            Event::Resize(new_w, new_h) => {
                (w, h) = (new_w, new_h);
                viewport = body_viewport(w, h);
                render::relayout(sheet, view, viewport);
            }

            _ => continue,
        }

        draw(stdout, sheet, view, config, w, h, &mut scroll)?;
    }
}

/// Everything but the status row
fn body_viewport(w: u16, h: u16) -> Size {
    Size::new(w as u32, h.saturating_sub(1) as u32)
}

fn draw(
    stdout: &mut io::Stdout,
    sheet: &Sheet,
    view: &ViewState,
    config: &ViewerConfig,
    w: u16,
    h: u16,
    scroll: &mut usize,
) -> Result<()> {
    let rows = render::body_rows(sheet, view, config.layout.column_gap);
    let body_h = h.saturating_sub(1) as usize;
    *scroll = (*scroll).min(rows.len().saturating_sub(body_h));

    queue!(stdout, Clear(ClearType::All))?;
    for (i, row) in rows.iter().skip(*scroll).take(body_h).enumerate() {
        let clipped: String = row.chars().take(w as usize).collect();
        queue!(stdout, MoveTo(0, i as u16), Print(clipped))?;
    }

    let status: String = render::status_line(sheet, view)
        .chars()
        .take(w as usize)
        .collect();
    queue!(
        stdout,
        MoveTo(0, h.saturating_sub(1)),
        SetAttribute(Attribute::Reverse),
        Print(status),
        SetAttribute(Attribute::Reset)
    )?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fullscreen::Headless;

    #[test]
    fn test_parse_key() {
        assert_eq!(parse_key("f"), Some(KeyCode::Char('f')));
        assert_eq!(parse_key("+"), Some(KeyCode::Char('+')));
        assert_eq!(parse_key("Up"), Some(KeyCode::Up));
        assert_eq!(parse_key("Space"), Some(KeyCode::Char(' ')));
        assert_eq!(parse_key("Hyper"), None);
        assert_eq!(parse_key(""), None);
    }

    #[test]
    fn test_default_keymap() {
        let keymap = Keymap::from_config(&Keybindings::default());
        assert_eq!(keymap.action_for(KeyCode::Char('+')), Some(Action::Bigger));
        assert_eq!(keymap.action_for(KeyCode::Char('-')), Some(Action::Smaller));
        assert_eq!(
            keymap.action_for(KeyCode::Char('f')),
            Some(Action::ToggleFullscreen)
        );
        assert_eq!(keymap.action_for(KeyCode::Up), Some(Action::TransposeMore));
        assert_eq!(keymap.action_for(KeyCode::Char('[')), Some(Action::TransposeLess));
        assert_eq!(keymap.action_for(KeyCode::Esc), Some(Action::Quit));
        assert_eq!(keymap.action_for(KeyCode::Char('z')), None);
    }

    #[test]
    fn test_unknown_key_names_skipped() {
        let keys = Keybindings {
            quit: vec!["Hyper".into(), "x".into()],
            ..Keybindings::default()
        };
        let keymap = Keymap::from_config(&keys);
        assert_eq!(keymap.action_for(KeyCode::Char('x')), Some(Action::Quit));
        assert_eq!(keymap.action_for(KeyCode::Char('q')), None);
    }

    #[test]
    fn test_apply_actions() {
        let mut view = ViewState::default();
        let mut scroll = 0;
        let mut backend = Headless::default();

        for action in [
            Action::Bigger,
            Action::TransposeMore,
            Action::TransposeMore,
            Action::TransposeLess,
            Action::ToggleFullscreen,
            Action::ScrollUp,
            Action::ScrollDown,
            Action::ScrollDown,
        ] {
            assert!(apply(action, &mut view, &mut scroll, &mut backend).unwrap());
        }

        assert_eq!(view.font_percent, 110);
        assert_eq!(view.transpose, 1);
        assert!(view.fullscreen);
        assert!(backend.is_fullscreen());
        assert_eq!(scroll, 2);

        assert!(!apply(Action::Quit, &mut view, &mut scroll, &mut backend).unwrap());
    }

    #[test]
    fn test_body_viewport_leaves_status_row() {
        assert_eq!(body_viewport(80, 24), Size::new(80, 23));
        assert_eq!(body_viewport(80, 0), Size::new(80, 0));
    }
}
