//! Key-capture window: a raw-mode terminal screen showing the bindings
//!
//! Key events are turned into action calls here and go no further; the
//! deck code never sees them.

use crate::actions;
use crate::decks::Decks;
use crate::hotkey::{self, Hotkey};
use crate::keycodes::keycode_to_name;
use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use std::io::{self, Write};

/// Rows of the help table: label, left action, right action
const LAYOUT: &[(&str, &str, &str)] = &[
    ("Crossfade", "crossfade_left", "crossfade_right"),
    ("Quickfade", "quickfade_left", "quickfade_right"),
    ("Vol. Up", "left_volume_up", "right_volume_up"),
    ("Vol. Down", "left_volume_down", "right_volume_down"),
    ("Mute", "left_mute", "right_mute"),
    ("Auto. CF", "autofade_left", "autofade_right"),
    ("Toggle", "left_toggle", "right_toggle"),
    ("Pause", "left_pause", "right_pause"),
];

/// Restores the terminal however the loop exits
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        stdout.flush()?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, ResetColor, cursor::Show, LeaveAlternateScreen);
        let _ = stdout.flush();
    }
}

fn key_label(hotkeys: &[Hotkey], action: &str) -> String {
    hotkeys
        .iter()
        .find(|h| h.action.name == action)
        .map(|h| keycode_to_name(h.key))
        .unwrap_or_else(|| "-".to_string())
}

/// Render the binding table, one line per entry
pub fn help_lines(hotkeys: &[Hotkey]) -> Vec<String> {
    let mut lines = vec![
        format!("{:<10}| {:>4} | {:>8} |", "", "Left", "Right"),
        "-".repeat(29),
    ];
    for (label, left, right) in LAYOUT {
        lines.push(format!(
            "{:<10}| {:>4} | {:>8} |",
            label,
            key_label(hotkeys, left),
            key_label(hotkeys, right)
        ));
    }
    lines.push(String::new());
    lines.push("Esc / Ctrl+C to quit".to_string());
    lines
}

fn draw(decks: &Decks, hotkeys: &[Hotkey]) -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(
        stdout,
        SetBackgroundColor(Color::Black),
        Clear(ClearType::All),
        cursor::MoveTo(0, 0),
        SetForegroundColor(Color::Green),
    )?;
    // Raw mode: every line needs an explicit carriage return
    execute!(stdout, Print(format!("FDSify  {}\r\n\r\n", decks)))?;
    for line in help_lines(hotkeys) {
        execute!(stdout, Print(line), Print("\r\n"))?;
    }
    stdout.flush()
}

fn is_quit(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Run the key-capture loop until the user quits
///
/// A failing action ends the loop and its error is returned.
pub fn run(decks: &Decks, hotkeys: &[Hotkey]) -> Result<()> {
    let _guard = TerminalGuard::enter().context("Failed to set up the terminal")?;
    draw(decks, hotkeys).context("Failed to draw the key window")?;

    loop {
        let Event::Key(key) = event::read().context("Failed to read terminal event")? else {
            continue;
        };
        // Some terminals report releases as well; act on press/repeat only
        if key.kind == KeyEventKind::Release {
            continue;
        }
        if is_quit(&key) {
            log::info!("Quit requested");
            return Ok(());
        }

        match hotkey::find(hotkeys, &key) {
            Some(hotkey) => actions::run(decks, hotkey.action)?,
            None => log::debug!("Unbound key: {:?}", key.code),
        }
    }
}
