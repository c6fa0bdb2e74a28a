use crate::actions::{Action, get_action};
use crate::decks::Capabilities;
use crate::keycodes::{key_name_to_code, keycode_to_name};
use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

// ============================================================================
// Binding Table
// ============================================================================

/// Fixed key bindings: key name => action name
pub const BINDINGS: &[(&str, &str)] = &[
    // Crossfade
    ("<Left>", "crossfade_left"),
    ("<Right>", "crossfade_right"),
    // Quickfade
    ("q", "quickfade_left"),
    ("w", "quickfade_right"),
    // Left deck volume
    ("<Home>", "left_volume_up"),
    ("<End>", "left_volume_down"),
    // Right deck volume
    ("<Prior>", "right_volume_up"),
    ("<Next>", "right_volume_down"),
    // Left/right mute
    ("m", "left_mute"),
    (",", "right_mute"),
    // Left/right autofade
    ("a", "autofade_left"),
    ("s", "autofade_right"),
    // Left/right toggle
    ("t", "left_toggle"),
    ("y", "right_toggle"),
    // Left/right pause
    ("p", "left_pause"),
    ("[", "right_pause"),
];

// ============================================================================
// Hotkey Definition
// ============================================================================

/// A key bound to an action
#[derive(Debug, Clone)]
pub struct Hotkey {
    pub key: KeyCode,
    pub action: &'static Action,
}

impl Hotkey {
    /// Checks if a key press triggers this hotkey
    ///
    /// Presses held with Ctrl or Alt never match, so Ctrl+C and friends
    /// stay free for the surface itself. Shift is ignored because
    /// terminals report it inconsistently for punctuation.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        event.code == self.key
            && !event
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    }

    /// Returns a human-readable description for logging
    pub fn describe(&self) -> String {
        format!("{} => {}", keycode_to_name(self.key), self.action.name)
    }
}

/// Build the hotkeys for this session
///
/// Bindings whose action needs session control on a deck that lacks it
/// are left out.
pub fn default_hotkeys(caps: Capabilities) -> Result<Vec<Hotkey>> {
    let mut hotkeys = Vec::new();

    for (key_name, action_name) in BINDINGS {
        let key = key_name_to_code(key_name)
            .with_context(|| format!("Unknown key name: {}", key_name))?;
        let action =
            get_action(action_name).with_context(|| format!("Unknown action: {}", action_name))?;

        if !action.is_available(caps) {
            continue;
        }
        hotkeys.push(Hotkey { key, action });
    }

    Ok(hotkeys)
}

/// Find the hotkey a key press triggers, if any
pub fn find<'a>(hotkeys: &'a [Hotkey], event: &KeyEvent) -> Option<&'a Hotkey> {
    hotkeys.iter().find(|h| h.matches(event))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOTH: Capabilities = Capabilities { left: true, right: true };
    const NEITHER: Capabilities = Capabilities { left: false, right: false };

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_all_bindings_resolve() {
        let hotkeys = default_hotkeys(BOTH).unwrap();
        assert_eq!(hotkeys.len(), BINDINGS.len());
    }

    #[test]
    fn test_session_bindings_dropped_without_session_control() {
        let hotkeys = default_hotkeys(NEITHER).unwrap();
        let names: Vec<&str> = hotkeys.iter().map(|h| h.action.name).collect();
        for name in ["quickfade_left", "quickfade_right", "left_pause", "right_pause"] {
            assert!(!names.contains(&name));
        }
        assert!(names.contains(&"left_toggle"));
        assert_eq!(hotkeys.len(), BINDINGS.len() - 4);
    }

    #[test]
    fn test_pause_bound_for_the_session_deck_only() {
        let hotkeys = default_hotkeys(Capabilities { left: true, right: false }).unwrap();

        let hit = find(&hotkeys, &press(KeyCode::Char('p'), KeyModifiers::NONE)).unwrap();
        assert_eq!(hit.action.name, "left_pause");
        assert!(find(&hotkeys, &press(KeyCode::Char('['), KeyModifiers::NONE)).is_none());
        assert!(find(&hotkeys, &press(KeyCode::Char('q'), KeyModifiers::NONE)).is_none());
        assert_eq!(hotkeys.len(), BINDINGS.len() - 3);
    }

    #[test]
    fn test_find() {
        let hotkeys = default_hotkeys(BOTH).unwrap();

        let hit = find(&hotkeys, &press(KeyCode::Left, KeyModifiers::NONE)).unwrap();
        assert_eq!(hit.action.name, "crossfade_left");

        let hit = find(&hotkeys, &press(KeyCode::PageUp, KeyModifiers::NONE)).unwrap();
        assert_eq!(hit.action.name, "right_volume_up");

        let hit = find(&hotkeys, &press(KeyCode::Char('['), KeyModifiers::NONE)).unwrap();
        assert_eq!(hit.action.name, "right_pause");

        assert!(find(&hotkeys, &press(KeyCode::Char('z'), KeyModifiers::NONE)).is_none());
        assert!(find(&hotkeys, &press(KeyCode::Char('m'), KeyModifiers::CONTROL)).is_none());
    }

    #[test]
    fn test_describe() {
        let hotkeys = default_hotkeys(NEITHER).unwrap();
        assert_eq!(hotkeys[0].describe(), "<- => crossfade_left");
    }
}
