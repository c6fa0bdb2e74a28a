// Key names used in the binding table
//
// Special keys are written in angle brackets (`<Left>`, `<Prior>`), printable
// keys as the single character they produce (`q`, `,`, `[`).

use crossterm::event::KeyCode;

// ====== Special Keys ======

const SPECIAL_KEYS: &[(&str, KeyCode, &str)] = &[
    ("<Left>", KeyCode::Left, "<-"),
    ("<Right>", KeyCode::Right, "->"),
    ("<Up>", KeyCode::Up, "Up"),
    ("<Down>", KeyCode::Down, "Down"),
    ("<Home>", KeyCode::Home, "Home"),
    ("<End>", KeyCode::End, "End"),
    ("<Prior>", KeyCode::PageUp, "PageUp"),
    ("<Next>", KeyCode::PageDown, "PageDown"),
    ("<Insert>", KeyCode::Insert, "Insert"),
    ("<Delete>", KeyCode::Delete, "Delete"),
    ("<Return>", KeyCode::Enter, "Enter"),
    ("<Tab>", KeyCode::Tab, "Tab"),
    ("<space>", KeyCode::Char(' '), "Space"),
    ("<Escape>", KeyCode::Esc, "Esc"),
];

/// Convert a binding key name to the terminal key code
///
/// Returns None for names that are neither a known special key nor a
/// single character.
pub fn key_name_to_code(name: &str) -> Option<KeyCode> {
    if let Some((_, code, _)) = SPECIAL_KEYS.iter().find(|(n, _, _)| *n == name) {
        return Some(*code);
    }

    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if !c.is_control() => Some(KeyCode::Char(c)),
        _ => None,
    }
}

/// Short label for a key code, as shown in the help table
pub fn keycode_to_name(code: KeyCode) -> String {
    if let Some((_, _, label)) = SPECIAL_KEYS.iter().find(|(_, c, _)| *c == code) {
        return label.to_string();
    }
    match code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::F(n) => format!("F{}", n),
        other => format!("{:?}", other),
    }
}
