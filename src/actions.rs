use crate::decks::{Capabilities, Decks};
use crate::error::ToolResult;
use anyhow::{Context, Result};
use std::collections::HashMap;

/// An operation on the decks with all of its arguments already bound
pub type ActionFn = fn(&Decks) -> ToolResult<()>;

/// Which decks must have session control for an action to work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requires {
    Nothing,
    Left,
    Right,
    Both,
}

impl Requires {
    pub fn met_by(self, caps: Capabilities) -> bool {
        match self {
            Requires::Nothing => true,
            Requires::Left => caps.left,
            Requires::Right => caps.right,
            Requires::Both => caps.left && caps.right,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Action {
    pub name: &'static str,
    pub description: &'static str,
    pub requires: Requires,
    pub run: ActionFn,
}

impl Action {
    pub fn is_available(&self, caps: Capabilities) -> bool {
        self.requires.met_by(caps)
    }
}

macro_rules! action {
    ($name:literal, $description:literal, requires $requires:ident, $run:expr) => {
        Action {
            name: $name,
            description: $description,
            requires: Requires::$requires,
            run: $run,
        }
    };
    ($name:literal, $description:literal, $run:expr) => {
        Action {
            name: $name,
            description: $description,
            requires: Requires::Nothing,
            run: $run,
        }
    };
}

// ====== Action Table ======

pub static ACTIONS: &[Action] = &[
    action!("crossfade_left", "Fade one step towards the left deck", |d: &Decks| d.crossfade(-1)),
    action!("crossfade_right", "Fade one step towards the right deck", |d: &Decks| d.crossfade(1)),
    action!("quickfade_left", "Hand over to the left deck at once", requires Both, |d: &Decks| d.quickfade_left()),
    action!("quickfade_right", "Hand over to the right deck at once", requires Both, |d: &Decks| d.quickfade_right()),
    action!("left_volume_up", "Left deck one step louder", |d: &Decks| d.left.volume_up(1)),
    action!("left_volume_down", "Left deck one step quieter", |d: &Decks| d.left.volume_down(1)),
    action!("right_volume_up", "Right deck one step louder", |d: &Decks| d.right.volume_up(1)),
    action!("right_volume_down", "Right deck one step quieter", |d: &Decks| d.right.volume_down(1)),
    action!("left_mute", "Turn the left deck all the way down", |d: &Decks| d.left.mute()),
    action!("right_mute", "Turn the right deck all the way down", |d: &Decks| d.right.mute()),
    action!("mute_both", "Turn both decks all the way down", |d: &Decks| d.mute()),
    action!("autofade_left", "Full crossfade to the left deck", |d: &Decks| d.crossfade(-10)),
    action!("autofade_right", "Full crossfade to the right deck", |d: &Decks| d.crossfade(10)),
    action!("left_toggle", "Play/pause the left deck", |d: &Decks| d.left.toggle()),
    action!("right_toggle", "Play/pause the right deck", |d: &Decks| d.right.toggle()),
    action!("left_pause", "Pause the left deck", requires Left, |d: &Decks| d.left.pause()),
    action!("right_pause", "Pause the right deck", requires Right, |d: &Decks| d.right.pause()),
    action!("reset", "Left deck up and playing, right deck down", |d: &Decks| d.reset()),
];

/// Returns a registry mapping action names to their definitions
pub fn get_action_registry() -> HashMap<&'static str, &'static Action> {
    ACTIONS.iter().map(|a| (a.name, a)).collect()
}

/// Look up an action by name
pub fn get_action(name: &str) -> Option<&'static Action> {
    get_action_registry().get(name).copied()
}

/// Run a named action once, failing if it is unknown or unavailable
pub fn run_action(decks: &Decks, name: &str) -> Result<()> {
    let action = get_action(name).with_context(|| format!("Unknown action: {}", name))?;
    run(decks, action)
}

/// Run an action, failing if the decks lack the session control it needs
pub fn run(decks: &Decks, action: &Action) -> Result<()> {
    if !action.is_available(decks.capabilities()) {
        anyhow::bail!(
            "Action {} needs a USER:WID target for {}",
            action.name,
            match action.requires {
                Requires::Left => "the left deck",
                Requires::Right => "the right deck",
                _ => "both decks",
            }
        );
    }

    log::info!("action: {}", action.name);
    (action.run)(decks).with_context(|| format!("Action {} failed", action.name))
}

/// Actions usable with the given decks, in table order
pub fn available(caps: Capabilities) -> impl Iterator<Item = &'static Action> {
    ACTIONS.iter().filter(move |a| a.is_available(caps))
}
