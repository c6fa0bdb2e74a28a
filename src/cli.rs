use crate::deck::WindowId;
use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

/// DJ-mix between two media-player windows from the keyboard
#[derive(Parser, Debug)]
#[command(name = "fdsify", version)]
pub struct Args {
    /// Left deck: WID, or USER:WID to control the player's session as USER
    pub left: DeckTarget,

    /// Right deck: WID, or USER:WID to control the player's session as USER
    pub right: DeckTarget,

    /// Path of the xdotool executable
    #[arg(short = 'x', long)]
    pub xdotool: Option<PathBuf>,

    /// Path of the dbus-send executable
    #[arg(short = 'd', long = "dbus-send")]
    pub dbus_send: Option<PathBuf>,

    /// Configuration file (defaults to ./fdsify.toml when present)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Level the decks (left up, right down) and start the left deck first
    #[arg(short = 'r', long)]
    pub reset: bool,

    /// Run a named action and exit instead of opening the key window
    #[arg(short = 'a', long = "action", value_name = "NAME")]
    pub actions: Vec<String>,

    /// Step the two decks alternately instead of in parallel when crossfading
    #[arg(long)]
    pub sequential: bool,

    /// Print available actions and key bindings, then exit
    #[arg(long)]
    pub list_actions: bool,
}

/// Which player window a deck drives, and optionally whose session it lives in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckTarget {
    pub user: Option<String>,
    pub window: WindowId,
}

impl FromStr for DeckTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.rsplit_once(':') {
            Some((user, wid)) => {
                if user.is_empty() {
                    return Err(format!("missing user name in '{}'", s));
                }
                Ok(DeckTarget {
                    user: Some(user.to_string()),
                    window: wid.parse()?,
                })
            }
            None => Ok(DeckTarget {
                user: None,
                window: s.parse()?,
            }),
        }
    }
}
