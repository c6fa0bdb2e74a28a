//! MPRIS player control over the session bus via dbus-send
//!
//! Each deck's player runs under its own unix user, so dbus-send is run
//! through sudo as that user to reach the right session bus.

use crate::config::{PlayerConfig, ToolsConfig};
use crate::error::ToolResult;
use crate::exec;
use std::path::PathBuf;

/// Player methods a deck can invoke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    Pause,
    PlayPause,
}

impl PlayerCommand {
    pub fn method(self) -> &'static str {
        match self {
            PlayerCommand::Pause => "Pause",
            PlayerCommand::PlayPause => "PlayPause",
        }
    }
}

/// Something that can deliver a player command to one session
pub trait SessionControl: Send + Sync {
    /// The process-owner identity this client targets
    fn identity(&self) -> &str;

    fn send(&self, command: PlayerCommand) -> ToolResult<()>;
}

/// dbus-send wrapper bound to one user's session
#[derive(Debug, Clone)]
pub struct DbusSend {
    sudo: PathBuf,
    dbus_send: PathBuf,
    user: String,
    player: PlayerConfig,
}

impl DbusSend {
    pub fn new(tools: &ToolsConfig, player: &PlayerConfig, user: impl Into<String>) -> Self {
        Self {
            sudo: tools.sudo.clone(),
            dbus_send: tools.dbus_send.clone(),
            user: user.into(),
            player: player.clone(),
        }
    }

    fn args(&self, command: PlayerCommand) -> Vec<String> {
        vec![
            "-u".to_string(),
            self.user.clone(),
            self.dbus_send.display().to_string(),
            "--print-reply".to_string(),
            format!("--dest={}", self.player.destination),
            self.player.object_path.clone(),
            format!("{}.{}", self.player.interface, command.method()),
        ]
    }
}

impl SessionControl for DbusSend {
    fn identity(&self) -> &str {
        &self.user
    }

    fn send(&self, command: PlayerCommand) -> ToolResult<()> {
        exec::run(&self.sudo, &self.args(command), true)
    }
}
