//! Synthetic keystrokes delivered to a specific X11 window via xdotool

use crate::deck::WindowId;
use crate::error::ToolResult;
use crate::exec;
use std::path::PathBuf;

/// Something that can deliver key-presses and text to a window
///
/// One entry in `keys` is one key-down/key-up pair delivered to the
/// window, in order. Implementations must deliver all of them or fail.
pub trait InputAutomation: Send + Sync {
    fn key(&self, window: WindowId, keys: &[&str]) -> ToolResult<()>;

    /// Send-text half of the automation contract; no deck operation types text yet
    #[allow(dead_code)]
    fn type_text(&self, window: WindowId, text: &str) -> ToolResult<()>;
}

/// xdotool executable wrapper
///
/// A batch of keys is issued as a single process carrying one
/// `key --window WID KEY` tuple per key-press.
#[derive(Debug, Clone)]
pub struct XdoTool {
    path: PathBuf,
}

impl XdoTool {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn args(window: WindowId, commands: &[(&str, &str)]) -> Vec<String> {
        let wid = window.to_string();
        let mut args = Vec::with_capacity(commands.len() * 4);
        for (command, operand) in commands {
            args.push(command.to_string());
            args.push("--window".to_string());
            args.push(wid.clone());
            args.push(operand.to_string());
        }
        args
    }
}

impl InputAutomation for XdoTool {
    fn key(&self, window: WindowId, keys: &[&str]) -> ToolResult<()> {
        if keys.is_empty() {
            return Ok(());
        }
        let commands: Vec<(&str, &str)> = keys.iter().map(|k| ("key", *k)).collect();
        exec::run(&self.path, &Self::args(window, &commands), false)
    }

    fn type_text(&self, window: WindowId, text: &str) -> ToolResult<()> {
        exec::run(&self.path, &Self::args(window, &[("type", text)]), false)
    }
}
