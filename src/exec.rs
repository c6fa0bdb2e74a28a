//! Blocking execution of external tools

use crate::error::{ToolError, ToolResult};
use std::path::Path;
use std::process::{Command, Stdio};

/// Run a command to completion, mapping a non-zero exit to [`ToolError::Failed`]
///
/// stdin is always closed. stdout is inherited unless `quiet` is set, in
/// which case it is discarded (dbus-send --print-reply is noisy).
pub fn run(program: &Path, args: &[String], quiet: bool) -> ToolResult<()> {
    let tool = program.display().to_string();
    log::debug!("exec: {} {:?}", tool, args);

    let mut cmd = Command::new(program);
    cmd.args(args).stdin(Stdio::null());
    if quiet {
        cmd.stdout(Stdio::null());
    }

    let status = cmd.status().map_err(|source| ToolError::Spawn {
        tool: tool.clone(),
        source,
    })?;

    if status.success() {
        Ok(())
    } else {
        log::error!("{} exited with {}", tool, status);
        Err(ToolError::Failed { tool, status })
    }
}
