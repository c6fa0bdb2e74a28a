//! Errors raised by the external tools a deck drives

use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    /// The executable could not be started at all
    #[error("failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// The executable ran and exited non-zero
    #[error("{tool} exited with {status}")]
    Failed { tool: String, status: ExitStatus },

    /// Session-only operation on a keystroke-only deck
    #[error("{deck} deck has no session control, cannot {operation}")]
    Unsupported {
        deck: String,
        operation: &'static str,
    },
}

pub type ToolResult<T> = Result<T, ToolError>;
