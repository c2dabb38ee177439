use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the refresh pipeline.
#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No almanac script found in {}", dir.display())]
    ScriptNotFound { dir: PathBuf },

    #[error("Failed to launch almanac script: {0}")]
    Launch(String),

    #[error("Almanac script did not finish within {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Almanac script exited with status {code:?}: {stderr}")]
    ScriptFailed { code: Option<i32>, stderr: String },
}
