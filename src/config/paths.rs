use std::env;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, warn};

use crate::types::RefreshError;

use super::Config;

/// Environment override for the scripts directory.
pub const SCRIPTS_DIR_ENV: &str = "ALMANAC_SCRIPTS_DIR";

impl Config {
    /// Resolve the directory the almanac scripts live in.
    ///
    /// Precedence: `ALMANAC_SCRIPTS_DIR`, then the configured
    /// `scripts_dir`, then `scripts/` under the app root.
    pub fn scripts_dir_path(&self) -> Result<PathBuf, RefreshError> {
        if let Ok(value) = env::var(SCRIPTS_DIR_ENV) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Ok(PathBuf::from(trimmed));
            }
        }

        if let Some(dir) = &self.scripts_dir {
            return Ok(PathBuf::from(dir));
        }

        Ok(Self::app_root_dir()?.join("scripts"))
    }

    /// Hard limit on one script run.
    pub fn script_timeout(&self) -> Duration {
        Duration::from_secs(self.script_timeout_secs)
    }

    /// Get the root directory of the application
    pub fn app_root_dir() -> Result<PathBuf, RefreshError> {
        let config_path = get_config_path()?;
        match config_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => Ok(parent.to_path_buf()),
            Some(_) => std::env::current_dir().map_err(|err| {
                RefreshError::Config(format!("Failed to determine app root: {err}"))
            }),
            None => Err(RefreshError::Config(
                "Unable to determine app root directory".to_string(),
            )),
        }
    }
}

/// Get the path to the config.json file
/// Looks for config.json in the app directory (parent of backend folder)
pub(super) fn get_config_path() -> Result<PathBuf, RefreshError> {
    // Executable is at: app_root/backend/entry
    // Config should be at: app_root/config.json
    if let Ok(exe_path) = std::env::current_exe() {
        debug!(path = %exe_path.display(), "Executable path detected");

        if let Some(backend_dir) = exe_path.parent() {
            if let Some(app_root) = backend_dir.parent() {
                let config_path = app_root.join("config.json");
                debug!(path = %config_path.display(), "Looking for config");
                return Ok(config_path);
            }
        }
    }

    // Fallback: look in current directory
    warn!("Using fallback: looking for config.json in current directory");
    Ok(PathBuf::from("config.json"))
}
