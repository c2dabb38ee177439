use serde::{Deserialize, Serialize};

/// Configuration for the almanac menu backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the almanac scripts. When unset, `scripts/`
    /// next to the application root is used.
    #[serde(default)]
    pub scripts_dir: Option<String>,

    #[serde(default = "default_shell")]
    pub shell: String,

    #[serde(default = "default_interpreter")]
    pub interpreter: String,

    /// Environment activation script sourced before the interpreter
    /// runs (a Python venv `bin/activate`).
    #[serde(default)]
    pub env_activate: Option<String>,

    #[serde(default = "default_script_extension")]
    pub script_extension: String,

    #[serde(default = "default_script_timeout_secs")]
    pub script_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scripts_dir: None,
            shell: default_shell(),
            interpreter: default_interpreter(),
            env_activate: None,
            script_extension: default_script_extension(),
            script_timeout_secs: default_script_timeout_secs(),
        }
    }
}

fn default_shell() -> String {
    "/bin/zsh".to_string()
}

fn default_interpreter() -> String {
    "python3".to_string()
}

fn default_script_extension() -> String {
    "py".to_string()
}

fn default_script_timeout_secs() -> u64 {
    120
}
