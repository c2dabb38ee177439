mod interval;
mod locator;

pub use interval::{parse_refresh_interval, DEFAULT_REFRESH_INTERVAL};
pub use locator::{locate_script, ScriptHandle};
