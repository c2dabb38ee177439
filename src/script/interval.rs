//! Refresh-interval extraction from script file names.
//!
//! A script named `solar_calendar.48m.py` asks to be rerun every 48
//! minutes; the embedded `.<count><unit>.` token uses s/m/h/d units.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

/// Interval used when a script name carries no interval token.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(3600);

static INTERVAL_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.(\d+)([smhd])\.").expect("interval token pattern is valid"));

/// Derive the refresh period from a script file name.
///
/// Absence of a token is not an error: callers get the one-hour
/// default and must treat it as "no explicit interval" rather than a
/// malformed name. A zero count also defaults, keeping the period
/// positive.
pub fn parse_refresh_interval(file_name: &str) -> Duration {
    let Some(captures) = INTERVAL_TOKEN.captures(file_name) else {
        return DEFAULT_REFRESH_INTERVAL;
    };

    let Ok(count) = captures[1].parse::<u64>() else {
        return DEFAULT_REFRESH_INTERVAL;
    };

    let multiplier = match &captures[2] {
        "s" => 1,
        "m" => 60,
        "h" => 3600,
        "d" => 86400,
        _ => return DEFAULT_REFRESH_INTERVAL,
    };

    let secs = count.saturating_mul(multiplier);
    if secs == 0 {
        return DEFAULT_REFRESH_INTERVAL;
    }
    Duration::from_secs(secs)
}
