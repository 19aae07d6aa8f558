// Idle-tracking types and raw-setting resolution

use serde::{Deserialize, Serialize};

/// Store key under which a user's last-activity timestamp lives.
pub const LAST_ACTIVE_KEY: &str = "idle_logout_last_active_time";

/// Fallback idle threshold when the configured value is unusable.
pub const DEFAULT_IDLE_TIME_SECS: i64 = 1800;

/// Fallback message shown after an idle-triggered logout.
pub const DEFAULT_IDLE_MESSAGE: &str = "You have been logged out due to inactivity.";

/// Outcome of an activity check for an authenticated request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Session is live; the request may proceed.
    Allow,
    /// Session sat idle past the threshold; the caller must terminate it.
    ForceLogout,
}

/// Resolved tracker configuration
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Maximum allowed gap between authenticated requests, in seconds
    pub idle_time_secs: i64,
    /// Message displayed after an idle-triggered logout
    pub idle_message: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            idle_time_secs: DEFAULT_IDLE_TIME_SECS,
            idle_message: DEFAULT_IDLE_MESSAGE.to_string(),
        }
    }
}

impl TrackerConfig {
    /// Resolve raw, operator-provided settings into a usable config.
    ///
    /// Unusable values fall back to defaults rather than failing, so a
    /// bad setting never prevents startup.
    pub fn from_raw(idle_time: Option<&str>, idle_message: Option<&str>) -> Self {
        Self {
            idle_time_secs: resolve_idle_time(idle_time),
            idle_message: resolve_idle_message(idle_message),
        }
    }
}

/// Resolve the idle threshold from a raw setting value.
///
/// The value is accepted only when it parses as a positive integer;
/// anything unset, non-numeric, or non-positive resolves to the default.
pub fn resolve_idle_time(raw: Option<&str>) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(DEFAULT_IDLE_TIME_SECS)
}

/// Resolve the idle message from a raw setting value.
///
/// Non-empty values get newline-to-`<br />` normalization so multi-line
/// messages survive HTML display; unset or empty values resolve to the
/// default sentence.
pub fn resolve_idle_message(raw: Option<&str>) -> String {
    match raw {
        Some(msg) if !msg.trim().is_empty() => nl2br(msg),
        _ => DEFAULT_IDLE_MESSAGE.to_string(),
    }
}

fn nl2br(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\n', "<br />\n")
}
