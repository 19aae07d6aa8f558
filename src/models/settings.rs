use serde::{Deserialize, Serialize};

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Idle-logout settings, kept raw as the operator wrote them
    #[serde(default)]
    pub session: IdleSettings,
    /// Bearer-token settings for the gateway
    #[serde(default)]
    pub auth: AuthSettings,
}

/// Raw idle-logout settings.
///
/// Values stay unvalidated here; resolution (defaults, numeric checks,
/// message normalization) happens in `session::types`, so an unusable
/// value never prevents startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdleSettings {
    /// Idle threshold in seconds, as a raw string
    #[serde(default)]
    pub idle_time: Option<String>,
    /// Message displayed after an idle-triggered logout
    #[serde(default)]
    pub idle_message: Option<String>,
}

/// Bearer-token settings for the gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSettings {
    /// Token expiration in seconds (default: 86400 = 24 hours)
    #[serde(default = "default_token_expiration")]
    pub token_expiration_secs: i64,
}

fn default_token_expiration() -> i64 {
    86400
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            token_expiration_secs: default_token_expiration(),
        }
    }
}

impl AppConfig {
    /// Validate the parts that must be well-formed at startup.
    ///
    /// Raw idle values are deliberately not checked here; they resolve
    /// to defaults instead of failing.
    pub fn validate(&self) -> Result<(), String> {
        if self.auth.token_expiration_secs <= 0 {
            return Err("auth.token_expiration_secs must be positive".to_string());
        }
        Ok(())
    }
}
