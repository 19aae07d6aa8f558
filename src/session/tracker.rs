// Idle-session tracking and the per-request activity decision

use super::store::{StoreError, UserStore};
use super::types::{LAST_ACTIVE_KEY, TrackerConfig, Verdict};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

/// Tracks per-user last-activity timestamps and decides, per request,
/// whether an authenticated session has sat idle past the configured
/// threshold.
///
/// The tracker holds no session state of its own; everything lives in
/// the injected [`UserStore`], keyed by user id. Concurrent requests for
/// the same user race on the activity record, which is accepted: two
/// refreshes are idempotent, and a refresh racing a delete leaves the
/// record either recreated or gone, both of which are safe outcomes.
pub struct IdleSessionTracker {
    store: Arc<dyn UserStore>,
    config: TrackerConfig,
}

impl IdleSessionTracker {
    /// Create a new tracker over the given store with resolved settings.
    pub fn new(store: Arc<dyn UserStore>, config: TrackerConfig) -> Self {
        Self { store, config }
    }

    /// Threshold in seconds after which a session counts as idle.
    pub fn idle_time_secs(&self) -> i64 {
        self.config.idle_time_secs
    }

    /// Message to display after an idle-triggered logout.
    pub fn idle_message(&self) -> &str {
        &self.config.idle_message
    }

    /// Record a completed login: the activity record is set to the
    /// current time, created if absent, overwritten if present.
    pub async fn on_authenticate(&self, user_id: &str) -> Result<(), StoreError> {
        self.on_authenticate_at(user_id, Utc::now().timestamp()).await
    }

    /// Same as [`on_authenticate`](Self::on_authenticate) with an
    /// explicit timestamp.
    pub async fn on_authenticate_at(&self, user_id: &str, now: i64) -> Result<(), StoreError> {
        debug!("Recording login activity for user {}", user_id);
        self.store.set(user_id, LAST_ACTIVE_KEY, &now.to_string()).await
    }

    /// Check an authenticated request against the idle threshold.
    ///
    /// Every non-idle check refreshes the record, so the timeout window
    /// slides with activity rather than being fixed at login. A missing
    /// or unparsable record counts as non-idle and is reset to now.
    pub async fn check_activity(&self, user_id: &str) -> Result<Verdict, StoreError> {
        self.check_activity_at(user_id, Utc::now().timestamp()).await
    }

    /// Same as [`check_activity`](Self::check_activity) with an explicit
    /// timestamp as the time source.
    pub async fn check_activity_at(&self, user_id: &str, now: i64) -> Result<Verdict, StoreError> {
        let raw = self.store.get(user_id, LAST_ACTIVE_KEY).await?;

        let last_active = match raw.as_deref().map(str::trim).and_then(|v| v.parse::<i64>().ok()) {
            Some(timestamp) => timestamp,
            None => {
                // Untracked user or garbled record: clear whatever is
                // there and open a fresh window from now.
                if raw.is_some() {
                    debug!("Resetting unparsable activity record for user {}", user_id);
                }
                self.store.delete(user_id, LAST_ACTIVE_KEY).await?;
                self.store.set(user_id, LAST_ACTIVE_KEY, &now.to_string()).await?;
                return Ok(Verdict::Allow);
            }
        };

        if last_active + self.config.idle_time_secs < now {
            info!(
                "User {} idle since {}, forcing logout after {}s threshold",
                user_id, last_active, self.config.idle_time_secs
            );
            self.store.delete(user_id, LAST_ACTIVE_KEY).await?;
            return Ok(Verdict::ForceLogout);
        }

        self.store.set(user_id, LAST_ACTIVE_KEY, &now.to_string()).await?;
        Ok(Verdict::Allow)
    }

    /// Drop the activity record on explicit logout; no-op when absent.
    ///
    /// The caller resolves which user is logging out; the tracker is
    /// always handed an explicit id.
    pub async fn on_logout(&self, user_id: &str) -> Result<(), StoreError> {
        debug!("Clearing activity record for user {}", user_id);
        self.store.delete(user_id, LAST_ACTIVE_KEY).await
    }
}
