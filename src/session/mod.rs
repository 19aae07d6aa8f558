// Idle-session tracking module
// Decides per request whether an authenticated session sat idle too long

pub mod store;
pub mod tracker;
pub mod types;

pub use store::{MemoryUserStore, StoreError, UserStore};
pub use tracker::IdleSessionTracker;
pub use types::{
    DEFAULT_IDLE_MESSAGE, DEFAULT_IDLE_TIME_SECS, LAST_ACTIVE_KEY, TrackerConfig, Verdict,
    resolve_idle_message, resolve_idle_time,
};
