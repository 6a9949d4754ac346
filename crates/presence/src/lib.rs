//! Real-time presence synchronization over the shared store.
//!
//! Each client runs one [`PresenceSession`]. The session owns the
//! participant's lifecycle against the store: ensure a durable user
//! record, publish a live presence row at a throttled rate, heartbeat
//! while idle, maintain a roster of remote participants from the change
//! feed, and tear the row down on leave.
//!
//! # Invariants
//! - The change subscription is opened before the bootstrap fetch, so
//!   rows written during the fetch are never lost; overlap is resolved
//!   by `last_seen` timestamp (newest write wins).
//! - A participant's own changes are filtered out of its roster.
//! - Store failures are transient: the session logs, counts, and
//!   retries on the next cycle instead of tearing down.
//! - Leave is best-effort; rows orphaned by a failed leave are
//!   reclaimed by staleness reaping.

pub mod session;

pub use session::{
    PresenceConfig, PresenceSession, PresenceStats, RemoteParticipant, SessionPhase,
};

pub fn crate_info() -> &'static str {
    "mallspace-presence v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("presence"));
    }
}
