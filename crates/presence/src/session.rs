use glam::Vec3;
use mallspace_common::{AvatarVariant, FacingDirection, ParticipantId, PlayerKinematicState};
use mallspace_store::{
    PresenceChange, PresenceRow, SharedStore, StoreError, SubscriptionId, UserRecord,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Presence publishing and liveness tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PresenceConfig {
    /// Minimum seconds between presence publishes.
    pub publish_interval: f64,
    /// Minimum horizontal displacement that justifies a publish while
    /// the movement flag is unchanged.
    pub min_publish_delta: f32,
    /// Seconds between liveness touches while nothing publishes.
    pub heartbeat_interval: f64,
    /// Age past which a presence row may be reaped by anyone.
    pub stale_after: f64,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            publish_interval: 0.1,
            min_publish_delta: 0.1,
            heartbeat_interval: 5.0,
            stale_after: 15.0,
        }
    }
}

/// Session lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Uninitialized,
    /// Subscribed, initial roster fetch not yet merged.
    Bootstrapping,
    Live,
    Left,
}

/// Counters for publish traffic and fault handling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PresenceStats {
    pub publishes: u64,
    pub publishes_skipped: u64,
    pub heartbeats: u64,
    pub changes_applied: u64,
    pub transient_errors: u64,
}

/// Roster entry: the last known kinematic state of a remote
/// participant, as merged from the bootstrap fetch and the change
/// feed, plus the timestamp that ordered the merge.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteParticipant {
    /// Replicated state. The vertical coordinate is not carried on the
    /// wire; `position.y` stays zero and elevation is derived locally.
    pub state: PlayerKinematicState,
    pub last_seen: f64,
}

impl RemoteParticipant {
    fn from_row(row: PresenceRow, variant: AvatarVariant) -> Self {
        Self {
            state: PlayerKinematicState {
                position: Vec3::new(row.position_x, 0.0, row.position_y),
                facing: row.direction,
                is_moving: row.is_moving,
                variant,
                username: row.username,
            },
            last_seen: row.last_seen,
        }
    }
}

/// One participant's presence session against the shared store.
///
/// The session is driven externally: `join` (or the two-phase
/// `begin_join` / `finish_bootstrap` pair), then `tick` once per frame
/// with the locally resolved state, then `leave`.
#[derive(Debug)]
pub struct PresenceSession {
    id: ParticipantId,
    username: String,
    variant: AvatarVariant,
    config: PresenceConfig,
    phase: SessionPhase,
    subscription: Option<SubscriptionId>,
    roster: BTreeMap<ParticipantId, RemoteParticipant>,
    variant_cache: BTreeMap<ParticipantId, AvatarVariant>,
    last_publish_at: f64,
    last_published: Option<(f32, f32, bool)>,
    last_liveness_at: f64,
    stats: PresenceStats,
}

impl PresenceSession {
    pub fn new(
        id: ParticipantId,
        username: impl Into<String>,
        variant: AvatarVariant,
        config: PresenceConfig,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            variant,
            config,
            phase: SessionPhase::Uninitialized,
            subscription: None,
            roster: BTreeMap::new(),
            variant_cache: BTreeMap::new(),
            last_publish_at: f64::NEG_INFINITY,
            last_published: None,
            last_liveness_at: f64::NEG_INFINITY,
            stats: PresenceStats::default(),
        }
    }

    pub fn id(&self) -> ParticipantId {
        self.id
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn stats(&self) -> PresenceStats {
        self.stats
    }

    /// Remote participants currently known to this session.
    pub fn roster(&self) -> &BTreeMap<ParticipantId, RemoteParticipant> {
        &self.roster
    }

    /// Full join: user record, subscription, initial publish, roster
    /// bootstrap.
    pub fn join<S: SharedStore>(
        &mut self,
        store: &mut S,
        position: Vec3,
        now: f64,
    ) -> Result<(), StoreError> {
        self.begin_join(store, position, now)?;
        self.finish_bootstrap(store)
    }

    /// First join phase: ensure the durable user record, open the
    /// change subscription, and publish the initial presence row.
    ///
    /// The subscription must exist before `finish_bootstrap` fetches
    /// the roster; rows written in between are buffered in the feed.
    pub fn begin_join<S: SharedStore>(
        &mut self,
        store: &mut S,
        position: Vec3,
        now: f64,
    ) -> Result<(), StoreError> {
        match store.get_user(self.id)? {
            Some(user) => {
                if user.avatar_variant != self.variant {
                    store.update_user_variant(self.id, self.variant, now)?;
                }
            }
            None => {
                store.insert_user(UserRecord {
                    id: self.id,
                    username: self.username.clone(),
                    avatar_variant: self.variant,
                    created_at: now,
                    updated_at: now,
                })?;
            }
        }

        self.subscription = Some(store.subscribe_presence());
        store.upsert_presence(self.own_row(position, FacingDirection::Down, false, now))?;
        self.last_publish_at = now;
        self.last_published = Some((position.x, position.z, false));
        self.last_liveness_at = now;
        self.phase = SessionPhase::Bootstrapping;
        tracing::info!(id = %self.id, username = %self.username, "presence session joining");
        Ok(())
    }

    /// Second join phase: fetch the current roster and merge it with
    /// whatever the subscription buffered during the fetch window.
    pub fn finish_bootstrap<S: SharedStore>(&mut self, store: &mut S) -> Result<(), StoreError> {
        for row in store.fetch_presence_except(self.id)? {
            self.apply_row(store, row);
        }
        if let Some(sub) = self.subscription {
            let buffered = store.poll_presence_changes(sub)?;
            for change in buffered {
                self.apply_change(store, change);
            }
        }
        self.phase = SessionPhase::Live;
        tracing::debug!(id = %self.id, roster = self.roster.len(), "presence bootstrap complete");
        Ok(())
    }

    /// Per-frame drive: throttled publish, heartbeat, and change-feed
    /// consumption. Store failures are logged and retried next frame.
    pub fn tick<S: SharedStore>(
        &mut self,
        store: &mut S,
        position: Vec3,
        facing: FacingDirection,
        is_moving: bool,
        now: f64,
    ) {
        if self.phase != SessionPhase::Live {
            return;
        }

        if self.should_publish(position, is_moving, now) {
            let row = self.own_row(position, facing, is_moving, now);
            match store.upsert_presence(row) {
                Ok(()) => {
                    self.last_publish_at = now;
                    self.last_published = Some((position.x, position.z, is_moving));
                    self.last_liveness_at = now;
                    self.stats.publishes += 1;
                }
                Err(err) => {
                    self.stats.transient_errors += 1;
                    tracing::warn!(id = %self.id, error = %err, "presence publish failed, will retry");
                }
            }
        } else {
            self.stats.publishes_skipped += 1;
            if now - self.last_liveness_at >= self.config.heartbeat_interval {
                match store.touch_presence(self.id, now) {
                    Ok(()) => {
                        self.last_liveness_at = now;
                        self.stats.heartbeats += 1;
                    }
                    Err(err) => {
                        self.stats.transient_errors += 1;
                        tracing::warn!(id = %self.id, error = %err, "heartbeat failed, will retry");
                    }
                }
            }
        }

        if let Some(sub) = self.subscription {
            match store.poll_presence_changes(sub) {
                Ok(changes) => {
                    for change in changes {
                        self.apply_change(store, change);
                    }
                }
                Err(err) => {
                    self.stats.transient_errors += 1;
                    tracing::warn!(id = %self.id, error = %err, "change poll failed, will retry");
                }
            }
        }
    }

    /// Tear down: close the subscription, then delete the presence row
    /// best-effort. A failed delete leaves the row to be reaped after
    /// `stale_after` elapses.
    pub fn leave<S: SharedStore>(&mut self, store: &mut S) {
        if let Some(sub) = self.subscription.take() {
            store.unsubscribe_presence(sub);
        }
        if let Err(err) = store.delete_presence(self.id) {
            self.stats.transient_errors += 1;
            tracing::warn!(
                id = %self.id,
                error = %err,
                "presence delete failed on leave; row will go stale"
            );
        }
        self.phase = SessionPhase::Left;
        tracing::info!(id = %self.id, "presence session left");
    }

    fn should_publish(&self, position: Vec3, is_moving: bool, now: f64) -> bool {
        if now - self.last_publish_at < self.config.publish_interval {
            return false;
        }
        match self.last_published {
            None => true,
            Some((x, z, was_moving)) => {
                let dx = position.x - x;
                let dz = position.z - z;
                let moved = (dx * dx + dz * dz).sqrt() >= self.config.min_publish_delta;
                moved || is_moving || is_moving != was_moving
            }
        }
    }

    fn own_row(
        &self,
        position: Vec3,
        facing: FacingDirection,
        is_moving: bool,
        now: f64,
    ) -> PresenceRow {
        PresenceRow {
            user_id: self.id,
            username: self.username.clone(),
            position_x: position.x,
            position_y: position.z,
            direction: facing,
            is_moving,
            last_seen: now,
        }
    }

    fn apply_change<S: SharedStore>(&mut self, store: &mut S, change: PresenceChange) {
        match change {
            PresenceChange::Upserted(row) => {
                if row.user_id != self.id {
                    self.apply_row(store, row);
                }
            }
            PresenceChange::Deleted(id) => {
                if id != self.id && self.roster.remove(&id).is_some() {
                    self.stats.changes_applied += 1;
                    tracing::debug!(id = %id, "remote participant left");
                }
            }
        }
    }

    /// Merge one row into the roster, newest `last_seen` winning.
    fn apply_row<S: SharedStore>(&mut self, store: &mut S, row: PresenceRow) {
        if let Some(existing) = self.roster.get(&row.user_id) {
            if row.last_seen < existing.last_seen {
                return;
            }
        }
        let variant = self.lookup_variant(store, row.user_id);
        self.roster
            .insert(row.user_id, RemoteParticipant::from_row(row, variant));
        self.stats.changes_applied += 1;
    }

    /// Appearance lookup with a per-session cache. Missing records or
    /// store failures fall back to the default variant; a later cache
    /// miss retries the fetch.
    fn lookup_variant<S: SharedStore>(
        &mut self,
        store: &mut S,
        id: ParticipantId,
    ) -> AvatarVariant {
        if let Some(v) = self.variant_cache.get(&id) {
            return *v;
        }
        match store.get_user(id) {
            Ok(Some(user)) => {
                self.variant_cache.insert(id, user.avatar_variant);
                user.avatar_variant
            }
            Ok(None) => AvatarVariant::Default,
            Err(err) => {
                tracing::warn!(id = %id, error = %err, "variant lookup failed");
                AvatarVariant::Default
            }
        }
    }
}
