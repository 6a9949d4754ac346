use crate::rows::{CartItem, PresenceRow, Product, UserRecord};
use mallspace_common::{AvatarVariant, ParticipantId};

/// Errors from shared-store operations.
///
/// Everything here is non-fatal to a session: callers log and skip the
/// cycle, then retry on the next scheduled attempt.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("row not found: {0}")]
    NotFound(String),
    #[error("backend unavailable: {0}")]
    Unavailable(String),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Handle for an open presence change subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// A change notification from the presence table. Consumers receive
/// their own writes too and are expected to filter by participant id.
#[derive(Debug, Clone, PartialEq)]
pub enum PresenceChange {
    /// Insert or update; carries the full row after the write.
    Upserted(PresenceRow),
    /// Row deletion (explicit leave or staleness reaping).
    Deleted(ParticipantId),
}

/// The backend-as-a-service contract: row-level CRUD over four tables
/// plus a polled change feed on `user_presence`.
///
/// All writes are idempotent or last-writer-wins on a single row, so
/// overlapping in-flight calls need no mutual exclusion beyond `&mut`.
pub trait SharedStore {
    // --- users ---
    fn get_user(&self, id: ParticipantId) -> Result<Option<UserRecord>, StoreError>;
    fn insert_user(&mut self, user: UserRecord) -> Result<(), StoreError>;
    /// Update the mutable fields of an existing user record.
    fn update_user_variant(
        &mut self,
        id: ParticipantId,
        variant: AvatarVariant,
        now: f64,
    ) -> Result<(), StoreError>;
    fn list_users(&self) -> Result<Vec<UserRecord>, StoreError>;

    // --- presence ---
    fn upsert_presence(&mut self, row: PresenceRow) -> Result<(), StoreError>;
    /// Heartbeat: refresh `last_seen` without touching position.
    fn touch_presence(&mut self, id: ParticipantId, last_seen: f64) -> Result<(), StoreError>;
    fn delete_presence(&mut self, id: ParticipantId) -> Result<(), StoreError>;
    /// Bootstrap fetch: every presence row except the given id.
    fn fetch_presence_except(
        &self,
        id: ParticipantId,
    ) -> Result<Vec<PresenceRow>, StoreError>;

    // --- presence change feed ---
    fn subscribe_presence(&mut self) -> SubscriptionId;
    fn unsubscribe_presence(&mut self, sub: SubscriptionId);
    /// Drain all notifications queued for this subscription since the
    /// previous poll, in write order.
    fn poll_presence_changes(
        &mut self,
        sub: SubscriptionId,
    ) -> Result<Vec<PresenceChange>, StoreError>;

    /// Staleness reaping: delete every presence row whose `last_seen`
    /// is older than `now - stale_after` and emit ordinary delete
    /// notifications for each. Any client or operator may call this;
    /// it is how rows orphaned by a failed leave get reclaimed.
    fn reap_stale_presence(
        &mut self,
        now: f64,
        stale_after: f64,
    ) -> Result<Vec<ParticipantId>, StoreError>;

    // --- catalog ---
    /// Products ordered by creation time ascending.
    fn list_products(&self) -> Result<Vec<Product>, StoreError>;
    fn insert_product(&mut self, product: Product) -> Result<(), StoreError>;

    // --- cart ---
    fn cart_items(&self, user: ParticipantId) -> Result<Vec<CartItem>, StoreError>;
    fn find_cart_item(
        &self,
        user: ParticipantId,
        product_id: &str,
    ) -> Result<Option<CartItem>, StoreError>;
    fn insert_cart_item(
        &mut self,
        user: ParticipantId,
        product_id: &str,
        quantity: u32,
        now: f64,
    ) -> Result<CartItem, StoreError>;
    fn update_cart_quantity(&mut self, item_id: u64, quantity: u32) -> Result<(), StoreError>;
    fn delete_cart_item(&mut self, item_id: u64) -> Result<(), StoreError>;
    fn clear_cart(&mut self, user: ParticipantId) -> Result<(), StoreError>;
}
