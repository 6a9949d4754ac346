use crate::contract::{PresenceChange, SharedStore, StoreError, SubscriptionId};
use crate::rows::{CartItem, PresenceRow, Product, UserRecord};
use mallspace_common::{AvatarVariant, ParticipantId};
use std::collections::{BTreeMap, VecDeque};

/// Deterministic in-memory store backend.
///
/// All tables are `BTreeMap`s so iteration order is stable across runs,
/// which keeps multi-session simulations replayable. Change fan-out is
/// synchronous: every presence mutation appends to each open
/// subscription's queue before the mutating call returns.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: BTreeMap<ParticipantId, UserRecord>,
    presence: BTreeMap<ParticipantId, PresenceRow>,
    products: BTreeMap<String, Product>,
    cart: BTreeMap<u64, CartItem>,
    subscriptions: BTreeMap<SubscriptionId, VecDeque<PresenceChange>>,
    next_cart_id: u64,
    next_sub_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live presence rows, for assertions and stats.
    pub fn presence_count(&self) -> usize {
        self.presence.len()
    }

    fn broadcast(&mut self, change: PresenceChange) {
        for queue in self.subscriptions.values_mut() {
            queue.push_back(change.clone());
        }
    }
}

impl SharedStore for MemoryStore {
    fn get_user(&self, id: ParticipantId) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.get(&id).cloned())
    }

    fn insert_user(&mut self, user: UserRecord) -> Result<(), StoreError> {
        self.users.insert(user.id, user);
        Ok(())
    }

    fn update_user_variant(
        &mut self,
        id: ParticipantId,
        variant: AvatarVariant,
        now: f64,
    ) -> Result<(), StoreError> {
        let user = self
            .users
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("user {id}")))?;
        user.avatar_variant = variant;
        user.updated_at = now;
        Ok(())
    }

    fn list_users(&self) -> Result<Vec<UserRecord>, StoreError> {
        Ok(self.users.values().cloned().collect())
    }

    fn upsert_presence(&mut self, row: PresenceRow) -> Result<(), StoreError> {
        self.presence.insert(row.user_id, row.clone());
        self.broadcast(PresenceChange::Upserted(row));
        Ok(())
    }

    fn touch_presence(&mut self, id: ParticipantId, last_seen: f64) -> Result<(), StoreError> {
        let row = self
            .presence
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("presence {id}")))?;
        row.last_seen = last_seen;
        let row = row.clone();
        self.broadcast(PresenceChange::Upserted(row));
        Ok(())
    }

    fn delete_presence(&mut self, id: ParticipantId) -> Result<(), StoreError> {
        if self.presence.remove(&id).is_some() {
            self.broadcast(PresenceChange::Deleted(id));
        }
        Ok(())
    }

    fn fetch_presence_except(
        &self,
        id: ParticipantId,
    ) -> Result<Vec<PresenceRow>, StoreError> {
        Ok(self
            .presence
            .values()
            .filter(|row| row.user_id != id)
            .cloned()
            .collect())
    }

    fn subscribe_presence(&mut self) -> SubscriptionId {
        self.next_sub_id += 1;
        let sub = SubscriptionId(self.next_sub_id);
        self.subscriptions.insert(sub, VecDeque::new());
        sub
    }

    fn unsubscribe_presence(&mut self, sub: SubscriptionId) {
        self.subscriptions.remove(&sub);
    }

    fn poll_presence_changes(
        &mut self,
        sub: SubscriptionId,
    ) -> Result<Vec<PresenceChange>, StoreError> {
        let queue = self
            .subscriptions
            .get_mut(&sub)
            .ok_or_else(|| StoreError::NotFound(format!("subscription {}", sub.0)))?;
        Ok(queue.drain(..).collect())
    }

    fn reap_stale_presence(
        &mut self,
        now: f64,
        stale_after: f64,
    ) -> Result<Vec<ParticipantId>, StoreError> {
        let cutoff = now - stale_after;
        let stale: Vec<ParticipantId> = self
            .presence
            .values()
            .filter(|row| row.last_seen < cutoff)
            .map(|row| row.user_id)
            .collect();
        for id in &stale {
            self.presence.remove(id);
            self.broadcast(PresenceChange::Deleted(*id));
        }
        if !stale.is_empty() {
            tracing::info!(count = stale.len(), "reaped stale presence rows");
        }
        Ok(stale)
    }

    fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let mut products: Vec<Product> = self.products.values().cloned().collect();
        products.sort_by(|a, b| {
            a.created_at
                .partial_cmp(&b.created_at)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(products)
    }

    fn insert_product(&mut self, product: Product) -> Result<(), StoreError> {
        self.products.insert(product.id.clone(), product);
        Ok(())
    }

    fn cart_items(&self, user: ParticipantId) -> Result<Vec<CartItem>, StoreError> {
        Ok(self
            .cart
            .values()
            .filter(|item| item.user_id == user)
            .cloned()
            .collect())
    }

    fn find_cart_item(
        &self,
        user: ParticipantId,
        product_id: &str,
    ) -> Result<Option<CartItem>, StoreError> {
        Ok(self
            .cart
            .values()
            .find(|item| item.user_id == user && item.product_id == product_id)
            .cloned())
    }

    fn insert_cart_item(
        &mut self,
        user: ParticipantId,
        product_id: &str,
        quantity: u32,
        now: f64,
    ) -> Result<CartItem, StoreError> {
        self.next_cart_id += 1;
        let item = CartItem {
            id: self.next_cart_id,
            user_id: user,
            product_id: product_id.to_owned(),
            quantity,
            created_at: now,
        };
        self.cart.insert(item.id, item.clone());
        Ok(item)
    }

    fn update_cart_quantity(&mut self, item_id: u64, quantity: u32) -> Result<(), StoreError> {
        let item = self
            .cart
            .get_mut(&item_id)
            .ok_or_else(|| StoreError::NotFound(format!("cart item {item_id}")))?;
        item.quantity = quantity;
        Ok(())
    }

    fn delete_cart_item(&mut self, item_id: u64) -> Result<(), StoreError> {
        self.cart.remove(&item_id);
        Ok(())
    }

    fn clear_cart(&mut self, user: ParticipantId) -> Result<(), StoreError> {
        self.cart.retain(|_, item| item.user_id != user);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mallspace_common::FacingDirection;

    fn presence(id: ParticipantId, last_seen: f64) -> PresenceRow {
        PresenceRow {
            user_id: id,
            username: "ada".into(),
            position_x: 0.0,
            position_y: 0.0,
            direction: FacingDirection::Down,
            is_moving: false,
            last_seen,
        }
    }

    #[test]
    fn upsert_fans_out_to_all_subscriptions_including_writer() {
        let mut store = MemoryStore::new();
        let a = store.subscribe_presence();
        let b = store.subscribe_presence();
        let id = ParticipantId::new();
        store.upsert_presence(presence(id, 1.0)).unwrap();

        for sub in [a, b] {
            let changes = store.poll_presence_changes(sub).unwrap();
            assert_eq!(changes.len(), 1);
            assert!(matches!(&changes[0], PresenceChange::Upserted(row) if row.user_id == id));
        }
        // Second poll is empty: the queue drained.
        assert!(store.poll_presence_changes(a).unwrap().is_empty());
    }

    #[test]
    fn delete_notifies_once_and_is_idempotent() {
        let mut store = MemoryStore::new();
        let sub = store.subscribe_presence();
        let id = ParticipantId::new();
        store.upsert_presence(presence(id, 1.0)).unwrap();
        store.delete_presence(id).unwrap();
        store.delete_presence(id).unwrap();

        let changes = store.poll_presence_changes(sub).unwrap();
        let deletes = changes
            .iter()
            .filter(|c| matches!(c, PresenceChange::Deleted(did) if *did == id))
            .count();
        assert_eq!(deletes, 1);
    }

    #[test]
    fn unsubscribed_consumer_stops_receiving() {
        let mut store = MemoryStore::new();
        let sub = store.subscribe_presence();
        store.unsubscribe_presence(sub);
        store.upsert_presence(presence(ParticipantId::new(), 1.0)).unwrap();
        assert!(store.poll_presence_changes(sub).is_err());
    }

    #[test]
    fn fetch_presence_excludes_requester() {
        let mut store = MemoryStore::new();
        let me = ParticipantId::new();
        let other = ParticipantId::new();
        store.upsert_presence(presence(me, 1.0)).unwrap();
        store.upsert_presence(presence(other, 2.0)).unwrap();

        let rows = store.fetch_presence_except(me).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].user_id, other);
    }

    #[test]
    fn reap_deletes_only_stale_rows_and_notifies() {
        let mut store = MemoryStore::new();
        let sub = store.subscribe_presence();
        let fresh = ParticipantId::new();
        let stale = ParticipantId::new();
        store.upsert_presence(presence(fresh, 100.0)).unwrap();
        store.upsert_presence(presence(stale, 80.0)).unwrap();
        store.poll_presence_changes(sub).unwrap();

        let reaped = store.reap_stale_presence(100.0, 15.0).unwrap();
        assert_eq!(reaped, vec![stale]);
        assert_eq!(store.presence_count(), 1);

        let changes = store.poll_presence_changes(sub).unwrap();
        assert_eq!(changes, vec![PresenceChange::Deleted(stale)]);
    }

    #[test]
    fn touch_refreshes_last_seen_without_moving() {
        let mut store = MemoryStore::new();
        let id = ParticipantId::new();
        let mut row = presence(id, 1.0);
        row.position_x = 3.5;
        store.upsert_presence(row).unwrap();
        store.touch_presence(id, 9.0).unwrap();

        let rows = store.fetch_presence_except(ParticipantId::new()).unwrap();
        assert_eq!(rows[0].last_seen, 9.0);
        assert_eq!(rows[0].position_x, 3.5);
    }

    #[test]
    fn touch_missing_row_is_not_found() {
        let mut store = MemoryStore::new();
        assert!(matches!(
            store.touch_presence(ParticipantId::new(), 1.0),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn products_ordered_by_creation_time() {
        let mut store = MemoryStore::new();
        for (id, created_at) in [("c", 3.0), ("a", 1.0), ("b", 2.0)] {
            store
                .insert_product(Product {
                    id: id.into(),
                    name: id.to_uppercase(),
                    description: None,
                    price: 10.0,
                    category: "tops".into(),
                    image_url: None,
                    position_x: 0.0,
                    position_y: 0.0,
                    created_at,
                })
                .unwrap();
        }
        let ids: Vec<String> = store
            .list_products()
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn cart_ids_are_unique_and_clear_scopes_to_user() {
        let mut store = MemoryStore::new();
        let ada = ParticipantId::new();
        let bob = ParticipantId::new();
        let first = store.insert_cart_item(ada, "p-1", 1, 0.0).unwrap();
        let second = store.insert_cart_item(ada, "p-2", 2, 1.0).unwrap();
        store.insert_cart_item(bob, "p-1", 1, 2.0).unwrap();
        assert_ne!(first.id, second.id);

        store.clear_cart(ada).unwrap();
        assert!(store.cart_items(ada).unwrap().is_empty());
        assert_eq!(store.cart_items(bob).unwrap().len(), 1);
    }

    #[test]
    fn update_user_variant_persists() {
        let mut store = MemoryStore::new();
        let id = ParticipantId::new();
        store
            .insert_user(UserRecord {
                id,
                username: "ada".into(),
                avatar_variant: AvatarVariant::Default,
                created_at: 0.0,
                updated_at: 0.0,
            })
            .unwrap();
        store
            .update_user_variant(id, AvatarVariant::Vibrant, 5.0)
            .unwrap();
        let user = store.get_user(id).unwrap().unwrap();
        assert_eq!(user.avatar_variant, AvatarVariant::Vibrant);
        assert_eq!(user.updated_at, 5.0);
    }
}
