use mallspace_common::ParticipantId;
use mallspace_store::{CartItem, Product, SharedStore, StoreError};

/// One cart row joined with its catalog product, when it still exists.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub item: CartItem,
    pub product: Option<Product>,
}

impl CartLine {
    /// Line total; zero when the product has left the catalog.
    pub fn subtotal(&self) -> f64 {
        self.product
            .as_ref()
            .map(|p| p.price * f64::from(self.item.quantity))
            .unwrap_or(0.0)
    }
}

/// Cart contents plus derived totals.
#[derive(Debug, Clone, Default)]
pub struct CartSummary {
    pub lines: Vec<CartLine>,
    pub total_quantity: u32,
    pub total_price: f64,
}

/// Cart mutations for one participant.
///
/// Adding a product already in the cart merges into the existing line
/// instead of creating a duplicate; setting a quantity at or below
/// zero removes the line.
#[derive(Debug, Default)]
pub struct CartService;

impl CartService {
    /// Add `quantity` of a product, merging with an existing line.
    pub fn add<S: SharedStore>(
        store: &mut S,
        user: ParticipantId,
        product_id: &str,
        quantity: u32,
        now: f64,
    ) -> Result<CartItem, StoreError> {
        if let Some(existing) = store.find_cart_item(user, product_id)? {
            let merged = existing.quantity + quantity;
            store.update_cart_quantity(existing.id, merged)?;
            return Ok(CartItem {
                quantity: merged,
                ..existing
            });
        }
        store.insert_cart_item(user, product_id, quantity, now)
    }

    /// Set a line's quantity. Zero removes the line.
    pub fn set_quantity<S: SharedStore>(
        store: &mut S,
        item_id: u64,
        quantity: u32,
    ) -> Result<(), StoreError> {
        if quantity == 0 {
            store.delete_cart_item(item_id)
        } else {
            store.update_cart_quantity(item_id, quantity)
        }
    }

    pub fn remove<S: SharedStore>(store: &mut S, item_id: u64) -> Result<(), StoreError> {
        store.delete_cart_item(item_id)
    }

    pub fn clear<S: SharedStore>(store: &mut S, user: ParticipantId) -> Result<(), StoreError> {
        store.clear_cart(user)
    }

    /// Current cart joined against the catalog, with totals.
    pub fn summary<S: SharedStore>(
        store: &S,
        user: ParticipantId,
    ) -> Result<CartSummary, StoreError> {
        let products = store.list_products()?;
        let lines: Vec<CartLine> = store
            .cart_items(user)?
            .into_iter()
            .map(|item| {
                let product = products.iter().find(|p| p.id == item.product_id).cloned();
                if product.is_none() {
                    tracing::warn!(product_id = %item.product_id, "cart references missing product");
                }
                CartLine { item, product }
            })
            .collect();
        let total_quantity = lines.iter().map(|l| l.item.quantity).sum();
        let total_price = lines.iter().map(CartLine::subtotal).sum();
        Ok(CartSummary {
            lines,
            total_quantity,
            total_price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductCatalog;
    use mallspace_store::MemoryStore;

    fn seeded_store() -> MemoryStore {
        let mut store = MemoryStore::new();
        ProductCatalog::seed_from_json(
            &mut store,
            r#"[
                {"id": "tee-1", "name": "Graphic Tee", "price": 20.0,
                 "category": "tops", "position_x": 0.0, "position_y": 0.0,
                 "created_at": 1.0},
                {"id": "jeans-1", "name": "Slim Jeans", "price": 50.0,
                 "category": "bottoms", "position_x": 0.0, "position_y": 0.0,
                 "created_at": 2.0}
            ]"#,
        )
        .unwrap();
        store
    }

    #[test]
    fn repeated_add_merges_into_one_line() {
        let mut store = seeded_store();
        let ada = ParticipantId::new();
        CartService::add(&mut store, ada, "tee-1", 1, 0.0).unwrap();
        let merged = CartService::add(&mut store, ada, "tee-1", 2, 1.0).unwrap();
        assert_eq!(merged.quantity, 3);

        let summary = CartService::summary(&store, ada).unwrap();
        assert_eq!(summary.lines.len(), 1);
        assert_eq!(summary.total_quantity, 3);
        assert_eq!(summary.total_price, 60.0);
    }

    #[test]
    fn zero_quantity_removes_line() {
        let mut store = seeded_store();
        let ada = ParticipantId::new();
        let item = CartService::add(&mut store, ada, "tee-1", 2, 0.0).unwrap();
        CartService::set_quantity(&mut store, item.id, 0).unwrap();
        assert!(CartService::summary(&store, ada).unwrap().lines.is_empty());
    }

    #[test]
    fn remove_deletes_only_the_named_line() {
        let mut store = seeded_store();
        let ada = ParticipantId::new();
        let tee = CartService::add(&mut store, ada, "tee-1", 2, 0.0).unwrap();
        CartService::add(&mut store, ada, "jeans-1", 1, 1.0).unwrap();

        CartService::remove(&mut store, tee.id).unwrap();
        let summary = CartService::summary(&store, ada).unwrap();
        assert_eq!(summary.lines.len(), 1);
        assert_eq!(summary.lines[0].item.product_id, "jeans-1");
        assert_eq!(summary.total_price, 50.0);
    }

    #[test]
    fn totals_span_multiple_lines() {
        let mut store = seeded_store();
        let ada = ParticipantId::new();
        CartService::add(&mut store, ada, "tee-1", 2, 0.0).unwrap();
        CartService::add(&mut store, ada, "jeans-1", 1, 1.0).unwrap();
        let summary = CartService::summary(&store, ada).unwrap();
        assert_eq!(summary.total_quantity, 3);
        assert_eq!(summary.total_price, 90.0);
    }

    #[test]
    fn missing_product_contributes_nothing_to_total() {
        let mut store = seeded_store();
        let ada = ParticipantId::new();
        CartService::add(&mut store, ada, "discontinued", 5, 0.0).unwrap();
        CartService::add(&mut store, ada, "tee-1", 1, 1.0).unwrap();
        let summary = CartService::summary(&store, ada).unwrap();
        assert_eq!(summary.total_price, 20.0);
        assert!(summary.lines.iter().any(|l| l.product.is_none()));
    }

    #[test]
    fn clear_is_scoped_to_participant() {
        let mut store = seeded_store();
        let ada = ParticipantId::new();
        let bob = ParticipantId::new();
        CartService::add(&mut store, ada, "tee-1", 1, 0.0).unwrap();
        CartService::add(&mut store, bob, "jeans-1", 1, 0.0).unwrap();
        CartService::clear(&mut store, ada).unwrap();
        assert!(CartService::summary(&store, ada).unwrap().lines.is_empty());
        assert_eq!(CartService::summary(&store, bob).unwrap().lines.len(), 1);
    }
}
