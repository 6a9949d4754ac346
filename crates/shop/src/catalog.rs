use mallspace_store::{Product, SharedStore, StoreError};

/// Display color palette for products without an image, as CSS hex.
const FALLBACK_COLORS: [&str; 6] = [
    "#ff6b9d", "#4a90e2", "#50c878", "#ffd700", "#9b59b6", "#e74c3c",
];

/// Deterministic display color for a product id: byte sum modulo the
/// palette length, so the same product gets the same color everywhere
/// without coordination.
pub fn fallback_color(product_id: &str) -> &'static str {
    let sum: u64 = product_id.bytes().map(u64::from).sum();
    FALLBACK_COLORS[(sum % FALLBACK_COLORS.len() as u64) as usize]
}

/// Read-side catalog access.
#[derive(Debug, Default)]
pub struct ProductCatalog;

impl ProductCatalog {
    /// All products in creation order.
    pub fn list<S: SharedStore>(store: &S) -> Result<Vec<Product>, StoreError> {
        store.list_products()
    }

    /// Products in one category, creation order preserved.
    pub fn by_category<S: SharedStore>(
        store: &S,
        category: &str,
    ) -> Result<Vec<Product>, StoreError> {
        Ok(store
            .list_products()?
            .into_iter()
            .filter(|p| p.category == category)
            .collect())
    }

    /// Seed the catalog from a JSON array of products. Used by demos
    /// and tests to stand in for the hosted backend's seeded tables.
    pub fn seed_from_json<S: SharedStore>(store: &mut S, json: &str) -> Result<usize, StoreError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        let count = products.len();
        for product in products {
            store.insert_product(product)?;
        }
        tracing::debug!(count, "seeded product catalog");
        Ok(count)
    }
}
