//! Shop layer: catalog browsing and per-participant carts.
//!
//! Both sit directly on the shared store; this crate adds the domain
//! rules the rows alone do not carry, such as quantity merging on
//! repeated adds and the display color fallback for products without
//! imagery.

pub mod cart;
pub mod catalog;

pub use cart::{CartLine, CartService, CartSummary};
pub use catalog::{fallback_color, ProductCatalog};

pub fn crate_info() -> &'static str {
    "mallspace-shop v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("shop"));
    }
}
