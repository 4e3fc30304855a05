//! Local shopping cart with variant-aware line merging.
//!
//! The cart is purely client-side state, persisted under
//! [`keys::CART`](crate::storage::keys::CART) after every mutation so a
//! restart picks up where the shopper left off. Lines are keyed by
//! `(product, size, color)`; the same product in a different size or color
//! is a separate line.

use std::sync::RwLock;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use kiogloss_core::{Price, ProductId};

use crate::models::catalog::ProductSummary;
use crate::storage::{KeyValueStore, keys};

/// One cart line: a product snapshot plus the chosen variant and quantity.
///
/// Title, price, and image are frozen at add time so the cart renders
/// without refetching the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub title: String,
    pub unit_price: Price,
    #[serde(default)]
    pub image: Option<String>,
    pub quantity: u32,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl CartLine {
    fn merge_key(&self) -> (ProductId, Option<&str>, Option<&str>) {
        (self.product_id, self.size.as_deref(), self.color.as_deref())
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price.extended(self.quantity)
    }
}

/// Thread-safe cart backed by a key/value store.
pub struct CartStore {
    lines: RwLock<Vec<CartLine>>,
    storage: std::sync::Arc<dyn KeyValueStore>,
}

impl CartStore {
    /// Create a store, loading any persisted cart.
    ///
    /// Corrupt persisted data falls back to an empty cart; lines with a
    /// non-positive quantity are dropped on load.
    #[must_use]
    pub fn new(storage: std::sync::Arc<dyn KeyValueStore>) -> Self {
        let lines = storage
            .get(keys::CART)
            .and_then(|raw| {
                serde_json::from_str::<Vec<CartLine>>(&raw)
                    .map_err(|err| {
                        tracing::warn!(error = %err, "stored cart is corrupt; starting empty");
                    })
                    .ok()
            })
            .unwrap_or_default()
            .into_iter()
            .filter(|line| line.quantity > 0)
            .collect();

        Self {
            lines: RwLock::new(lines),
            storage,
        }
    }

    /// Add `quantity` of a product in the chosen variant.
    ///
    /// Merges into an existing line with the same product, size, and color;
    /// otherwise appends. A missing size or color falls back to the
    /// product's first offered one. Quantities below one are bumped to one.
    pub fn add_item(
        &self,
        product: &ProductSummary,
        quantity: u32,
        size: Option<String>,
        color: Option<String>,
    ) {
        let line = CartLine {
            product_id: product.id,
            title: product.title.clone(),
            unit_price: product.price,
            image: Some(product.image.clone()),
            quantity: quantity.max(1),
            size: size.or_else(|| product.sizes.first().cloned()),
            color: color.or_else(|| product.colors.first().cloned()),
        };

        let mut lines = self.write_lines();
        if let Some(existing) = lines
            .iter_mut()
            .find(|existing| existing.merge_key() == line.merge_key())
        {
            existing.quantity = existing.quantity.saturating_add(line.quantity);
        } else {
            lines.push(line);
        }
        self.persist(&lines);
    }

    /// Remove every variant line of `product`.
    pub fn remove_item(&self, product: ProductId) {
        let mut lines = self.write_lines();
        lines.retain(|line| line.product_id != product);
        self.persist(&lines);
    }

    /// Set the quantity of every line of `product`.
    ///
    /// A quantity of zero or below removes the lines; otherwise each line
    /// keeps its position.
    pub fn update_quantity(&self, product: ProductId, quantity: i64) {
        let mut lines = self.write_lines();
        if quantity <= 0 {
            lines.retain(|line| line.product_id != product);
        } else {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let quantity = quantity.min(i64::from(u32::MAX)) as u32;
            for line in lines.iter_mut().filter(|l| l.product_id == product) {
                line.quantity = quantity;
            }
        }
        self.persist(&lines);
    }

    /// Empty the cart and drop its persisted entry immediately.
    pub fn clear(&self) {
        let mut lines = self.write_lines();
        lines.clear();
        self.storage.remove(keys::CART);
    }

    #[must_use]
    pub fn is_in_cart(&self, product: ProductId) -> bool {
        self.read_lines()
            .iter()
            .any(|line| line.product_id == product)
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.read_lines()
            .iter()
            .map(|line| u64::from(line.quantity))
            .sum()
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.read_lines().iter().map(CartLine::line_total).sum()
    }

    #[must_use]
    pub fn lines(&self) -> Vec<CartLine> {
        self.read_lines().clone()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read_lines().is_empty()
    }

    fn persist(&self, lines: &[CartLine]) {
        match serde_json::to_string(lines) {
            Ok(raw) => {
                if let Err(err) = self.storage.put(keys::CART, &raw) {
                    tracing::warn!(error = %err, "failed to persist cart");
                }
            }
            Err(err) => tracing::warn!(error = %err, "failed to serialize cart"),
        }
    }

    fn read_lines(&self) -> std::sync::RwLockReadGuard<'_, Vec<CartLine>> {
        self.lines
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write_lines(&self) -> std::sync::RwLockWriteGuard<'_, Vec<CartLine>> {
        self.lines
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::storage::{FileStore, MemoryStore};

    fn product(id: i64, price: Decimal) -> ProductSummary {
        ProductSummary {
            id: ProductId::from(id),
            image: "lipgloss.webp".to_owned(),
            title: format!("Product {id}"),
            slug: format!("product-{id}"),
            sizes: vec!["10ml".to_owned(), "30ml".to_owned()],
            colors: vec!["Coral".to_owned(), "Rose".to_owned()],
            price: Price::new(price),
            stock: 25,
        }
    }

    fn store() -> CartStore {
        CartStore::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_same_variant_merges_quantities() {
        let cart = store();
        let item = product(1, Decimal::new(1000, 2));

        cart.add_item(&item, 2, None, None);
        cart.add_item(&item, 1, None, None);

        let lines = cart.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 3);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total(), Decimal::new(3000, 2));
    }

    #[test]
    fn test_merge_saturates_instead_of_overflowing() {
        let cart = store();
        let item = product(1, Decimal::new(500, 2));

        cart.add_item(&item, u32::MAX - 1, None, None);
        cart.add_item(&item, 5, None, None);

        let lines = cart.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, u32::MAX);
    }

    #[test]
    fn test_different_variants_stay_separate() {
        let cart = store();
        let item = product(1, Decimal::new(1000, 2));

        cart.add_item(&item, 1, Some("10ml".to_owned()), Some("Coral".to_owned()));
        cart.add_item(&item, 1, Some("30ml".to_owned()), Some("Coral".to_owned()));
        cart.add_item(&item, 1, Some("10ml".to_owned()), Some("Rose".to_owned()));

        assert_eq!(cart.lines().len(), 3);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_missing_variant_defaults_to_first_offered() {
        let cart = store();
        cart.add_item(&product(1, Decimal::new(500, 2)), 1, None, None);

        let lines = cart.lines();
        assert_eq!(lines[0].size.as_deref(), Some("10ml"));
        assert_eq!(lines[0].color.as_deref(), Some("Coral"));
    }

    #[test]
    fn test_zero_quantity_add_becomes_one() {
        let cart = store();
        cart.add_item(&product(1, Decimal::new(500, 2)), 0, None, None);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_update_quantity_to_zero_or_below_removes() {
        let cart = store();
        cart.add_item(&product(1, Decimal::new(500, 2)), 2, None, None);
        cart.add_item(&product(2, Decimal::new(900, 2)), 1, None, None);

        cart.update_quantity(ProductId::from(1), 0);
        assert!(!cart.is_in_cart(ProductId::from(1)));

        cart.update_quantity(ProductId::from(2), -5);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_preserves_position() {
        let cart = store();
        cart.add_item(&product(1, Decimal::new(500, 2)), 1, None, None);
        cart.add_item(&product(2, Decimal::new(900, 2)), 1, None, None);

        cart.update_quantity(ProductId::from(1), 5);

        let lines = cart.lines();
        assert_eq!(lines[0].product_id, ProductId::from(1));
        assert_eq!(lines[0].quantity, 5);
        assert_eq!(lines[1].product_id, ProductId::from(2));
    }

    #[test]
    fn test_remove_item_drops_all_variants() {
        let cart = store();
        let item = product(1, Decimal::new(500, 2));
        cart.add_item(&item, 1, Some("10ml".to_owned()), None);
        cart.add_item(&item, 1, Some("30ml".to_owned()), None);

        cart.remove_item(ProductId::from(1));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_cart_survives_restart_via_file_store() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage: Arc<dyn KeyValueStore> =
            Arc::new(FileStore::new(dir.path()).expect("file store"));

        let cart = CartStore::new(Arc::clone(&storage));
        cart.add_item(&product(1, Decimal::new(1250, 2)), 2, None, None);

        let reloaded = CartStore::new(storage);
        assert_eq!(reloaded.item_count(), 2);
        assert_eq!(reloaded.total(), Decimal::new(2500, 2));
    }

    #[test]
    fn test_corrupt_persisted_cart_starts_empty() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        storage.put(keys::CART, "[{broken").expect("seed");
        let cart = CartStore::new(storage);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear_drops_persisted_entry() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let cart = CartStore::new(Arc::clone(&storage));
        cart.add_item(&product(1, Decimal::new(500, 2)), 1, None, None);
        assert!(storage.get(keys::CART).is_some());

        cart.clear();
        assert!(cart.is_empty());
        assert!(storage.get(keys::CART).is_none());
    }

    #[test]
    fn test_nonpositive_persisted_quantities_are_dropped_on_load() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let raw = serde_json::json!([
            { "product_id": 1, "title": "A", "unit_price": "5.00", "quantity": 0 },
            { "product_id": 2, "title": "B", "unit_price": "9.00", "quantity": 2 },
        ])
        .to_string();
        storage.put(keys::CART, &raw).expect("seed");

        let cart = CartStore::new(storage);
        let lines = cart.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].product_id, ProductId::from(2));
    }
}
