use tracing::warn;

use crate::catalog::{find_product, Product, ProductId};
use crate::error::StorageError;
use crate::storage::KeyValueStore;

/// Storage key holding the JSON array of selected product ids
pub const SELECTION_KEY: &str = "selectedProductIds";

/// Ordered, duplicate-free list of selected product ids (order of first insertion)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: Vec<ProductId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids(ids: impl IntoIterator<Item = ProductId>) -> Self {
        let mut selection = Self::new();
        for id in ids {
            if !selection.contains(id) {
                selection.ids.push(id);
            }
        }
        selection
    }

    /// Reads the persisted selection. A missing or malformed entry yields an empty set.
    pub fn restore(store: &dyn KeyValueStore) -> Self {
        let Some(raw) = store.get(SELECTION_KEY) else {
            return Self::new();
        };

        match serde_json::from_str::<Vec<ProductId>>(&raw) {
            Ok(ids) => Self::from_ids(ids),
            Err(e) => {
                warn!(error = %e, "ignoring malformed stored selection");
                Self::new()
            }
        }
    }

    pub fn persist(&self, store: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(&self.ids)?;
        store.set(SELECTION_KEY, encoded)
    }

    /// Adds the id if absent, removes it if present. Returns whether it is now selected.
    pub fn toggle(&mut self, id: ProductId) -> bool {
        if let Some(idx) = self.ids.iter().position(|&i| i == id) {
            self.ids.remove(idx);
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected products still present in `products`, in selection order
    pub fn resolve<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        self.ids
            .iter()
            .filter_map(|&id| find_product(products, id))
            .collect()
    }

    /// Selected ids with no matching product
    pub fn orphans(&self, products: &[Product]) -> Vec<ProductId> {
        self.ids
            .iter()
            .copied()
            .filter(|&id| find_product(products, id).is_none())
            .collect()
    }

    /// Drops orphaned ids and returns them. Callers persist afterwards.
    pub fn prune_orphans(&mut self, products: &[Product]) -> Vec<ProductId> {
        let orphans = self.orphans(products);
        self.ids.retain(|id| !orphans.contains(id));
        orphans
    }

    /// JSON array of the resolvable selected product records
    pub fn products_json(&self, products: &[Product]) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.resolve(products))
    }
}
