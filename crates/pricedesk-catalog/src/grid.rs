//! Product selection grid: per-product expansion and multi-select state.

use std::collections::HashSet;

use pricedesk_core::Product;

/// Receives selection changes from a [`ProductGrid`]. Both methods default to
/// doing nothing.
pub trait SelectionListener {
    /// Called after every selection change with the selected products in
    /// the grid's order.
    fn selection_changed(&mut self, _selected: &[Product]) {}

    /// Called when a single product is picked directly.
    fn product_chosen(&mut self, _product: &Product) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopListener;

impl SelectionListener for NoopListener {}

/// Expansion and selection state over one list of products.
///
/// Ids that are not in the current list are ignored by every operation.
#[derive(Debug, Default)]
pub struct ProductGrid<L: SelectionListener = NoopListener> {
    products: Vec<Product>,
    expanded: HashSet<String>,
    selected: HashSet<String>,
    listener: L,
}

impl ProductGrid {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<L: SelectionListener> ProductGrid<L> {
    pub fn with_listener(listener: L) -> Self {
        Self {
            products: Vec::new(),
            expanded: HashSet::new(),
            selected: HashSet::new(),
            listener,
        }
    }

    /// Replaces the product list. Expansion and selection always reset, even
    /// if the new list shares ids with the old one. The listener is not
    /// notified.
    pub fn set_products(&mut self, products: Vec<Product>) {
        self.products = products;
        self.expanded.clear();
        self.selected.clear();
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Flips whether `product_id` shows its variants. Returns the new state.
    pub fn toggle_expansion(&mut self, product_id: &str) -> bool {
        if !self.contains(product_id) {
            return false;
        }
        toggle(&mut self.expanded, product_id)
    }

    #[must_use]
    pub fn is_expanded(&self, product_id: &str) -> bool {
        self.expanded.contains(product_id)
    }

    /// Flips whether `product_id` is selected, then notifies the listener.
    /// Returns the new state.
    pub fn toggle_selection(&mut self, product_id: &str) -> bool {
        if !self.contains(product_id) {
            return false;
        }
        let now_selected = toggle(&mut self.selected, product_id);
        self.notify();
        now_selected
    }

    #[must_use]
    pub fn is_selected(&self, product_id: &str) -> bool {
        self.selected.contains(product_id)
    }

    pub fn select_all(&mut self) {
        self.selected = self.products.iter().map(|p| p.id.clone()).collect();
        self.notify();
    }

    pub fn clear_all(&mut self) {
        self.selected.clear();
        self.notify();
    }

    /// Hands a single product to the listener without touching the
    /// selection. Returns `false` if the id is unknown.
    pub fn choose(&mut self, product_id: &str) -> bool {
        match self.products.iter().find(|p| p.id == product_id) {
            Some(product) => {
                self.listener.product_chosen(product);
                true
            }
            None => false,
        }
    }

    /// Selected products in list order, never selection order.
    #[must_use]
    pub fn selected_products(&self) -> Vec<Product> {
        self.products
            .iter()
            .filter(|p| self.selected.contains(&p.id))
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    #[must_use]
    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    fn contains(&self, product_id: &str) -> bool {
        self.products.iter().any(|p| p.id == product_id)
    }

    fn notify(&mut self) {
        let selected = self.selected_products();
        self.listener.selection_changed(&selected);
    }
}

fn toggle(set: &mut HashSet<String>, id: &str) -> bool {
    if set.remove(id) {
        false
    } else {
        set.insert(id.to_owned());
        true
    }
}

#[cfg(test)]
#[path = "grid_test.rs"]
mod tests;
