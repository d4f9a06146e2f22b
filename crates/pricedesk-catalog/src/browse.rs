//! Loads the products of a chosen collection into a [`ProductGrid`].

use std::sync::{Mutex, MutexGuard, PoisonError};

use pricedesk_core::Collection;

use crate::grid::{NoopListener, ProductGrid, SelectionListener};
use crate::inflight::Supersede;
use crate::search::UNAVAILABLE_MESSAGE;
use crate::source::CatalogSource;

/// Products fetched when a collection is opened.
pub const PRODUCT_FETCH_LIMIT: u32 = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The grid now holds this many products.
    Loaded(usize),
    Unavailable,
    /// The fetch failed; the grid was emptied.
    Failed(String),
    Superseded,
}

#[derive(Debug)]
struct BrowserState<L: SelectionListener> {
    collection: Option<Collection>,
    grid: ProductGrid<L>,
    loading: bool,
    error: Option<String>,
}

/// The product side of the page: which collection is open and the grid of
/// its products.
#[derive(Debug)]
pub struct ProductBrowser<L: SelectionListener = NoopListener> {
    state: Mutex<BrowserState<L>>,
    inflight: Supersede,
}

impl Default for ProductBrowser {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductBrowser {
    #[must_use]
    pub fn new() -> Self {
        Self::with_listener(NoopListener)
    }
}

impl<L: SelectionListener> ProductBrowser<L> {
    pub fn with_listener(listener: L) -> Self {
        Self {
            state: Mutex::new(BrowserState {
                collection: None,
                grid: ProductGrid::with_listener(listener),
                loading: false,
                error: None,
            }),
            inflight: Supersede::new(),
        }
    }

    /// Opens `collection`: fetches up to [`PRODUCT_FETCH_LIMIT`] of its
    /// products and replaces the grid's list, which resets its selection.
    ///
    /// On failure the error message is kept and the grid is emptied. A load
    /// overtaken by a newer one leaves the state alone.
    pub async fn open_collection<S: CatalogSource>(
        &self,
        source: Option<&S>,
        collection: &Collection,
    ) -> LoadOutcome {
        let (ticket, source) = {
            let mut state = self.lock();
            let Some(source) = source else {
                state.error = Some(UNAVAILABLE_MESSAGE.to_owned());
                return LoadOutcome::Unavailable;
            };
            state.collection = Some(collection.clone());
            state.loading = true;
            state.error = None;
            (self.inflight.issue(), source)
        };

        tracing::debug!(collection_id = %collection.id, "loading collection products");
        let fetched = source
            .list_products_in_collection(&collection.id, PRODUCT_FETCH_LIMIT)
            .await;

        let mut state = self.lock();
        if !self.inflight.is_current(ticket) {
            tracing::debug!(collection_id = %collection.id, "discarding superseded product load");
            return LoadOutcome::Superseded;
        }
        state.loading = false;

        match fetched {
            Ok(products) => {
                let count = products.len();
                state.grid.set_products(products);
                tracing::debug!(collection_id = %collection.id, count, "products loaded");
                LoadOutcome::Loaded(count)
            }
            Err(e) => {
                let message = e.to_string();
                tracing::warn!(collection_id = %collection.id, error = %message, "product load failed");
                state.grid.set_products(Vec::new());
                state.error = Some(message.clone());
                LoadOutcome::Failed(message)
            }
        }
    }

    #[must_use]
    pub fn collection(&self) -> Option<Collection> {
        self.lock().collection.clone()
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    /// Runs `f` against the grid, e.g. to toggle selection.
    pub fn with_grid<R>(&self, f: impl FnOnce(&mut ProductGrid<L>) -> R) -> R {
        f(&mut self.lock().grid)
    }

    fn lock(&self) -> MutexGuard<'_, BrowserState<L>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "browse_test.rs"]
mod tests;
