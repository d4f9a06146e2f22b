//! Collection search: fetch a page of collections and filter it by a term.

use std::sync::{Mutex, MutexGuard, PoisonError};

use pricedesk_core::Collection;

use crate::inflight::Supersede;
use crate::source::CatalogSource;

/// Collections fetched per search. Filtering happens locally over this page.
pub const SEARCH_FETCH_LIMIT: u32 = 50;

pub const EMPTY_TERM_MESSAGE: &str = "Please enter a search term";

pub const UNAVAILABLE_MESSAGE: &str = "Shop or API service not available";

/// Returns the collections whose title or handle contains `term`, ignoring
/// case, in their original order.
#[must_use]
pub fn filter_collections(collections: &[Collection], term: &str) -> Vec<Collection> {
    let needle = term.to_lowercase();
    collections
        .iter()
        .filter(|c| c.matches_lowercase(&needle))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Results were replaced; carries the number of matches.
    Completed(usize),
    /// The term was empty or whitespace. Nothing was fetched.
    EmptyTerm,
    /// No authenticated source was available. Nothing was fetched.
    Unavailable,
    /// The fetch failed; results were cleared.
    Failed(String),
    /// A newer search started before this one finished; its result was
    /// discarded.
    Superseded,
}

/// Everything a front end needs to draw the search panel.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    pub term: String,
    pub results: Vec<Collection>,
    pub error: Option<String>,
    pub loading: bool,
    pub selected: Option<Collection>,
    /// Whether the results panel is open. Collapses on selection.
    pub expanded: bool,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            term: String::new(),
            results: Vec::new(),
            error: None,
            loading: false,
            selected: None,
            expanded: true,
        }
    }
}

#[derive(Debug, Default)]
pub struct CollectionSearch {
    state: Mutex<SearchState>,
    inflight: Supersede,
}

impl CollectionSearch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches up to [`SEARCH_FETCH_LIMIT`] collections from `source` and
    /// replaces the result set with those matching `term`.
    ///
    /// `source` is `None` when the session is not authenticated. Validation
    /// and fetch failures are reported through the returned outcome and the
    /// state's `error`; this never fails.
    pub async fn search<S: CatalogSource>(&self, source: Option<&S>, term: &str) -> SearchOutcome {
        let (ticket, source) = {
            let mut state = self.lock();
            state.term = term.to_owned();

            if term.trim().is_empty() {
                state.error = Some(EMPTY_TERM_MESSAGE.to_owned());
                return SearchOutcome::EmptyTerm;
            }
            let Some(source) = source else {
                state.error = Some(UNAVAILABLE_MESSAGE.to_owned());
                return SearchOutcome::Unavailable;
            };

            state.loading = true;
            state.error = None;
            state.expanded = true;
            (self.inflight.issue(), source)
        };

        tracing::debug!(term, "searching collections");
        let fetched = source.list_collections(SEARCH_FETCH_LIMIT).await;

        let mut state = self.lock();
        if !self.inflight.is_current(ticket) {
            tracing::debug!(term, "discarding superseded collection search");
            return SearchOutcome::Superseded;
        }
        state.loading = false;

        match fetched {
            Ok(collections) => {
                state.results = filter_collections(&collections, term);
                tracing::debug!(
                    term,
                    fetched = collections.len(),
                    matched = state.results.len(),
                    "collection search complete"
                );
                SearchOutcome::Completed(state.results.len())
            }
            Err(e) => {
                let message = e.to_string();
                tracing::warn!(term, error = %message, "collection search failed");
                state.results.clear();
                state.error = Some(message.clone());
                SearchOutcome::Failed(message)
            }
        }
    }

    /// Records the chosen collection and collapses the results panel.
    pub fn select(&self, collection: Collection) {
        let mut state = self.lock();
        tracing::debug!(collection_id = %collection.id, "collection selected");
        state.selected = Some(collection);
        state.expanded = false;
    }

    /// Re-opens the results panel after a selection collapsed it.
    pub fn expand(&self) {
        self.lock().expanded = true;
    }

    #[must_use]
    pub fn selected(&self) -> Option<Collection> {
        self.lock().selected.clone()
    }

    #[must_use]
    pub fn results(&self) -> Vec<Collection> {
        self.lock().results.clone()
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    #[must_use]
    pub fn snapshot(&self) -> SearchState {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, SearchState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;
