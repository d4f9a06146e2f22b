//! Collection search and product selection: the view-level state behind
//! picking a collection and choosing products in it.
//!
//! Nothing here renders. Each component holds plain state (results, error
//! message, selection sets) that a front end reads back after every call.

pub mod browse;
pub mod grid;
pub mod inflight;
pub mod search;
pub mod source;

pub use browse::{LoadOutcome, ProductBrowser, PRODUCT_FETCH_LIMIT};
pub use grid::{NoopListener, ProductGrid, SelectionListener};
pub use inflight::{Supersede, Ticket};
pub use search::{
    filter_collections, CollectionSearch, SearchOutcome, SearchState, EMPTY_TERM_MESSAGE,
    SEARCH_FETCH_LIMIT, UNAVAILABLE_MESSAGE,
};
pub use source::CatalogSource;

#[cfg(test)]
mod test_support;
