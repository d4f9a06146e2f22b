pub mod adapt;
pub mod client;
pub mod error;
pub mod types;

pub use adapt::{adapt_collection, adapt_product, adapt_updated_variant, adapt_variant};
pub use client::{ServerApiClient, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use error::ClientError;
