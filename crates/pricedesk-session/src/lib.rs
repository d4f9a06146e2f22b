//! Session and authentication lifecycle for the storefront admin tool.
//!
//! A [`SessionContext`] is built once at start-up and passed by reference to
//! whatever needs the active shop, token or API client. Persistence goes
//! through the injected [`KeyValueStore`].

pub mod auth;
pub mod context;
pub mod error;
pub mod launch;
pub mod store;

pub use auth::{generate_nonce, AuthService, EMBEDDED_APP_TOKEN};
pub use context::{ActiveSession, Navigator, SessionContext, SessionMode, SessionState};
pub use error::{SessionError, StoreError};
pub use launch::LaunchParams;
pub use store::{FileStore, KeyValueStore, MemoryStore, ACCESS_TOKEN_KEY, SHOP_KEY};
