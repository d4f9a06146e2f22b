pub mod app_config;
pub mod collection;
pub mod config;
pub mod product;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use collection::{Collection, CollectionImage};
pub use config::{load_app_config, load_app_config_from_env};
pub use product::{Image, Product, ProductOption, ProductStatus, SelectedOption, Variant};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
