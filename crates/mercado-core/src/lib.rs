use thiserror::Error;

pub mod app_config;
pub mod categories;
pub mod config;
pub mod filter;
pub mod stores;

pub use app_config::{AppConfig, Environment};
pub use categories::{load_categories, CategoriesFile, CategoryConfig};
pub use config::{load_app_config, load_app_config_from_env};
pub use filter::{FilterSpec, SortBy};
pub use stores::{Coordinate, RankedStore, StoreRecord, DEFAULT_DELIVERY_RADIUS_KM};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
    #[error("failed to read categories file at {path}: {source}")]
    CategoriesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse categories file: {0}")]
    CategoriesFileParse(#[from] serde_yaml::Error),
    #[error("validation failed: {0}")]
    Validation(String),
}
