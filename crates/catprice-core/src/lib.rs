//! Domain core for catalog channel pricing: fee registry, delivery bands,
//! reverse-margin pricing, catalog rows, export encodings and configuration.

pub mod app_config;
pub mod catalog;
pub mod config;
pub mod delivery;
pub mod export;
pub mod fees;
pub mod pricing;

pub use app_config::{AppConfig, Environment};
pub use catalog::{CatalogRow, OptionPolicy};
pub use config::{load_app_config, load_app_config_from_env, load_default_band};
pub use delivery::{fee_for_band, fee_for_band_code, DistanceBand};
pub use export::{export_file_name, to_csv, to_json, ExportError, ExportFormat, CSV_COLUMNS};
pub use fees::{lookup, Channel, FeeModel, RoundingMode};
pub use pricing::{channel_price, ChannelPrices};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown channel: {0}")]
    UnknownChannel(String),

    #[error("unknown distance band: {0}")]
    UnknownDistanceBand(String),

    #[error("unknown option policy: {0}")]
    UnknownOptionPolicy(String),

    #[error("unknown export format: {0}")]
    UnknownExportFormat(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
