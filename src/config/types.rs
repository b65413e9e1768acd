//! Configuration type definitions.

use crate::catalog::Language;
use crate::constants::{
    DEFAULT_INFO_PATH, DEFAULT_INPUT_SIZE, DEFAULT_INTRA_THREADS, DEFAULT_MIN_CONFIDENCE,
    DEFAULT_MODEL_PATH, server,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,

    /// Model settings.
    pub model: ModelConfig,

    /// Lookup table sources.
    pub catalog: CatalogConfig,

    /// Default presentation settings.
    pub defaults: DefaultsConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,

    /// Bind port.
    pub port: u16,

    /// Directory where uploaded photos are stored.
    pub upload_dir: PathBuf,

    /// Maximum accepted request body size in bytes.
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: server::DEFAULT_HOST.to_string(),
            port: server::DEFAULT_PORT,
            upload_dir: PathBuf::from(server::DEFAULT_UPLOAD_DIR),
            max_upload_bytes: server::DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Configuration for the ONNX model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Path to the ONNX model file.
    pub path: PathBuf,

    /// Optional labels file, one class name per line in output order.
    ///
    /// When absent the trained mushroom class order is used.
    pub labels: Option<PathBuf>,

    /// Square input resolution expected by the model.
    pub input_size: u32,

    /// Minimum confidence for accepting a prediction.
    pub min_confidence: f32,

    /// ONNX Runtime intra-op thread count.
    pub intra_threads: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_MODEL_PATH),
            labels: None,
            input_size: DEFAULT_INPUT_SIZE,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            intra_threads: DEFAULT_INTRA_THREADS,
        }
    }
}

/// Sources for the descriptive and price lookup tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Mushroom info JSON (bilingual text, nutrients, prices).
    pub info_path: Option<PathBuf>,

    /// CSV price table replacing the built-in one.
    pub price_table: Option<PathBuf>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            info_path: Some(PathBuf::from(DEFAULT_INFO_PATH)),
            price_table: None,
        }
    }
}

/// Default presentation settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Language used when a request does not pick one.
    pub language: Language,
}
