//! Error types for shroomscan.

/// Result type alias for shroomscan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for shroomscan.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Model file does not exist.
    #[error("model file does not exist: {path}")]
    ModelFileNotFound {
        /// Path to the missing model file.
        path: std::path::PathBuf,
    },

    /// Failed to read labels file.
    #[error("failed to read labels file '{path}'")]
    LabelsRead {
        /// Path to the labels file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Labels file contained no labels.
    #[error("labels file is empty: {path}")]
    LabelsEmpty {
        /// Path to the labels file.
        path: std::path::PathBuf,
    },

    /// Failed to build the ONNX session.
    #[error("failed to build classifier: {reason}")]
    ClassifierBuild {
        /// Description of the build failure.
        reason: String,
    },

    /// Failed to open or decode an image.
    #[error("failed to decode image '{path}'")]
    ImageDecode {
        /// Path to the image file.
        path: std::path::PathBuf,
        /// Underlying decode error.
        #[source]
        source: image::ImageError,
    },

    /// Inference failed.
    #[error("inference failed: {reason}")]
    Inference {
        /// Description of the inference failure.
        reason: String,
    },

    /// Model produced an output tensor the service cannot interpret.
    #[error("unexpected model output shape {shape:?} for {labels} labels")]
    UnexpectedOutputShape {
        /// Output tensor shape.
        shape: Vec<i64>,
        /// Number of configured labels.
        labels: usize,
    },

    /// Failed to read mushroom info file.
    #[error("failed to read mushroom info file '{path}'")]
    InfoRead {
        /// Path to the info file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse mushroom info file.
    #[error("failed to parse mushroom info file '{path}'")]
    InfoParse {
        /// Path to the info file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Failed to read price table file.
    #[error("failed to read price table '{path}'")]
    PriceTableRead {
        /// Path to the price table.
        path: std::path::PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// Price table header is malformed.
    #[error("invalid price table '{path}': {message}")]
    PriceTableFormat {
        /// Path to the price table.
        path: std::path::PathBuf,
        /// Description of the format error.
        message: String,
    },

    /// Species not present in the catalog.
    #[error("unknown mushroom '{name}'")]
    UnknownSpecies {
        /// Requested name.
        name: String,
    },

    /// Month value could not be parsed.
    #[error("invalid month '{value}' (use Jan-Dec, a full name or 1-12)")]
    InvalidMonth {
        /// Value as given.
        value: String,
    },

    /// Failed to save an uploaded file.
    #[error("failed to save upload '{path}'")]
    UploadWrite {
        /// Destination path.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to bind the HTTP listener.
    #[error("failed to bind {address}")]
    ServerBind {
        /// Address that could not be bound.
        address: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize JSON output.
    #[error("failed to serialize JSON output")]
    JsonSerialize {
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// Internal error (for unexpected failures).
    #[error("internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}
