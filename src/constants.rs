//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "shroomscan";

/// Default minimum confidence for accepting a prediction.
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.25;

/// Default square input size for classification exports.
///
/// Detection exports are usually 640; set `model.input_size` accordingly.
pub const DEFAULT_INPUT_SIZE: u32 = 224;

/// Default number of intra-op threads for ONNX Runtime.
pub const DEFAULT_INTRA_THREADS: usize = 4;

/// Default model path, relative to the working directory.
pub const DEFAULT_MODEL_PATH: &str = "mushroom_model.onnx";

/// Default mushroom info JSON path, relative to the working directory.
pub const DEFAULT_INFO_PATH: &str = "mushroom_info.json";

/// Text shown when no price is known for a species/month pair.
pub const PRICE_NOT_AVAILABLE: &str = "Price not available";

/// Fallback name for uploads whose filename sanitizes to nothing.
pub const FALLBACK_UPLOAD_NAME: &str = "upload";

/// Number of hex characters of the content hash prefixed to upload names.
pub const UPLOAD_HASH_PREFIX_LEN: usize = 12;

/// HTTP server defaults.
pub mod server {
    /// Default bind address.
    pub const DEFAULT_HOST: &str = "0.0.0.0";

    /// Default port.
    pub const DEFAULT_PORT: u16 = 5003;

    /// Default directory for saved uploads.
    pub const DEFAULT_UPLOAD_DIR: &str = "static/uploads";

    /// Default upload size limit (16 MiB).
    pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

    /// URL prefix under which saved uploads are served.
    pub const UPLOADS_ROUTE: &str = "/uploads";
}

/// Confidence value bounds.
pub mod confidence {
    /// Minimum valid confidence value.
    pub const MIN: f32 = 0.0;
    /// Maximum valid confidence value.
    pub const MAX: f32 = 1.0;
    /// Decimal places for confidence formatting.
    pub const DECIMAL_PLACES: usize = 4;
}

/// Model input bounds.
pub mod input_size {
    /// Smallest accepted square input.
    pub const MIN: u32 = 32;
    /// Largest accepted square input.
    pub const MAX: u32 = 2048;
}

/// User-facing messages rendered into the page.
pub mod messages {
    /// Multipart body had no `file` part.
    pub const NO_FILE_UPLOADED: &str = "No file uploaded!";
    /// `file` part had an empty filename.
    pub const NO_FILE_SELECTED: &str = "No file selected!";
    /// Model failed to load at startup.
    pub const MODEL_NOT_LOADED: &str = "Model not loaded.";
    /// Prediction produced no usable label.
    pub const NO_MUSHROOM_DETECTED: &str = "No mushroom detected with high confidence.";
}
