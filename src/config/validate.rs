//! Configuration validation.

use crate::config::{Config, ModelConfig};
use crate::constants::{confidence, input_size};
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_server(config)?;
    validate_model(&config.model)?;
    Ok(())
}

/// Validate server settings.
fn validate_server(config: &Config) -> Result<()> {
    let server = &config.server;

    if server.port == 0 {
        return Err(Error::ConfigValidation {
            message: "server.port must be non-zero".to_string(),
        });
    }

    if server.host.trim().is_empty() {
        return Err(Error::ConfigValidation {
            message: "server.host must not be empty".to_string(),
        });
    }

    if server.max_upload_bytes == 0 {
        return Err(Error::ConfigValidation {
            message: "server.max_upload_bytes must be at least 1".to_string(),
        });
    }

    Ok(())
}

/// Validate model settings without touching the filesystem.
fn validate_model(model: &ModelConfig) -> Result<()> {
    if !(confidence::MIN..=confidence::MAX).contains(&model.min_confidence) {
        return Err(Error::ConfigValidation {
            message: format!(
                "min_confidence must be between {} and {}, got {}",
                confidence::MIN,
                confidence::MAX,
                model.min_confidence
            ),
        });
    }

    if !(input_size::MIN..=input_size::MAX).contains(&model.input_size) {
        return Err(Error::ConfigValidation {
            message: format!(
                "input_size must be between {} and {}, got {}",
                input_size::MIN,
                input_size::MAX,
                model.input_size
            ),
        });
    }

    if model.intra_threads == 0 {
        return Err(Error::ConfigValidation {
            message: "intra_threads must be at least 1".to_string(),
        });
    }

    Ok(())
}

/// Check that the model file exists.
pub fn validate_model_files(model: &ModelConfig) -> Result<()> {
    if !model.path.exists() {
        return Err(Error::ModelFileNotFound {
            path: model.path.clone(),
        });
    }
    Ok(())
}
