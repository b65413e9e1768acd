//! Saving uploaded photos.

use crate::constants::{FALLBACK_UPLOAD_NAME, UPLOAD_HASH_PREFIX_LEN};
use crate::error::{Error, Result};
use sha2::{Digest, Sha256};
use std::fmt::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A photo written to the upload directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedUpload {
    /// File name inside the upload directory.
    pub file_name: String,
    /// Full path on disk.
    pub path: PathBuf,
}

/// Reduce a client-supplied filename to a safe ASCII file name.
///
/// Path separators become word breaks, whitespace runs become `_`, anything
/// outside `[A-Za-z0-9_.-]` is dropped and leading/trailing `.`/`_` are
/// trimmed. An empty result falls back to `upload`.
pub fn secure_filename(name: &str) -> String {
    let spaced = name.replace(['/', '\\'], " ");
    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    let filtered: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();
    let trimmed = filtered.trim_matches(['.', '_']);

    if trimmed.is_empty() {
        FALLBACK_UPLOAD_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Storage name for an upload: content-hash prefix plus the sanitized name.
///
/// Identical photos map to the same file; different photos sharing a client
/// filename do not overwrite each other.
pub fn stored_name(original: &str, bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let mut prefix = String::with_capacity(UPLOAD_HASH_PREFIX_LEN);
    for byte in digest.iter() {
        if prefix.len() >= UPLOAD_HASH_PREFIX_LEN {
            break;
        }
        let _ = write!(prefix, "{byte:02x}");
    }
    prefix.truncate(UPLOAD_HASH_PREFIX_LEN);
    format!("{prefix}_{}", secure_filename(original))
}

/// Write an upload into `dir`, creating the directory if needed.
pub async fn save_upload(dir: &Path, original: &str, bytes: &[u8]) -> Result<SavedUpload> {
    let file_name = stored_name(original, bytes);
    let path = dir.join(&file_name);

    let write_err = |source| Error::UploadWrite {
        path: path.clone(),
        source,
    };

    tokio::fs::create_dir_all(dir).await.map_err(write_err)?;
    tokio::fs::write(&path, bytes).await.map_err(write_err)?;

    debug!("Saved upload '{}' ({} bytes) to {}", original, bytes.len(), path.display());

    Ok(SavedUpload { file_name, path })
}
