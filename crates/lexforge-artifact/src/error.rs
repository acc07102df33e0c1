use std::io;

use super::container::VERSION;

/// Errors raised while loading or validating an artifact.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("invalid magic: expected LXFA")]
    InvalidMagic,
    #[error("unsupported version: {0} (expected {VERSION})")]
    UnsupportedVersion(u32),
    #[error("file too small: {0} bytes (minimum 16)")]
    FileTooSmall(usize),
    #[error("size mismatch: header says {header} payload bytes, got {actual}")]
    SizeMismatch { header: u32, actual: usize },
    #[error("checksum mismatch: header says {header:#010x}, payload hashes to {actual:#010x}")]
    ChecksumMismatch { header: u32, actual: u32 },
    #[error("malformed artifact: {0}")]
    Malformed(String),
    #[error("binary decode error: {0}")]
    Binary(#[from] postcard::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
