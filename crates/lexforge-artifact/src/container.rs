//! Artifact encodings.
//!
//! Binary layout: a 16-byte header followed by a postcard payload.
//!
//! | bytes | field                             |
//! |-------|-----------------------------------|
//! | 0-3   | magic `b"LXFA"`                   |
//! | 4-7   | format version (LE)               |
//! | 8-11  | CRC32 of the payload (LE)         |
//! | 12-15 | payload length in bytes (LE)      |

use std::fs;
use std::path::Path;

use crate::error::ArtifactError;
use crate::format::LexerArtifact;

pub const MAGIC: [u8; 4] = *b"LXFA";
pub const VERSION: u32 = 1;
pub const HEADER_SIZE: usize = 16;

/// Binary container header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub magic: [u8; 4],
    pub version: u32,
    pub checksum: u32,
    pub payload_size: u32,
}

impl Header {
    pub fn for_payload(payload: &[u8]) -> Self {
        Self {
            magic: MAGIC,
            version: VERSION,
            checksum: crc32fast::hash(payload),
            payload_size: payload.len() as u32,
        }
    }

    /// Decode from the first 16 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        assert!(bytes.len() >= HEADER_SIZE, "header too short");
        let word = |at: usize| u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]]);
        Self {
            magic: [bytes[0], bytes[1], bytes[2], bytes[3]],
            version: word(4),
            checksum: word(8),
            payload_size: word(12),
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[0..4].copy_from_slice(&self.magic);
        out[4..8].copy_from_slice(&self.version.to_le_bytes());
        out[8..12].copy_from_slice(&self.checksum.to_le_bytes());
        out[12..16].copy_from_slice(&self.payload_size.to_le_bytes());
        out
    }

    pub fn validate_magic(&self) -> bool {
        self.magic == MAGIC
    }

    pub fn validate_version(&self) -> bool {
        self.version == VERSION
    }
}

impl LexerArtifact {
    /// Encode into the binary container.
    pub fn to_bytes(&self) -> Vec<u8> {
        let payload = postcard::to_allocvec(self).expect("serialization should not fail");
        let header = Header::for_payload(&payload);

        let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());
        out.extend_from_slice(&header.to_bytes());
        out.extend_from_slice(&payload);
        out
    }

    /// Decode and validate a binary container.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ArtifactError> {
        if bytes.len() < HEADER_SIZE {
            return Err(ArtifactError::FileTooSmall(bytes.len()));
        }

        let header = Header::from_bytes(bytes);
        if !header.validate_magic() {
            return Err(ArtifactError::InvalidMagic);
        }
        if !header.validate_version() {
            return Err(ArtifactError::UnsupportedVersion(header.version));
        }

        let payload = &bytes[HEADER_SIZE..];
        if header.payload_size as usize != payload.len() {
            return Err(ArtifactError::SizeMismatch {
                header: header.payload_size,
                actual: payload.len(),
            });
        }
        let actual = crc32fast::hash(payload);
        if header.checksum != actual {
            return Err(ArtifactError::ChecksumMismatch {
                header: header.checksum,
                actual,
            });
        }

        let artifact: LexerArtifact = postcard::from_bytes(payload)?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Load a binary container from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    pub fn to_json(&self, pretty: bool) -> String {
        let result = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        result.expect("serialization should not fail")
    }

    /// Decode and validate a JSON artifact.
    pub fn from_json(json: &str) -> Result<Self, ArtifactError> {
        let artifact: LexerArtifact = serde_json::from_str(json)?;
        artifact.validate()?;
        Ok(artifact)
    }
}
