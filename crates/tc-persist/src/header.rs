//! Fixed 20-byte snapshot header.
//!
//! ```text
//! [0..4]   magic "TCRT"
//! [4..8]   format version   u32 LE
//! [8..12]  flags            u32 LE  (bit 0: catalogue included)
//! [12..16] payload length   u32 LE
//! [16..20] xxHash32 of the payload, seed 0
//! ```
//!
//! There is no headerless legacy format: anything without the magic is
//! rejected.

use xxhash_rust::xxh32::xxh32;

use crate::{PersistError, PersistResult};

pub const MAGIC: [u8; 4] = *b"TCRT";

pub const HEADER_SIZE: usize = 20;

/// Highest format version this build reads, and the one it writes.
pub const FORMAT_VERSION: u32 = 1;

/// Payload is a full network (catalogue, settings, router), not a bare
/// router.
pub const FLAG_NETWORK: u32 = 1;

const XXHASH_SEED: u32 = 0;

// ── FileHeader ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileHeader {
    pub format_version: u32,
    pub flags:          u32,
    pub payload_len:    u32,
    pub checksum:       u32,
}

impl FileHeader {
    pub fn has_flag(&self, flag: u32) -> bool {
        self.flags & flag != 0
    }
}

// ── Wrap / unwrap ─────────────────────────────────────────────────────────────

/// Prefix `payload` with a header carrying `flags`.
pub fn wrap_with_header(flags: u32, payload: &[u8]) -> PersistResult<Vec<u8>> {
    let payload_len = u32::try_from(payload.len()).map_err(|_| {
        PersistError::CorruptData(format!("payload of {} bytes exceeds u32", payload.len()))
    })?;

    let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    out.extend_from_slice(&flags.to_le_bytes());
    out.extend_from_slice(&payload_len.to_le_bytes());
    out.extend_from_slice(&xxh32(payload, XXHASH_SEED).to_le_bytes());
    out.extend_from_slice(payload);
    Ok(out)
}

/// Validate the header of `bytes` and return it with the payload slice.
///
/// # Errors
///
/// - [`PersistError::CorruptData`] on short input, wrong magic, a payload
///   length that disagrees with the buffer, or a checksum mismatch.
/// - [`PersistError::UnsupportedVersion`] when the format version is newer
///   than [`FORMAT_VERSION`].
pub fn unwrap_header(bytes: &[u8]) -> PersistResult<(FileHeader, &[u8])> {
    if bytes.len() < HEADER_SIZE {
        return Err(PersistError::CorruptData(format!(
            "{} bytes is shorter than the {HEADER_SIZE}-byte header",
            bytes.len()
        )));
    }
    if bytes[..4] != MAGIC {
        return Err(PersistError::CorruptData("missing TCRT magic".into()));
    }

    let header = FileHeader {
        format_version: read_u32(bytes, 4),
        flags:          read_u32(bytes, 8),
        payload_len:    read_u32(bytes, 12),
        checksum:       read_u32(bytes, 16),
    };
    if header.format_version > FORMAT_VERSION {
        return Err(PersistError::UnsupportedVersion {
            found:     header.format_version,
            supported: FORMAT_VERSION,
        });
    }

    let payload = &bytes[HEADER_SIZE..];
    if payload.len() != header.payload_len as usize {
        return Err(PersistError::CorruptData(format!(
            "header declares {} payload bytes, found {}",
            header.payload_len,
            payload.len()
        )));
    }
    let computed = xxh32(payload, XXHASH_SEED);
    if computed != header.checksum {
        return Err(PersistError::CorruptData(format!(
            "checksum mismatch (expected {:#010X}, got {computed:#010X})",
            header.checksum
        )));
    }

    Ok((header, payload))
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}
