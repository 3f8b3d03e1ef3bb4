//! CRC-32 engine: canonical IEEE polynomial (0xEDB88320), streaming update.
//!
//! Built on `crc32fast`'s table-driven hasher rather than a hand-rolled
//! 256-entry table — the table is process-wide and initialized once by that
//! crate, exactly as the spec's "idempotent initialization, logically
//! immutable thereafter" contract requires. This type just pins down the
//! xor-in/xor-out streaming contract at the API boundary: construct, `update`
//! zero or more byte chunks (a zero-length update is a no-op), `finalize`.

use crc32fast::Hasher;

/// Streaming CRC-32 accumulator.
pub struct Crc32 {
    hasher: Hasher,
}

impl Crc32 {
    pub fn new() -> Self {
        Self {
            hasher: Hasher::new(),
        }
    }

    /// Feed the next chunk of bytes into the running checksum.
    pub fn update(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
    }

    /// Finalize and return the CRC-32 value (xor-out applied).
    pub fn finalize(self) -> u32 {
        self.hasher.finalize()
    }
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot CRC-32 of a full buffer.
pub fn crc32_of(bytes: &[u8]) -> u32 {
    crc32fast::hash(bytes)
}
