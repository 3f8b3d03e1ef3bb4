//! The ghost protocol: the reserved first entry of every archive.
//!
//! The ghost is an ordinary STORE entry named `TACO_GHOST` whose only special
//! properties are that its local file header starts at absolute offset 0 and
//! its 116-byte extra field (id 0x7454) carries a fixed seven-slot metadata
//! table. See spec §4.3.

use crate::codec::{get_u16_le, get_u32_le, get_u64_le, put_u16_le, put_u32_le, put_u64_le};
use crate::error::{Result, TacoZipError};

/// Number of `(offset, length)` slots in the metadata table.
pub const SLOT_COUNT: usize = 7;

/// Size in bytes of the ghost's extra-field payload (count + padding + 7 pairs).
pub const PAYLOAD_LEN: usize = 116;

/// Size in bytes of the ghost's local file header (up to, not including, the name).
pub const LFH_LEN: usize = 30;

/// Exact archive name of the ghost entry.
pub const GHOST_NAME: &[u8] = b"TACO_GHOST";

/// Extra field header id identifying the ghost payload.
pub const GHOST_EXTRA_ID: u16 = 0x7454;

/// Extra field length used by the historical 64-byte single-pair ghost. Kept
/// only as documentation of the legacy layout this implementation never emits
/// or reads.
pub const LEGACY_EXTRA_LEN: u16 = 20;

/// Bytes occupied by the sub-field header (id + data-size) preceding the
/// payload within the extra area.
const EXTRA_SUBHEADER_LEN: usize = 4;

/// Value written into the LFH's own "extra field length" slot (offset 28..30).
/// The spec pins this to 116 — the payload length — even though the extra
/// area physically occupies 120 bytes once the 4-byte sub-field header
/// (id + data-size) is counted. Harmless for every reader that navigates via
/// the central directory (the only place entries are located from); it only
/// affects a tool that sequentially skips the ghost's own local-header extra
/// area, which nothing in this crate ever does.
const LFH_EXTRA_LENGTH_FIELD: u16 = PAYLOAD_LEN as u16;

/// Total size of the ghost region (LFH + name + id/size sub-header + payload):
/// 30 + 10 + 4 + 116 = 160 — the true byte span the offset table in spec
/// §4.3 covers (it runs 0..160), not the narrower "156" the spec's own prose
/// computes from 30 + 10 + 116 (that sentence undercounts the 4-byte
/// sub-field header). Every absolute offset this crate relies on — where the
/// first real entry's LFH begins, the preallocation estimate, the patch
/// window boundary — is derived from this constant.
pub const GHOST_REGION_LEN: u64 =
    LFH_LEN as u64 + GHOST_NAME.len() as u64 + EXTRA_SUBHEADER_LEN as u64 + PAYLOAD_LEN as u64;

/// Absolute offset of the count byte within the ghost region.
pub const COUNT_OFFSET: u64 = 44;

/// Absolute offset of the first `(offset, length)` pair within the ghost region.
pub const PAIRS_OFFSET: u64 = 48;

const LOCAL_FILE_HEADER_SIGNATURE: u32 = 0x0403_4B50;

/// A single `(offset, length)` pointer into external metadata. `(0, 0)` is the
/// sentinel meaning "unused slot".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetaEntry {
    pub offset: u64,
    pub length: u64,
}

impl MetaEntry {
    pub fn is_sentinel(&self) -> bool {
        self.offset == 0 && self.length == 0
    }
}

/// The fixed seven-slot metadata table carried in the ghost payload, plus the
/// derived count of valid leading slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetaTable {
    entries: [MetaEntry; SLOT_COUNT],
    count: u8,
}

/// count = index of the first `(0, 0)` slot scanning from 0, or SLOT_COUNT if none.
pub fn derive_count(offsets: &[u64; SLOT_COUNT], lengths: &[u64; SLOT_COUNT]) -> u8 {
    for i in 0..SLOT_COUNT {
        if offsets[i] == 0 && lengths[i] == 0 {
            return i as u8;
        }
    }
    SLOT_COUNT as u8
}

impl MetaTable {
    /// Builds a table from parallel offset/length arrays, deriving `count` per
    /// the prefix-sentinel rule. The table is not compacted: a `(0, 0)` slot
    /// followed by a non-zero pair is stored verbatim even though `count`
    /// will not reach it.
    pub fn new(offsets: [u64; SLOT_COUNT], lengths: [u64; SLOT_COUNT]) -> Self {
        let count = derive_count(&offsets, &lengths);
        let mut entries = [MetaEntry::default(); SLOT_COUNT];
        for i in 0..SLOT_COUNT {
            entries[i] = MetaEntry {
                offset: offsets[i],
                length: lengths[i],
            };
        }
        Self { entries, count }
    }

    /// Shorthand for a table with only slot 0 populated.
    pub fn single(offset: u64, length: u64) -> Self {
        let mut offsets = [0u64; SLOT_COUNT];
        let mut lengths = [0u64; SLOT_COUNT];
        offsets[0] = offset;
        lengths[0] = length;
        Self::new(offsets, lengths)
    }

    pub fn count(&self) -> u8 {
        self.count
    }

    pub fn entries(&self) -> &[MetaEntry; SLOT_COUNT] {
        &self.entries
    }

    pub fn entry(&self, slot: usize) -> MetaEntry {
        self.entries[slot]
    }

    pub fn offsets(&self) -> [u64; SLOT_COUNT] {
        let mut out = [0u64; SLOT_COUNT];
        for i in 0..SLOT_COUNT {
            out[i] = self.entries[i].offset;
        }
        out
    }

    pub fn lengths(&self) -> [u64; SLOT_COUNT] {
        let mut out = [0u64; SLOT_COUNT];
        for i in 0..SLOT_COUNT {
            out[i] = self.entries[i].length;
        }
        out
    }

    /// Encodes the 116-byte extra-field payload: count byte, 3 zero padding
    /// bytes, then seven little-endian `(offset, length)` pairs.
    pub fn encode_payload(&self) -> [u8; PAYLOAD_LEN] {
        let mut buf = [0u8; PAYLOAD_LEN];
        buf[0] = self.count;
        // buf[1..4] padding already zero
        for i in 0..SLOT_COUNT {
            let off = 4 + i * 16;
            put_u64_le(&mut buf, off, self.entries[i].offset);
            put_u64_le(&mut buf, off + 8, self.entries[i].length);
        }
        buf
    }

    /// Decodes a 116-byte payload verbatim: the stored count byte and all
    /// seven pairs are taken as-is, including slots beyond `count` — callers
    /// may inspect them (spec §4.7).
    pub fn decode_payload(buf: &[u8; PAYLOAD_LEN]) -> Result<Self> {
        let count = buf[0];
        if count > SLOT_COUNT as u8 {
            return Err(TacoZipError::InvalidGhost(format!(
                "ghost count byte {} exceeds {}",
                count, SLOT_COUNT
            )));
        }
        let mut entries = [MetaEntry::default(); SLOT_COUNT];
        for i in 0..SLOT_COUNT {
            let off = 4 + i * 16;
            entries[i] = MetaEntry {
                offset: get_u64_le(buf, off),
                length: get_u64_le(buf, off + 8),
            };
        }
        Ok(Self { entries, count })
    }

    /// Builds the full 160-byte ghost region (LFH + name + id/size sub-header
    /// + payload) ready to be written at absolute offset 0.
    pub fn encode_region(&self) -> Vec<u8> {
        let mut region = Vec::with_capacity(GHOST_REGION_LEN as usize);
        let mut lfh = [0u8; LFH_LEN];
        put_u32_le(&mut lfh, 0, LOCAL_FILE_HEADER_SIGNATURE);
        put_u16_le(&mut lfh, 4, 45); // version needed
        put_u16_le(&mut lfh, 6, 0); // gp flags
        put_u16_le(&mut lfh, 8, 0); // method = STORE
        put_u32_le(&mut lfh, 10, 0); // DOS time/date
        put_u32_le(&mut lfh, 14, 0); // crc-32
        put_u32_le(&mut lfh, 18, 0); // compressed size
        put_u32_le(&mut lfh, 22, 0); // uncompressed size
        put_u16_le(&mut lfh, 26, GHOST_NAME.len() as u16);
        put_u16_le(&mut lfh, 28, LFH_EXTRA_LENGTH_FIELD);

        region.extend_from_slice(&lfh);
        region.extend_from_slice(GHOST_NAME);
        region.extend_from_slice(&GHOST_EXTRA_ID.to_le_bytes());
        region.extend_from_slice(&(PAYLOAD_LEN as u16).to_le_bytes());
        region.extend_from_slice(&self.encode_payload());

        debug_assert_eq!(region.len(), GHOST_REGION_LEN as usize);
        region
    }

    /// Validates an existing archive's first ~160 bytes as a well-formed
    /// ghost region and decodes its payload. All checks of §4.3 must hold.
    pub fn parse_region(buf: &[u8]) -> Result<Self> {
        if buf.len() < GHOST_REGION_LEN as usize {
            return Err(TacoZipError::InvalidGhost(
                "archive shorter than the ghost region".to_string(),
            ));
        }
        if get_u32_le(buf, 0) != LOCAL_FILE_HEADER_SIGNATURE {
            return Err(TacoZipError::InvalidGhost(
                "local file header signature mismatch".to_string(),
            ));
        }
        let name_len = get_u16_le(buf, 26);
        if name_len as usize != GHOST_NAME.len() {
            return Err(TacoZipError::InvalidGhost(format!(
                "name length {} != {}",
                name_len,
                GHOST_NAME.len()
            )));
        }
        let extra_len = get_u16_le(buf, 28);
        if extra_len as usize != PAYLOAD_LEN {
            return Err(TacoZipError::InvalidGhost(format!(
                "extra length {} != {}",
                extra_len, PAYLOAD_LEN
            )));
        }
        let name = &buf[30..30 + GHOST_NAME.len()];
        if name != GHOST_NAME {
            return Err(TacoZipError::InvalidGhost(
                "entry name is not TACO_GHOST".to_string(),
            ));
        }
        let extra_id = get_u16_le(buf, 40);
        if extra_id != GHOST_EXTRA_ID {
            return Err(TacoZipError::InvalidGhost(format!(
                "extra id 0x{:04X} != 0x{:04X}",
                extra_id, GHOST_EXTRA_ID
            )));
        }
        let extra_size = get_u16_le(buf, 42);
        if extra_size as usize != PAYLOAD_LEN {
            return Err(TacoZipError::InvalidGhost(format!(
                "extra data size {} != {}",
                extra_size, PAYLOAD_LEN
            )));
        }

        let payload: [u8; PAYLOAD_LEN] = buf[44..44 + PAYLOAD_LEN].try_into().unwrap();
        Self::decode_payload(&payload)
    }
}
