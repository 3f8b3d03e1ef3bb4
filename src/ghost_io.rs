//! Ghost reader and patcher: decode an existing archive's metadata table, or
//! patch it in place without touching anything past the ghost region. See
//! spec §4.7.

use std::fs::OpenOptions;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::error::Result;
use crate::ghost::{MetaEntry, MetaTable, COUNT_OFFSET, GHOST_REGION_LEN, PAIRS_OFFSET, SLOT_COUNT};

/// Reads and validates the ghost region of an existing archive, returning
/// its full seven-slot metadata table (including slots beyond `count`).
pub fn read_ghost_multi(archive_path: impl AsRef<Path>) -> Result<MetaTable> {
    let mut file = OpenOptions::new().read(true).open(archive_path.as_ref())?;
    let mut region = vec![0u8; GHOST_REGION_LEN as usize];
    file.read_exact(&mut region)?;
    let table = MetaTable::parse_region(&region)?;
    log::debug!(
        "read ghost from {:?}: count={}",
        archive_path.as_ref(),
        table.count()
    );
    Ok(table)
}

/// Shorthand returning only the first slot.
pub fn read_ghost(archive_path: impl AsRef<Path>) -> Result<MetaEntry> {
    Ok(read_ghost_multi(archive_path)?.entry(0))
}

/// Validates the existing ghost, recomputes the count from the new arrays,
/// and overwrites the count byte and the seven pairs in place. Never reads
/// or writes any byte at offset >= [`GHOST_REGION_LEN`].
pub fn update_ghost_multi(
    archive_path: impl AsRef<Path>,
    offsets: [u64; SLOT_COUNT],
    lengths: [u64; SLOT_COUNT],
) -> Result<()> {
    let archive_path = archive_path.as_ref();
    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .open(archive_path)?;

    let mut region = vec![0u8; GHOST_REGION_LEN as usize];
    file.read_exact(&mut region)?;
    MetaTable::parse_region(&region)?;

    let table = MetaTable::new(offsets, lengths);
    let payload = table.encode_payload();

    file.seek(SeekFrom::Start(COUNT_OFFSET))?;
    file.write_all(&payload[0..1])?;
    file.seek(SeekFrom::Start(PAIRS_OFFSET))?;
    file.write_all(&payload[4..])?;
    file.flush()?;

    log::debug!(
        "updated ghost in {:?}: new count={}",
        archive_path,
        table.count()
    );
    Ok(())
}

/// Shorthand patching only slot zero; slots 1..7 are preserved, and the
/// count is recomputed over the full (preserved + new) table.
pub fn update_ghost(archive_path: impl AsRef<Path>, offset: u64, length: u64) -> Result<()> {
    let current = read_ghost_multi(archive_path.as_ref())?;
    let mut offsets = current.offsets();
    let mut lengths = current.lengths();
    offsets[0] = offset;
    lengths[0] = length;
    update_ghost_multi(archive_path, offsets, lengths)
}
