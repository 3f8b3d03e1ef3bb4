//! Per-file entry writer: local file header, streamed data, ZIP64 data
//! descriptor. See spec §4.4.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use crate::codec::WriteLeExt;
use crate::crc::Crc32;
use crate::error::{Result, TacoZipError};

const LOCAL_FILE_HEADER_SIGNATURE: u32 = 0x0403_4B50;
const DATA_DESCRIPTOR_SIGNATURE: u32 = 0x0807_4B50;
const VERSION_NEEDED: u16 = 45;
const FLAG_DATA_DESCRIPTOR: u16 = 0x0008;
const FLAG_UTF8: u16 = 0x0800;
const METHOD_STORE: u16 = 0;
const ZIP64_MARKER_32: u32 = 0xFFFF_FFFF;
const MAX_NAME_LEN: usize = 65_535;

/// In-memory record of a written entry, consumed later by the central
/// directory emitter.
#[derive(Debug, Clone)]
pub struct EntryDescriptor {
    pub name: Vec<u8>,
    pub flags: u16,
    pub method: u16,
    pub crc32: u32,
    pub compressed_size: u64,
    pub uncompressed_size: u64,
    pub lfh_offset: u64,
}

impl EntryDescriptor {
    /// Synthetic descriptor for the ghost entry, whose LFH is built directly
    /// by the ghost codec rather than by `write_entry`.
    pub fn ghost() -> Self {
        Self {
            name: crate::ghost::GHOST_NAME.to_vec(),
            flags: 0,
            method: METHOD_STORE,
            crc32: 0,
            compressed_size: 0,
            uncompressed_size: 0,
            lfh_offset: 0,
        }
    }
}

fn validate_name_len(name: &[u8]) -> Result<()> {
    if name.len() > MAX_NAME_LEN {
        return Err(TacoZipError::InvalidParam(format!(
            "archive name length {} exceeds {}",
            name.len(),
            MAX_NAME_LEN
        )));
    }
    Ok(())
}

/// Streams `src_path`'s contents into `out` as one ZIP entry starting at
/// `lfh_offset`. Returns the descriptor and the total number of bytes
/// written for this entry (LFH + name + data + data descriptor).
pub fn write_entry<W: Write>(
    out: &mut W,
    src_path: &Path,
    arc_name: &[u8],
    lfh_offset: u64,
    utf8_names: bool,
    copy_buffer_size: usize,
) -> Result<(EntryDescriptor, u64)> {
    validate_name_len(arc_name)?;

    let mut flags = FLAG_DATA_DESCRIPTOR;
    if utf8_names {
        flags |= FLAG_UTF8;
    }

    out.write_u32_le(LOCAL_FILE_HEADER_SIGNATURE)?;
    out.write_u16_le(VERSION_NEEDED)?;
    out.write_u16_le(flags)?;
    out.write_u16_le(METHOD_STORE)?;
    out.write_u32_le(0)?; // DOS time/date
    out.write_u32_le(0)?; // crc-32, unknown until streamed
    out.write_u32_le(ZIP64_MARKER_32)?; // compressed size
    out.write_u32_le(ZIP64_MARKER_32)?; // uncompressed size
    out.write_u16_le(arc_name.len() as u16)?;
    out.write_u16_le(0)?; // extra length
    out.write_all(arc_name)?;

    let mut src = File::open(src_path)?;
    let mut buf = vec![0u8; copy_buffer_size.max(1)];
    let mut crc = Crc32::new();
    let mut size: u64 = 0;

    loop {
        let n = match src.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(TacoZipError::from(e)),
        };
        crc.update(&buf[..n]);
        out.write_all(&buf[..n])?;
        size += n as u64;
        log::trace!("copied {} bytes ({} total) for {:?}", n, size, src_path);
    }

    let crc32 = crc.finalize();

    out.write_u32_le(DATA_DESCRIPTOR_SIGNATURE)?;
    out.write_u32_le(crc32)?;
    out.write_u64_le(size)?;
    out.write_u64_le(size)?;

    let total_written = 30u64 + arc_name.len() as u64 + size + 24;

    Ok((
        EntryDescriptor {
            name: arc_name.to_vec(),
            flags,
            method: METHOD_STORE,
            crc32,
            compressed_size: size,
            uncompressed_size: size,
            lfh_offset,
        },
        total_written,
    ))
}
