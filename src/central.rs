//! Central directory emitter: CDFH + ZIP64 extra per entry, then the ZIP64
//! EOCD, the ZIP64 locator, and the classic EOCD. See spec §4.5.

use std::io::Write;

use crate::codec::WriteLeExt;
use crate::entry::EntryDescriptor;
use crate::error::Result;

const CENTRAL_DIRECTORY_SIGNATURE: u32 = 0x0201_4B50;
const ZIP64_EOCD_SIGNATURE: u32 = 0x0606_4B50;
const ZIP64_LOCATOR_SIGNATURE: u32 = 0x0706_4B50;
const EOCD_SIGNATURE: u32 = 0x0605_4B50;
const VERSION_MADE_BY: u16 = 0x031E;
const VERSION_NEEDED: u16 = 45;
const ZIP64_EXTRA_ID: u16 = 0x0001;
const ZIP64_EXTRA_DATA_SIZE: u16 = 24;
const ZIP64_EXTRA_FIELD_LEN: u16 = 28; // id(2) + size(2) + 24 data bytes
const ZIP64_MARKER_32: u32 = 0xFFFF_FFFF;
const ZIP64_EOCD_BODY_SIZE: u64 = 44;

/// Writes the full central directory (all entries, ghost included, in the
/// order given) plus the ZIP64 EOCD, ZIP64 locator, and classic EOCD.
/// `cd_start_offset` is the absolute position `out` is at when this is
/// called. Returns the total number of bytes written.
pub fn write_central_directory<W: Write>(
    out: &mut W,
    entries: &[EntryDescriptor],
    cd_start_offset: u64,
) -> Result<u64> {
    let mut written: u64 = 0;

    for desc in entries {
        out.write_u32_le(CENTRAL_DIRECTORY_SIGNATURE)?;
        out.write_u16_le(VERSION_MADE_BY)?;
        out.write_u16_le(VERSION_NEEDED)?;
        out.write_u16_le(desc.flags)?;
        out.write_u16_le(desc.method)?;
        out.write_u32_le(0)?; // DOS time/date
        out.write_u32_le(desc.crc32)?;
        out.write_u32_le(ZIP64_MARKER_32)?; // compressed size
        out.write_u32_le(ZIP64_MARKER_32)?; // uncompressed size
        out.write_u16_le(desc.name.len() as u16)?;
        out.write_u16_le(ZIP64_EXTRA_FIELD_LEN)?;
        out.write_u16_le(0)?; // comment length
        out.write_u16_le(0)?; // disk number start
        out.write_u16_le(0)?; // internal attrs
        out.write_u32_le(0)?; // external attrs
        out.write_u32_le(ZIP64_MARKER_32)?; // relative LFH offset
        out.write_all(&desc.name)?;

        out.write_u16_le(ZIP64_EXTRA_ID)?;
        out.write_u16_le(ZIP64_EXTRA_DATA_SIZE)?;
        out.write_u64_le(desc.uncompressed_size)?;
        out.write_u64_le(desc.compressed_size)?;
        out.write_u64_le(desc.lfh_offset)?;

        written += 46 + desc.name.len() as u64 + ZIP64_EXTRA_FIELD_LEN as u64;
    }

    let cd_size = written;
    let total_entries = entries.len() as u64;
    let zip64_eocd_offset = cd_start_offset + cd_size;

    out.write_u32_le(ZIP64_EOCD_SIGNATURE)?;
    out.write_u64_le(ZIP64_EOCD_BODY_SIZE)?;
    out.write_u16_le(VERSION_MADE_BY)?;
    out.write_u16_le(VERSION_NEEDED)?;
    out.write_u32_le(0)?; // disk number
    out.write_u32_le(0)?; // CD start disk
    out.write_u64_le(total_entries)?; // entries on this disk
    out.write_u64_le(total_entries)?; // total entries
    out.write_u64_le(cd_size)?;
    out.write_u64_le(cd_start_offset)?;
    written += 56;

    out.write_u32_le(ZIP64_LOCATOR_SIGNATURE)?;
    out.write_u32_le(0)?; // disk with ZIP64 EOCD
    out.write_u64_le(zip64_eocd_offset)?;
    out.write_u32_le(1)?; // total number of disks
    written += 20;

    out.write_u32_le(EOCD_SIGNATURE)?;
    out.write_u16_le(0)?; // disk number
    out.write_u16_le(0)?; // CD start disk
    out.write_u16_le(0xFFFF)?; // entries on this disk
    out.write_u16_le(0xFFFF)?; // total entries
    out.write_u32_le(ZIP64_MARKER_32)?; // size of CD
    out.write_u32_le(ZIP64_MARKER_32)?; // CD offset
    out.write_u16_le(0)?; // comment length
    written += 22;

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry(name: &str, offset: u64, size: u64) -> EntryDescriptor {
        EntryDescriptor {
            name: name.as_bytes().to_vec(),
            flags: 0x0008,
            method: 0,
            crc32: 0xDEAD_BEEF,
            compressed_size: size,
            uncompressed_size: size,
            lfh_offset: offset,
        }
    }

    #[test]
    fn classic_eocd_always_truncated() {
        let mut out = Vec::new();
        let entries = vec![sample_entry("a", 0, 5)];
        write_central_directory(&mut out, &entries, 0).unwrap();

        let eocd_start = out.len() - 22;
        assert_eq!(
            &out[eocd_start..eocd_start + 4],
            &[0x50, 0x4B, 0x05, 0x06]
        );
        assert_eq!(&out[eocd_start + 8..eocd_start + 10], &[0xFF, 0xFF]);
        assert_eq!(&out[eocd_start + 10..eocd_start + 12], &[0xFF, 0xFF]);
        assert_eq!(
            &out[eocd_start + 12..eocd_start + 16],
            &[0xFF, 0xFF, 0xFF, 0xFF]
        );
        assert_eq!(
            &out[eocd_start + 16..eocd_start + 20],
            &[0xFF, 0xFF, 0xFF, 0xFF]
        );
    }

    #[test]
    fn zip64_locator_points_at_zip64_eocd() {
        let mut out = Vec::new();
        let entries = vec![sample_entry("a", 0, 5), sample_entry("b", 100, 7)];
        write_central_directory(&mut out, &entries, 200).unwrap();

        let locator_start = out.len() - 22 - 20;
        assert_eq!(
            &out[locator_start..locator_start + 4],
            &[0x50, 0x4B, 0x06, 0x07]
        );
        let cd_size = (46 + 1 + 28) + (46 + 1 + 28); // two one-byte names
        let expected_zip64_eocd_offset = 200u64 + cd_size as u64;
        let recorded = crate::codec::get_u64_le(&out, locator_start + 8);
        assert_eq!(recorded, expected_zip64_eocd_offset);
    }

    #[test]
    fn three_entries_report_correct_total() {
        let mut out = Vec::new();
        let entries = vec![
            sample_entry("TACO_GHOST", 0, 0),
            sample_entry("a", 160, 1),
            sample_entry("b", 300, 2),
        ];
        write_central_directory(&mut out, &entries, 500).unwrap();

        let zip64_eocd_start = out.len() - 22 - 20 - 56;
        assert_eq!(
            &out[zip64_eocd_start..zip64_eocd_start + 4],
            &[0x50, 0x4B, 0x06, 0x06]
        );
        let total_entries = crate::codec::get_u64_le(&out, zip64_eocd_start + 32);
        assert_eq!(total_entries, 3);
    }
}
