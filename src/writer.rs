//! Archive writer façade: `create`/`create_multi`. Orchestrates the ghost
//! region, the per-file entry writer, and the central directory emitter into
//! one archive-creation session. See spec §4.6.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::central::write_central_directory;
use crate::config::WriterConfig;
use crate::entry::{write_entry, EntryDescriptor};
use crate::error::{Result, TacoZipError};
use crate::ghost::{MetaTable, GHOST_REGION_LEN, SLOT_COUNT};

fn validate_args(sources: &[impl AsRef<Path>], names: &[impl AsRef<[u8]>]) -> Result<()> {
    if sources.len() != names.len() {
        return Err(TacoZipError::InvalidParam(format!(
            "sources length {} != names length {}",
            sources.len(),
            names.len()
        )));
    }
    if sources.is_empty() {
        return Err(TacoZipError::InvalidParam(
            "create_multi requires at least one source file".to_string(),
        ));
    }
    for name in names {
        if name.as_ref().len() > 65_535 {
            return Err(TacoZipError::InvalidParam(format!(
                "archive name length {} exceeds 65535",
                name.as_ref().len()
            )));
        }
    }
    Ok(())
}

fn estimate_total_size(sources: &[impl AsRef<Path>], names: &[impl AsRef<[u8]>]) -> u64 {
    let mut sum = GHOST_REGION_LEN;
    for (src, name) in sources.iter().zip(names.iter()) {
        let name_len = name.as_ref().len() as u64;
        let file_len = std::fs::metadata(src.as_ref()).map(|m| m.len()).unwrap_or(0);
        sum += 30 + name_len + file_len + 24; // LFH + name + data + data descriptor
        sum += 46 + name_len + 28; // CDFH + name + ZIP64 extra
    }
    sum += 56 + 20 + 22; // ZIP64 EOCD + locator + classic EOCD
    sum
}

/// Creates an archive with a seven-slot ghost metadata table and the given
/// source files, in order, named per `names`. `sources.len() == names.len()`
/// and must be non-empty.
pub fn create_multi(
    archive_path: impl AsRef<Path>,
    sources: &[impl AsRef<Path>],
    names: &[impl AsRef<[u8]>],
    offsets: [u64; SLOT_COUNT],
    lengths: [u64; SLOT_COUNT],
    config: &WriterConfig,
) -> Result<()> {
    validate_args(sources, names)?;

    let archive_path = archive_path.as_ref();
    log::debug!(
        "creating archive {:?} with {} entries",
        archive_path,
        sources.len()
    );

    let file = File::create(archive_path)?;

    let estimate = estimate_total_size(sources, names);
    if let Err(e) = file.set_len(estimate) {
        log::warn!("preallocation of {} bytes failed: {}", estimate, e);
    }

    let mut out = BufWriter::with_capacity(config.output_buffer_size(), file);

    let table = MetaTable::new(offsets, lengths);
    let ghost_region = table.encode_region();
    out.write_all(&ghost_region)?;

    let mut descriptors = Vec::with_capacity(sources.len() + 1);
    descriptors.push(EntryDescriptor::ghost());

    let mut offset = ghost_region.len() as u64;
    for (src, name) in sources.iter().zip(names.iter()) {
        let result = write_entry(
            &mut out,
            src.as_ref(),
            name.as_ref(),
            offset,
            config.utf8_names(),
            config.copy_buffer_size(),
        );
        let (desc, written) = match result {
            Ok(v) => v,
            Err(e) => {
                log::error!("writing entry {:?} failed: {}", src.as_ref(), e);
                return Err(e);
            }
        };
        log::debug!(
            "wrote entry {:?} ({} bytes, crc=0x{:08X})",
            name.as_ref(),
            desc.uncompressed_size,
            desc.crc32
        );
        offset += written;
        descriptors.push(desc);
    }

    let cd_bytes = match write_central_directory(&mut out, &descriptors, offset) {
        Ok(n) => n,
        Err(e) => {
            log::error!("writing central directory failed: {}", e);
            return Err(e);
        }
    };
    let final_len = offset + cd_bytes;

    out.flush()?;
    let file = out
        .into_inner()
        .map_err(|e| TacoZipError::Io(e.into_error()))?;
    file.set_len(final_len)?;
    drop(file);

    Ok(())
}

/// Shorthand for `create_multi` with a single `(offset, length)` pair in slot
/// zero and the remaining six slots zeroed.
pub fn create(
    archive_path: impl AsRef<Path>,
    sources: &[impl AsRef<Path>],
    names: &[impl AsRef<[u8]>],
    offset: u64,
    length: u64,
    config: &WriterConfig,
) -> Result<()> {
    let mut offsets = [0u64; SLOT_COUNT];
    let mut lengths = [0u64; SLOT_COUNT];
    offsets[0] = offset;
    lengths[0] = length;
    create_multi(archive_path, sources, names, offsets, lengths, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ghost_io::read_ghost_multi;
    use std::io::Read;

    fn write_temp(dir: &tempfile::TempDir, name: &str, contents: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn create_multi_rejects_mismatched_lengths() {
        let dir = tempfile::tempdir().unwrap();
        let out_path = dir.path().join("out.zip");
        let sources: Vec<std::path::PathBuf> = vec![dir.path().join("a")];
        let names: Vec<&[u8]> = vec![];
        let err = create_multi(
            &out_path,
            &sources,
            &names,
            [0; SLOT_COUNT],
            [0; SLOT_COUNT],
            &WriterConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, TacoZipError::InvalidParam(_)));
        assert!(!out_path.exists());
    }

    #[test]
    fn create_multi_rejects_empty_source_list() {
        let dir = tempfile::tempdir().unwrap();
        let out_path = dir.path().join("out.zip");
        let sources: Vec<std::path::PathBuf> = vec![];
        let names: Vec<&[u8]> = vec![];
        let err = create_multi(
            &out_path,
            &sources,
            &names,
            [0; SLOT_COUNT],
            [0; SLOT_COUNT],
            &WriterConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, TacoZipError::InvalidParam(_)));
    }

    #[test]
    fn s1_single_hello_file() {
        let dir = tempfile::tempdir().unwrap();
        let src = write_temp(&dir, "greet.txt", b"hello");
        let out_path = dir.path().join("out.zip");

        create(
            &out_path,
            &[src],
            &[b"greet.txt".as_slice()],
            0,
            0,
            &WriterConfig::default(),
        )
        .unwrap();

        let mut bytes = Vec::new();
        File::open(&out_path)
            .unwrap()
            .read_to_end(&mut bytes)
            .unwrap();

        assert_eq!(&bytes[0..4], &[0x50, 0x4B, 0x03, 0x04]);
        assert_eq!(&bytes[30..40], b"TACO_GHOST");
        assert_eq!(bytes[44], 0x00);
        assert!(bytes[48..160].iter().all(|&b| b == 0));

        let eocd_start = bytes.len() - 22;
        assert_eq!(
            &bytes[eocd_start..eocd_start + 4],
            &[0x50, 0x4B, 0x05, 0x06]
        );

        let table = read_ghost_multi(&out_path).unwrap();
        assert_eq!(table.count(), 0);
    }

    #[test]
    fn s2_sparse_offsets() {
        let dir = tempfile::tempdir().unwrap();
        let src = write_temp(&dir, "a", b"");
        let out_path = dir.path().join("m.zip");

        create_multi(
            &out_path,
            &[src],
            &[b"a".as_slice()],
            [100, 200, 0, 0, 0, 0, 0],
            [10, 20, 0, 0, 0, 0, 0],
            &WriterConfig::default(),
        )
        .unwrap();

        let mut bytes = Vec::new();
        File::open(&out_path)
            .unwrap()
            .read_to_end(&mut bytes)
            .unwrap();
        assert_eq!(bytes[44], 0x02);
        assert_eq!(crate::codec::get_u64_le(&bytes, 48), 100);
        assert_eq!(crate::codec::get_u64_le(&bytes, 56), 10);
        assert_eq!(crate::codec::get_u64_le(&bytes, 64), 200);
        assert_eq!(crate::codec::get_u64_le(&bytes, 72), 20);
    }

    #[test]
    fn missing_source_leaves_no_successful_archive() {
        let dir = tempfile::tempdir().unwrap();
        let out_path = dir.path().join("out.zip");
        let missing = dir.path().join("does-not-exist");
        let err = create(
            &out_path,
            &[missing],
            &[b"x".as_slice()],
            0,
            0,
            &WriterConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, TacoZipError::Io(_)));
    }
}
