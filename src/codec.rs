//! Little-endian byte codec: the leaf utility every other module builds on.
//!
//! Two call shapes: fixed-offset pack/unpack into a `&mut [u8]` / `&[u8]` (used
//! by the ghost codec, which must land in an exact 116-byte array), and
//! extension traits for writing/reading little-endian integers directly on a
//! `Write`/`Read` stream (used by the header-emitting components). No bounds
//! checking beyond the caller's buffer length.

use std::io::{self, Read, Write};

/// Writes `v` little-endian at `buf[off..off+2]`.
pub fn put_u16_le(buf: &mut [u8], off: usize, v: u16) {
    buf[off..off + 2].copy_from_slice(&v.to_le_bytes());
}

/// Writes `v` little-endian at `buf[off..off+4]`.
pub fn put_u32_le(buf: &mut [u8], off: usize, v: u32) {
    buf[off..off + 4].copy_from_slice(&v.to_le_bytes());
}

/// Writes `v` little-endian at `buf[off..off+8]`.
pub fn put_u64_le(buf: &mut [u8], off: usize, v: u64) {
    buf[off..off + 8].copy_from_slice(&v.to_le_bytes());
}

/// Reads a little-endian u16 from `buf[off..off+2]`.
pub fn get_u16_le(buf: &[u8], off: usize) -> u16 {
    u16::from_le_bytes(buf[off..off + 2].try_into().unwrap())
}

/// Reads a little-endian u32 from `buf[off..off+4]`.
pub fn get_u32_le(buf: &[u8], off: usize) -> u32 {
    u32::from_le_bytes(buf[off..off + 4].try_into().unwrap())
}

/// Reads a little-endian u64 from `buf[off..off+8]`.
pub fn get_u64_le(buf: &[u8], off: usize) -> u64 {
    u64::from_le_bytes(buf[off..off + 8].try_into().unwrap())
}

/// Extension trait for writing little-endian integers directly to a stream.
pub trait WriteLeExt: Write {
    fn write_u16_le(&mut self, v: u16) -> io::Result<()> {
        self.write_all(&v.to_le_bytes())
    }

    fn write_u32_le(&mut self, v: u32) -> io::Result<()> {
        self.write_all(&v.to_le_bytes())
    }

    fn write_u64_le(&mut self, v: u64) -> io::Result<()> {
        self.write_all(&v.to_le_bytes())
    }
}

impl<W: Write + ?Sized> WriteLeExt for W {}

/// Extension trait for reading little-endian integers directly from a stream.
pub trait ReadLeExt: Read {
    fn read_u16_le(&mut self) -> io::Result<u16> {
        let mut buf = [0u8; 2];
        self.read_exact(&mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    fn read_u32_le(&mut self) -> io::Result<u32> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    fn read_u64_le(&mut self) -> io::Result<u64> {
        let mut buf = [0u8; 8];
        self.read_exact(&mut buf)?;
        Ok(u64::from_le_bytes(buf))
    }
}

impl<R: Read + ?Sized> ReadLeExt for R {}
