//! # tacozip: ZIP64 archive writer with a reserved ghost metadata entry
//!
//! `tacozip` writes ZIP64-compliant archives whose first entry is a reserved
//! "ghost": a zero-length `TACO_GHOST` entry at absolute offset 0 carrying a
//! fixed seven-slot table of `(offset, length)` pointers into metadata that
//! lives outside the ZIP entries themselves (e.g. an index footer appended
//! after the archive, or stored alongside it). The rest of the archive is an
//! ordinary STORE-only ZIP64 file, readable by any standards-conformant tool.
//!
//! ## Quick start
//!
//! ```no_run
//! use tacozip::{create, read_ghost, WriterConfig};
//!
//! create(
//!     "out.zip",
//!     &["greet.txt"],
//!     &[b"greet.txt".as_slice()],
//!     0,
//!     0,
//!     &WriterConfig::default(),
//! )?;
//!
//! let ghost = read_ghost("out.zip")?;
//! println!("offset={} length={}", ghost.offset, ghost.length);
//! # Ok::<(), tacozip::TacoZipError>(())
//! ```

pub mod central;
pub mod codec;
pub mod config;
pub mod crc;
pub mod entry;
pub mod error;
pub mod ghost;
pub mod ghost_io;
pub mod writer;

pub use config::WriterConfig;
pub use error::{Result, TacoZipError};
pub use ghost::{MetaEntry, MetaTable};
pub use ghost_io::{read_ghost, read_ghost_multi, update_ghost, update_ghost_multi};
pub use writer::{create, create_multi};
