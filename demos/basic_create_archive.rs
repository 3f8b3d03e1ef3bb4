//! Minimal end-to-end demo: create an archive with a ghost metadata table,
//! read it back, patch it, and read it again.

use tacozip::{create, read_ghost, update_ghost, WriterConfig};

fn main() -> Result<(), tacozip::TacoZipError> {
    env_logger::init();

    let dir = tempfile::tempdir()?;
    let src = dir.path().join("greet.txt");
    std::fs::write(&src, b"hello, tacozip")?;
    let archive = dir.path().join("demo.zip");

    create(
        &archive,
        &[src],
        &[b"greet.txt".as_slice()],
        0,
        0,
        &WriterConfig::default(),
    )?;
    println!("created {:?}", archive);

    let ghost = read_ghost(&archive)?;
    println!("ghost before update: {:?}", ghost);

    update_ghost(&archive, 4096, 512)?;
    let ghost = read_ghost(&archive)?;
    println!("ghost after update: {:?}", ghost);

    Ok(())
}
