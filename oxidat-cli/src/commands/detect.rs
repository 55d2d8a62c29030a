//! Detect command implementation.

use oxidat_core::ByteReader;
use oxidat_datafile::{PackKind, tags, unpack};
use std::path::Path;

pub fn cmd_detect(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let data = std::fs::read(file)?;
    let pack = PackKind::detect(&data)?;

    println!("File: {}", file.display());
    println!(
        "Pack indicator: {} ({:#010x})",
        pack.indicator(),
        pack.indicator().to_u32()
    );
    println!("Packing: {}", pack.name());

    let stream = unpack(&data)?;
    let mut reader = ByteReader::new(&stream);
    match reader.peek_fourcc() {
        Some(magic) if magic == tags::DAT_MAGIC => {
            reader.skip(4)?;
            println!("Magic: {}", magic);
            println!("Root objects: {}", reader.read_u32_be()?);
            println!("Type: Allegro 4 datafile");
        }
        Some(magic) => {
            println!("Magic: {} ({:#010x})", magic, magic.to_u32());
            println!("Type: Allegro packfile (not a datafile)");
        }
        None => println!("Type: empty packfile"),
    }

    Ok(())
}
