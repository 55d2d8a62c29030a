//! Info command implementation.

use oxidat_datafile::{DatafileParser, DatafileStats, PackKind, unpack};
use std::path::Path;

pub fn cmd_info(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let data = std::fs::read(file)?;
    let pack = PackKind::detect(&data)?;
    let stream = unpack(&data)?;
    let dat = DatafileParser::default().parse_stream(&stream)?;
    let stats = DatafileStats::collect(&dat);

    println!("Datafile Information");
    println!("====================");
    println!("File: {}", file.display());
    println!("Size: {} bytes", data.len());
    println!("Packing: {} ({})", pack.name(), pack.indicator());
    println!("Stream size: {} bytes", stream.len());
    if pack == PackKind::Packed && !stream.is_empty() {
        println!(
            "Compression ratio: {:.1}%",
            (1.0 - (data.len() - 4) as f64 / stream.len() as f64) * 100.0
        );
    }

    println!();
    println!("Contents:");
    println!("  Root objects: {}", stats.roots);
    println!("  Objects: {}", stats.objects);
    println!("  Containers: {}", stats.containers);
    println!("  Leaves: {}", stats.leaves());
    println!("  Properties: {}", stats.properties);
    println!("  Max depth: {}", stats.max_depth);
    println!("  Payload size: {} bytes", stats.payload_bytes);

    if !stats.by_kind.is_empty() {
        println!();
        println!("Object types:");
        for (kind, count) in &stats.by_kind {
            let description = oxidat_datafile::tags::describe(*kind).unwrap_or("unknown");
            println!("  {:<4}  {:>6}  {}", kind.to_display_string(), count, description);
        }
    }

    Ok(())
}
