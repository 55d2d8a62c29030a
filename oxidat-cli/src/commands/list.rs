//! List command implementation.

use crate::utils::{NamedObject, matches_filters, named_objects, resolve_encoding};
use oxidat_datafile::{Object, ObjectBody, PackKind, load};
use serde::Serialize;
use std::path::Path;

/// JSON serializable property.
#[derive(Debug, Serialize)]
struct PropertyJson {
    id: String,
    value: String,
}

/// JSON serializable object entry.
#[derive(Debug, Serialize)]
struct ObjectJson {
    path: String,
    #[serde(rename = "type")]
    kind: String,
    depth: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    children: Option<usize>,
    properties: Vec<PropertyJson>,
}

impl ObjectJson {
    fn from_named(named: &NamedObject<'_>, encoding: &'static encoding_rs::Encoding) -> Self {
        let object = named.object;
        Self {
            path: named.path.clone(),
            kind: object.kind().to_display_string(),
            depth: named.depth,
            size: object.payload().map(<[u8]>::len),
            children: object.children().map(<[Object]>::len),
            properties: object
                .properties()
                .iter()
                .map(|p| PropertyJson {
                    id: p.id().to_display_string(),
                    value: p.decode(encoding).into_owned(),
                })
                .collect(),
        }
    }
}

/// JSON output for a datafile listing.
#[derive(Debug, Serialize)]
struct DatafileListJson {
    file: String,
    pack: &'static str,
    objects: Vec<ObjectJson>,
}

/// Options for listing datafile contents.
pub struct ListOptions<'a> {
    pub verbose: bool,
    pub json: bool,
    pub encoding: &'a str,
    pub include: &'a [String],
    pub exclude: &'a [String],
}

pub fn cmd_list(file: &Path, options: &ListOptions) -> Result<(), Box<dyn std::error::Error>> {
    let encoding = resolve_encoding(options.encoding)?;
    let data = std::fs::read(file)?;
    let pack = PackKind::detect(&data)?;
    let dat = load(&data)?;

    let entries: Vec<_> = named_objects(&dat, encoding)
        .into_iter()
        .filter(|n| matches_filters(&n.path, options.include, options.exclude))
        .collect();

    if options.json {
        let output = DatafileListJson {
            file: file.display().to_string(),
            pack: pack.name(),
            objects: entries
                .iter()
                .map(|n| ObjectJson::from_named(n, encoding))
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Datafile: {} ({})", file.display(), pack.name());
    println!();

    if options.verbose {
        print_verbose(&entries);
    } else {
        for named in &entries {
            println!(
                "{}{}  {}",
                "  ".repeat(named.depth),
                named.object.kind(),
                named.path
            );
        }
    }

    Ok(())
}

fn print_verbose(entries: &[NamedObject<'_>]) {
    println!("{:>10} {:>6} {:>5}  {:<4}  Path", "Size", "Items", "Props", "Type");
    println!("{}", "-".repeat(60));

    let mut total_size = 0u64;
    let mut leaves = 0usize;

    for named in entries {
        let object = named.object;
        if let Some(payload) = object.payload() {
            total_size += payload.len() as u64;
            leaves += 1;
        }
        let (size, items) = size_columns(object);

        println!(
            "{:>10} {:>6} {:>5}  {:<4}  {}{}",
            size,
            items,
            object.properties().len(),
            object.kind().to_display_string(),
            "  ".repeat(named.depth),
            named.path
        );
    }

    println!("{}", "-".repeat(60));
    println!(
        "{:>10}                      {} objects, {} leaves",
        total_size,
        entries.len(),
        leaves
    );
}

/// `Size` and `Items` cells: a leaf has no items, a container no size.
fn size_columns(object: &Object) -> (String, String) {
    match object.body() {
        ObjectBody::Payload(payload) => (payload.len().to_string(), "-".to_string()),
        ObjectBody::Children(children) => ("-".to_string(), children.len().to_string()),
    }
}
