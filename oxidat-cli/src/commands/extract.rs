//! Extract command implementation.
//!
//! Leaf objects are written under the output directory:
//!
//! - true-color `BMP ` objects as `images/<path>.bmp`
//! - everything else as `raw/<path>.<TYPE>.bin`
//!
//! A `manifest.json` listing every written asset goes next to them.

use crate::export::RgbImage;
use crate::utils::{create_progress_bar, matches_filters, named_objects, resolve_encoding};
use oxidat_core::FourCc;
use oxidat_datafile::{load, tags};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Manifest format version.
const MANIFEST_VERSION: u32 = 1;

/// One written asset.
#[derive(Debug, Serialize)]
struct AssetJson {
    id: String,
    #[serde(rename = "type")]
    asset_type: &'static str,
    kind: String,
    path: String,
    size: usize,
}

/// Contents of `manifest.json`.
#[derive(Debug, Serialize)]
struct ManifestJson {
    version: u32,
    root: String,
    source: String,
    assets: Vec<AssetJson>,
}

/// Options for extracting datafile contents.
pub struct ExtractOptions<'a> {
    pub output: &'a Path,
    pub encoding: &'a str,
    pub include: &'a [String],
    pub exclude: &'a [String],
    pub verbose: bool,
    pub progress: bool,
}

pub fn cmd_extract(
    file: &Path,
    options: &ExtractOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let encoding = resolve_encoding(options.encoding)?;
    let dat = load(&fs::read(file)?)?;
    let output = options.output;

    println!("Extracting {} to {}", file.display(), output.display());
    fs::create_dir_all(output)?;

    let to_extract: Vec<_> = named_objects(&dat, encoding)
        .into_iter()
        .filter(|n| !n.object.is_container())
        .filter(|n| matches_filters(&n.path, options.include, options.exclude))
        .collect();

    let pb = create_progress_bar(to_extract.len() as u64, options.progress);
    pb.set_message("objects");

    let mut assets = Vec::with_capacity(to_extract.len());
    for named in &to_extract {
        let object = named.object;
        let payload = object.payload().unwrap_or_default();

        let image = (object.kind() == tags::BITMAP)
            .then(|| RgbImage::from_allegro(payload))
            .flatten();
        let (asset_type, relative, bytes) = match image {
            Some(image) => (
                "image",
                PathBuf::from("images").join(format!("{}.bmp", named.path)),
                image.to_bmp(),
            ),
            None => (
                "raw",
                PathBuf::from("raw").join(format!(
                    "{}.{}.bin",
                    named.path,
                    type_suffix(object.kind())
                )),
                payload.to_vec(),
            ),
        };

        let target = output.join(&relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, &bytes)?;

        if options.verbose {
            pb.println(format!("  Extracted: {} ({} bytes)", named.path, bytes.len()));
        }
        assets.push(AssetJson {
            id: named.path.clone(),
            asset_type,
            kind: object.kind().to_display_string(),
            path: generic_path(&relative),
            size: bytes.len(),
        });
        pb.inc(1);
    }
    pb.finish_with_message("Done");

    let manifest = ManifestJson {
        version: MANIFEST_VERSION,
        root: generic_path(output),
        source: file.display().to_string(),
        assets,
    };
    fs::write(
        output.join("manifest.json"),
        serde_json::to_string_pretty(&manifest)?,
    )?;

    println!(
        "Extracted {} assets into {}",
        manifest.assets.len(),
        output.display()
    );
    Ok(())
}

/// File name suffix for an object type, e.g. `BMP` for `"BMP "`.
fn type_suffix(kind: FourCc) -> String {
    let text = kind.to_display_string();
    let trimmed = text.trim_end();
    if trimmed.is_empty() {
        format!("{:08X}", kind.to_u32())
    } else {
        trimmed.replace(['/', '\\', '.'], "_")
    }
}

/// Path with `/` separators on every platform.
fn generic_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
