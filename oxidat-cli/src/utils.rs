//! Utility functions for the CLI.

use encoding_rs::Encoding;
use glob::Pattern;
use indicatif::{ProgressBar, ProgressStyle};
use log::{LevelFilter, Log, Metadata, Record};
use oxidat_datafile::{Datafile, Object, tags};
use std::collections::HashSet;

/// Create a progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    let style = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░ ");
    pb.set_style(style);
    pb
}

/// Check if an object path matches the filter patterns.
/// - If include patterns are specified, the path must match at least one
/// - If exclude patterns are specified, the path must not match any
pub fn matches_filters(path: &str, include: &[String], exclude: &[String]) -> bool {
    let matches = |pattern: &String| Pattern::new(pattern).is_ok_and(|p| p.matches(path));

    if exclude.iter().any(matches) {
        return false;
    }
    include.is_empty() || include.iter().any(matches)
}

/// Resolve an `--encoding` label such as `windows-1251`.
pub fn resolve_encoding(label: &str) -> Result<&'static Encoding, Box<dyn std::error::Error>> {
    Encoding::for_label(label.as_bytes())
        .ok_or_else(|| format!("unknown text encoding: {}", label).into())
}

/// Turn an object name into a single safe path component.
///
/// Separators, control characters and characters Windows rejects become
/// `_`; names that are empty or consist only of dots are rejected.
pub fn sanitize_component(name: &str) -> Option<String> {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        None
    } else {
        Some(cleaned)
    }
}

/// An object with its `/`-separated path in the tree.
pub struct NamedObject<'a> {
    /// Path built from sanitized names, unique among siblings.
    pub path: String,
    /// Nesting depth; roots are 0.
    pub depth: usize,
    /// The object itself.
    pub object: &'a Object,
}

/// Flatten the tree depth-first, naming every object.
///
/// Objects without a usable `NAME` become `obj_<index>`. A name already used
/// by an earlier sibling gets a `_<index>` suffix.
pub fn named_objects<'a>(dat: &'a Datafile, encoding: &'static Encoding) -> Vec<NamedObject<'a>> {
    let mut out = Vec::new();
    collect_named(dat.objects(), "", 0, encoding, &mut out);
    out
}

fn collect_named<'a>(
    objects: &'a [Object],
    prefix: &str,
    depth: usize,
    encoding: &'static Encoding,
    out: &mut Vec<NamedObject<'a>>,
) {
    let mut seen = HashSet::new();
    for (index, object) in objects.iter().enumerate() {
        let base = object
            .property(tags::NAME)
            .and_then(|p| sanitize_component(&p.decode(encoding)))
            .unwrap_or_else(|| format!("obj_{}", index));
        let mut name = base.clone();
        let mut suffix = index;
        while !seen.insert(name.to_lowercase()) {
            name = format!("{}_{}", base, suffix);
            suffix += 1;
        }

        let path = if prefix.is_empty() {
            name
        } else {
            format!("{}/{}", prefix, name)
        };

        out.push(NamedObject {
            path: path.clone(),
            depth,
            object,
        });
        if let Some(children) = object.children() {
            collect_named(children, &path, depth + 1, encoding, out);
        }
    }
}

/// Minimal `log` backend writing to stderr.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Route library log records to stderr when `verbose` is set.
pub fn init_logging(verbose: bool) {
    if !verbose {
        return;
    }
    // A second call keeps the first logger.
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}
