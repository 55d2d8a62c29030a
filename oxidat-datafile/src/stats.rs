//! Tree statistics.

use crate::model::Datafile;
use oxidat_core::FourCc;
use std::collections::BTreeMap;

/// Summary counts over a parsed datafile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatafileStats {
    /// Number of root objects.
    pub roots: usize,
    /// Total objects, containers included.
    pub objects: usize,
    /// Number of `FILE` containers.
    pub containers: usize,
    /// Total property records.
    pub properties: usize,
    /// Deepest object depth; roots are at depth 0.
    pub max_depth: usize,
    /// Sum of leaf payload lengths after decompression.
    pub payload_bytes: u64,
    /// Leaf object count per type tag.
    pub by_kind: BTreeMap<FourCc, usize>,
}

impl DatafileStats {
    /// Walk the tree once and tally it.
    pub fn collect(datafile: &Datafile) -> Self {
        let mut stats = Self {
            roots: datafile.len(),
            ..Self::default()
        };

        for (depth, object) in datafile.iter_depth_first() {
            stats.objects += 1;
            stats.properties += object.properties().len();
            stats.max_depth = stats.max_depth.max(depth);
            match object.payload() {
                Some(payload) => {
                    stats.payload_bytes += payload.len() as u64;
                    *stats.by_kind.entry(object.kind()).or_default() += 1;
                }
                None => stats.containers += 1,
            }
        }
        stats
    }

    /// Number of leaf objects.
    pub fn leaves(&self) -> usize {
        self.objects - self.containers
    }
}
