//! Parser limits.

/// Bounds applied while parsing untrusted datafiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseConfig {
    /// Maximum container nesting depth. Root objects are at depth 0, the
    /// children of a root container at depth 1.
    pub max_depth: usize,
    /// Maximum number of objects in the whole tree, containers included.
    pub max_objects: usize,
}

impl ParseConfig {
    /// Limits generous enough for every shipped game datafile.
    pub const DEFAULT: Self = Self {
        max_depth: 128,
        max_objects: 1 << 20,
    };

    /// Limits for files from unknown sources.
    pub const STRICT: Self = Self {
        max_depth: 16,
        max_objects: 65_536,
    };

    /// Set the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the maximum total object count.
    pub fn with_max_objects(mut self, max_objects: usize) -> Self {
        self.max_objects = max_objects;
        self
    }
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = ParseConfig::default();
        assert_eq!(config, ParseConfig::DEFAULT);
        assert_eq!(config.max_depth, 128);
    }

    #[test]
    fn test_builder() {
        let config = ParseConfig::STRICT.with_max_depth(2).with_max_objects(10);
        assert_eq!(config.max_depth, 2);
        assert_eq!(config.max_objects, 10);
    }
}
