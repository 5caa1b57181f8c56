//! Partition value extraction from object keys.
//!
//! The catalog crawler derives table partitions from `key=value` path
//! segments, so delivered keys have to stay Hive-style.

use std::collections::HashMap;

/// Extracts the values of configured partition columns from object keys.
///
/// # Examples
///
/// ```
/// use telemetry_core::PartitionExtractor;
///
/// let extractor = PartitionExtractor::new(vec!["year".into(), "day".into()]);
/// let values = extractor.extract("data/year=2026/month=01/day=28/batch-1.gz");
/// assert_eq!(values.get("year"), Some(&"2026".to_string()));
/// assert_eq!(values.get("day"), Some(&"28".to_string()));
/// assert_eq!(values.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct PartitionExtractor {
    columns: Vec<String>,
}

impl PartitionExtractor {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    pub fn extract(&self, path: &str) -> HashMap<String, String> {
        self.columns
            .iter()
            .filter_map(|key| extract_value(path, key).map(|value| (key.clone(), value)))
            .collect()
    }

    /// True when every configured column has a non-empty value in `path`.
    pub fn covers(&self, path: &str) -> bool {
        let values = self.extract(path);
        self.columns
            .iter()
            .all(|col| values.get(col).is_some_and(|v| !v.is_empty()))
    }
}

/// Value of the first `key=` segment, up to the next `/`.
fn extract_value(path: &str, key: &str) -> Option<String> {
    path.split('/')
        .find_map(|segment| segment.strip_prefix(key)?.strip_prefix('='))
        .map(str::to_string)
}
