//! Data Processor Module
//! Category ordering and grouping helpers shared by the chart layouts.

use std::collections::{HashMap, HashSet};

/// Handles category grouping without reordering the input.
pub struct DataProcessor;

impl DataProcessor {
    /// Distinct values in order of first appearance.
    pub fn unique_in_order<'a, I>(values: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen: HashSet<&'a str> = HashSet::new();
        let mut unique = Vec::new();
        for value in values {
            if seen.insert(value) {
                unique.push(value.to_string());
            }
        }
        unique
    }

    /// Group values by key. Groups keep first-appearance order, values keep
    /// input order within each group.
    pub fn group_in_order<'a, I>(pairs: I) -> Vec<(String, Vec<f64>)>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut index: HashMap<&'a str, usize> = HashMap::new();
        let mut groups: Vec<(String, Vec<f64>)> = Vec::new();

        for (key, value) in pairs {
            let slot = *index.entry(key).or_insert_with(|| {
                groups.push((key.to_string(), Vec::new()));
                groups.len() - 1
            });
            groups[slot].1.push(value);
        }

        groups
    }
}
