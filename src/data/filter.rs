use std::collections::{BTreeMap, HashMap};

use super::model::{ExifDataset, TagValue};
use crate::config::{Field, TOP_N};

// ---------------------------------------------------------------------------
// Mapping filter
// ---------------------------------------------------------------------------

/// Copy of `map` holding only the pairs `predicate` accepts.
pub fn filter_tags<K, V, F>(map: &BTreeMap<K, V>, mut predicate: F) -> BTreeMap<K, V>
where
    K: Ord + Clone,
    V: Clone,
    F: FnMut(&K, &V) -> bool,
{
    map.iter()
        .filter(|(k, v)| predicate(k, v))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

// ---------------------------------------------------------------------------
// Top-value selection
// ---------------------------------------------------------------------------

/// Distinct values of `field` ranked by frequency, most frequent first.
///
/// Missing cells are not counted. Equal counts keep first-appearance order.
pub fn value_counts(dataset: &ExifDataset, field: Field) -> Vec<(TagValue, usize)> {
    let mut counts: Vec<(TagValue, usize)> = Vec::new();
    let mut slot: HashMap<&TagValue, usize> = HashMap::new();

    for value in dataset.column(field).flatten() {
        match slot.get(value) {
            Some(&i) => counts[i].1 += 1,
            None => {
                slot.insert(value, counts.len());
                counts.push((value.clone(), 1));
            }
        }
    }

    // stable: ties stay in first-appearance order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Indices of the rows whose `field` value is among the `TOP_N` most
/// frequent ones, in original row order.
///
/// Rows missing the field are never selected.
pub fn top_value_indices(dataset: &ExifDataset, field: Field) -> Vec<usize> {
    let top: Vec<TagValue> = value_counts(dataset, field)
        .into_iter()
        .take(TOP_N)
        .map(|(value, _)| value)
        .collect();

    dataset
        .column(field)
        .enumerate()
        .filter(|(_, value)| value.is_some_and(|v| top.contains(v)))
        .map(|(i, _)| i)
        .collect()
}
