//! Local removal of hits from the accumulated set.

use crate::domain::Item;

/// Returns `hits` without any item whose `object_id` equals `object_id`.
///
/// Relative order of the remaining items is preserved. Dismissing an unknown
/// identifier returns the sequence unchanged; duplicates of the identifier
/// are all removed.
#[must_use]
pub fn dismiss(hits: &[Item], object_id: &str) -> Vec<Item> {
    hits.iter()
        .filter(|item| item.object_id != object_id)
        .cloned()
        .collect()
}
