//! Derivation of the visible list from accumulated hits.
//!
//! The visible list is never stored. It is recomputed from the current hits,
//! sort key and filter term whenever it is needed: sort the whole set first,
//! then filter the sorted sequence.

use super::modes::SortKey;
use crate::domain::Item;
use std::cmp::Ordering;

/// Returns the hits to display, in display order.
///
/// Sorting is stable, so items with equal keys keep their accumulated order.
///
/// # Example
///
/// ```
/// use hnpane::app::{derive, SortKey};
/// use hnpane::domain::Item;
///
/// let hits = vec![Item::new("1", Some("Tampa Bay")), Item::new("2", None)];
/// let visible = derive(&hits, SortKey::None, "");
/// assert_eq!(visible.len(), 1);
/// ```
#[must_use]
pub fn derive<'a>(hits: &'a [Item], sort_key: SortKey, filter_term: &str) -> Vec<&'a Item> {
    let mut ordered: Vec<&Item> = hits.iter().collect();
    sort_items(&mut ordered, sort_key);

    let needle = filter_term.to_lowercase();
    ordered
        .into_iter()
        .filter(|item| matches_filter(item, &needle))
        .collect()
}

/// Stable in-place sort by the given key.
pub fn sort_items(items: &mut [&Item], sort_key: SortKey) {
    let compare: fn(&&Item, &&Item) -> Ordering = match sort_key {
        SortKey::None => return,
        SortKey::Title => |a, b| a.title.cmp(&b.title),
        SortKey::Author => |a, b| a.author.cmp(&b.author),
        SortKey::Comments => |a, b| b.num_comments.cmp(&a.num_comments),
        SortKey::Points => |a, b| b.points.cmp(&a.points),
    };
    items.sort_by(compare);
}

/// Filter predicate. `needle` must already be lowercased.
///
/// Items without a title or with an empty one never match, not even the
/// empty needle.
#[must_use]
pub fn matches_filter(item: &Item, needle: &str) -> bool {
    item.title
        .as_deref()
        .is_some_and(|title| !title.is_empty() && title.to_lowercase().contains(needle))
}

/// Character ranges of `title` matching `filter_term`, for highlighting.
///
/// Ranges are `(start, end)` character indices with exclusive end. Titles
/// whose lowercase form changes length are not highlighted.
#[must_use]
pub fn match_ranges(title: &str, filter_term: &str) -> Vec<(usize, usize)> {
    if filter_term.is_empty() {
        return vec![];
    }

    let lower_title = title.to_lowercase();
    if lower_title.chars().count() != title.chars().count() {
        return vec![];
    }

    let needle = filter_term.to_lowercase();
    let needle_len = needle.chars().count();

    lower_title
        .match_indices(&needle)
        .map(|(byte_idx, _)| {
            let start = lower_title[..byte_idx].chars().count();
            (start, start + needle_len)
        })
        .collect()
}
