//! Option list construction and caching.
//!
//! The base list is built lazily on first read and memoized in a [`ListCache`].
//! The cache holds a `OnceCell` behind a lock-protected `Arc`, so concurrent
//! first reads compute the list exactly once; replacing the list swaps in a
//! fresh, already-filled cell without disturbing readers that hold the old one.

use crate::enum_map::EnumMap;
use crate::item::FilterListItem;
use crate::options::{WalkAction, WalkHook};
use once_cell::sync::OnceCell;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, trace};

type Slot = Arc<OnceCell<Arc<Vec<FilterListItem>>>>;

/// Memoized, replaceable base list.
#[derive(Debug, Default)]
pub struct ListCache {
    slot: RwLock<Slot>,
}

impl ListCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached list, computing it with `compute` if this is the
    /// first read since construction or the last [`invalidate`](Self::invalidate).
    pub fn get_or_compute<F>(&self, compute: F) -> Arc<Vec<FilterListItem>>
    where
        F: FnOnce() -> Vec<FilterListItem>,
    {
        let cell = self.current();
        if let Some(list) = cell.get() {
            trace!(len = list.len(), "list cache hit");
            return Arc::clone(list);
        }
        Arc::clone(cell.get_or_init(|| Arc::new(compute())))
    }

    /// Replaces the cached list outright.
    pub fn replace(&self, list: Vec<FilterListItem>) {
        let cell = OnceCell::with_value(Arc::new(list));
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(cell);
    }

    /// Drops the cached list so the next read recomputes it.
    pub fn invalidate(&self) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Slot::default();
    }

    pub fn is_computed(&self) -> bool {
        self.current().get().is_some()
    }

    fn current(&self) -> Slot {
        Arc::clone(&self.slot.read().unwrap_or_else(PoisonError::into_inner))
    }
}

/// Builds the base option list for `map`.
///
/// Keys are walked in insertion order (reversed when `reverse` is set). Each
/// item goes through `on_walk` if present, which may keep, drop, or replace
/// it. If any surviving item has a numeric `order`, the list is stable-sorted
/// ascending by it, with a missing `order` counting as zero.
pub(crate) fn build_list(
    map: &EnumMap,
    reverse: bool,
    on_walk: Option<&WalkHook>,
) -> Vec<FilterListItem> {
    let keys: Vec<&String> = if reverse {
        map.keys().rev().collect()
    } else {
        map.keys().collect()
    };

    let mut dropped = 0usize;
    let mut items = Vec::with_capacity(keys.len());
    for (index, key) in keys.into_iter().enumerate() {
        let Some(entry) = map.entry(key) else {
            continue;
        };
        let item = FilterListItem::from_entry(key, entry);
        let item = match on_walk {
            Some(hook) => match hook(&item, index) {
                WalkAction::Keep => item,
                WalkAction::Replace(replacement) => replacement,
                WalkAction::Drop => {
                    dropped += 1;
                    continue;
                }
            },
            None => item,
        };
        items.push(item);
    }

    let sorted = sort_by_order(&mut items);
    debug!(
        len = items.len(),
        dropped, reverse, sorted, "built filter list"
    );
    items
}

/// Stable-sorts by the numeric `order` field when at least one item has one.
/// Returns whether a sort happened.
fn sort_by_order(items: &mut [FilterListItem]) -> bool {
    if !items.iter().any(|item| item.order().is_some()) {
        return false;
    }
    items.sort_by(|a, b| {
        let a = a.order().unwrap_or(0.0);
        let b = b.order().unwrap_or(0.0);
        a.total_cmp(&b)
    });
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn values(items: &[FilterListItem]) -> Vec<&str> {
        items.iter().map(|item| item.value.as_str()).collect()
    }

    fn fruit() -> EnumMap {
        EnumMap::new()
            .with("A", "Apple")
            .with("B", json!({"label": "Banana", "order": 2}))
            .with("C", json!({"label": "Cherry", "order": 1}))
    }

    #[test]
    fn plain_labels_keep_insertion_order() {
        let map = EnumMap::new().with("X", "Ex").with("A", "Ay").with("M", "Em");
        let items = build_list(&map, false, None);
        assert_eq!(values(&items), vec!["X", "A", "M"]);
        assert_eq!(items[1].label, "Ay");
    }

    #[test]
    fn reverse_walks_backwards() {
        let map = EnumMap::new().with("X", "Ex").with("A", "Ay").with("M", "Em");
        let items = build_list(&map, true, None);
        assert_eq!(values(&items), vec!["M", "A", "X"]);
    }

    #[test]
    fn any_numeric_order_sorts_with_missing_as_zero() {
        let items = build_list(&fruit(), false, None);
        assert_eq!(values(&items), vec!["A", "C", "B"]);
        assert_eq!(items[1].order(), Some(1.0));
    }

    #[test]
    fn sort_is_stable_for_ties() {
        let map = EnumMap::new()
            .with("P", json!({"label": "P", "order": 1}))
            .with("Q", "Q")
            .with("R", json!({"label": "R", "order": 1}))
            .with("S", "S");
        let items = build_list(&map, false, None);
        assert_eq!(values(&items), vec!["Q", "S", "P", "R"]);
    }

    #[test]
    fn reverse_applies_before_order_sort() {
        let map = EnumMap::new()
            .with("A", json!({"label": "A", "order": 1}))
            .with("B", json!({"label": "B", "order": 1}))
            .with("C", json!({"label": "C", "order": 0}));
        let items = build_list(&map, true, None);
        assert_eq!(values(&items), vec!["C", "B", "A"]);
    }

    #[test]
    fn negative_and_fractional_orders() {
        let map = EnumMap::new()
            .with("A", json!({"label": "A", "order": 0.5}))
            .with("B", json!({"label": "B", "order": -3}))
            .with("C", "C");
        let items = build_list(&map, false, None);
        assert_eq!(values(&items), vec!["B", "C", "A"]);
    }

    #[test]
    fn walk_hook_drops_replaces_and_keeps() {
        let hook: WalkHook = Box::new(|item, index| match item.value.as_str() {
            "A" => WalkAction::Drop,
            "B" => WalkAction::Replace(
                FilterListItem::new("B", "Big Banana").with("index", index),
            ),
            _ => WalkAction::Keep,
        });
        let items = build_list(&fruit(), false, Some(&hook));
        assert_eq!(values(&items), vec!["B", "C"]);
        assert_eq!(items[0].label, "Big Banana");
        assert_eq!(items[0].get("index"), Some(&json!(1)));
        assert_eq!(items[0].order(), None);
    }

    #[test]
    fn walk_hook_sees_reversed_indexes() {
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let hook: WalkHook = Box::new(move |item, index| {
            sink.lock().unwrap().push((item.value.clone(), index));
            WalkAction::Keep
        });
        build_list(&fruit(), true, Some(&hook));
        assert_eq!(
            *seen.lock().unwrap(),
            vec![("C".to_string(), 0), ("B".to_string(), 1), ("A".to_string(), 2)]
        );
    }

    #[test]
    fn empty_map_builds_empty_list() {
        assert!(build_list(&EnumMap::new(), false, None).is_empty());
    }

    #[test]
    fn cache_computes_once() {
        let cache = ListCache::new();
        let calls = AtomicUsize::new(0);
        for _ in 0..3 {
            let list = cache.get_or_compute(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                vec![FilterListItem::new("A", "Apple")]
            });
            assert_eq!(list.len(), 1);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(cache.is_computed());
    }

    #[test]
    fn cache_replace_and_invalidate() {
        let cache = ListCache::new();
        assert!(!cache.is_computed());

        cache.replace(vec![FilterListItem::new("Z", "Zed")]);
        let list = cache.get_or_compute(|| panic!("replaced list must not recompute"));
        assert_eq!(values(&list), vec!["Z"]);

        cache.invalidate();
        assert!(!cache.is_computed());
        let list = cache.get_or_compute(|| vec![FilterListItem::new("A", "Apple")]);
        assert_eq!(values(&list), vec!["A"]);
    }

    #[test]
    fn concurrent_first_reads_compute_once() {
        let cache = Arc::new(ListCache::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let calls = Arc::clone(&calls);
                std::thread::spawn(move || {
                    cache
                        .get_or_compute(|| {
                            calls.fetch_add(1, Ordering::SeqCst);
                            std::thread::sleep(std::time::Duration::from_millis(5));
                            vec![FilterListItem::new("A", "Apple")]
                        })
                        .len()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 1);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
