//! Construction options for [`create_filter`](crate::create_filter).
//!
//! Every option is independently optional; `FilterOptions::default()` yields
//! the default lookup, no extensions and an unmodified list.

use crate::extension::External;
use crate::item::FilterListItem;
use std::fmt;

/// Replacement lookup: `(value, default_label) -> label`.
pub type LookupFn = Box<dyn Fn(&str, &str) -> String + Send + Sync>;

/// Per-item hook run while building the base list: `(item, index) -> action`.
pub type WalkHook = Box<dyn Fn(&FilterListItem, usize) -> WalkAction + Send + Sync>;

/// Read-time transform applied to the base list on every read.
pub type GetListHook = Box<dyn Fn(Vec<FilterListItem>) -> Vec<FilterListItem> + Send + Sync>;

/// Notification fired when the list is reassigned.
pub type SetListHook = Box<dyn Fn(&[FilterListItem]) + Send + Sync>;

/// What the walk hook decided for an item.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum WalkAction {
    /// Keep the computed item unchanged.
    #[default]
    Keep,
    /// Remove the item from the list.
    Drop,
    /// Use this item instead.
    Replace(FilterListItem),
}

impl From<Option<FilterListItem>> for WalkAction {
    fn from(item: Option<FilterListItem>) -> Self {
        item.map_or(WalkAction::Keep, WalkAction::Replace)
    }
}

impl From<bool> for WalkAction {
    /// `false` drops, `true` keeps.
    fn from(keep: bool) -> Self {
        if keep {
            WalkAction::Keep
        } else {
            WalkAction::Drop
        }
    }
}

#[derive(Default)]
pub struct FilterOptions {
    /// Replaces the default lookup entirely.
    pub filter: Option<LookupFn>,
    /// Extra members merged onto the filter.
    pub external: Option<External>,
    pub on_walk_list_item: Option<WalkHook>,
    pub on_get_list: Option<GetListHook>,
    pub on_set_list: Option<SetListHook>,
    /// Walk the map keys in reverse insertion order.
    pub reverse_list: bool,
}

impl fmt::Debug for FilterOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterOptions")
            .field("filter", &self.filter.is_some())
            .field("external", &self.external)
            .field("on_walk_list_item", &self.on_walk_list_item.is_some())
            .field("on_get_list", &self.on_get_list.is_some())
            .field("on_set_list", &self.on_set_list.is_some())
            .field("reverse_list", &self.reverse_list)
            .finish()
    }
}
