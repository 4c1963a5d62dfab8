//! Fluent construction over [`create_filter`].
//!
//! ```rust
//! use enum_filter::{EnumMap, Extensions, FilterBuilder, ValueMap};
//! use serde_json::json;
//!
//! let status = FilterBuilder::new(
//!     EnumMap::new().with("ACTIVE", "Active").with("INACTIVE", "Inactive"),
//! )
//! .with_value_alias(ValueMap::new().with("ACTIVE", 1).with("INACTIVE", 0))
//! .with_external(Extensions::new().value("name", "status"))
//! .build();
//!
//! assert_eq!(status.label("ACTIVE"), "Active");
//! assert_eq!(status.constant("ACTIVE"), Some(&json!(1)));
//! assert_eq!(status.property("name"), Some(json!("status")));
//! ```

use crate::enum_map::{EnumMap, ValueMap};
use crate::extension::{Extensions, External};
use crate::filter::{create_filter, Filter};
use crate::item::FilterListItem;
use crate::options::{FilterOptions, WalkAction};

#[derive(Debug, Default)]
pub struct FilterBuilder {
    map: EnumMap,
    value_map: Option<ValueMap>,
    options: FilterOptions,
}

impl FilterBuilder {
    pub fn new(map: EnumMap) -> Self {
        Self {
            map,
            ..Self::default()
        }
    }

    pub fn with_map(mut self, map: EnumMap) -> Self {
        self.map = map;
        self
    }

    pub fn with_value_alias(mut self, value_map: ValueMap) -> Self {
        self.value_map = Some(value_map);
        self
    }

    /// Replaces the default lookup with `(value, default_label) -> label`.
    pub fn with_filter<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str, &str) -> String + Send + Sync + 'static,
    {
        self.options.filter = Some(Box::new(lookup));
        self
    }

    /// Adds extension members. Repeated calls merge, later members winning;
    /// a factory resolves first and then merges with any earlier members.
    pub fn with_external(mut self, external: impl Into<External>) -> Self {
        self.options.external = Some(match (self.options.external.take(), external.into()) {
            (None, next) => next,
            (Some(External::Members(mut base)), External::Members(next)) => {
                base.merge(next);
                External::Members(base)
            }
            (Some(prev), next) => External::factory(move |filter| {
                let mut members = prev.resolve(filter);
                members.merge(next.resolve(filter));
                members
            }),
        });
        self
    }

    /// Adds extension members produced from the partially built filter.
    pub fn with_external_factory<F>(self, factory: F) -> Self
    where
        F: FnOnce(&Filter) -> Extensions + Send + 'static,
    {
        self.with_external(External::factory(factory))
    }

    pub fn on_walk_list_item<F>(mut self, hook: F) -> Self
    where
        F: Fn(&FilterListItem, usize) -> WalkAction + Send + Sync + 'static,
    {
        self.options.on_walk_list_item = Some(Box::new(hook));
        self
    }

    pub fn on_get_list<F>(mut self, hook: F) -> Self
    where
        F: Fn(Vec<FilterListItem>) -> Vec<FilterListItem> + Send + Sync + 'static,
    {
        self.options.on_get_list = Some(Box::new(hook));
        self
    }

    pub fn on_set_list<F>(mut self, hook: F) -> Self
    where
        F: Fn(&[FilterListItem]) + Send + Sync + 'static,
    {
        self.options.on_set_list = Some(Box::new(hook));
        self
    }

    pub fn reverse_list(mut self, reverse: bool) -> Self {
        self.options.reverse_list = reverse;
        self
    }

    pub fn build(self) -> Filter {
        create_filter(self.map, self.value_map, self.options)
    }
}

impl Filter {
    /// Starts a [`FilterBuilder`] for `map`.
    pub fn builder(map: EnumMap) -> FilterBuilder {
        FilterBuilder::new(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{is_default_filter, is_filter};
    use serde_json::{json, Value};

    fn roles() -> EnumMap {
        EnumMap::new()
            .with("ADMIN", "Administrator")
            .with("MANAGER", "Manager")
            .with("USER", "Regular User")
            .with("GUEST", "Guest User")
    }

    #[test]
    fn builds_default_filter() {
        let filter = FilterBuilder::new(roles()).build();
        assert!(is_default_filter(&filter));
        assert_eq!(filter.label("USER"), "Regular User");
        assert_eq!(filter.list().len(), 4);
    }

    #[test]
    fn with_filter_marks_non_default() {
        let filter = Filter::builder(roles())
            .with_filter(|value, default| {
                if value.is_empty() {
                    "No Role".into()
                } else {
                    default.into()
                }
            })
            .build();
        assert!(is_filter(&filter));
        assert!(!is_default_filter(&filter));
        assert_eq!(filter.label(""), "No Role");
    }

    #[test]
    fn hooks_and_reverse() {
        let filter = FilterBuilder::new(roles())
            .reverse_list(true)
            .on_walk_list_item(|item, _| (item.value != "GUEST").into())
            .on_get_list(|list| list.into_iter().take(2).collect())
            .build();
        let values: Vec<_> = filter.list().into_iter().map(|item| item.value).collect();
        assert_eq!(values, vec!["USER", "MANAGER"]);
    }

    #[test]
    fn repeated_members_merge_last_wins() {
        let filter = FilterBuilder::new(roles())
            .with_external(Extensions::new().value("a", 1).value("b", 2))
            .with_external(Extensions::new().value("b", 3))
            .build();
        assert_eq!(filter.property("a"), Some(json!(1)));
        assert_eq!(filter.property("b"), Some(json!(3)));
    }

    #[test]
    fn factory_then_members_merge() {
        let levels = json!({"ADMIN": 4, "MANAGER": 3, "USER": 2, "GUEST": 1});
        let filter = FilterBuilder::new(roles())
            .with_external_factory(move |partial| {
                let admin = partial.constant("ADMIN").cloned().unwrap_or(Value::Null);
                Extensions::new()
                    .method("isAdmin", move |_, args| {
                        Value::Bool(args.first() == Some(&admin))
                    })
                    .method("hasPermission", move |_, args| {
                        let level = |v: Option<&Value>| {
                            v.and_then(Value::as_str)
                                .and_then(|role| levels.get(role))
                                .and_then(Value::as_u64)
                                .unwrap_or(0)
                        };
                        Value::Bool(level(args.first()) >= level(args.get(1)))
                    })
            })
            .with_external(Extensions::new().value("isAdmin", "replaced"))
            .build();

        assert_eq!(filter.property("isAdmin"), Some(json!("replaced")));
        assert_eq!(
            filter.invoke("hasPermission", &[json!("MANAGER"), json!("USER")]),
            Some(json!(true))
        );
        assert_eq!(
            filter.invoke("hasPermission", &[json!("GUEST"), json!("ADMIN")]),
            Some(json!(false))
        );
    }

    #[test]
    fn on_set_list_fires_through_builder() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let sets = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&sets);
        let filter = FilterBuilder::new(roles())
            .on_set_list(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .build();
        filter.set_list(vec![FilterListItem::new("ROOT", "Root")]);
        assert_eq!(sets.load(Ordering::SeqCst), 1);
        assert_eq!(filter.list()[0].value, "ROOT");
    }

    #[test]
    fn with_map_replaces_map() {
        let filter = FilterBuilder::default()
            .with_map(EnumMap::new().with("X", "Ex"))
            .build();
        assert_eq!(filter.label("X"), "Ex");
    }
}
