//! The filter: label lookup, option list, constants and extensions.
//!
//! A [`Filter`] is built once by [`create_filter`] and shared afterwards. Its
//! only interior mutability is the memoized base list (see [`ListCache`]) plus
//! whatever state extension closures carry.
//!
//! There are two ways to reach a filter's members:
//!
//! - **Typed accessors** ([`Filter::label`], [`Filter::list`], [`Filter::map`],
//!   [`Filter::constant`], ...) always address the built-in behavior.
//! - **The dynamic member surface** ([`Filter::property`], [`Filter::invoke`],
//!   [`Filter::set_property`]) resolves names the way collaborators see them:
//!   extension members first, then built-ins, then constants.

use crate::descriptor::{display_text, is_falsy, Entry};
use crate::enum_map::{EnumMap, ValueMap};
use crate::error::{FilterError, Result};
use crate::extension::{Extensions, Member};
use crate::item::FilterListItem;
use crate::list::{build_list, ListCache};
use crate::options::{FilterOptions, GetListHook, LookupFn, SetListHook, WalkHook};
use serde_json::{Map, Value};
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Built-in member names on the dynamic surface.
pub const MEMBER_MAP: &str = "map";
pub const MEMBER_VALUE_MAP: &str = "valueMap";
pub const MEMBER_LIST: &str = "list";
pub const MEMBER_CREATE_LIST: &str = "createList";
pub const MEMBER_LABEL: &str = "label";

const BUILTIN_MEMBERS: [&str; 5] = [
    MEMBER_MAP,
    MEMBER_VALUE_MAP,
    MEMBER_LIST,
    MEMBER_CREATE_LIST,
    MEMBER_LABEL,
];

/// Implementation-private marker backing [`is_filter`] and
/// [`is_default_filter`]. Not part of the public contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FilterTag {
    default_lookup: bool,
}

pub struct Filter {
    map: EnumMap,
    value_map: ValueMap,
    constants: Map<String, Value>,
    lookup: Option<LookupFn>,
    on_walk_list_item: Option<WalkHook>,
    on_get_list: Option<GetListHook>,
    on_set_list: Option<SetListHook>,
    reverse_list: bool,
    list: ListCache,
    extensions: Extensions,
    tag: FilterTag,
}

/// Builds a filter from an enum map, an optional alias map and options.
///
/// When `value_map` is `None`, every key aliases to itself. Construction never
/// fails; the list is not built until first read.
pub fn create_filter(map: EnumMap, value_map: Option<ValueMap>, options: FilterOptions) -> Filter {
    let FilterOptions {
        filter: lookup,
        external,
        on_walk_list_item,
        on_get_list,
        on_set_list,
        reverse_list,
    } = options;

    let value_map = value_map.unwrap_or_else(|| ValueMap::identity(&map));
    let constants = install_constants(&map, &value_map);
    let tag = FilterTag {
        default_lookup: lookup.is_none(),
    };

    let mut filter = Filter {
        map,
        value_map,
        constants,
        lookup,
        on_walk_list_item,
        on_get_list,
        on_set_list,
        reverse_list,
        list: ListCache::new(),
        extensions: Extensions::new(),
        tag,
    };

    if let Some(external) = external {
        let extensions = external.resolve(&filter);
        for name in extensions.names() {
            if filter.is_builtin(name) {
                debug!(member = name, "extension shadows built-in filter member");
            }
        }
        filter.extensions = extensions;
    }

    debug!(
        keys = filter.map.len(),
        constants = filter.constants.len(),
        extensions = filter.extensions.len(),
        default_lookup = filter.tag.default_lookup,
        "created filter"
    );
    filter
}

/// One constant per enum key (its alias, or the key itself), plus any alias
/// map key that is not an enum key. Empty keys are skipped.
fn install_constants(map: &EnumMap, value_map: &ValueMap) -> Map<String, Value> {
    let mut constants = Map::new();
    for key in map.keys().filter(|key| !key.is_empty()) {
        let alias = value_map
            .alias(key)
            .cloned()
            .unwrap_or_else(|| Value::String(key.clone()));
        constants.insert(key.clone(), alias);
    }
    for (key, alias) in value_map.iter() {
        if !key.is_empty() && !constants.contains_key(key) {
            constants.insert(key.clone(), alias.clone());
        }
    }
    constants
}

impl Filter {
    /// The display label for `value`, or `""` when there is none.
    pub fn label(&self, value: &str) -> String {
        self.label_or(value, "")
    }

    /// The display label for `value`, or `default_label` when there is none.
    ///
    /// A lookup override, if one was supplied, decides entirely.
    pub fn label_or(&self, value: &str, default_label: &str) -> String {
        match &self.lookup {
            Some(lookup) => lookup(value, default_label),
            None => self.default_label(value, default_label),
        }
    }

    fn default_label(&self, value: &str, default_label: &str) -> String {
        self.map
            .get(value)
            .filter(|entry| !is_falsy(entry))
            .and_then(|entry| Entry::classify(entry).label_text())
            .unwrap_or_else(|| default_label.to_string())
    }

    pub fn map(&self) -> &EnumMap {
        &self.map
    }

    /// The alias map, identity-filled when none was supplied.
    pub fn value_map(&self) -> &ValueMap {
        &self.value_map
    }

    /// The cached base list, without the read-time transform.
    pub fn base_list(&self) -> Arc<Vec<FilterListItem>> {
        self.list.get_or_compute(|| {
            build_list(
                &self.map,
                self.reverse_list,
                self.on_walk_list_item.as_ref(),
            )
        })
    }

    /// The option list as collaborators see it.
    ///
    /// The base list is computed once; the `on_get_list` transform, if any,
    /// runs on every call.
    pub fn list(&self) -> Vec<FilterListItem> {
        let base = self.base_list();
        match &self.on_get_list {
            Some(transform) => transform(base.as_ref().clone()),
            None => base.as_ref().clone(),
        }
    }

    /// Replaces the base list and notifies `on_set_list` once.
    pub fn set_list(&self, list: Vec<FilterListItem>) {
        if let Some(on_set) = &self.on_set_list {
            on_set(&list);
        }
        debug!(len = list.len(), "filter list reassigned");
        self.list.replace(list);
    }

    /// Forgets the base list so the next read rebuilds it from the map.
    pub fn reset_list(&self) {
        self.list.invalidate();
    }

    /// Items of [`list`](Self::list) whose value is in `values`, in list order.
    /// With `None`, a copy of the whole list.
    pub fn create_list(&self, values: Option<&[&str]>) -> Vec<FilterListItem> {
        let list = self.list();
        match values {
            Some(values) => list
                .into_iter()
                .filter(|item| values.contains(&item.value.as_str()))
                .collect(),
            None => list,
        }
    }

    /// The constant installed for `key`.
    pub fn constant(&self, key: &str) -> Option<&Value> {
        self.constants.get(key)
    }

    pub fn constants(&self) -> serde_json::map::Iter<'_> {
        self.constants.iter()
    }

    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    /// True when no lookup override was supplied.
    pub fn is_default(&self) -> bool {
        self.tag.default_lookup
    }

    /// Reads a member by name: extension values and getters first, then
    /// constants, then the built-in `map`, `valueMap` and `list`.
    ///
    /// Methods are not readable as properties; use [`invoke`](Self::invoke).
    pub fn property(&self, name: &str) -> Option<Value> {
        if let Some(member) = self.extensions.get(name) {
            return match member {
                Member::Value(value) => Some(value.clone()),
                Member::Accessor { get: Some(get), .. } => Some(get(self)),
                Member::Accessor { get: None, .. } | Member::Method(_) => None,
            };
        }
        if let Some(constant) = self.constants.get(name) {
            return Some(constant.clone());
        }
        match name {
            MEMBER_MAP => Some(self.map.to_value()),
            MEMBER_VALUE_MAP => Some(self.value_map.to_value()),
            MEMBER_LIST => Some(items_to_value(&self.list())),
            _ => None,
        }
    }

    /// Calls a method by name: extension methods first, then the built-in
    /// `createList([values])` and `label(value, [default])`. A constant with
    /// the same name shadows the built-in and is not callable.
    pub fn invoke(&self, name: &str, args: &[Value]) -> Option<Value> {
        if let Some(member) = self.extensions.get(name) {
            return match member {
                Member::Method(method) => Some(method(self, args)),
                _ => None,
            };
        }
        if self.constants.contains_key(name) {
            return None;
        }
        match name {
            MEMBER_CREATE_LIST => {
                let items = match args.first() {
                    Some(Value::Array(values)) => {
                        let values: Vec<String> = values.iter().map(display_text).collect();
                        let values: Vec<&str> = values.iter().map(String::as_str).collect();
                        self.create_list(Some(values.as_slice()))
                    }
                    _ => self.create_list(None),
                };
                Some(items_to_value(&items))
            }
            MEMBER_LABEL => {
                let value = args.first().map(display_text).unwrap_or_default();
                let default = args.get(1).map(display_text).unwrap_or_default();
                Some(Value::String(self.label_or(&value, &default)))
            }
            _ => None,
        }
    }

    /// Writes a member by name.
    ///
    /// Extension accessors with a setter receive the value; `list`, unless an
    /// extension or constant shadows it, accepts a JSON array of items and reassigns the list. Every
    /// other member is read-only.
    pub fn set_property(&self, name: &str, value: Value) -> Result<()> {
        if let Some(member) = self.extensions.get(name) {
            return match member {
                Member::Accessor { set: Some(set), .. } => {
                    set(self, value);
                    Ok(())
                }
                _ => Err(FilterError::ReadOnly(name.to_string())),
            };
        }
        if name == MEMBER_LIST && !self.constants.contains_key(name) {
            let list: Vec<FilterListItem> =
                serde_json::from_value(value).map_err(FilterError::InvalidList)?;
            self.set_list(list);
            return Ok(());
        }
        Err(FilterError::ReadOnly(name.to_string()))
    }

    pub fn has_member(&self, name: &str) -> bool {
        self.is_builtin(name) || self.extensions.contains(name)
    }

    /// Built-ins, then constants, then extensions; each name once.
    pub fn member_names(&self) -> Vec<String> {
        let mut names: Vec<String> = BUILTIN_MEMBERS.iter().map(|name| name.to_string()).collect();
        let rest = self
            .constants
            .keys()
            .map(String::as_str)
            .chain(self.extensions.names());
        for name in rest {
            if !names.iter().any(|existing| existing == name) {
                names.push(name.to_string());
            }
        }
        names
    }

    fn is_builtin(&self, name: &str) -> bool {
        BUILTIN_MEMBERS.contains(&name) || self.constants.contains_key(name)
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("map", &self.map)
            .field("value_map", &self.value_map)
            .field("constants", &self.constants)
            .field("reverse_list", &self.reverse_list)
            .field("list_computed", &self.list.is_computed())
            .field("extensions", &self.extensions)
            .field("default_lookup", &self.tag.default_lookup)
            .finish()
    }
}

fn items_to_value(items: &[FilterListItem]) -> Value {
    Value::Array(items.iter().map(FilterListItem::to_value).collect())
}

fn as_filter(value: &dyn Any) -> Option<&Filter> {
    value
        .downcast_ref::<Filter>()
        .or_else(|| value.downcast_ref::<Arc<Filter>>().map(Arc::as_ref))
        .or_else(|| value.downcast_ref::<Box<Filter>>().map(Box::as_ref))
}

/// True if `value` is a [`Filter`] (bare, boxed, or in an `Arc`).
pub fn is_filter(value: &dyn Any) -> bool {
    as_filter(value).is_some()
}

/// True if `value` is a filter built without a lookup override.
pub fn is_default_filter(value: &dyn Any) -> bool {
    as_filter(value).is_some_and(Filter::is_default)
}
