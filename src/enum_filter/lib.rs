//! # enum-filter
//!
//! Enum-like label tables for select controls. Given an ordered map from enum
//! keys to labels (or richer descriptors), `enum-filter` builds a [`Filter`]:
//!
//! - a **lookup** that turns a stored value into its display label,
//! - a lazily built **option list** of `{value, label, ...extra}` items,
//! - per-key **constants**, optionally aliased to external values,
//! - caller-supplied **extensions** that can reach all of the above.
//!
//! It is a library that happens to have a CLI client, not the other way around.
//!
//! ## Quick Example
//!
//! ```rust
//! use enum_filter::{create_filter, EnumMap, FilterOptions, ValueMap};
//! use serde_json::json;
//!
//! let map = EnumMap::from_value(json!({
//!     "LOW": {"label": "Low", "order": 3, "color": "green"},
//!     "HIGH": {"label": "High", "order": 1, "color": "red"},
//!     "MEDIUM": {"label": "Medium", "order": 2}
//! }))
//! .unwrap();
//!
//! let aliases = ValueMap::new().with("LOW", 1).with("MEDIUM", 2).with("HIGH", 3);
//! let priority = create_filter(map, Some(aliases), FilterOptions::default());
//!
//! assert_eq!(priority.label("HIGH"), "High");
//! assert_eq!(priority.label_or("URGENT", "Unknown"), "Unknown");
//! assert_eq!(priority.constant("HIGH"), Some(&json!(3)));
//!
//! let values: Vec<_> = priority.list().into_iter().map(|item| item.value).collect();
//! assert_eq!(values, ["HIGH", "MEDIUM", "LOW"]);
//! ```
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (cli/, wired by main.rs)                               │
//! │  - Loads a FilterDefinition, prints lists/labels/constants  │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Construction (builder.rs, config.rs, filter.rs)            │
//! │  - create_filter / FilterBuilder / FilterDefinition         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Data shaping (descriptor.rs, enum_map.rs, item.rs, list.rs)│
//! │  - Label extraction, ordering, list caching                 │
//! │  - Pure functions over serde_json values, no I/O            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ordering
//!
//! The list follows the map's insertion order (reversed with `reverse_list`).
//! If any item carries a numeric `order` field, the whole list is stable-sorted
//! ascending by it, and items without one sort as `order = 0`.
//!
//! ## Module Overview
//!
//! - [`filter`]: The [`Filter`] type, [`create_filter`], and the type predicates
//! - [`builder`]: Fluent construction
//! - [`options`]: Construction options and hook types
//! - [`extension`]: Extension members and their composition
//! - [`list`]: List construction and the memoized list slot
//! - [`item`]: The option list row type
//! - [`enum_map`]: Ordered source maps
//! - [`descriptor`]: Plain label vs. descriptor classification
//! - [`config`]: JSON filter definitions
//! - [`error`]: Error types

pub mod builder;
pub mod config;
pub mod descriptor;
pub mod enum_map;
pub mod error;
pub mod extension;
pub mod filter;
pub mod item;
pub mod list;
pub mod options;

pub use builder::FilterBuilder;
pub use config::FilterDefinition;
pub use descriptor::{is_plain_object, Entry};
pub use enum_map::{Alias, EnumMap, ValueMap};
pub use error::{FilterError, Result};
pub use extension::{Extensions, External, Member};
pub use filter::{create_filter, is_default_filter, is_filter, Filter};
pub use item::FilterListItem;
pub use options::{FilterOptions, WalkAction};
