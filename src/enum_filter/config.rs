use crate::enum_map::{EnumMap, ValueMap};
use crate::error::Result;
use crate::filter::{create_filter, Filter};
use crate::options::FilterOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// A filter declared as JSON, e.g. in `status.json`:
///
/// ```json
/// {
///   "map": {"ACTIVE": "Active", "HIGH": {"label": "High", "order": 1}},
///   "valueMap": {"ACTIVE": 1},
///   "reverseList": false,
///   "defaultLabel": "Unknown"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterDefinition {
    pub map: EnumMap,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_map: Option<ValueMap>,

    #[serde(default)]
    pub reverse_list: bool,

    /// Label returned for unknown values.
    #[serde(default)]
    pub default_label: String,
}

impl FilterDefinition {
    pub fn new(map: EnumMap) -> Self {
        Self {
            map,
            ..Self::default()
        }
    }

    /// Load a definition from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let definition = Self::from_json_str(&content)?;
        debug!(
            path = %path.display(),
            keys = definition.map.len(),
            "loaded filter definition"
        );
        Ok(definition)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Save the definition as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Build the filter this definition describes.
    ///
    /// `default_label` is not baked into the filter; callers pass it to
    /// [`Filter::label_or`](crate::Filter::label_or).
    pub fn into_filter(self) -> Filter {
        self.into_filter_with(FilterOptions::default())
    }

    /// Like [`into_filter`](Self::into_filter), with extra options. The
    /// definition's `reverse_list` is OR-ed into them.
    pub fn into_filter_with(self, mut options: FilterOptions) -> Filter {
        options.reverse_list |= self.reverse_list;
        create_filter(self.map, self.value_map, options)
    }
}
