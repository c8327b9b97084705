//! Shared State Slices
//!
//! Every plugin owns a named slice of shared state. The registry owns all
//! slices and hands out access only through method dispatch (read/write) and
//! read-only views used by guard predicates.

use serde_json::Value;
use std::collections::HashMap;

use crate::plugin::error::{PluginError, PluginResult};

/// Storage for all plugins' state slices, keyed by plugin name
#[derive(Debug, Clone, Default)]
pub struct StateStore {
    slices: HashMap<String, HashMap<String, Value>>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a plugin's slice, replacing any existing one
    pub(crate) fn insert_slice(&mut self, plugin_name: &str, slice: HashMap<String, Value>) {
        self.slices.insert(plugin_name.to_string(), slice);
    }

    pub fn get(&self, plugin_name: &str, key: &str) -> PluginResult<&Value> {
        let slice = self
            .slices
            .get(plugin_name)
            .ok_or_else(|| PluginError::UnknownPlugin {
                plugin_name: plugin_name.to_string(),
            })?;
        slice.get(key).ok_or_else(|| PluginError::UnknownKey {
            plugin_name: plugin_name.to_string(),
            key: key.to_string(),
        })
    }

    /// Write a value into a plugin's slice. The slice must exist; new keys
    /// within an existing slice are allowed.
    pub fn set(&mut self, plugin_name: &str, key: &str, value: Value) -> PluginResult<()> {
        let slice = self
            .slices
            .get_mut(plugin_name)
            .ok_or_else(|| PluginError::UnknownPlugin {
                plugin_name: plugin_name.to_string(),
            })?;
        slice.insert(key.to_string(), value);
        Ok(())
    }

    pub(crate) fn clear(&mut self) {
        self.slices.clear();
    }

    pub fn view(&self) -> StateView<'_> {
        StateView { store: self }
    }
}

/// Read-only view over the state store, passed to guard predicates so a
/// render pass always observes current values and can never mutate them.
#[derive(Clone, Copy)]
pub struct StateView<'a> {
    store: &'a StateStore,
}

impl<'a> StateView<'a> {
    pub fn get(&self, plugin_name: &str, key: &str) -> Option<&'a Value> {
        self.store
            .slices
            .get(plugin_name)
            .and_then(|slice| slice.get(key))
    }

    /// Boolean convenience: `false` when the key is missing or not a bool
    pub fn flag(&self, plugin_name: &str, key: &str) -> bool {
        matches!(self.get(plugin_name, key), Some(Value::Bool(true)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_and_set_within_slice() {
        let mut store = StateStore::new();
        store.insert_slice("router", HashMap::from([("urlParams".into(), json!({}))]));

        assert_eq!(store.get("router", "urlParams").unwrap(), &json!({}));

        store
            .set("router", "urlParams", json!({"fixture": "Button"}))
            .unwrap();
        assert_eq!(
            store.get("router", "urlParams").unwrap(),
            &json!({"fixture": "Button"})
        );
    }

    #[test]
    fn test_missing_plugin_and_key() {
        let mut store = StateStore::new();
        store.insert_slice("core", HashMap::new());

        assert_eq!(
            store.get("nope", "x").unwrap_err(),
            PluginError::UnknownPlugin {
                plugin_name: "nope".to_string()
            }
        );
        assert_eq!(
            store.get("core", "x").unwrap_err(),
            PluginError::UnknownKey {
                plugin_name: "core".to_string(),
                key: "x".to_string()
            }
        );
        assert!(store.set("nope", "x", json!(1)).is_err());
    }

    #[test]
    fn test_view_flag() {
        let mut store = StateStore::new();
        store.insert_slice(
            "responsivePreview",
            HashMap::from([("enabled".into(), json!(true)), ("viewport".into(), json!(null))]),
        );

        let view = store.view();
        assert!(view.flag("responsivePreview", "enabled"));
        assert!(!view.flag("responsivePreview", "viewport"));
        assert!(!view.flag("responsivePreview", "missing"));
        assert!(!view.flag("missing", "enabled"));
    }
}
