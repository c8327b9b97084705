//! Method Dispatch Context
//!
//! The context handed to a plugin method during `call_method`. It grants read
//! access to every plugin's config and read/write access to every plugin's
//! state slice. Cross-plugin access is intentional: a renderer plugin reads
//! the router plugin's URL parameters, the core plugin writes them.

use serde_json::Value;
use std::collections::HashMap;

use crate::plugin::error::{PluginError, PluginResult};
use crate::plugin::state::StateStore;

pub struct MethodContext<'a> {
    plugin_name: &'a str,
    config: &'a HashMap<String, HashMap<String, Value>>,
    state: &'a mut StateStore,
}

impl<'a> MethodContext<'a> {
    pub(crate) fn new(
        plugin_name: &'a str,
        config: &'a HashMap<String, HashMap<String, Value>>,
        state: &'a mut StateStore,
    ) -> Self {
        Self {
            plugin_name,
            config,
            state,
        }
    }

    /// Name of the plugin whose method is being dispatched.
    pub fn plugin_name(&self) -> &str {
        self.plugin_name
    }

    pub fn get_config(&self, plugin_name: &str, key: &str) -> PluginResult<Value> {
        let slice = self
            .config
            .get(plugin_name)
            .ok_or_else(|| PluginError::UnknownPlugin {
                plugin_name: plugin_name.to_string(),
            })?;
        slice
            .get(key)
            .cloned()
            .ok_or_else(|| PluginError::UnknownKey {
                plugin_name: plugin_name.to_string(),
                key: key.to_string(),
            })
    }

    pub fn get_state(&self, plugin_name: &str, key: &str) -> PluginResult<Value> {
        self.state.get(plugin_name, key).cloned()
    }

    pub fn set_state(&mut self, plugin_name: &str, key: &str, value: Value) -> PluginResult<()> {
        self.state.set(plugin_name, key, value)
    }

    /// Read from the dispatching plugin's own slice.
    pub fn own_state(&self, key: &str) -> PluginResult<Value> {
        self.get_state(self.plugin_name, key)
    }

    /// Write into the dispatching plugin's own slice.
    pub fn set_own_state(&mut self, key: &str, value: Value) -> PluginResult<()> {
        let name = self.plugin_name.to_string();
        self.set_state(&name, key, value)
    }

    /// Read from the dispatching plugin's own config.
    pub fn own_config(&self, key: &str) -> PluginResult<Value> {
        self.get_config(self.plugin_name, key)
    }
}
