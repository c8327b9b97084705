//! Plugin Specifications
//!
//! A [`PluginSpec`] is the registration unit: a unique name plus optional
//! config defaults, initial state, exposed methods, and ordered slot
//! contributions. Specs are plain data until the registry is loaded.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::plugin::context::MethodContext;
use crate::plugin::error::PluginResult;
use crate::plugin::state::StateView;
use crate::render::fragment::Fragment;

/// An exposed plugin method: receives a dispatch context with access to every
/// plugin's state slices, plus the caller-supplied arguments.
pub type Method =
    Arc<dyn Fn(&mut MethodContext<'_>, &[Value]) -> PluginResult<Value> + Send + Sync>;

/// A guard predicate over current shared state, gating a slot contribution.
/// Evaluation errors propagate unswallowed out of the render pass.
pub type Guard = Arc<dyn Fn(&StateView<'_>) -> PluginResult<bool> + Send + Sync>;

/// One fragment a plugin contributes to a named slot.
pub struct SlotContribution {
    pub slot: String,
    pub fragment: Fragment,
    pub guard: Option<Guard>,
}

impl std::fmt::Debug for SlotContribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlotContribution")
            .field("slot", &self.slot)
            .field("fragment", &self.fragment)
            .field("guarded", &self.guard.is_some())
            .finish()
    }
}

/// Registration payload for a single plugin.
pub struct PluginSpec {
    pub(crate) name: String,
    pub(crate) config: HashMap<String, Value>,
    pub(crate) state: HashMap<String, Value>,
    pub(crate) methods: HashMap<String, Method>,
    pub(crate) slots: Vec<SlotContribution>,
}

impl PluginSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: HashMap::new(),
            state: HashMap::new(),
            methods: HashMap::new(),
            slots: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declare a config default.
    pub fn config(mut self, key: impl Into<String>, value: Value) -> Self {
        self.config.insert(key.into(), value);
        self
    }

    /// Declare an initial state value.
    pub fn state(mut self, key: impl Into<String>, value: Value) -> Self {
        self.state.insert(key.into(), value);
        self
    }

    /// Expose a named method.
    pub fn method<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut MethodContext<'_>, &[Value]) -> PluginResult<Value> + Send + Sync + 'static,
    {
        self.methods.insert(name.into(), Arc::new(f));
        self
    }

    /// Contribute a fragment to a named slot, unconditionally.
    pub fn slot(mut self, slot: impl Into<String>, fragment: Fragment) -> Self {
        self.slots.push(SlotContribution {
            slot: slot.into(),
            fragment,
            guard: None,
        });
        self
    }

    /// Contribute a fragment gated by a guard predicate over shared state.
    pub fn guarded_slot<G>(mut self, slot: impl Into<String>, fragment: Fragment, guard: G) -> Self
    where
        G: Fn(&StateView<'_>) -> PluginResult<bool> + Send + Sync + 'static,
    {
        self.slots.push(SlotContribution {
            slot: slot.into(),
            fragment,
            guard: Some(Arc::new(guard)),
        });
        self
    }
}

impl std::fmt::Debug for PluginSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginSpec")
            .field("name", &self.name)
            .field("config", &self.config)
            .field("state", &self.state)
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .field("slots", &self.slots)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_spec_builder_collects_declarations() {
        let spec = PluginSpec::new("responsivePreview")
            .config("devices", json!([]))
            .state("enabled", json!(false))
            .method("toggleEnabled", |_ctx, _args| Ok(Value::Null))
            .slot("rendererPreviewOuter", Fragment::element("header"))
            .guarded_slot("rendererPreviewOuter", Fragment::element("footer"), |view| {
                Ok(view.flag("responsivePreview", "enabled"))
            });

        assert_eq!(spec.name(), "responsivePreview");
        assert_eq!(spec.config.get("devices").unwrap(), &json!([]));
        assert_eq!(spec.state.get("enabled").unwrap(), &json!(false));
        assert!(spec.methods.contains_key("toggleEnabled"));
        assert_eq!(spec.slots.len(), 2);
        assert!(spec.slots[0].guard.is_none());
        assert!(spec.slots[1].guard.is_some());
    }
}
