//! Plugin Registry
//!
//! Ordered registry of plugins with a two-phase lifecycle: an open
//! registration phase and a closed, query-only runtime phase. After `load`
//! the plugin set is frozen; state slices keep mutating, but only through
//! each plugin's exposed methods.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::plugin::error::{PluginError, PluginResult};
use crate::plugin::spec::{Method, PluginSpec, SlotContribution};
use crate::plugin::state::{StateStore, StateView};
use crate::render::error::RenderError;
use crate::render::fragment::RenderedFragment;
use crate::render::renderer::SlotRenderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Open,
    Loaded,
}

/// Declared shape of a registered plugin, kept immutable after load.
struct PluginDef {
    config_defaults: HashMap<String, Value>,
    state_defaults: HashMap<String, Value>,
    methods: HashMap<String, Method>,
    slots: Vec<SlotContribution>,
}

impl PluginDef {
    fn empty() -> Self {
        Self {
            config_defaults: HashMap::new(),
            state_defaults: HashMap::new(),
            methods: HashMap::new(),
            slots: Vec::new(),
        }
    }
}

/// Pre-load overrides recorded by the mock hooks. Mocking a plugin that was
/// never registered synthesizes a stub entry for it at load time, which is
/// how tests substitute fake upstream plugins without constructing real ones.
#[derive(Default)]
struct Mocks {
    config: HashMap<String, HashMap<String, Value>>,
    state: HashMap<String, HashMap<String, Value>>,
    methods: HashMap<String, HashMap<String, Method>>,
    /// Names in first-mocked order, for deterministic stub synthesis
    order: Vec<String>,
}

impl Mocks {
    fn track(&mut self, plugin_name: &str) {
        if !self.order.iter().any(|n| n == plugin_name) {
            self.order.push(plugin_name.to_string());
        }
    }

    fn clear(&mut self) {
        self.config.clear();
        self.state.clear();
        self.methods.clear();
        self.order.clear();
    }
}

/// Config and initial-state overrides applied at load time, after mocks.
/// Used chiefly for test isolation and for host config files.
#[derive(Debug, Clone, Default)]
pub struct LoadOverrides {
    config: HashMap<String, HashMap<String, Value>>,
    state: HashMap<String, HashMap<String, Value>>,
}

impl LoadOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, plugin_name: &str, key: &str, value: Value) -> Self {
        self.config
            .entry(plugin_name.to_string())
            .or_default()
            .insert(key.to_string(), value);
        self
    }

    pub fn state(mut self, plugin_name: &str, key: &str, value: Value) -> Self {
        self.state
            .entry(plugin_name.to_string())
            .or_default()
            .insert(key.to_string(), value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.config.is_empty() && self.state.is_empty()
    }
}

/// Plugin registry owning all plugins, their effective config, and all
/// shared state slices.
pub struct Registry {
    phase: Phase,
    /// Plugin names in registration order
    order: Vec<String>,
    defs: HashMap<String, PluginDef>,
    mocks: Mocks,
    /// Effective config per plugin, resolved at load
    config: HashMap<String, HashMap<String, Value>>,
    /// Effective method tables per plugin, resolved at load
    methods: HashMap<String, HashMap<String, Method>>,
    state: StateStore,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("phase", &self.phase)
            .field("plugins", &self.order)
            .field("mocked", &self.mocks.order)
            .finish()
    }
}

impl Registry {
    /// Create a new empty registry in the open phase
    pub fn new() -> Self {
        Self {
            phase: Phase::Open,
            order: Vec::new(),
            defs: HashMap::new(),
            mocks: Mocks::default(),
            config: HashMap::new(),
            methods: HashMap::new(),
            state: StateStore::new(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.phase == Phase::Loaded
    }

    fn ensure_open(&self, operation: &str) -> PluginResult<()> {
        if self.phase == Phase::Loaded {
            return Err(PluginError::RegistryClosed {
                operation: operation.to_string(),
            });
        }
        Ok(())
    }

    fn ensure_loaded(&self, operation: &str) -> PluginResult<()> {
        if self.phase == Phase::Open {
            return Err(PluginError::NotLoaded {
                operation: operation.to_string(),
            });
        }
        Ok(())
    }

    /// Register a plugin. Only valid before `load`; duplicate names fail.
    pub fn register(&mut self, spec: PluginSpec) -> PluginResult<()> {
        self.ensure_open("register")?;

        if self.defs.contains_key(spec.name()) {
            return Err(PluginError::DuplicateName {
                plugin_name: spec.name().to_string(),
            });
        }

        log::debug!(
            "Registering plugin '{}' ({} methods, {} slot contributions)",
            spec.name(),
            spec.methods.len(),
            spec.slots.len()
        );

        let name = spec.name.clone();
        self.defs.insert(
            name.clone(),
            PluginDef {
                config_defaults: spec.config,
                state_defaults: spec.state,
                methods: spec.methods,
                slots: spec.slots,
            },
        );
        self.order.push(name);
        Ok(())
    }

    /// Replace a plugin's config defaults wholesale. Pre-load only.
    pub fn mock_config(
        &mut self,
        plugin_name: &str,
        config: HashMap<String, Value>,
    ) -> PluginResult<()> {
        self.ensure_open("mock_config")?;
        self.mocks.track(plugin_name);
        self.mocks.config.insert(plugin_name.to_string(), config);
        Ok(())
    }

    /// Replace a plugin's initial state wholesale. Pre-load only.
    pub fn mock_state(
        &mut self,
        plugin_name: &str,
        state: HashMap<String, Value>,
    ) -> PluginResult<()> {
        self.ensure_open("mock_state")?;
        self.mocks.track(plugin_name);
        self.mocks.state.insert(plugin_name.to_string(), state);
        Ok(())
    }

    /// Override a single named method. Pre-load only.
    pub fn mock_method<F>(
        &mut self,
        plugin_name: &str,
        method_name: &str,
        f: F,
    ) -> PluginResult<()>
    where
        F: Fn(&mut crate::plugin::context::MethodContext<'_>, &[Value]) -> PluginResult<Value>
            + Send
            + Sync
            + 'static,
    {
        self.ensure_open("mock_method")?;
        self.mocks.track(plugin_name);
        self.mocks
            .methods
            .entry(plugin_name.to_string())
            .or_default()
            .insert(method_name.to_string(), Arc::new(f));
        Ok(())
    }

    /// Freeze the plugin set and resolve effective config, state, and method
    /// tables. Precedence per key: declared defaults, then mocks, then
    /// explicit load overrides. Fails with `AlreadyLoaded` on a second call.
    pub fn load(&mut self, overrides: LoadOverrides) -> PluginResult<()> {
        if self.phase == Phase::Loaded {
            return Err(PluginError::AlreadyLoaded);
        }

        // Mocked-but-never-registered plugins become stubs, in mock order.
        let stub_names: Vec<String> = self
            .mocks
            .order
            .iter()
            .filter(|name| !self.defs.contains_key(*name))
            .cloned()
            .collect();
        for name in stub_names {
            log::debug!("Synthesizing stub plugin '{}' from mocks", name);
            self.defs.insert(name.clone(), PluginDef::empty());
            self.order.push(name);
        }

        for name in &self.order {
            let Some(def) = self.defs.get(name) else {
                continue;
            };

            let mut config = self
                .mocks
                .config
                .get(name)
                .cloned()
                .unwrap_or_else(|| def.config_defaults.clone());
            if let Some(layer) = overrides.config.get(name) {
                config.extend(layer.clone());
            }

            let mut state = self
                .mocks
                .state
                .get(name)
                .cloned()
                .unwrap_or_else(|| def.state_defaults.clone());
            if let Some(layer) = overrides.state.get(name) {
                state.extend(layer.clone());
            }

            let mut methods = def.methods.clone();
            if let Some(layer) = self.mocks.methods.get(name) {
                methods.extend(layer.clone());
            }

            self.config.insert(name.clone(), config);
            self.methods.insert(name.clone(), methods);
            self.state.insert_slice(name, state);
        }

        self.phase = Phase::Loaded;
        log::info!("Registry loaded with {} plugins", self.order.len());
        Ok(())
    }

    /// Read a plugin's effective config value. Valid only after load.
    pub fn get_config(&self, plugin_name: &str, key: &str) -> PluginResult<Value> {
        self.ensure_loaded("get_config")?;
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

    /// Read a plugin's current state value. Valid only after load.
    pub fn get_state(&self, plugin_name: &str, key: &str) -> PluginResult<Value> {
        self.ensure_loaded("get_state")?;
        self.state.get(plugin_name, key).cloned()
    }

    /// Dispatch a named method on a plugin. The method receives a context
    /// with read/write access to every plugin's state slice; this is the only
    /// mutation path after load.
    pub fn call_method(
        &mut self,
        plugin_name: &str,
        method_name: &str,
        args: &[Value],
    ) -> PluginResult<Value> {
        self.ensure_loaded("call_method")?;

        let table = self
            .methods
            .get(plugin_name)
            .ok_or_else(|| PluginError::UnknownPlugin {
                plugin_name: plugin_name.to_string(),
            })?;
        let method = table
            .get(method_name)
            .cloned()
            .ok_or_else(|| PluginError::UnknownMethod {
                plugin_name: plugin_name.to_string(),
                method_name: method_name.to_string(),
            })?;

        log::debug!("Dispatching {}.{}", plugin_name, method_name);
        let mut ctx =
            crate::plugin::context::MethodContext::new(plugin_name, &self.config, &mut self.state);
        method(&mut ctx, args)
    }

    pub fn has_plugin(&self, plugin_name: &str) -> bool {
        self.defs.contains_key(plugin_name)
    }

    /// Plugin names in registration order
    pub fn plugin_names(&self) -> &[String] {
        &self.order
    }

    pub fn plugin_count(&self) -> usize {
        self.order.len()
    }

    /// A plugin's slot contributions in declaration order
    pub fn contributions(&self, plugin_name: &str) -> &[SlotContribution] {
        self.defs
            .get(plugin_name)
            .map(|def| def.slots.as_slice())
            .unwrap_or(&[])
    }

    /// Read-only view of current shared state, for guard evaluation
    pub fn state_view(&self) -> StateView<'_> {
        self.state.view()
    }

    /// Reset to the pristine open state: no plugins, no mocks, no state.
    /// Used between test cases to rule out cross-test leakage.
    pub fn cleanup(&mut self) {
        log::debug!("Resetting registry to pristine state");
        self.phase = Phase::Open;
        self.order.clear();
        self.defs.clear();
        self.mocks.clear();
        self.config.clear();
        self.methods.clear();
        self.state.clear();
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe shared registry.
///
/// All access is serialized behind a single `RwLock`, preserving the "read
/// sees latest write" guarantee when the host runtime is multi-threaded.
#[derive(Debug, Clone)]
pub struct SharedRegistry {
    inner: Arc<RwLock<Registry>>,
}

impl SharedRegistry {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Registry::new())),
        }
    }

    /// Get access to the inner registry for compound read/write operations
    pub fn inner(&self) -> &Arc<RwLock<Registry>> {
        &self.inner
    }

    pub async fn register(&self, spec: PluginSpec) -> PluginResult<()> {
        self.inner.write().await.register(spec)
    }

    pub async fn load(&self, overrides: LoadOverrides) -> PluginResult<()> {
        self.inner.write().await.load(overrides)
    }

    pub async fn is_loaded(&self) -> bool {
        self.inner.read().await.is_loaded()
    }

    pub async fn get_config(&self, plugin_name: &str, key: &str) -> PluginResult<Value> {
        self.inner.read().await.get_config(plugin_name, key)
    }

    pub async fn get_state(&self, plugin_name: &str, key: &str) -> PluginResult<Value> {
        self.inner.read().await.get_state(plugin_name, key)
    }

    pub async fn call_method(
        &self,
        plugin_name: &str,
        method_name: &str,
        args: &[Value],
    ) -> PluginResult<Value> {
        self.inner
            .write()
            .await
            .call_method(plugin_name, method_name, args)
    }

    /// Render a slot against current state under a read lock
    pub async fn render_slot(&self, slot_name: &str) -> Result<Vec<RenderedFragment>, RenderError> {
        let registry = self.inner.read().await;
        SlotRenderer::new(&registry).render_slot(slot_name)
    }

    pub async fn plugin_names(&self) -> Vec<String> {
        self.inner.read().await.plugin_names().to_vec()
    }

    pub async fn plugin_count(&self) -> usize {
        self.inner.read().await.plugin_count()
    }

    pub async fn cleanup(&self) {
        self.inner.write().await.cleanup()
    }
}

impl Default for SharedRegistry {
    fn default() -> Self {
        Self::new()
    }
}
