//! Common test utilities and helpers
//!
//! Shared builders for registry-level integration tests.

use vitrine::plugin::api::{all_builtin_plugins, LoadOverrides, PluginSpec, Registry};

/// A registry with every builtin plugin registered and loaded with defaults.
pub fn loaded_builtin_registry() -> Registry {
    let mut registry = Registry::new();
    for spec in all_builtin_plugins() {
        registry.register(spec).unwrap();
    }
    registry.load(LoadOverrides::new()).unwrap();
    registry
}

/// Register the given specs and load with the given overrides.
pub fn loaded_registry(specs: Vec<PluginSpec>, overrides: LoadOverrides) -> Registry {
    let mut registry = Registry::new();
    for spec in specs {
        registry.register(spec).unwrap();
    }
    registry.load(overrides).unwrap();
    registry
}
