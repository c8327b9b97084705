//! Plugin Error Types
//!
//! All registry errors are programmer-error class failures: they indicate an
//! invalid composition graph, not a transient condition, and are never retried.

/// Result type alias for plugin operations
pub type PluginResult<T> = Result<T, PluginError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PluginError {
    /// A plugin with this name is already registered
    #[error("Plugin '{plugin_name}' is already registered")]
    DuplicateName { plugin_name: String },

    /// The registration surface was used after the registry was loaded
    #[error("Registry is closed: '{operation}' is only valid before load")]
    RegistryClosed { operation: String },

    /// `load` was called a second time
    #[error("Registry is already loaded")]
    AlreadyLoaded,

    /// A read or dispatch operation was used before the registry was loaded
    #[error("Registry is not loaded: '{operation}' is only valid after load")]
    NotLoaded { operation: String },

    /// Plugin not found in registry
    #[error("Unknown plugin: {plugin_name}")]
    UnknownPlugin { plugin_name: String },

    /// Config or state key not declared by the plugin
    #[error("Unknown key '{key}' for plugin '{plugin_name}'")]
    UnknownKey { plugin_name: String, key: String },

    /// Method not exposed by the plugin
    #[error("Unknown method '{method_name}' on plugin '{plugin_name}'")]
    UnknownMethod {
        plugin_name: String,
        method_name: String,
    },

    /// Failure raised inside a plugin method or guard predicate
    #[error("Plugin '{plugin_name}' failed during '{operation}': {cause}")]
    ExecutionError {
        plugin_name: String,
        operation: String,
        cause: String,
    },
}
