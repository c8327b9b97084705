//! Public API for the plugin system
//!
//! External modules should import from here rather than directly from
//! internal modules.

// Registry and lifecycle
pub use crate::plugin::registry::{LoadOverrides, Registry, SharedRegistry};

// Plugin registration surface
pub use crate::plugin::spec::{Guard, Method, PluginSpec, SlotContribution};

// Method dispatch
pub use crate::plugin::context::MethodContext;

// Shared state
pub use crate::plugin::state::{StateStore, StateView};

// Error handling
pub use crate::plugin::error::{PluginError, PluginResult};

// Builtin plugin discovery
pub use crate::plugin::builtin::api::{all_builtin_plugins, BuiltinPluginEntry};
