//! Plugin System Module
//!
//! Ordered plugin registry with a two-phase lifecycle (open registration,
//! then a frozen query-only runtime), shared state slices, method dispatch,
//! and test-only mock hooks.

// Internal modules - all access should go through api module
pub(crate) mod builtin;
pub(crate) mod context;
pub(crate) mod error;
pub(crate) mod registry;
pub(crate) mod spec;
pub(crate) mod state;

// Public API module - the only public interface for the plugin system
pub mod api;
