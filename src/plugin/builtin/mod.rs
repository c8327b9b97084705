//! Builtin Plugins
//!
//! The stock plugin set composing the default preview UI. Each plugin
//! registers its spec factory through the `builtin_plugin!` macro and is
//! discovered by the host at startup.

pub(crate) mod api;
pub(crate) mod core;
pub(crate) mod fixture_tree;
pub(crate) mod renderer_preview;
pub(crate) mod responsive_preview;
pub(crate) mod router;
