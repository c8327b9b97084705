//! Builtin plugin registration and discovery
//!
//! Builtin plugins register a spec factory through the `builtin_plugin!`
//! macro and are discovered via `inventory` at startup. Inventory iteration
//! order is unspecified, so entries carry an explicit rank; hosts register
//! plugins in ascending rank order, which fixes slot-rendering order.

use crate::plugin::spec::PluginSpec;

/// Entry for a builtin plugin in the discovery registry
pub struct BuiltinPluginEntry {
    /// Registration order among builtins (ascending)
    pub rank: u32,
    pub factory: fn() -> PluginSpec,
}

inventory::collect!(BuiltinPluginEntry);

/// Macro for registering builtin plugins
#[macro_export]
macro_rules! builtin_plugin {
    ($rank:expr, $factory_expr:expr) => {
        inventory::submit!($crate::plugin::api::BuiltinPluginEntry {
            rank: $rank,
            factory: $factory_expr,
        });
    };
}

/// All registered builtin plugin specs, in rank order
pub fn all_builtin_plugins() -> Vec<PluginSpec> {
    let mut entries: Vec<&BuiltinPluginEntry> =
        inventory::iter::<BuiltinPluginEntry>().collect();
    entries.sort_by_key(|entry| entry.rank);
    entries.iter().map(|entry| (entry.factory)()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_discovered_in_rank_order() {
        let specs = all_builtin_plugins();
        let names: Vec<&str> = specs.iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec![
                "core",
                "router",
                "fixtureTree",
                "rendererPreview",
                "responsivePreview"
            ]
        );
    }
}
