//! vitrine - a component preview host built on a plugin/slot architecture
//!
//! Plugins are registered while the registry is open, then loaded in a single
//! transition that freezes the registration surface. After load, plugin
//! methods mutate shared state and slot rendering aggregates fragment
//! contributions in registration order, re-evaluating guard predicates
//! against the latest state on every pass.

pub mod app;
pub mod core;
pub mod plugin;
pub mod render;

// Build-time constants: UI_API_VERSION, BUILD_TIME, GIT_HASH
include!(concat!(env!("OUT_DIR"), "/version.rs"));

/// UI API version external plugins compile against, from the package
/// metadata this binary was built with.
pub fn get_ui_api_version() -> u32 {
    UI_API_VERSION.parse().unwrap_or(20260815)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ui_api_version_is_a_date_stamp() {
        let version = get_ui_api_version();
        assert!(version >= 20260101);
    }
}
