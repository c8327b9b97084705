//! Router Plugin
//!
//! Owns the URL-parameter slice other plugins read to know which fixture the
//! preview window is pointed at. Contributes no UI of its own.

use serde_json::{json, Value};

use crate::plugin::spec::PluginSpec;

pub fn spec() -> PluginSpec {
    PluginSpec::new("router")
        .state("urlParams", json!({}))
        .method("setUrlParams", |ctx, args| {
            let params = args.first().cloned().unwrap_or_else(|| json!({}));
            log::debug!("Router URL params set to {}", params);
            ctx.set_own_state("urlParams", params)?;
            Ok(Value::Null)
        })
        .method("getUrlParams", |ctx, _args| ctx.own_state("urlParams"))
}

crate::builtin_plugin!(1, spec);
