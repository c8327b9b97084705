//! Responsive Preview Plugin
//!
//! Adds the responsive-viewport header around the renderer preview. The
//! header only renders while responsive mode is enabled; the guard reads
//! live state so toggling takes effect on the next render pass.

use serde_json::{json, Value};

use crate::plugin::error::{PluginError, PluginResult};
use crate::plugin::spec::PluginSpec;
use crate::render::fragment::Fragment;

pub fn spec() -> PluginSpec {
    PluginSpec::new("responsivePreview")
        .config(
            "devices",
            json!([
                { "label": "iPhone SE", "width": 320, "height": 568 },
                { "label": "iPad", "width": 768, "height": 1024 },
                { "label": "Laptop", "width": 1366, "height": 768 }
            ]),
        )
        .state("enabled", json!(false))
        .state("viewport", json!({ "width": 320, "height": 568 }))
        .method("toggleEnabled", toggle_enabled)
        .method("setViewport", set_viewport)
        .guarded_slot(
            "rendererPreviewOuter",
            Fragment::element("header")
                .attr("class", "responsive-header")
                .child(Fragment::text("Responsive viewport")),
            |view| Ok(view.flag("responsivePreview", "enabled")),
        )
}

fn toggle_enabled(
    ctx: &mut crate::plugin::context::MethodContext<'_>,
    _args: &[Value],
) -> PluginResult<Value> {
    let enabled = ctx.own_state("enabled")?.as_bool().unwrap_or(false);
    ctx.set_own_state("enabled", json!(!enabled))?;
    log::debug!("Responsive preview enabled: {}", !enabled);
    Ok(json!(!enabled))
}

/// Set the viewport and implicitly enable responsive mode, matching the
/// behavior of picking a device from the header.
fn set_viewport(
    ctx: &mut crate::plugin::context::MethodContext<'_>,
    args: &[Value],
) -> PluginResult<Value> {
    let viewport = args
        .first()
        .filter(|v| v.get("width").is_some() && v.get("height").is_some())
        .cloned()
        .ok_or_else(|| PluginError::ExecutionError {
            plugin_name: "responsivePreview".to_string(),
            operation: "setViewport".to_string(),
            cause: "expected a {width, height} argument".to_string(),
        })?;
    ctx.set_own_state("viewport", viewport)?;
    ctx.set_own_state("enabled", json!(true))?;
    Ok(Value::Null)
}

crate::builtin_plugin!(4, spec);
