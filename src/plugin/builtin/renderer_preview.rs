//! Renderer Preview Plugin
//!
//! Contributes the sandboxed preview iframe to `rendererPreviewOuter` and
//! tracks the renderer runtime's connection status.

use serde_json::{json, Value};

use crate::plugin::error::{PluginError, PluginResult};
use crate::plugin::spec::PluginSpec;
use crate::render::fragment::Fragment;

pub fn spec() -> PluginSpec {
    PluginSpec::new("rendererPreview")
        .config("rendererUrl", json!("/_renderer.html"))
        .state("runtimeStatus", json!("pending"))
        .method("setRuntimeStatus", set_runtime_status)
        .method("getRendererUrl", |ctx, _args| ctx.own_config("rendererUrl"))
        .slot(
            "rendererPreviewOuter",
            Fragment::element("iframe")
                .attr("data-is", "renderer-preview")
                .attr("sandbox", "allow-scripts allow-same-origin"),
        )
}

fn set_runtime_status(
    ctx: &mut crate::plugin::context::MethodContext<'_>,
    args: &[Value],
) -> PluginResult<Value> {
    let status = args
        .first()
        .and_then(|v| v.as_str())
        .ok_or_else(|| PluginError::ExecutionError {
            plugin_name: "rendererPreview".to_string(),
            operation: "setRuntimeStatus".to_string(),
            cause: "expected a status string argument".to_string(),
        })?;
    match status {
        "pending" | "error" | "connected" => {
            ctx.set_own_state("runtimeStatus", json!(status))?;
            Ok(Value::Null)
        }
        other => Err(PluginError::ExecutionError {
            plugin_name: "rendererPreview".to_string(),
            operation: "setRuntimeStatus".to_string(),
            cause: format!("unknown runtime status '{}'", other),
        }),
    }
}

crate::builtin_plugin!(3, spec);
