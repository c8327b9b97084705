//! Core Plugin
//!
//! Owns fixture selection and composes the top-level preview layout: the
//! `root` slot nests `nav` and `rendererPreviewOuter`. Selecting a fixture
//! also writes the router's URL params so the selection is shareable.

use serde_json::{json, Value};

use crate::plugin::error::PluginResult;
use crate::plugin::spec::PluginSpec;
use crate::render::fragment::Fragment;

pub fn spec() -> PluginSpec {
    PluginSpec::new("core")
        .config("projectId", json!("vitrine"))
        .config("fixturesDir", json!("__fixtures__"))
        .state("selectedFixture", Value::Null)
        .method("selectFixture", select_fixture)
        .method("unselectFixture", unselect_fixture)
        .method("getSelectedFixture", |ctx, _args| {
            ctx.own_state("selectedFixture")
        })
        .slot(
            "root",
            Fragment::element("div")
                .attr("class", "preview-root")
                .child(Fragment::slot("nav"))
                .child(Fragment::slot("rendererPreviewOuter")),
        )
}

fn select_fixture(
    ctx: &mut crate::plugin::context::MethodContext<'_>,
    args: &[Value],
) -> PluginResult<Value> {
    let fixture = args.first().cloned().unwrap_or(Value::Null);
    log::debug!("Selecting fixture: {}", fixture);
    ctx.set_own_state("selectedFixture", fixture.clone())?;
    ctx.set_state("router", "urlParams", json!({ "fixture": fixture }))?;
    Ok(Value::Null)
}

fn unselect_fixture(
    ctx: &mut crate::plugin::context::MethodContext<'_>,
    _args: &[Value],
) -> PluginResult<Value> {
    ctx.set_own_state("selectedFixture", Value::Null)?;
    ctx.set_state("router", "urlParams", json!({}))?;
    Ok(Value::Null)
}

crate::builtin_plugin!(0, spec);
