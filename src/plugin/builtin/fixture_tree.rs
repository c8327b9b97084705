//! Fixture Tree Plugin
//!
//! Contributes the fixture navigation panel to the `nav` slot.

use serde_json::json;

use crate::plugin::spec::PluginSpec;
use crate::render::fragment::Fragment;

pub fn spec() -> PluginSpec {
    PluginSpec::new("fixtureTree")
        .config("hideEmptyDirs", json!(true))
        .state("expandedPaths", json!([]))
        .method("setExpandedPaths", |ctx, args| {
            let paths = args.first().cloned().unwrap_or_else(|| json!([]));
            ctx.set_own_state("expandedPaths", paths)?;
            Ok(serde_json::Value::Null)
        })
        .slot(
            "nav",
            Fragment::element("aside")
                .attr("class", "fixture-tree")
                .child(Fragment::element("nav").child(Fragment::text("Fixtures"))),
        )
}

crate::builtin_plugin!(2, spec);
