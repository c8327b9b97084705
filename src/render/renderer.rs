//! Slot Renderer
//!
//! Resolves a named slot into the ordered sequence of fragments every plugin
//! contributed to it, skipping contributions whose guard predicate evaluates
//! false against current shared state. Nested slots are resolved recursively
//! by the same mechanism; a slot that resolves back into itself fails with
//! [`RenderError::SlotCycle`].

use crate::plugin::registry::Registry;
use crate::render::error::{RenderError, RenderResult};
use crate::render::fragment::{Fragment, RenderedFragment, RenderedNode};

pub struct SlotRenderer<'a> {
    registry: &'a Registry,
}

impl<'a> SlotRenderer<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    /// Render a slot against current state. An uncontributed slot yields an
    /// empty sequence; guards are re-evaluated on every pass.
    pub fn render_slot(&self, slot_name: &str) -> RenderResult<Vec<RenderedFragment>> {
        if !self.registry.is_loaded() {
            return Err(crate::plugin::error::PluginError::NotLoaded {
                operation: "render_slot".to_string(),
            }
            .into());
        }
        let mut stack = Vec::new();
        self.render_into(slot_name, &mut stack)
    }

    fn render_into(
        &self,
        slot_name: &str,
        stack: &mut Vec<String>,
    ) -> RenderResult<Vec<RenderedFragment>> {
        if stack.iter().any(|s| s == slot_name) {
            return Err(RenderError::SlotCycle {
                slot_name: slot_name.to_string(),
            });
        }
        stack.push(slot_name.to_string());

        let view = self.registry.state_view();
        let mut out = Vec::new();
        for plugin_name in self.registry.plugin_names() {
            for contribution in self.registry.contributions(plugin_name) {
                if contribution.slot != slot_name {
                    continue;
                }
                if let Some(guard) = &contribution.guard {
                    if !guard(&view)? {
                        log::trace!(
                            "Guard suppressed {}'s contribution to '{}'",
                            plugin_name,
                            slot_name
                        );
                        continue;
                    }
                }
                let node = self.resolve(&contribution.fragment, stack)?;
                out.push(RenderedFragment {
                    plugin: plugin_name.clone(),
                    node,
                });
            }
        }

        stack.pop();
        Ok(out)
    }

    fn resolve(&self, fragment: &Fragment, stack: &mut Vec<String>) -> RenderResult<RenderedNode> {
        match fragment {
            Fragment::Text { value } => Ok(RenderedNode::Text {
                value: value.clone(),
            }),
            Fragment::Element {
                tag,
                attrs,
                children,
            } => {
                let mut resolved = Vec::with_capacity(children.len());
                for child in children {
                    resolved.push(self.resolve(child, stack)?);
                }
                Ok(RenderedNode::Element {
                    tag: tag.clone(),
                    attrs: attrs.clone(),
                    children: resolved,
                })
            }
            Fragment::Slot { name } => Ok(RenderedNode::Slot {
                name: name.clone(),
                children: self.render_into(name, stack)?,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::error::PluginError;
    use crate::plugin::registry::{LoadOverrides, Registry};
    use crate::plugin::spec::PluginSpec;
    use serde_json::json;

    fn loaded_registry(specs: Vec<PluginSpec>) -> Registry {
        let mut registry = Registry::new();
        for spec in specs {
            registry.register(spec).unwrap();
        }
        registry.load(LoadOverrides::new()).unwrap();
        registry
    }

    #[test]
    fn test_render_before_load_fails() {
        let registry = Registry::new();
        let result = SlotRenderer::new(&registry).render_slot("root");
        assert_eq!(
            result.unwrap_err(),
            RenderError::Plugin(PluginError::NotLoaded {
                operation: "render_slot".to_string()
            })
        );
    }

    #[test]
    fn test_empty_slot_renders_nothing() {
        let registry = loaded_registry(vec![PluginSpec::new("core")]);
        let rendered = SlotRenderer::new(&registry).render_slot("nav").unwrap();
        assert!(rendered.is_empty());
    }

    #[test]
    fn test_registration_order_preserved() {
        let registry = loaded_registry(vec![
            PluginSpec::new("first").slot("nav", Fragment::text("a")),
            PluginSpec::new("second").slot("nav", Fragment::text("b")),
            PluginSpec::new("third").slot("nav", Fragment::text("c")),
        ]);

        let rendered = SlotRenderer::new(&registry).render_slot("nav").unwrap();
        let plugins: Vec<&str> = rendered.iter().map(|f| f.plugin.as_str()).collect();
        assert_eq!(plugins, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_nested_slots_resolve_recursively() {
        let registry = loaded_registry(vec![
            PluginSpec::new("core").slot(
                "root",
                Fragment::element("div")
                    .child(Fragment::slot("nav"))
                    .child(Fragment::slot("rendererPreviewOuter")),
            ),
            PluginSpec::new("fixtureTree").slot("nav", Fragment::element("aside")),
            PluginSpec::new("rendererPreview")
                .slot("rendererPreviewOuter", Fragment::element("iframe")),
        ]);

        let rendered = SlotRenderer::new(&registry).render_slot("root").unwrap();
        assert_eq!(rendered.len(), 1);
        match &rendered[0].node {
            RenderedNode::Element { children, .. } => {
                assert_eq!(children.len(), 2);
                match &children[0] {
                    RenderedNode::Slot { name, children } => {
                        assert_eq!(name, "nav");
                        assert_eq!(children.len(), 1);
                        assert_eq!(children[0].plugin, "fixtureTree");
                    }
                    other => panic!("Expected nav slot, got {:?}", other),
                }
                match &children[1] {
                    RenderedNode::Slot { name, children } => {
                        assert_eq!(name, "rendererPreviewOuter");
                        assert_eq!(children[0].plugin, "rendererPreview");
                    }
                    other => panic!("Expected renderer slot, got {:?}", other),
                }
            }
            other => panic!("Expected element, got {:?}", other),
        }
    }

    #[test]
    fn test_slot_cycle_detected() {
        let registry = loaded_registry(vec![
            PluginSpec::new("a").slot("outer", Fragment::slot("inner")),
            PluginSpec::new("b").slot("inner", Fragment::slot("outer")),
        ]);

        let result = SlotRenderer::new(&registry).render_slot("outer");
        assert_eq!(
            result.unwrap_err(),
            RenderError::SlotCycle {
                slot_name: "outer".to_string()
            }
        );
    }

    #[test]
    fn test_same_slot_twice_in_siblings_is_not_a_cycle() {
        let registry = loaded_registry(vec![
            PluginSpec::new("core").slot(
                "root",
                Fragment::element("div")
                    .child(Fragment::slot("panel"))
                    .child(Fragment::slot("panel")),
            ),
            PluginSpec::new("panel-content").slot("panel", Fragment::text("p")),
        ]);

        let rendered = SlotRenderer::new(&registry).render_slot("root").unwrap();
        match &rendered[0].node {
            RenderedNode::Element { children, .. } => assert_eq!(children.len(), 2),
            other => panic!("Expected element, got {:?}", other),
        }
    }

    #[test]
    fn test_guard_errors_propagate() {
        let registry = loaded_registry(vec![PluginSpec::new("broken").guarded_slot(
            "nav",
            Fragment::text("x"),
            |_view| {
                Err(PluginError::ExecutionError {
                    plugin_name: "broken".to_string(),
                    operation: "guard".to_string(),
                    cause: "boom".to_string(),
                })
            },
        )]);

        let result = SlotRenderer::new(&registry).render_slot("nav");
        assert_eq!(
            result.unwrap_err(),
            RenderError::Plugin(PluginError::ExecutionError {
                plugin_name: "broken".to_string(),
                operation: "guard".to_string(),
                cause: "boom".to_string(),
            })
        );
    }

    #[test]
    fn test_guard_reflects_live_state() {
        let mut registry = Registry::new();
        registry
            .register(
                PluginSpec::new("responsivePreview")
                    .state("enabled", json!(false))
                    .method("toggleEnabled", |ctx, _args| {
                        let enabled = ctx.own_state("enabled")?.as_bool().unwrap_or(false);
                        ctx.set_own_state("enabled", json!(!enabled))?;
                        Ok(json!(!enabled))
                    })
                    .guarded_slot(
                        "rendererPreviewOuter",
                        Fragment::element("header"),
                        |view| Ok(view.flag("responsivePreview", "enabled")),
                    ),
            )
            .unwrap();
        registry.load(LoadOverrides::new()).unwrap();

        let rendered = SlotRenderer::new(&registry)
            .render_slot("rendererPreviewOuter")
            .unwrap();
        assert!(rendered.is_empty());

        registry
            .call_method("responsivePreview", "toggleEnabled", &[])
            .unwrap();

        let rendered = SlotRenderer::new(&registry)
            .render_slot("rendererPreviewOuter")
            .unwrap();
        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0].plugin, "responsivePreview");
    }

    #[test]
    fn test_render_is_idempotent_without_mutation() {
        let registry = loaded_registry(vec![
            PluginSpec::new("a").slot("nav", Fragment::element("ul").child(Fragment::text("x"))),
            PluginSpec::new("b").slot("nav", Fragment::text("y")),
        ]);

        let renderer = SlotRenderer::new(&registry);
        let first = renderer.render_slot("nav").unwrap();
        let second = renderer.render_slot("nav").unwrap();
        assert_eq!(first, second);
    }
}
