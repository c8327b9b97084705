//! Fragment Tree
//!
//! Fragments are the renderable units plugins contribute to slots. A fragment
//! may itself declare further named slots, which the renderer resolves
//! recursively against the same registry.

use serde::Serialize;
use std::collections::BTreeMap;

/// A renderable UI fragment as declared by a plugin.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Fragment {
    /// Plain text content
    Text { value: String },
    /// An element with a tag, attributes, and ordered children
    Element {
        tag: String,
        #[serde(skip_serializing_if = "BTreeMap::is_empty")]
        attrs: BTreeMap<String, String>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        children: Vec<Fragment>,
    },
    /// A nested named extension point, resolved at render time
    Slot { name: String },
}

impl Fragment {
    pub fn text(value: impl Into<String>) -> Self {
        Fragment::Text {
            value: value.into(),
        }
    }

    pub fn element(tag: impl Into<String>) -> Self {
        Fragment::Element {
            tag: tag.into(),
            attrs: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn slot(name: impl Into<String>) -> Self {
        Fragment::Slot { name: name.into() }
    }

    /// Add an attribute. No-op on non-element fragments.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Fragment::Element { attrs, .. } = &mut self {
            attrs.insert(key.into(), value.into());
        }
        self
    }

    /// Append a child. No-op on non-element fragments.
    pub fn child(mut self, fragment: Fragment) -> Self {
        if let Fragment::Element { children, .. } = &mut self {
            children.push(fragment);
        }
        self
    }
}

/// A fragment produced by a render pass, paired with the plugin that
/// contributed it. Order follows plugin-registration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedFragment {
    pub plugin: String,
    pub node: RenderedNode,
}

/// A resolved fragment tree: like [`Fragment`] but with every nested slot
/// replaced by the fragments rendered into it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RenderedNode {
    Text {
        value: String,
    },
    Element {
        tag: String,
        #[serde(skip_serializing_if = "BTreeMap::is_empty")]
        attrs: BTreeMap<String, String>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        children: Vec<RenderedNode>,
    },
    Slot {
        name: String,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        children: Vec<RenderedFragment>,
    },
}

impl RenderedNode {
    /// Collect the names of all slots appearing anywhere in this tree.
    pub fn slot_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_slot_names(&mut names);
        names
    }

    fn collect_slot_names<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            RenderedNode::Text { .. } => {}
            RenderedNode::Element { children, .. } => {
                for child in children {
                    child.collect_slot_names(names);
                }
            }
            RenderedNode::Slot { name, children } => {
                names.push(name);
                for child in children {
                    child.node.collect_slot_names(names);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_builder() {
        let fragment = Fragment::element("div")
            .attr("class", "preview-root")
            .child(Fragment::text("hello"))
            .child(Fragment::slot("nav"));

        match &fragment {
            Fragment::Element {
                tag,
                attrs,
                children,
            } => {
                assert_eq!(tag, "div");
                assert_eq!(attrs.get("class").unwrap(), "preview-root");
                assert_eq!(children.len(), 2);
                assert_eq!(children[1], Fragment::slot("nav"));
            }
            other => panic!("Expected element, got {:?}", other),
        }
    }

    #[test]
    fn test_attr_and_child_are_noops_on_text() {
        let fragment = Fragment::text("x").attr("k", "v").child(Fragment::text("y"));
        assert_eq!(fragment, Fragment::text("x"));
    }

    #[test]
    fn test_rendered_slot_names() {
        let node = RenderedNode::Element {
            tag: "div".to_string(),
            attrs: BTreeMap::new(),
            children: vec![
                RenderedNode::Slot {
                    name: "nav".to_string(),
                    children: vec![],
                },
                RenderedNode::Slot {
                    name: "rendererPreviewOuter".to_string(),
                    children: vec![],
                },
            ],
        };
        assert_eq!(node.slot_names(), vec!["nav", "rendererPreviewOuter"]);
    }
}
