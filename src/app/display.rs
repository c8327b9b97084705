//! Rendered Tree Display
//!
//! Text rendering of a resolved fragment tree for the terminal, one node per
//! line with two-space indentation.

use colored::Colorize;

use crate::render::fragment::{RenderedFragment, RenderedNode};

pub fn render_tree(fragments: &[RenderedFragment], use_color: bool) -> String {
    let mut out = String::new();
    for fragment in fragments {
        write_fragment(&mut out, fragment, 0, use_color);
    }
    out
}

fn paint_plugin(name: &str, use_color: bool) -> String {
    if use_color {
        name.cyan().to_string()
    } else {
        name.to_string()
    }
}

fn paint_slot(name: &str, use_color: bool) -> String {
    if use_color {
        name.yellow().to_string()
    } else {
        name.to_string()
    }
}

fn write_fragment(out: &mut String, fragment: &RenderedFragment, depth: usize, use_color: bool) {
    let indent = "  ".repeat(depth);
    out.push_str(&format!(
        "{}{} {}\n",
        indent,
        paint_plugin(&fragment.plugin, use_color),
        headline(&fragment.node)
    ));
    write_children(out, &fragment.node, depth + 1, use_color);
}

fn write_node(out: &mut String, node: &RenderedNode, depth: usize, use_color: bool) {
    let indent = "  ".repeat(depth);
    match node {
        RenderedNode::Slot { name, .. } => {
            out.push_str(&format!(
                "{}[slot {}]\n",
                indent,
                paint_slot(name, use_color)
            ));
        }
        other => {
            out.push_str(&format!("{}{}\n", indent, headline(other)));
        }
    }
    write_children(out, node, depth + 1, use_color);
}

fn write_children(out: &mut String, node: &RenderedNode, depth: usize, use_color: bool) {
    match node {
        RenderedNode::Text { .. } => {}
        RenderedNode::Element { children, .. } => {
            for child in children {
                write_node(out, child, depth, use_color);
            }
        }
        RenderedNode::Slot { children, .. } => {
            for child in children {
                write_fragment(out, child, depth, use_color);
            }
        }
    }
}

fn headline(node: &RenderedNode) -> String {
    match node {
        RenderedNode::Text { value } => format!("\"{}\"", value),
        RenderedNode::Element { tag, attrs, .. } => {
            let mut line = format!("<{}", tag);
            for (key, value) in attrs {
                line.push_str(&format!(" {}=\"{}\"", key, value));
            }
            line.push('>');
            line
        }
        RenderedNode::Slot { name, .. } => format!("[slot {}]", name),
    }
}
