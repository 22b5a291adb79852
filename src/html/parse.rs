//! HTML parsing with `html5ever`.

use html5ever::tendril::TendrilSink;
use html5ever::{ParseOpts, parse_document};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use thiserror::Error;

use super::{Element, Node};

/// Element nesting went past the configured limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("element nesting exceeds the limit of {limit} levels")]
pub struct NestingTooDeep {
    /// The configured maximum depth.
    pub limit: usize,
}

/// Parses note content into an owned tree rooted at a `body` element.
///
/// Note content is a fragment (no `<html>` or `<body>`); the parser supplies
/// the document scaffolding and the children of the resulting `<body>` become
/// the children of the returned root. Comments and doctypes are dropped.
///
/// Parsing itself never fails: malformed markup is repaired the way browsers
/// repair it. The only error is nesting deeper than `max_depth` elements.
pub fn parse_fragment(html: &str, max_depth: usize) -> Result<Element, NestingTooDeep> {
    let dom = parse_document(RcDom::default(), ParseOpts::default()).one(html);

    let mut root = Element::new("body");
    if let Some(body) = find_body(&dom.document) {
        copy_children(&body, &mut root, 1, max_depth)?;
    }
    Ok(root)
}

fn find_body(handle: &Handle) -> Option<Handle> {
    for child in handle.children.borrow().iter() {
        if let NodeData::Element { name, .. } = &child.data {
            if &*name.local == "body" {
                return Some(child.clone());
            }
            if let Some(body) = find_body(child) {
                return Some(body);
            }
        }
    }
    None
}

fn copy_children(
    handle: &Handle,
    parent: &mut Element,
    depth: usize,
    max_depth: usize,
) -> Result<(), NestingTooDeep> {
    for child in handle.children.borrow().iter() {
        match &child.data {
            NodeData::Text { contents } => {
                parent.push_child(Node::Text(contents.borrow().to_string()));
            }
            NodeData::Element { name, attrs, .. } => {
                if depth > max_depth {
                    return Err(NestingTooDeep { limit: max_depth });
                }

                let mut element = Element::new(name.local.to_string());
                for attr in attrs.borrow().iter() {
                    element.set_attr(attr.name.local.to_string(), attr.value.to_string());
                }
                copy_children(child, &mut element, depth + 1, max_depth)?;
                parent.push_child(Node::Element(element));
            }
            // Comments, doctypes and processing instructions carry no content.
            _ => {}
        }
    }
    Ok(())
}
