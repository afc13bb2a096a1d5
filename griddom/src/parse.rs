//! HTML fragment parsing into element trees.

use log::trace;
use scraper::{ElementRef, Html, Node};

use crate::element::Element;
use crate::types::{parse_px, Style, Tag};

/// Parse an HTML fragment into its top-level elements.
///
/// Whitespace-only text between elements is dropped, comments are skipped.
/// Parsing never fails: malformed markup is repaired the way browsers do.
pub fn parse_fragment(html: &str) -> Vec<Element> {
    let fragment = Html::parse_fragment(html);
    let root = fragment.root_element();
    let elements = convert_children(root);
    trace!("parsed fragment into {} top-level elements", elements.len());
    elements
}

fn convert_children(parent: ElementRef<'_>) -> Vec<Element> {
    let mut out = Vec::new();
    for child in parent.children() {
        match child.value() {
            Node::Element(_) => {
                if let Some(el) = ElementRef::wrap(child) {
                    out.push(convert(el));
                }
            }
            Node::Text(text) => {
                if !text.trim().is_empty() {
                    out.push(Element::text((**text).to_string()));
                }
            }
            _ => {}
        }
    }
    out
}

fn convert(el: ElementRef<'_>) -> Element {
    let value = el.value();
    let mut out = Element::new(Tag::from_name(value.name()));

    if let Some(id) = value.id() {
        out.id = id.to_string();
    }
    out.classes = value.classes().map(str::to_string).collect();

    let mut width_attr = None;
    for (key, val) in value.attrs() {
        match key {
            "id" | "class" => {}
            "style" => out.style = Style::parse_inline(val),
            "width" if matches!(out.tag, Tag::Col | Tag::Th | Tag::Td) => {
                width_attr = parse_px(val);
            }
            "draggable" => out.draggable = val == "true",
            _ => {
                out.attrs.insert(key.to_string(), val.to_string());
            }
        }
    }
    if out.style.width.is_none() {
        out.style.width = width_attr;
    }

    let children = convert_children(el);
    if !children.is_empty() {
        out = out.children(children);
    }
    out
}
