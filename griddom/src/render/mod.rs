//! HTML serialization of element trees.

use crate::element::{Content, Element};
use crate::types::Tag;

/// Escapes text for use in HTML element content.
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escapes a string for use in a double-quoted HTML attribute value.
pub fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

/// Render an element tree as HTML. Generated ids are omitted.
pub fn to_html(element: &Element) -> String {
    let mut out = String::new();
    write_element(element, &mut out);
    out
}

fn write_element(element: &Element, out: &mut String) {
    if element.tag == Tag::Text {
        if let Content::Text(text) = &element.content {
            out.push_str(&escape_text(text));
        }
        return;
    }

    let name = element.tag.name();
    out.push('<');
    out.push_str(name);
    if element.has_explicit_id() {
        push_attr(out, "id", &element.id);
    }
    if !element.classes.is_empty() {
        push_attr(out, "class", &element.classes.join(" "));
    }
    for (key, value) in &element.attrs {
        push_attr(out, key, value);
    }
    if let Some(css) = element.style.to_inline() {
        push_attr(out, "style", &css);
    }
    if element.draggable {
        push_attr(out, "draggable", "true");
    }
    out.push('>');

    if element.tag.is_void() {
        return;
    }

    match &element.content {
        Content::None => {}
        Content::Text(text) => out.push_str(&escape_text(text)),
        Content::Children(children) => {
            for child in children {
                write_element(child, out);
            }
        }
    }

    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

fn push_attr(out: &mut String, key: &str, value: &str) {
    out.push(' ');
    out.push_str(key);
    out.push_str("=\"");
    out.push_str(&escape_attr(value));
    out.push('"');
}
