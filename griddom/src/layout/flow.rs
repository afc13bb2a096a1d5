use super::table;
use super::{LayoutResult, Rect, TextMetrics};
use crate::element::{Content, Element};
use crate::text::{collapse_whitespace, display_width};
use crate::types::Tag;

/// Width of a checkbox or other bare input.
const INPUT_WIDTH: i32 = 13;

/// Lay out a block-level element at (x, y). Returns the height consumed.
pub(super) fn layout_block(
    element: &Element,
    x: i32,
    y: i32,
    available_width: i32,
    metrics: &TextMetrics,
    result: &mut LayoutResult,
) -> i32 {
    if !element.style.is_displayed() {
        zero_subtree(element, x, y, result);
        return 0;
    }

    if element.tag == Tag::Table {
        return table::layout_table(element, x, y, metrics, result).height;
    }

    if element.tag.is_inline() {
        return layout_line(std::slice::from_ref(element), x, y, metrics, result);
    }

    let width = element.style.width.unwrap_or(available_width).max(0);
    let content_height = layout_children(element, x, y, width, metrics, result);
    let height = element.style.height.unwrap_or(content_height).max(0);
    result.insert(element.id.clone(), Rect::new(x, y, width, height));
    height
}

/// Lay out the contents of `element` inside a box starting at (x, y).
///
/// Consecutive inline children share a line box; block children stack.
pub(super) fn layout_children(
    element: &Element,
    x: i32,
    y: i32,
    width: i32,
    metrics: &TextMetrics,
    result: &mut LayoutResult,
) -> i32 {
    match &element.content {
        Content::None => 0,
        Content::Text(text) => {
            if collapse_whitespace(text).is_empty() {
                0
            } else {
                metrics.line_height
            }
        }
        Content::Children(children) => {
            let mut cursor_y = y;
            let mut line: Vec<&Element> = Vec::new();
            for child in children {
                if child.tag.is_inline() {
                    line.push(child);
                    continue;
                }
                let line_height = layout_line_refs(&line, x, cursor_y, metrics, result);
                cursor_y = cursor_y.saturating_add(line_height);
                line.clear();
                let block_height = layout_block(child, x, cursor_y, width, metrics, result);
                cursor_y = cursor_y.saturating_add(block_height);
            }
            let line_height = layout_line_refs(&line, x, cursor_y, metrics, result);
            cursor_y = cursor_y.saturating_add(line_height);
            cursor_y - y
        }
    }
}

fn layout_line(
    items: &[Element],
    x: i32,
    y: i32,
    metrics: &TextMetrics,
    result: &mut LayoutResult,
) -> i32 {
    let refs: Vec<&Element> = items.iter().collect();
    layout_line_refs(&refs, x, y, metrics, result)
}

/// Place inline items left to right on one line. Returns the line height,
/// or zero when nothing on the line is displayed.
fn layout_line_refs(
    items: &[&Element],
    x: i32,
    y: i32,
    metrics: &TextMetrics,
    result: &mut LayoutResult,
) -> i32 {
    let mut cursor_x = x;
    let mut any_displayed = false;
    for item in items {
        if !item.style.is_displayed() {
            zero_subtree(item, cursor_x, y, result);
            continue;
        }
        let width = intrinsic_width(item, metrics);
        if width == 0 && matches!(&item.content, Content::Text(_)) {
            // Whitespace-only text.
            result.insert(item.id.clone(), Rect::new(cursor_x, y, 0, 0));
            continue;
        }
        any_displayed = true;
        result.insert(item.id.clone(), Rect::new(cursor_x, y, width, metrics.line_height));
        if let Content::Children(children) = &item.content {
            layout_line(children, cursor_x, y, metrics, result);
        }
        cursor_x = cursor_x.saturating_add(width);
    }
    if any_displayed {
        metrics.line_height
    } else {
        0
    }
}

/// Preferred width of an element's content without wrapping.
pub(super) fn intrinsic_width(element: &Element, metrics: &TextMetrics) -> i32 {
    if !element.style.is_displayed() {
        return 0;
    }
    if let Some(width) = element.style.width {
        return width.max(0);
    }
    match &element.content {
        Content::None if element.tag == Tag::Input => INPUT_WIDTH,
        Content::None => 0,
        Content::Text(text) => text_width(&collapse_whitespace(text), metrics),
        Content::Children(_) if element.tag == Tag::Table => table::intrinsic_table_width(element, metrics),
        Content::Children(children) => {
            if element.tag.is_inline() {
                return sum_widths(children.iter().map(|c| intrinsic_width(c, metrics)));
            }
            // Widest line: runs of inline children sum, blocks stand alone.
            let mut widest = 0;
            let mut run: i32 = 0;
            for child in children {
                if child.tag.is_inline() {
                    run = run.saturating_add(intrinsic_width(child, metrics));
                } else {
                    widest = widest.max(run).max(intrinsic_width(child, metrics));
                    run = 0;
                }
            }
            widest.max(run)
        }
    }
}

/// Width of a run of text on one line.
pub(super) fn text_width(text: &str, metrics: &TextMetrics) -> i32 {
    i32::try_from(display_width(text))
        .unwrap_or(i32::MAX)
        .saturating_mul(metrics.char_width)
}

/// Sum widths, pinning at `i32::MAX` rather than wrapping.
pub(super) fn sum_widths(widths: impl IntoIterator<Item = i32>) -> i32 {
    widths.into_iter().fold(0, i32::saturating_add)
}

/// Record a zero-sized rect for an element that takes no space, and for
/// everything inside it.
pub(super) fn zero_subtree(element: &Element, x: i32, y: i32, result: &mut LayoutResult) {
    result.insert(element.id.clone(), Rect::new(x, y, 0, 0));
    for child in element.child_elements() {
        zero_subtree(child, x, y, result);
    }
}
