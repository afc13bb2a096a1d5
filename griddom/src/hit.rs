use crate::element::Element;
use crate::layout::LayoutResult;

/// Find the deepest clickable or draggable element at the given coordinates.
/// Returns None if no interactive element contains the point.
pub fn hit_test(layout: &LayoutResult, root: &Element, x: i32, y: i32) -> Option<String> {
    hit_test_element(layout, root, x, y)
}

fn hit_test_element(layout: &LayoutResult, element: &Element, x: i32, y: i32) -> Option<String> {
    let rect = layout.get(&element.id)?;

    // Table rows and cells can overflow their parents; descend regardless.
    for child in element.child_elements().iter().rev() {
        if let Some(id) = hit_test_element(layout, child, x, y) {
            return Some(id);
        }
    }

    if !rect.contains(x, y) {
        return None;
    }

    if (element.clickable || element.draggable) && element.style.is_visible() {
        Some(element.id.clone())
    } else {
        None
    }
}
