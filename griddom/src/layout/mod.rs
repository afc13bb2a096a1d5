mod rect;
mod flow;
mod table;

use std::collections::HashMap;

pub use rect::Rect;

use crate::element::Element;

/// Element id to page rectangle.
pub type LayoutResult = HashMap<String, Rect>;

/// Pixel metrics used to size text and table cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextMetrics {
    /// Advance of a single-width character.
    pub char_width: i32,
    /// Height of a line box and of every table row.
    pub line_height: i32,
    /// Horizontal padding on each side of a table cell.
    pub cell_padding: i32,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            char_width: 8,
            line_height: 20,
            cell_padding: 4,
        }
    }
}

pub fn layout(element: &Element, available: Rect) -> LayoutResult {
    layout_with(element, available, &TextMetrics::default())
}

pub fn layout_with(element: &Element, available: Rect, metrics: &TextMetrics) -> LayoutResult {
    let mut result = LayoutResult::new();
    flow::layout_block(element, available.x, available.y, available.width, metrics, &mut result);
    result
}
