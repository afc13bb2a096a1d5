//! Measuring rendered grids.

use griddom::{Element, LayoutResult, Rect, TextMetrics};

/// Lays out an element tree and reports the rectangle of every element.
///
/// Hosts with a real layout engine implement this over it; [`TableLayout`]
/// is a self-contained engine with fixed text metrics.
pub trait Measure: Send + Sync {
    fn measure(&self, root: &Element, viewport: Rect) -> LayoutResult;
}

/// The built-in table layout engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableLayout {
    pub metrics: TextMetrics,
}

impl TableLayout {
    pub fn new(metrics: TextMetrics) -> Self {
        Self { metrics }
    }
}

impl Measure for TableLayout {
    fn measure(&self, root: &Element, viewport: Rect) -> LayoutResult {
        griddom::layout_with(root, viewport, &self.metrics)
    }
}
