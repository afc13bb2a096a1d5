//! Keeping the fixed header table and the scrollable body table aligned.

use griddom::{LayoutResult, Rect};
use log::trace;

use crate::measure::Measure;
use crate::model::GridModel;
use crate::view::{self, ViewIds, ViewState};

/// Sizes the header and body views of a grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSplitter {
    last_window_width: Option<i32>,
}

impl HeaderSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Measure natural column widths and apply them to both colgroups.
    ///
    /// Explicit widths are cleared and the body table's header row shown
    /// while measuring, since hidden cells measure as zero. The last column
    /// loses a pixel; the second-to-last loses a pixel and gains whatever
    /// horizontal space the body container has beyond the body table.
    /// Measuring from the natural state makes repeated calls agree.
    pub fn sync_column_sizes(
        &self,
        model: &GridModel,
        state: &mut ViewState,
        measure: &dyn Measure,
        viewport: Rect,
    ) -> Vec<i32> {
        let ids = ViewIds::new(model.id.clone());

        let mut measuring = state.clone();
        measuring.widths = None;
        measuring.header_row_visible = true;
        let layout = measure.measure(&view::render(model, &measuring), viewport);

        let mut widths: Vec<i32> = model
            .columns
            .columns()
            .iter()
            .map(|c| width_of(&layout, &ids.measure_cell(&c.id)))
            .collect();
        if model.customize.is_some() {
            widths.push(width_of(&layout, &ids.measure_customize()));
        }

        let container = width_of(&layout, &ids.body());
        let table = width_of(&layout, &ids.body_table());
        let extra_width = container.saturating_sub(table).max(0);

        let count = widths.len();
        if count >= 1 {
            widths[count - 1] = widths[count - 1].saturating_sub(1);
        }
        if count >= 2 {
            widths[count - 2] = widths[count - 2].saturating_add(extra_width - 1);
        }
        for width in &mut widths {
            *width = (*width).max(0);
        }
        trace!(
            "grid {}: synced column widths {:?} (extra {})",
            model.id, widths, extra_width
        );

        state.widths = Some(widths.clone());
        state.header_row_visible = false;
        widths
    }

    /// Fit the body container into `available_height`, below the header
    /// and above the paginator, then resync column sizes.
    pub fn resize_to_fit(
        &self,
        model: &GridModel,
        state: &mut ViewState,
        measure: &dyn Measure,
        viewport: Rect,
        available_height: i32,
    ) -> i32 {
        let ids = ViewIds::new(model.id.clone());
        let layout = measure.measure(&view::render(model, state), viewport);

        let offset = match (layout.get(model.id.as_str()), layout.get(&ids.body())) {
            (Some(root), Some(body)) => body.y - root.y,
            _ => 0,
        };
        let paginator = layout.get(&ids.paginator()).map_or(0, |r| r.height);
        let height = (available_height - offset - paginator).max(0);

        state.body_height = Some(height);
        self.sync_column_sizes(model, state, measure, viewport);
        height
    }

    /// Record a window width. Returns `false` when it matches the last one,
    /// meaning a height-only resize that needs no work.
    pub fn window_width_changed(&mut self, width: i32) -> bool {
        if self.last_window_width == Some(width) {
            return false;
        }
        self.last_window_width = Some(width);
        true
    }
}

fn width_of(layout: &LayoutResult, id: &str) -> i32 {
    layout.get(id).map_or(0, |r| r.width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Column;
    use crate::measure::TableLayout;

    fn model() -> GridModel {
        GridModel::new(
            "g",
            vec![Column::new("id", "ID"), Column::new("summary", "Summary")],
        )
        .with_row(["1", "Fix"])
    }

    const VIEWPORT: Rect = Rect::new(0, 0, 800, 600);

    #[test]
    fn test_sync_measures_with_header_row_shown() {
        let model = model();
        let mut state = ViewState::default();
        let widths =
            HeaderSplitter::new().sync_column_sizes(&model, &mut state, &TableLayout::default(), VIEWPORT);

        // Natural widths 24, 64, 8 (empty customize cell); table 96 in an
        // 800px container leaves 704 extra for the second-to-last column.
        assert_eq!(widths, [24, 64 + 704 - 1, 8 - 1]);
        assert_eq!(state.widths.as_deref(), Some(widths.as_slice()));
        assert!(!state.header_row_visible);
    }

    #[test]
    fn test_sync_is_idempotent() {
        let model = model();
        let mut state = ViewState::default();
        let splitter = HeaderSplitter::new();
        let measure = TableLayout::default();

        let first = splitter.sync_column_sizes(&model, &mut state, &measure, VIEWPORT);
        let after_first = state.clone();
        let second = splitter.sync_column_sizes(&model, &mut state, &measure, VIEWPORT);
        assert_eq!(first, second);
        assert_eq!(after_first, state);
    }

    #[test]
    fn test_resize_to_fit_subtracts_paginator() {
        let with = model().with_paginator(griddom::Element::div().child(griddom::Element::text("1 2 3")));
        let mut state = ViewState::default();
        let height = HeaderSplitter::new().resize_to_fit(
            &with,
            &mut state,
            &TableLayout::default(),
            VIEWPORT,
            500,
        );
        // Header table is one 20px row; the paginator is one 20px line.
        assert_eq!(height, 500 - 20 - 20);
        assert_eq!(state.body_height, Some(height));
    }

    #[test]
    fn test_zero_height_paginator_matches_none() {
        let measure = TableLayout::default();
        let splitter = HeaderSplitter::new();

        let mut without_state = ViewState::default();
        let without = splitter.resize_to_fit(&model(), &mut without_state, &measure, VIEWPORT, 400);

        let empty = model().with_paginator(griddom::Element::div());
        let mut with_state = ViewState::default();
        let with = splitter.resize_to_fit(&empty, &mut with_state, &measure, VIEWPORT, 400);

        assert_eq!(without, with);
        assert_eq!(without_state.widths, with_state.widths);
    }

    #[test]
    fn test_window_width_changed() {
        let mut splitter = HeaderSplitter::new();
        assert!(splitter.window_width_changed(1024));
        assert!(!splitter.window_width_changed(1024));
        assert!(splitter.window_width_changed(800));
    }
}
