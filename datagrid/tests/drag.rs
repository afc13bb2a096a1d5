use std::sync::{Arc, Mutex};

use datagrid::{Column, Grid, GridEventKind, GridModel};
use griddom::{Event, Rect};

fn grid(ids: &[&str]) -> Grid {
    let model = GridModel::new("issues", ids.iter().map(|id| Column::new(*id, *id)).collect())
        .with_row(ids.iter().map(|id| format!("{id}-value")))
        .with_row(ids.iter().map(|id| format!("{id}-other")));
    Grid::from_model(model).with_viewport(Rect::new(0, 0, 800, 600))
}

fn head_cell(grid: &Grid, column: &str) -> Rect {
    grid.layout()
        .get(&grid.ids().head_cell(column))
        .copied()
        .unwrap_or_else(|| panic!("no head cell for {column}"))
}

fn row_texts(grid: &Grid) -> Vec<Vec<String>> {
    grid.model()
        .unwrap()
        .rows
        .iter()
        .map(|row| row.child_elements().iter().map(|c| c.text_content()).collect())
        .collect()
}

/// Move the pointer one pixel at a time from `from` towards `to`, stopping
/// after the first swap.
fn drag_until_swap(grid: &mut Grid, from: i32, to: i32) -> bool {
    let step = if to >= from { 1 } else { -1 };
    let mut x = from;
    while x != to {
        x += step;
        if grid.drag_to(x) {
            return true;
        }
    }
    false
}

// ============================================================================
// Reordering
// ============================================================================

#[test]
fn test_drag_right_past_neighbour_swaps_and_requests_reload() {
    let mut grid = grid(&["a", "b", "c", "d"]);
    let b = head_cell(&grid, "b");
    let start = b.center_x();

    assert!(grid.begin_drag("b", start));
    assert!(drag_until_swap(&mut grid, start, start + 200));
    assert_eq!(grid.columns(), ["a", "c", "b", "d"]);
    assert_eq!(grid.drag().session().unwrap().index, 2);

    let request = grid.drop_column().unwrap();
    assert_eq!(request.grid_id, "issues");
    assert_eq!(request.columns.as_deref(), Some("a,c,b,d"));
    assert!(request.full_reload);
    assert!(!grid.drag().is_dragging());
}

#[test]
fn test_swap_back_restores_widths() {
    let mut grid = grid(&["a", "summary", "c", "d"]);
    let original = grid.state().widths.clone().unwrap();
    assert_ne!(original[0], original[1]);

    let start = head_cell(&grid, "a").center_x();
    assert!(grid.begin_drag("a", start));
    let mut x = start;
    while !grid.drag_to(x + 1) {
        x += 1;
        assert!(x < start + 400, "no swap to the right");
    }
    x += 1;
    assert_eq!(grid.columns(), ["summary", "a", "c", "d"]);
    let swapped = grid.state().widths.clone().unwrap();
    assert_eq!(swapped[..2], [original[1], original[0]]);

    while !grid.drag_to(x - 1) {
        x -= 1;
        assert!(x > start - 400, "no swap to the left");
    }
    assert_eq!(grid.columns(), ["a", "summary", "c", "d"]);
    assert_eq!(grid.state().widths.as_ref(), Some(&original));

    let request = grid.drop_column().unwrap();
    assert_eq!(request.columns.as_deref(), Some("a,summary,c,d"));
}

#[test]
fn test_drag_left_past_neighbour() {
    let mut grid = grid(&["a", "b", "c"]);
    let c = head_cell(&grid, "c");
    let start = c.center_x();

    assert!(grid.begin_drag("c", start));
    // First move only records the pointer position.
    grid.drag_to(start + 1);
    assert!(drag_until_swap(&mut grid, start + 1, 0));
    assert_eq!(grid.columns(), ["a", "c", "b"]);
}

#[test]
fn test_body_cells_follow_their_column() {
    let mut grid = grid(&["a", "b", "c"]);
    let start = head_cell(&grid, "a").center_x();

    grid.begin_drag("a", start);
    assert!(drag_until_swap(&mut grid, start, start + 300));
    assert_eq!(
        row_texts(&grid),
        [
            ["b-value", "a-value", "c-value"],
            ["b-other", "a-other", "c-other"],
        ]
    );
}

#[test]
fn test_registry_length_is_stable_during_drag() {
    let mut grid = grid(&["a", "b", "c", "d"]);
    let start = head_cell(&grid, "a").center_x();

    grid.begin_drag("a", start);
    for x in (start..start + 400).step_by(7) {
        grid.drag_to(x);
        assert_eq!(grid.columns().len(), 4);
    }
    for x in (0..start + 400).rev().step_by(5) {
        grid.drag_to(x);
        assert_eq!(grid.columns().len(), 4);
    }
    grid.drop_column();
    let mut sorted = grid.columns();
    sorted.sort();
    assert_eq!(sorted, ["a", "b", "c", "d"]);
}

#[test]
fn test_header_and_body_widths_stay_aligned_after_swap() {
    let mut grid = grid(&["a", "bbbbbbbbbbbb", "c"]);
    let start = head_cell(&grid, "a").center_x();

    grid.begin_drag("a", start);
    assert!(drag_until_swap(&mut grid, start, start + 400));
    grid.drop_column();

    let layout = grid.layout();
    let ids = grid.ids();
    let body_table = grid.view().find_by_id(&ids.body_table()).unwrap();
    let rows = body_table.table_rows();
    let body_row = rows.last().unwrap();
    for (index, column) in grid.columns().iter().enumerate() {
        let head = layout[&ids.head_cell(column)];
        let cell = layout[&body_row.child_elements()[index].id];
        assert_eq!((head.x, head.width), (cell.x, cell.width), "column {column}");
    }
}

#[test]
fn test_drop_without_movement_requests_nothing() {
    let mut grid = grid(&["a", "b"]);
    let start = head_cell(&grid, "a").center_x();

    grid.begin_drag("a", start);
    grid.drag_to(start + 1);
    assert_eq!(grid.drop_column(), None);
    assert_eq!(grid.columns(), ["a", "b"]);
}

#[test]
fn test_drop_when_idle_is_ignored() {
    let mut grid = grid(&["a", "b"]);
    assert_eq!(grid.drop_column(), None);
    assert!(!grid.drag_to(100));
}

// ============================================================================
// Pointer Events
// ============================================================================

#[test]
fn test_pointer_events_drive_a_drag() {
    let mut grid = grid(&["a", "b", "c"]);
    let a = head_cell(&grid, "a");
    let (x, y) = (a.center_x(), a.y + 1);

    // Resolved by hit testing.
    assert_eq!(grid.handle(&Event::DragStart { target: None, x, y }), None);
    assert!(grid.drag().is_dragging());

    let mut swapped = false;
    for step in 1..400 {
        grid.handle(&Event::Drag { x: x + step, y });
        if grid.columns()[0] != "a" {
            swapped = true;
            break;
        }
    }
    assert!(swapped);

    let request = grid.handle(&Event::Drop { x: x + 400, y }).unwrap();
    assert_eq!(request.columns.as_deref(), Some("b,a,c"));
}

#[test]
fn test_drag_events_are_emitted() {
    let mut grid = grid(&["a", "b"]);
    let seen = Arc::new(Mutex::new(Vec::new()));
    for kind in [
        GridEventKind::DragStarted,
        GridEventKind::DragEnded,
        GridEventKind::ColumnsReordered,
    ] {
        let seen = seen.clone();
        grid.on(kind, move |event| {
            seen.lock()
                .unwrap()
                .push((event.kind, event.column.clone(), event.columns.clone()));
        });
    }

    let start = head_cell(&grid, "a").center_x();
    grid.begin_drag("a", start);
    assert!(drag_until_swap(&mut grid, start, start + 800));
    grid.drop_column();

    let order = vec!["b".to_string(), "a".to_string()];
    let seen = seen.lock().unwrap();
    assert_eq!(
        *seen,
        [
            (
                GridEventKind::DragStarted,
                Some("a".to_string()),
                vec!["a".to_string(), "b".to_string()]
            ),
            (GridEventKind::DragEnded, Some("a".to_string()), order.clone()),
            (GridEventKind::ColumnsReordered, Some("a".to_string()), order),
        ]
    );
}
