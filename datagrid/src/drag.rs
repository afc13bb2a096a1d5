//! Column drag state machine.
//!
//! `Idle -> Dragging -> Idle`. A drag cannot be cancelled; it always ends
//! with a drop. While dragging, each pointer move may swap the dragged
//! column with one adjacent neighbour, once the floating drag helper crosses
//! that neighbour's midpoint.

use griddom::Rect;

/// State of an in-progress column drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    /// Current registry index of the dragged column.
    pub index: usize,
    /// Width of the dragged header cell, captured before it was hidden.
    pub width: i32,
    /// Pointer x minus the cell's left edge at drag start.
    pub grab_offset: i32,
    /// Midpoint x of every header cell, by registry index.
    pub midpoints: Vec<i32>,
    /// Pointer x of the previous move.
    pub last_x: i32,
    /// Whether any swap happened.
    pub changed: bool,
}

impl DragSession {
    /// Left edge of the drag helper for a pointer at `x`.
    pub fn helper_left(&self, x: i32) -> i32 {
        x - self.grab_offset
    }

    /// Right edge of the drag helper for a pointer at `x`.
    pub fn helper_right(&self, x: i32) -> i32 {
        self.helper_left(x) + self.width
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Drives column drags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    /// Begin dragging the column at `index`, whose header cell occupies
    /// `cell`, grabbed at `pointer_x`. Ignored while a drag is in progress.
    pub fn start(&mut self, index: usize, cell: Rect, pointer_x: i32, midpoints: Vec<i32>) -> bool {
        if self.is_dragging() {
            return false;
        }
        self.state = DragState::Dragging(DragSession {
            index,
            width: cell.width,
            grab_offset: pointer_x - cell.x,
            midpoints,
            last_x: 0,
            changed: false,
        });
        true
    }

    /// Handle a pointer move to page x `x`.
    ///
    /// Returns the index of the neighbour the dragged column should swap
    /// with, if any. The caller performs the swap and reports it back via
    /// [`DragController::swapped`].
    pub fn on_move(&mut self, x: i32) -> Option<usize> {
        let DragState::Dragging(session) = &mut self.state else {
            return None;
        };
        if x == session.last_x {
            return None;
        }

        let target = if x < session.last_x {
            session.index.checked_sub(1).filter(|&target| {
                session
                    .midpoints
                    .get(target)
                    .is_some_and(|&mid| session.helper_left(x) <= mid)
            })
        } else {
            Some(session.index + 1).filter(|&target| {
                session
                    .midpoints
                    .get(target)
                    .is_some_and(|&mid| session.helper_right(x) >= mid)
            })
        };

        session.last_x = x;
        target
    }

    /// Record that the dragged column now sits at `index`, with midpoints
    /// recomputed for the new positions.
    pub fn swapped(&mut self, index: usize, midpoints: Vec<i32>) {
        if let DragState::Dragging(session) = &mut self.state {
            session.index = index;
            session.midpoints = midpoints;
            session.changed = true;
        }
    }

    /// End the drag, returning the finished session.
    pub fn finish(&mut self) -> Option<DragSession> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(mut session) => {
                session.midpoints.clear();
                Some(session)
            }
            DragState::Idle => None,
        }
    }
}

/// Midpoints of header cells, by registry index.
///
/// The dragged cell is hidden and cannot be measured reliably, so its
/// captured width is used in place of the measured one.
pub fn compute_midpoints(cells: &[Rect], dragged: Option<(usize, i32)>) -> Vec<i32> {
    cells
        .iter()
        .enumerate()
        .map(|(index, rect)| match dragged {
            Some((dragged_index, width)) if dragged_index == index => {
                Rect::new(rect.x, rect.y, width, rect.height).center_x()
            }
            _ => rect.center_x(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Four 100px cells at x = 0, 100, 200, 300.
    fn cells() -> Vec<Rect> {
        (0..4).map(|i| Rect::new(i * 100, 0, 100, 20)).collect()
    }

    fn start_on(index: usize, pointer_x: i32) -> DragController {
        let mut drag = DragController::new();
        let cells = cells();
        let mids = compute_midpoints(&cells, Some((index, 100)));
        assert!(drag.start(index, cells[index], pointer_x, mids));
        drag
    }

    #[test]
    fn test_midpoints_round_half_up() {
        let mids = compute_midpoints(&[Rect::new(0, 0, 5, 1), Rect::new(5, 0, 10, 1)], None);
        assert_eq!(mids, [3, 10]);
    }

    #[test]
    fn test_midpoints_use_captured_width_for_dragged_cell() {
        let cells = [Rect::new(0, 0, 100, 20), Rect::new(100, 0, 0, 20)];
        assert_eq!(compute_midpoints(&cells, Some((1, 60))), [50, 130]);
    }

    #[test]
    fn test_start_resets_session() {
        let drag = start_on(1, 150);
        let session = drag.session().unwrap();
        assert_eq!(session.index, 1);
        assert_eq!(session.width, 100);
        assert_eq!(session.grab_offset, 50);
        assert_eq!(session.last_x, 0);
        assert!(!session.changed);
    }

    #[test]
    fn test_second_start_is_ignored() {
        let mut drag = start_on(1, 150);
        assert!(!drag.start(2, Rect::new(200, 0, 100, 20), 250, vec![]));
        assert_eq!(drag.session().unwrap().index, 1);
    }

    #[test]
    fn test_same_x_is_a_no_op() {
        let mut drag = start_on(1, 150);
        assert_eq!(drag.on_move(160), None);
        assert_eq!(drag.on_move(160), None);
        assert_eq!(drag.session().unwrap().last_x, 160);
    }

    #[test]
    fn test_moving_right_swaps_when_right_edge_reaches_midpoint() {
        let mut drag = start_on(1, 150);
        // Helper right edge = x - 50 + 100; neighbour midpoint is 250.
        assert_eq!(drag.on_move(199), None);
        assert_eq!(drag.on_move(200), Some(2));
    }

    #[test]
    fn test_moving_left_swaps_when_left_edge_reaches_midpoint() {
        let mut drag = start_on(2, 250);
        // Prime last_x so the next move counts as leftward.
        assert_eq!(drag.on_move(260), None);
        // Helper left edge = x - 50; neighbour midpoint is 150.
        assert_eq!(drag.on_move(201), None);
        assert_eq!(drag.on_move(200), Some(1));
    }

    #[test]
    fn test_only_adjacent_neighbour_is_considered() {
        let mut drag = start_on(0, 50);
        // Far enough right to pass two midpoints; only index 1 is offered.
        assert_eq!(drag.on_move(400), Some(1));
    }

    #[test]
    fn test_edges_are_guarded() {
        let mut drag = start_on(0, 50);
        drag.on_move(100);
        assert_eq!(drag.on_move(-500), None);

        let mut drag = start_on(3, 350);
        assert_eq!(drag.on_move(900), None);
    }

    #[test]
    fn test_swapped_marks_changed() {
        let mut drag = start_on(1, 150);
        assert_eq!(drag.on_move(200), Some(2));
        drag.swapped(2, vec![50, 150, 250, 350]);
        let session = drag.session().unwrap();
        assert_eq!(session.index, 2);
        assert!(session.changed);
    }

    #[test]
    fn test_finish_returns_to_idle() {
        let mut drag = start_on(1, 150);
        let session = drag.finish().unwrap();
        assert!(session.midpoints.is_empty());
        assert!(!drag.is_dragging());
        assert_eq!(drag.finish(), None);
        assert_eq!(drag.on_move(10), None);
    }
}
