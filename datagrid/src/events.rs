//! Grid notifications and handler registration.
//!
//! Handlers are registered per event kind and receive an explicit
//! [`GridEvent`] describing what happened and the grid's column order.

use std::collections::HashMap;
use std::fmt;

/// Identifies which handlers to call for a grid event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridEventKind {
    /// The grid was replaced or refreshed from server markup.
    Reloaded,
    /// A header cell drag began.
    DragStarted,
    /// A header cell was dropped.
    DragEnded,
    /// A drag changed the column order.
    ColumnsReordered,
    /// A column was picked from the column menu.
    ColumnToggled,
    /// The column menu was opened or closed.
    MenuToggled,
}

/// A grid event to be dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridEvent {
    /// Which kind of event
    pub kind: GridEventKind,
    /// Grid that triggered the event
    pub grid_id: String,
    /// Visible column order at the time of the event
    pub columns: Vec<String>,
    /// Column the event concerns, if any
    pub column: Option<String>,
}

impl GridEvent {
    /// Create a new grid event.
    pub fn new(kind: GridEventKind, grid_id: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            kind,
            grid_id: grid_id.into(),
            columns,
            column: None,
        }
    }

    /// Attach the column the event concerns.
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }
}

/// A registered event handler.
pub type Handler = Box<dyn Fn(&GridEvent) + Send + Sync>;

/// Handlers keyed by event kind, called in registration order.
#[derive(Default)]
pub struct Handlers {
    handlers: HashMap<GridEventKind, Vec<Handler>>,
}

impl Handlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for one kind of event.
    pub fn on(&mut self, kind: GridEventKind, handler: impl Fn(&GridEvent) + Send + Sync + 'static) {
        self.handlers.entry(kind).or_default().push(Box::new(handler));
    }

    /// Call every handler registered for the event's kind. Returns how many ran.
    pub fn emit(&self, event: &GridEvent) -> usize {
        let Some(handlers) = self.handlers.get(&event.kind) else {
            return 0;
        };
        for handler in handlers {
            handler(event);
        }
        handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.values().all(Vec::is_empty)
    }
}

impl fmt::Debug for Handlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut counts: Vec<_> = self.handlers.iter().map(|(k, v)| (*k, v.len())).collect();
        counts.sort_by_key(|(k, _)| format!("{k:?}"));
        f.debug_struct("Handlers").field("counts", &counts).finish()
    }
}
