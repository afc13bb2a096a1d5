//! Column layout management for server-rendered data grids.
//!
//! A [`Grid`] is built from the grid markup a server returns. It keeps an
//! explicit model of the visible columns and body rows, renders that model
//! as a fixed header table above a scrollable body table, and lets the user
//! reorder columns by dragging header cells. Layout changes are expressed as
//! [`LayoutRequest`]s for a persistence client to send.

pub mod column;
pub mod drag;
pub mod error;
pub mod events;
pub mod measure;
pub mod model;
pub mod registry;
pub mod request;
pub mod splitter;
pub mod view;

mod grid;

pub use column::Column;
pub use drag::{DragController, DragSession};
pub use error::MarkupError;
pub use events::{GridEvent, GridEventKind, Handlers};
pub use grid::Grid;
pub use measure::{Measure, TableLayout};
pub use model::GridModel;
pub use registry::ColumnRegistry;
pub use request::LayoutRequest;
pub use view::{ViewIds, ViewState};
