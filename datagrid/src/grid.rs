//! A grid instance.

use griddom::{Element, Event, LayoutResult, MouseButton, Rect};
use log::{debug, info};

use crate::drag::{DragController, compute_midpoints};
use crate::error::MarkupError;
use crate::events::{GridEvent, GridEventKind, Handlers};
use crate::measure::{Measure, TableLayout};
use crate::model::GridModel;
use crate::registry::ColumnRegistry;
use crate::request::LayoutRequest;
use crate::splitter::HeaderSplitter;
use crate::view::{self, ViewIds, ViewState};

/// Default area a grid is laid out in until the host says otherwise.
const DEFAULT_VIEWPORT: Rect = Rect::new(0, 0, 1024, 768);

/// One data grid on a page.
///
/// Every grid owns its own state; nothing is shared between instances.
/// A grid whose markup has no header row is *inert*: it shows the markup
/// unchanged and ignores input.
pub struct Grid {
    id: String,
    model: Option<GridModel>,
    /// Markup shown when the grid is inert.
    source: Element,
    state: ViewState,
    splitter: HeaderSplitter,
    drag: DragController,
    handlers: Handlers,
    measure: Box<dyn Measure>,
    viewport: Rect,
    view: Element,
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("id", &self.id)
            .field("columns", &self.columns())
            .field("state", &self.state)
            .field("drag", &self.drag)
            .field("handlers", &self.handlers)
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}

impl Grid {
    /// Build a grid from its markup root.
    ///
    /// Markup without a usable header row yields an inert grid.
    pub fn new(root: Element) -> Self {
        let id = root.id.clone();
        let model = match GridModel::from_markup(&root) {
            Ok(model) => Some(model),
            Err(e) => {
                debug!("grid {id} rendered without split header: {e}");
                None
            }
        };
        Self::assemble(id, model, root)
    }

    /// Build a grid directly from a model.
    pub fn from_model(model: GridModel) -> Self {
        let id = model.id.clone();
        let source = Element::div().id(id.clone());
        Self::assemble(id, Some(model), source)
    }

    /// Find the element with id `grid_id` in an HTML fragment and build a
    /// grid from it.
    pub fn from_html(html: &str, grid_id: &str) -> Result<Self, MarkupError> {
        let root = griddom::parse_fragment(html)
            .into_iter()
            .find_map(|el| el.find_by_id(grid_id).cloned())
            .ok_or_else(|| MarkupError::MissingGrid(grid_id.to_string()))?;
        Ok(Self::new(root))
    }

    fn assemble(id: String, model: Option<GridModel>, source: Element) -> Self {
        let mut grid = Self {
            id,
            model,
            view: source.clone(),
            source,
            state: ViewState::default(),
            splitter: HeaderSplitter::new(),
            drag: DragController::new(),
            handlers: Handlers::new(),
            measure: Box::new(TableLayout::default()),
            viewport: DEFAULT_VIEWPORT,
        };
        grid.sync_column_sizes();
        grid
    }

    /// Use a different layout engine for measuring.
    pub fn with_measure(mut self, measure: impl Measure + 'static) -> Self {
        self.measure = Box::new(measure);
        self.sync_column_sizes();
        self
    }

    /// Set the area the grid is laid out in.
    pub fn with_viewport(mut self, viewport: Rect) -> Self {
        self.viewport = viewport;
        self.sync_column_sizes();
        self
    }

    /// Take over the handlers, layout engine, viewport and body height of a
    /// grid this one replaces.
    pub fn adopt(&mut self, previous: Grid) {
        self.handlers = previous.handlers;
        self.measure = previous.measure;
        self.viewport = previous.viewport;
        self.splitter = previous.splitter;
        self.state.body_height = previous.state.body_height;
        self.resplit();
    }

    // -------------------------------------------------------------------------
    // Access
    // -------------------------------------------------------------------------

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether the grid has a synchronized header and reorderable columns.
    pub fn is_active(&self) -> bool {
        self.model.is_some()
    }

    pub fn model(&self) -> Option<&GridModel> {
        self.model.as_ref()
    }

    pub fn registry(&self) -> Option<&ColumnRegistry> {
        self.model.as_ref().map(|m| &m.columns)
    }

    /// Visible column ids in display order.
    pub fn columns(&self) -> Vec<String> {
        self.registry().map(ColumnRegistry::ids).unwrap_or_default()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn ids(&self) -> ViewIds {
        ViewIds::new(self.id.clone())
    }

    /// The rendered grid.
    pub fn view(&self) -> &Element {
        &self.view
    }

    pub fn to_html(&self) -> String {
        griddom::to_html(&self.view)
    }

    /// Lay out the current view.
    pub fn layout(&self) -> LayoutResult {
        self.measure.measure(&self.view, self.viewport)
    }

    // -------------------------------------------------------------------------
    // Handlers
    // -------------------------------------------------------------------------

    /// Register a handler for one kind of grid event.
    pub fn on(&mut self, kind: GridEventKind, handler: impl Fn(&GridEvent) + Send + Sync + 'static) {
        self.handlers.on(kind, handler);
    }

    fn emit(&self, kind: GridEventKind, column: Option<&str>) {
        let mut event = GridEvent::new(kind, self.id.clone(), self.columns());
        if let Some(column) = column {
            event = event.with_column(column);
        }
        self.handlers.emit(&event);
    }

    /// Announce that the grid was reloaded from the server.
    pub fn emit_reloaded(&self) {
        self.emit(GridEventKind::Reloaded, None);
    }

    // -------------------------------------------------------------------------
    // Sizing
    // -------------------------------------------------------------------------

    fn rerender(&mut self) {
        self.view = match &self.model {
            Some(model) => view::render(model, &self.state),
            None => self.source.clone(),
        };
    }

    /// Re-derive both views with synchronized column widths.
    pub fn sync_column_sizes(&mut self) {
        if let Some(model) = &self.model {
            self.splitter
                .sync_column_sizes(model, &mut self.state, self.measure.as_ref(), self.viewport);
        }
        self.rerender();
    }

    /// Fit the scrollable body into `available_height` pixels.
    pub fn resize_to_fit(&mut self, available_height: i32) -> Option<i32> {
        let model = self.model.as_ref()?;
        let height = self.splitter.resize_to_fit(
            model,
            &mut self.state,
            self.measure.as_ref(),
            self.viewport,
            available_height,
        );
        self.rerender();
        Some(height)
    }

    /// Handle a window resize. Only width changes cause work.
    pub fn on_window_resize(&mut self, width: i32, height: i32) -> bool {
        if !self.splitter.window_width_changed(width) {
            return false;
        }
        self.viewport.width = (width - self.viewport.x).max(0);
        self.viewport.height = (height - self.viewport.y).max(0);
        self.resize_to_fit(self.viewport.height);
        true
    }

    /// Re-run the header split against the current body, as after a
    /// header-only reload.
    pub fn resplit(&mut self) {
        self.state.header_row_visible = false;
        self.state.dragging = None;
        match self.state.body_height {
            Some(_) => {
                self.resize_to_fit(self.viewport.height);
            }
            None => self.sync_column_sizes(),
        }
    }

    // -------------------------------------------------------------------------
    // Dragging
    // -------------------------------------------------------------------------

    /// Header cell rects of the fixed header table, by registry index.
    fn header_cell_rects(&self) -> Vec<Rect> {
        let ids = self.ids();
        let layout = self.layout();
        self.columns()
            .iter()
            .map(|c| layout.get(&ids.head_cell(c)).copied().unwrap_or_default())
            .collect()
    }

    fn midpoints(&self) -> Vec<i32> {
        let dragged = self.drag.session().map(|s| (s.index, s.width));
        compute_midpoints(&self.header_cell_rects(), dragged)
    }

    /// Start dragging `column`, grabbed at page x `pointer_x`.
    pub fn begin_drag(&mut self, column: &str, pointer_x: i32) -> bool {
        if self.drag.is_dragging() {
            return false;
        }
        let Some(index) = self.registry().and_then(|r| r.position(column)) else {
            return false;
        };

        // Measure before hiding the cell.
        let cells = self.header_cell_rects();
        let Some(cell) = cells.get(index).copied() else {
            return false;
        };
        let midpoints = compute_midpoints(&cells, Some((index, cell.width)));
        self.drag.start(index, cell, pointer_x, midpoints);

        self.state.dragging = Some(index);
        self.rerender();
        debug!("grid {}: drag started on {column}", self.id);
        self.emit(GridEventKind::DragStarted, Some(column));
        true
    }

    /// Move the pointer to page x `x`. Returns whether a swap happened.
    pub fn drag_to(&mut self, x: i32) -> bool {
        let Some(target) = self.drag.on_move(x) else {
            return false;
        };
        let Some(from) = self.drag.session().map(|s| s.index) else {
            return false;
        };
        let Some(model) = self.model.as_mut() else {
            return false;
        };
        if !model.swap_columns(from, target) {
            return false;
        }
        if let Some(widths) = self.state.widths.as_mut() {
            widths.swap(from, target);
        }
        self.state.dragging = Some(target);
        self.rerender();

        // Every position may have moved; recompute all midpoints.
        let cells = self.header_cell_rects();
        let width = self.drag.session().map_or(0, |s| s.width);
        self.drag
            .swapped(target, compute_midpoints(&cells, Some((target, width))));
        debug!("grid {}: swapped columns {from} and {target}", self.id);
        true
    }

    /// Drop the dragged column. Returns a full-reload request when the
    /// column order changed.
    pub fn drop_column(&mut self) -> Option<LayoutRequest> {
        let session = self.drag.finish()?;
        self.state.dragging = None;
        self.rerender();

        let column = self.columns().get(session.index).cloned();
        self.emit(GridEventKind::DragEnded, column.as_deref());
        if !session.changed {
            return None;
        }

        let csv = self.registry()?.serialize(None);
        info!("grid {}: columns reordered to {csv}", self.id);
        self.emit(GridEventKind::ColumnsReordered, column.as_deref());
        Some(LayoutRequest::column_change(self.id.clone(), csv, true))
    }

    // -------------------------------------------------------------------------
    // Layout requests
    // -------------------------------------------------------------------------

    /// Request showing a hidden column or hiding a shown one.
    pub fn toggle_request(&self, column: &str) -> Option<LayoutRequest> {
        let csv = self.registry()?.serialize(Some(column));
        Some(LayoutRequest::column_change(self.id.clone(), csv, true))
    }

    /// Request a full reload with the current columns.
    pub fn reload_request(&self) -> LayoutRequest {
        LayoutRequest::reload(self.id.clone())
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    fn resolve_target(&self, target: Option<&str>, x: i32, y: i32) -> Option<String> {
        match target {
            Some(id) => Some(id.to_string()),
            None => griddom::hit_test(&self.layout(), &self.view, x, y),
        }
    }

    /// Feed an input event to the grid. Returns a layout request when the
    /// event calls for one.
    pub fn handle(&mut self, event: &Event) -> Option<LayoutRequest> {
        if !self.is_active() {
            return None;
        }
        let ids = self.ids();
        match event {
            Event::DragStart { target, x, y } => {
                let target = self.resolve_target(target.as_deref(), *x, *y)?;
                let column = ids.column_of_head_cell(&target)?.to_string();
                self.begin_drag(&column, *x);
                None
            }
            Event::Drag { x, .. } => {
                self.drag_to(*x);
                None
            }
            Event::Drop { .. } => self.drop_column(),
            Event::Click {
                target,
                x,
                y,
                button: MouseButton::Left,
            } => {
                let target = self.resolve_target(target.as_deref(), *x, *y)?;
                if target == ids.head_customize() {
                    self.state.menu_open = !self.state.menu_open;
                    self.rerender();
                    self.emit(GridEventKind::MenuToggled, None);
                    return None;
                }
                let column = ids.column_of_menu_item(&target)?.to_string();
                let request = self.toggle_request(&column)?;
                self.emit(GridEventKind::ColumnToggled, Some(&column));
                Some(request)
            }
            Event::Click { .. } => None,
            Event::Resize { width, height } => {
                self.on_window_resize(*width, *height);
                None
            }
        }
    }
}
