//! Rendering the grid model into a fixed header table and a scrollable body.
//!
//! Both tables are derived from one [`GridModel`]. The body table keeps a
//! copy of the header row so its columns size naturally; that row is hidden
//! except while column widths are being measured.

use griddom::{Display, Element, Overflow, Tag, Visibility};

use crate::model::GridModel;

/// Class of the server-rendered data table.
pub const DATA_TABLE_CLASS: &str = "datagrid";
/// Class of the customize-columns header cell.
pub const CUSTOMIZE_CLASS: &str = "edit-columns";
/// Class of the paginator element.
pub const PAGINATOR_CLASS: &str = "paginator";
/// Attribute naming the column of a menu entry.
pub const MENU_COLUMN_ATTR: &str = "data-column-id";

/// Transient presentation state, separate from the model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Show the body table's copy of the header row (for measuring).
    pub header_row_visible: bool,
    /// Column being dragged; its header cell is hidden but keeps its space.
    pub dragging: Option<usize>,
    /// Synchronized widths per physical column, customize column last.
    pub widths: Option<Vec<i32>>,
    /// Height of the scrollable body container.
    pub body_height: Option<i32>,
    /// Whether the column menu is open.
    pub menu_open: bool,
}

/// Element ids of the rendered grid, derived from the grid id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewIds {
    grid: String,
}

impl ViewIds {
    pub fn new(grid: impl Into<String>) -> Self {
        Self { grid: grid.into() }
    }

    pub fn grid(&self) -> &str {
        &self.grid
    }

    pub fn head_table(&self) -> String {
        format!("{}-head", self.grid)
    }

    /// Header cell in the fixed header table.
    pub fn head_cell(&self, column: &str) -> String {
        format!("{}-head-cell-{column}", self.grid)
    }

    pub fn head_customize(&self) -> String {
        format!("{}-head-edit", self.grid)
    }

    /// Header cell in the body table's hidden copy of the header row.
    pub fn measure_cell(&self, column: &str) -> String {
        format!("{}-measure-cell-{column}", self.grid)
    }

    pub fn measure_customize(&self) -> String {
        format!("{}-measure-edit", self.grid)
    }

    pub fn body(&self) -> String {
        format!("{}-body", self.grid)
    }

    pub fn body_table(&self) -> String {
        format!("{}-body-table", self.grid)
    }

    pub fn paginator(&self) -> String {
        format!("{}-paginator", self.grid)
    }

    pub fn menu(&self) -> String {
        format!("{}-menu", self.grid)
    }

    pub fn menu_item(&self, column: &str) -> String {
        format!("{}-menu-item-{column}", self.grid)
    }

    /// Column id of a fixed header cell id.
    pub fn column_of_head_cell<'a>(&self, id: &'a str) -> Option<&'a str> {
        id.strip_prefix(self.grid.as_str())?
            .strip_prefix("-head-cell-")
    }

    /// Column id of a menu item id.
    pub fn column_of_menu_item<'a>(&self, id: &'a str) -> Option<&'a str> {
        id.strip_prefix(self.grid.as_str())?
            .strip_prefix("-menu-item-")
    }
}

/// Render the whole grid.
pub fn render(model: &GridModel, state: &ViewState) -> Element {
    let ids = ViewIds::new(model.id.clone());

    let mut main = Element::div()
        .class("datagrid-main")
        .child(render_head_table(model, state, &ids))
        .child(render_body(model, state, &ids));
    if let Some(paginator) = &model.paginator {
        main = main.child(paginator.clone().id(ids.paginator()));
    }

    Element::div()
        .id(model.id.clone())
        .class("datagrid-wrapper")
        .child(main)
        .child(render_menu(model, state, &ids))
}

fn render_colgroup(model: &GridModel, state: &ViewState) -> Element {
    let count = model.physical_column_count();
    let cols = (0..count).map(|i| {
        let width = match &state.widths {
            Some(widths) => widths.get(i).copied(),
            None if i < model.columns.len() => model.columns.get(i).and_then(|c| c.width),
            None => model.customize_width,
        };
        let col = Element::col();
        match width {
            Some(w) => col.width(w),
            None => col,
        }
    });
    Element::new(Tag::Colgroup).children(cols)
}

fn header_cells(
    model: &GridModel,
    state: &ViewState,
    cell_id: impl Fn(&str) -> String,
    customize_id: String,
    interactive: bool,
) -> Vec<Element> {
    let mut cells: Vec<Element> = model
        .columns
        .columns()
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let mut cell = column.header.clone_fresh().id(cell_id(&column.id));
            if interactive {
                cell.draggable = true;
                if state.dragging == Some(index) {
                    cell.style.visibility = Visibility::Hidden;
                }
            }
            cell
        })
        .collect();
    if let Some(customize) = &model.customize {
        let cell = customize.clone_fresh().id(customize_id);
        cells.push(cell.clickable(interactive));
    }
    cells
}

fn render_head_table(model: &GridModel, state: &ViewState, ids: &ViewIds) -> Element {
    let row = Element::tr().children(header_cells(
        model,
        state,
        |c| ids.head_cell(c),
        ids.head_customize(),
        true,
    ));
    Element::table()
        .id(ids.head_table())
        .class("datagrid-head")
        .child(render_colgroup(model, state))
        .child(Element::new(Tag::Thead).child(row))
}

fn render_body(model: &GridModel, state: &ViewState, ids: &ViewIds) -> Element {
    let mut measure_row = Element::tr().class("datagrid-header").children(header_cells(
        model,
        state,
        |c| ids.measure_cell(c),
        ids.measure_customize(),
        false,
    ));
    if !state.header_row_visible {
        measure_row = measure_row.display(Display::None);
    }

    let table = Element::table()
        .id(ids.body_table())
        .class(DATA_TABLE_CLASS)
        .child(render_colgroup(model, state))
        .child(Element::new(Tag::Thead).child(measure_row))
        .child(Element::new(Tag::Tbody).children(model.rows.iter().cloned()));

    let mut body = Element::div()
        .id(ids.body())
        .class("datagrid-body-container")
        .child(table);
    body.style.overflow_y = Overflow::Auto;
    if let Some(height) = state.body_height {
        body = body.height(height);
    }
    body
}

fn render_menu(model: &GridModel, state: &ViewState, ids: &ViewIds) -> Element {
    let items = model.menu.iter().map(|entry| {
        let mut checkbox = Element::new(Tag::Input).attr("type", "checkbox");
        if model.columns.contains(&entry.id) {
            checkbox = checkbox.attr("checked", "checked");
        }
        Element::div()
            .id(ids.menu_item(&entry.id))
            .class("datagrid-menu-item")
            .attr(MENU_COLUMN_ATTR, entry.id.clone())
            .clickable(true)
            .child(checkbox)
            .child(
                Element::new(Tag::Label).child(Element::text(entry.label.clone())),
            )
    });
    let menu = Element::div()
        .id(ids.menu())
        .class("datagrid-menu")
        .children(items);
    if state.menu_open {
        menu
    } else {
        menu.display(Display::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Column;

    fn model() -> GridModel {
        GridModel::new("g", vec![Column::new("a", "A"), Column::new("b", "B")]).with_row(["1", "2"])
    }

    #[test]
    fn test_ids_round_trip() {
        let ids = ViewIds::new("g");
        assert_eq!(ids.column_of_head_cell(&ids.head_cell("owner")), Some("owner"));
        assert_eq!(ids.column_of_menu_item(&ids.menu_item("owner")), Some("owner"));
        assert_eq!(ids.column_of_head_cell(&ids.measure_cell("owner")), None);
        assert_eq!(ids.column_of_head_cell("other-head-cell-owner"), None);
    }

    #[test]
    fn test_measure_row_hidden_by_default() {
        let view = render(&model(), &ViewState::default());
        let ids = ViewIds::new("g");
        let cell = view.find_by_id(&ids.measure_cell("a")).unwrap();
        assert!(cell.style.is_displayed());
        let row = view
            .find(&|e: &Element| e.has_class("datagrid-header"))
            .unwrap();
        assert_eq!(row.style.display, Display::None);
    }

    #[test]
    fn test_dragged_cell_is_hidden_not_removed() {
        let state = ViewState {
            dragging: Some(1),
            ..ViewState::default()
        };
        let view = render(&model(), &state);
        let ids = ViewIds::new("g");
        let cell = view.find_by_id(&ids.head_cell("b")).unwrap();
        assert_eq!(cell.style.visibility, Visibility::Hidden);
        assert!(cell.style.is_displayed());
        assert!(view.find_by_id(&ids.head_cell("a")).unwrap().style.is_visible());
    }

    #[test]
    fn test_colgroups_share_widths() {
        let state = ViewState {
            widths: Some(vec![40, 50, 20]),
            ..ViewState::default()
        };
        let view = render(&model(), &state);
        let groups = view.descendants_where(&|e: &Element| e.tag == Tag::Colgroup);
        assert_eq!(groups.len(), 2);
        for group in groups {
            let widths: Vec<_> = group
                .child_elements()
                .iter()
                .map(|c| c.style.width)
                .collect();
            assert_eq!(widths, [Some(40), Some(50), Some(20)]);
        }
    }

    #[test]
    fn test_menu_marks_visible_columns() {
        let mut model = model();
        model.menu.push(crate::model::MenuEntry {
            id: "owner".to_string(),
            label: "Owner".to_string(),
        });
        let view = render(&model, &ViewState::default());
        let ids = ViewIds::new("g");
        let checked = |col: &str| {
            view.find_by_id(&ids.menu_item(col))
                .unwrap()
                .child_elements()[0]
                .get_attr("checked")
                .is_some()
        };
        assert!(checked("a"));
        assert!(!checked("owner"));
    }
}
