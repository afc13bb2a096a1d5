//! The logical grid: columns, rows and surrounding chrome.

use griddom::{Element, Tag};

use crate::column::Column;
use crate::error::MarkupError;
use crate::registry::ColumnRegistry;
use crate::view::{CUSTOMIZE_CLASS, DATA_TABLE_CLASS, MENU_COLUMN_ATTR, PAGINATOR_CLASS};

/// An entry in the column customization menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    /// Column identifier.
    pub id: String,
    /// Human-readable name.
    pub label: String,
}

/// A single logical table, rendered into a header view and a body view.
#[derive(Debug, Clone, PartialEq)]
pub struct GridModel {
    /// Grid element id.
    pub id: String,
    /// Visible columns in display order.
    pub columns: ColumnRegistry,
    /// Body rows as `<tr>` elements. Cell `i` of a row sits under column `i`.
    pub rows: Vec<Element>,
    /// The customize-columns header cell, if the markup has one.
    pub customize: Option<Element>,
    /// Stored width of the customize column.
    pub customize_width: Option<i32>,
    /// Paginator shown below the body.
    pub paginator: Option<Element>,
    /// Every column the user may show or hide.
    pub menu: Vec<MenuEntry>,
}

impl GridModel {
    /// Create a model with the given columns and no rows.
    pub fn new(id: impl Into<String>, columns: Vec<Column>) -> Self {
        let columns = ColumnRegistry::new(columns);
        let menu = menu_from_columns(&columns);
        Self {
            id: id.into(),
            columns,
            rows: Vec::new(),
            customize: Some(Element::th().class(CUSTOMIZE_CLASS)),
            customize_width: None,
            paginator: None,
            menu,
        }
    }

    /// Add a body row of plain text cells.
    pub fn with_row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row = Element::tr().children(
            cells
                .into_iter()
                .map(|text| Element::td().child(Element::text(text))),
        );
        self.rows.push(row);
        self
    }

    /// Set the paginator element.
    pub fn with_paginator(mut self, paginator: Element) -> Self {
        self.paginator = Some(paginator);
        self
    }

    /// Read the model from grid markup rooted at `root`.
    ///
    /// This is the only place the markup is scraped; afterwards the model is
    /// the source of truth and the markup is re-derived from it.
    pub fn from_markup(root: &Element) -> Result<Self, MarkupError> {
        if !root.has_explicit_id() {
            return Err(MarkupError::MissingId);
        }
        let id = root.id.clone();

        let table = root
            .find_tag_class(&Tag::Table, DATA_TABLE_CLASS)
            .ok_or_else(|| MarkupError::NoTable(id.clone()))?;
        let rows = table.table_rows();
        let header_index = rows
            .iter()
            .position(|r| r.child_elements().iter().any(|c| c.tag == Tag::Th))
            .ok_or_else(|| MarkupError::NoHeaderRow(id.clone()))?;
        let header = rows[header_index];

        let mut columns =
            ColumnRegistry::from_header_row(header).map_err(|index| MarkupError::UnnamedColumn {
                grid: id.clone(),
                index,
            })?;
        let customize = header
            .child_elements()
            .iter()
            .find(|c| c.tag.is_cell() && c.has_class(CUSTOMIZE_CLASS))
            .cloned();

        let cols = table.descendants_where(&|e: &Element| e.tag == Tag::Col);
        for (index, col) in cols.iter().enumerate() {
            if let Some(column) = columns.get_mut(index) {
                column.width = col.style.width;
            }
        }
        let customize_width = if customize.is_some() {
            cols.get(columns.len()).and_then(|c| c.style.width)
        } else {
            None
        };

        let body_rows = rows[header_index + 1..]
            .iter()
            .map(|r| (*r).clone())
            .collect();

        let paginator = root
            .find(&|e: &Element| e.has_class(PAGINATOR_CLASS))
            .cloned();

        let menu_id = format!("{id}-menu");
        let menu = root
            .find_by_id(&menu_id)
            .map(menu_from_element)
            .filter(|entries| !entries.is_empty())
            .unwrap_or_else(|| menu_from_columns(&columns));

        Ok(Self {
            id,
            columns,
            rows: body_rows,
            customize,
            customize_width,
            paginator,
            menu,
        })
    }

    /// Number of physical columns, including the customize column.
    pub fn physical_column_count(&self) -> usize {
        self.columns.len() + usize::from(self.customize.is_some())
    }

    /// Exchange two columns in the registry and in every body row.
    ///
    /// Rows too short to hold both positions (full-width spanning rows, for
    /// instance) are left alone. Returns whether a swap happened.
    pub fn swap_columns(&mut self, a: usize, b: usize) -> bool {
        if !self.columns.swap(a, b) {
            return false;
        }
        for row in &mut self.rows {
            let cells: Vec<usize> = row
                .child_elements()
                .iter()
                .enumerate()
                .filter(|(_, c)| c.tag.is_cell())
                .map(|(i, _)| i)
                .collect();
            if let (Some(&x), Some(&y)) = (cells.get(a), cells.get(b)) {
                row.child_elements_mut().swap(x, y);
            }
        }
        true
    }
}

fn menu_from_element(menu: &Element) -> Vec<MenuEntry> {
    menu.descendants_where(&|e: &Element| e.get_attr(MENU_COLUMN_ATTR).is_some())
        .into_iter()
        .filter_map(|e| {
            Some(MenuEntry {
                id: e.get_attr(MENU_COLUMN_ATTR)?.to_string(),
                label: e.text_content(),
            })
        })
        .collect()
}

fn menu_from_columns(columns: &ColumnRegistry) -> Vec<MenuEntry> {
    columns
        .columns()
        .iter()
        .map(|c| MenuEntry {
            id: c.id.clone(),
            label: c.label.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell_texts(row: &Element) -> Vec<String> {
        row.child_elements().iter().map(Element::text_content).collect()
    }

    #[test]
    fn test_swap_columns_moves_row_cells() {
        let mut model = GridModel::new(
            "grid",
            vec![Column::new("a", "A"), Column::new("b", "B"), Column::new("c", "C")],
        )
        .with_row(["1", "2", "3"]);

        assert!(model.swap_columns(0, 2));
        assert_eq!(model.columns.ids(), ["c", "b", "a"]);
        assert_eq!(cell_texts(&model.rows[0]), ["3", "2", "1"]);
    }

    #[test]
    fn test_swap_columns_skips_spanning_rows() {
        let mut model = GridModel::new("grid", vec![Column::new("a", "A"), Column::new("b", "B")]);
        model.rows.push(
            Element::tr().child(
                Element::td()
                    .attr("colspan", "2")
                    .child(Element::text("group")),
            ),
        );

        assert!(model.swap_columns(0, 1));
        assert_eq!(cell_texts(&model.rows[0]), ["group"]);
        assert_eq!(model.rows[0].child_elements()[0].colspan(), 2);
    }

    #[test]
    fn test_swap_columns_carries_colspan() {
        let mut model = GridModel::new(
            "grid",
            vec![Column::new("a", "A"), Column::new("b", "B"), Column::new("c", "C")],
        );
        model.rows.push(
            Element::tr()
                .child(Element::td().attr("colspan", "2").child(Element::text("wide")))
                .child(Element::td().child(Element::text("x"))),
        );

        assert!(model.swap_columns(0, 1));
        assert_eq!(cell_texts(&model.rows[0]), ["x", "wide"]);
        assert_eq!(model.rows[0].child_elements()[1].colspan(), 2);
    }

    #[test]
    fn test_physical_column_count_includes_customize() {
        let model = GridModel::new("grid", vec![Column::new("a", "A")]);
        assert_eq!(model.physical_column_count(), 2);
    }
}
