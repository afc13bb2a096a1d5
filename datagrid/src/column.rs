//! Column definitions.

use griddom::Element;

/// A visible grid column.
///
/// The column's ordinal position is its index in the
/// [`ColumnRegistry`](crate::ColumnRegistry).
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Identifier taken from the header cell's first class name.
    pub id: String,
    /// Header text.
    pub label: String,
    /// Width stored in the markup's `<col>`, if any.
    pub width: Option<i32>,
    /// The header cell as delivered by the server (sort links etc).
    pub header: Element,
}

impl Column {
    /// Create a column with a plain text header.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        let id = id.into();
        let label = label.into();
        let header = Element::th()
            .class(id.clone())
            .child(Element::text(label.clone()));
        Self {
            id,
            label,
            width: None,
            header,
        }
    }

    /// Create a column from a header cell. Returns `None` when the cell has
    /// no class to name the column.
    pub fn from_header_cell(cell: &Element) -> Option<Self> {
        let id = cell.classes.first()?.clone();
        Some(Self {
            id,
            label: cell.text_content(),
            width: None,
            header: cell.clone(),
        })
    }

    /// Set the stored width.
    pub fn width(mut self, width: i32) -> Self {
        self.width = Some(width);
        self
    }
}
