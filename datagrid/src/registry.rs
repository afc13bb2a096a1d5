//! The ordered list of visible columns.

use griddom::Element;

use crate::column::Column;
use crate::view::CUSTOMIZE_CLASS;

/// Ordered registry of the columns currently shown, left to right.
///
/// Each entry carries its stored width, so the stored widths always stay
/// parallel to the column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnRegistry {
    columns: Vec<Column>,
}

impl ColumnRegistry {
    /// Create a registry from columns in display order.
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Build the registry from a header row, left to right, skipping the
    /// customize-columns cell.
    ///
    /// Returns the index of the first cell that has no column class on failure.
    pub fn from_header_row(row: &Element) -> Result<Self, usize> {
        let mut columns = Vec::new();
        for (index, cell) in row
            .child_elements()
            .iter()
            .filter(|c| c.tag.is_cell())
            .enumerate()
        {
            if cell.has_class(CUSTOMIZE_CLASS) {
                continue;
            }
            columns.push(Column::from_header_cell(cell).ok_or(index)?);
        }
        Ok(Self { columns })
    }

    // -------------------------------------------------------------------------
    // Access
    // -------------------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn get(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Column> {
        self.columns.get_mut(index)
    }

    /// Column identifiers in display order.
    pub fn ids(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.id.clone()).collect()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Stored widths, parallel to the column order.
    pub fn stored_widths(&self) -> Vec<Option<i32>> {
        self.columns.iter().map(|c| c.width).collect()
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Exchange two columns, stored widths included. Out-of-range indices are
    /// ignored. Returns whether a swap happened.
    pub fn swap(&mut self, a: usize, b: usize) -> bool {
        if a >= self.columns.len() || b >= self.columns.len() || a == b {
            return false;
        }
        self.columns.swap(a, b);
        true
    }

    // -------------------------------------------------------------------------
    // Serialization
    // -------------------------------------------------------------------------

    /// Comma-joined column order, with an optional visibility toggle.
    ///
    /// A toggled id that is already registered is left out (the column is
    /// being hidden); one that is not is appended to the end (the column is
    /// being shown). Newly shown columns always land last.
    pub fn serialize(&self, toggled: Option<&str>) -> String {
        let mut ids: Vec<&str> = self
            .columns
            .iter()
            .map(|c| c.id.as_str())
            .filter(|id| Some(*id) != toggled)
            .collect();
        if let Some(id) = toggled
            && !self.contains(id)
        {
            ids.push(id);
        }
        ids.join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(ids: &[&str]) -> ColumnRegistry {
        ColumnRegistry::new(ids.iter().map(|id| Column::new(*id, *id)).collect())
    }

    #[test]
    fn test_serialize_plain_order() {
        assert_eq!(registry(&["a", "b", "c"]).serialize(None), "a,b,c");
        assert_eq!(registry(&[]).serialize(None), "");
    }

    #[test]
    fn test_serialize_toggle_removes_present() {
        assert_eq!(registry(&["a", "b", "c"]).serialize(Some("b")), "a,c");
    }

    #[test]
    fn test_serialize_toggle_appends_absent() {
        assert_eq!(registry(&["a", "b"]).serialize(Some("z")), "a,b,z");
    }

    #[test]
    fn test_toggle_pair_restores_original() {
        let original = registry(&["id", "summary"]);
        let shown = original.serialize(Some("owner"));
        assert_eq!(shown, "id,summary,owner");

        let after_show = registry(&shown.split(',').collect::<Vec<_>>());
        assert_eq!(after_show.serialize(Some("owner")), original.serialize(None));
    }

    #[test]
    fn test_swap_round_trip_restores_order_and_widths() {
        let mut reg = ColumnRegistry::new(vec![
            Column::new("a", "A").width(10),
            Column::new("b", "B"),
            Column::new("c", "C").width(30),
        ]);
        let ids = reg.ids();
        let widths = reg.stored_widths();

        assert!(reg.swap(0, 2));
        assert_eq!(reg.ids(), ["c", "b", "a"]);
        assert_eq!(reg.stored_widths(), [Some(30), None, Some(10)]);

        assert!(reg.swap(0, 2));
        assert_eq!(reg.ids(), ids);
        assert_eq!(reg.stored_widths(), widths);
    }

    #[test]
    fn test_swap_out_of_range_is_ignored() {
        let mut reg = registry(&["a", "b"]);
        assert!(!reg.swap(0, 2));
        assert!(!reg.swap(1, 1));
        assert_eq!(reg.ids(), ["a", "b"]);
    }

    #[test]
    fn test_from_header_row_skips_customize_cell() {
        let row = Element::tr()
            .child(Element::th().class("id").child(Element::text("ID")))
            .child(Element::th().class("summary").child(Element::text("Summary")))
            .child(Element::th().class(CUSTOMIZE_CLASS));
        let reg = ColumnRegistry::from_header_row(&row).unwrap();
        assert_eq!(reg.ids(), ["id", "summary"]);
        assert_eq!(reg.get(1).unwrap().label, "Summary");
    }

    #[test]
    fn test_from_header_row_reports_unnamed_cell() {
        let row = Element::tr()
            .child(Element::th().class("id"))
            .child(Element::th());
        assert_eq!(ColumnRegistry::from_header_row(&row), Err(1));
    }
}
