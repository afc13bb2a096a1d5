//! Error types

/// Problems locating the grid structure in server markup.
///
/// Apart from [`MarkupError::MissingGrid`], these are not fatal: a grid whose
/// markup cannot be modelled is shown as-is, without a synchronized header.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkupError {
    /// No element with the grid's id was found.
    #[error("no element with id `{0}` in markup")]
    MissingGrid(String),

    /// The grid root has no id of its own.
    #[error("grid root element has no id")]
    MissingId,

    /// No `table.datagrid` inside the grid root.
    #[error("grid `{0}` has no data table")]
    NoTable(String),

    /// The data table has no row of header cells.
    #[error("grid `{0}` has no header row")]
    NoHeaderRow(String),

    /// A header cell carries no class naming its column.
    #[error("header cell {index} of grid `{grid}` has no column class")]
    UnnamedColumn {
        /// Grid id.
        grid: String,
        /// Position of the cell in the header row.
        index: usize,
    },
}
