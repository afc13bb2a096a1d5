//! Error types

mod api;

pub use api::*;

use datagrid::MarkupError;

/// Errors returned by a [`GridSession`](crate::GridSession).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The response did not contain the grid.
    #[error(transparent)]
    Markup(#[from] MarkupError),
}
