//! Layout persistence client for data grids.
//!
//! A [`GridSession`] owns one [`Grid`](datagrid::Grid) together with the
//! page location it was loaded from. Layout requests produced by the grid
//! are sent to the server, and the grid is replaced or re-split with the
//! response.

pub mod error;

mod fetch;
mod session;

pub use fetch::*;
pub use session::*;
