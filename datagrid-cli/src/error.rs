//! Error types

use std::path::PathBuf;

use datagrid_client::error::{ApiError, Error as SessionError};

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Grid {0} has no column header")]
    Inert(String),

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Failed to open log file {path}: {source}")]
    Log {
        path: PathBuf,
        source: std::io::Error,
    },
}
