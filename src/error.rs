use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the filtering and scoring operations.
///
/// All errors are local to a single call; a failed call produces no
/// partial output.
#[derive(Debug, Error)]
pub enum FilterError {
    /// Required column missing, misnamed, or wrongly typed.
    #[error("schema error: {0}")]
    Schema(String),

    /// Panel file path does not resolve to an existing file.
    #[error("PoN file {} not found", .path.display())]
    PanelNotFound { path: PathBuf },

    /// Requested behavior exists in the API but is not implemented.
    #[error("not supported: {0}")]
    Unsupported(&'static str),

    /// Reference metadata could not satisfy the request.
    #[error("reference error: {0}")]
    Reference(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FilterError>;
