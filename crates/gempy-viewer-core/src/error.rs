//! Error types for gempy-viewer-rs.

use thiserror::Error;

use crate::grid::Direction;

/// The main error type for gempy-viewer-rs operations.
#[derive(Error, Debug)]
pub enum ViewerError {
    /// The direction string is not one of x, y or z.
    #[error("'{0}' must be a cartesian direction, i.e. x, y or z")]
    InvalidDirection(String),

    /// The cell number could not be parsed.
    #[error("'{0}' is not a cell number, expected an integer or 'mid'")]
    InvalidCellNumber(String),

    /// The requested cell lies outside the grid.
    #[error("cell {index} out of range for direction {direction} with {size} cells")]
    CellOutOfRange {
        direction: Direction,
        index: i64,
        size: usize,
    },

    /// A section with the given name was not found.
    #[error("section '{0}' not found")]
    SectionNotFound(String),

    /// The section has zero length and cannot define a projection.
    #[error("section '{0}' has identical start and stop points")]
    DegenerateSection(String),

    /// A solution array is empty.
    #[error("{0} not computed")]
    NotComputed(String),

    /// Data size mismatch.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// The grid definition is unusable.
    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    /// More axes were requested than a figure can hold.
    #[error("reached maximum of axes: requested {requested}, maximum {max}")]
    TooManyAxes { requested: usize, max: usize },

    /// Feature not ported.
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),

    /// The requested scalar array does not exist.
    #[error("scalar field '{name}' does not exist, valid fields: {available:?}")]
    ScalarFieldNotFound {
        name: String,
        available: Vec<String>,
    },

    /// The grid has no topography.
    #[error("topography not set on the grid")]
    TopographyMissing,

    /// A topology edge refers to a node without a centroid.
    #[error("topology node {0} has no centroid")]
    MissingCentroid(usize),

    /// Rendering error.
    #[error("render error: {0}")]
    RenderError(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for gempy-viewer-rs operations.
pub type Result<T> = std::result::Result<T, ViewerError>;
