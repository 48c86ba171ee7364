//! Rendering error types.

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

/// Errors that can occur during rendering operations.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The figure has a zero-sized canvas.
    #[error("invalid figure size {width}x{height}")]
    InvalidFigureSize { width: u32, height: u32 },

    /// A color string could not be parsed.
    #[error("invalid color '{0}'")]
    InvalidColor(String),

    /// No color map is registered under the name.
    #[error("unknown color map '{0}'")]
    UnknownColorMap(String),

    /// The pixel buffer does not match the image dimensions.
    #[error("invalid image data")]
    InvalidImageData,

    /// The output file extension is not a supported image format.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// The plotting backend failed to draw.
    #[error("drawing error: {0}")]
    Drawing(String),

    /// Image encoding error.
    #[error("image encoding error: {0}")]
    ImageError(#[from] image::ImageError),

    /// Failed to write the output.
    #[error("failed to save image: {0}")]
    IoError(#[from] std::io::Error),
}

/// A specialized Result type for rendering operations.
pub type RenderResult<T> = std::result::Result<T, RenderError>;

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for RenderError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        RenderError::Drawing(err.to_string())
    }
}

impl From<RenderError> for gempy_viewer_core::ViewerError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::IoError(e) => gempy_viewer_core::ViewerError::IoError(e),
            other => gempy_viewer_core::ViewerError::RenderError(other.to_string()),
        }
    }
}
