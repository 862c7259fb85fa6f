use thiserror::Error;

/// Errors that can occur while building a scene or rendering a frame.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(&'static str),

    #[error("invalid viewport {width}x{height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid camera: {0}")]
    InvalidCamera(&'static str),

    #[error("cannot take {requested} samples from a pattern of {available}")]
    InvalidSampling { requested: usize, available: usize },

    #[error("material index {index} out of range ({count} materials)")]
    MaterialIndex { index: usize, count: usize },

    #[error("non-finite color at pixel ({x}, {y})")]
    NonFinite { x: u32, y: u32 },
}

pub type Result<T> = std::result::Result<T, RenderError>;
