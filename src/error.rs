use thiserror::Error;

/// Failures the icon driver recognizes and reports by kind.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IconError {
    #[error("Unknown icon type: {name}")]
    UnknownIcon { name: String },
    #[error("Drawing backend could not allocate a {width}x{height} canvas")]
    CanvasUnavailable { width: u32, height: u32 },
}
