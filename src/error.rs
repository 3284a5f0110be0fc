use thiserror::Error;

/// Errors raised by a tile grid when resolving geometry for a coordinate,
/// or when validating grid configuration at construction time.
#[derive(Debug, Clone, Error)]
pub enum GridError {
    /// The grid has no resolution for the requested zoom level.
    #[error("zoom {zoom} outside grid range 0..={max_zoom}")]
    ZoomOutOfRange { zoom: u32, max_zoom: u32 },

    /// The grid was configured without any resolutions.
    #[error("grid geometry has an empty resolution table")]
    EmptyResolutions,

    /// Resolutions must strictly decrease from one zoom level to the next.
    #[error("resolutions must strictly decrease: {previous} -> {next} at zoom {zoom}")]
    NonDecreasingResolutions { zoom: u32, previous: f64, next: f64 },

    /// The grid was configured with a zero tile size.
    #[error("tile size must be non-zero")]
    ZeroTileSize,
}

/// Failure reported by a draw procedure.
///
/// Draw procedures are trusted: there is no taxonomy of render-time errors
/// beyond what the procedure itself reports. When a draw fails, nothing is
/// cached for that (tile, context) slot and the next request retries the
/// draw from scratch.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct DrawError {
    message: String,
}

impl DrawError {
    /// Create a draw error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The failure message supplied by the draw procedure.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors returned when requesting a tile image.
///
/// Both variants are transparent: grid errors propagate unchanged from the
/// grid, draw errors unchanged from the draw procedure.
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Draw(#[from] DrawError),
}
