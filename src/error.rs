use thiserror::Error;

//===========================================================================//

/// Result type alias for conversion and encoding operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while rendering, encoding or wrapping images.
#[derive(Debug, Error)]
pub enum Error {
    /// A requested or supplied icon size is outside `[1, 256]`.
    #[error("Invalid icon size: {0}. Size must be between 1 and 256.")]
    InvalidSize(i64),

    /// The encoder was given no images.
    #[error("Cannot encode an ICO file with no images")]
    NoImages,

    /// More images than the ICO header's 16-bit count field can describe.
    #[error("Too many images (was {0}, but max is 65535)")]
    TooManyImages(usize),

    /// The image data would push a directory offset past `u32::MAX`.
    #[error("Image data too large for ICO offsets")]
    ImageTooLarge,

    /// Zero width or height given to the SVG wrapper.
    #[error("Invalid dimensions {width}x{height} (both must be positive)")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// The render provider returned an image that isn't the requested
    /// square.
    #[error(
        "Rendered image has wrong dimensions \
         (was {width}x{height}, but should be {requested}x{requested})"
    )]
    DimensionMismatch {
        /// The square size that was requested.
        requested: u32,
        /// Actual rendered width.
        width: u32,
        /// Actual rendered height.
        height: u32,
    },

    /// The render provider couldn't read, decode or resize the input.
    #[error("Rendering failed: {0}")]
    Render(String),

    /// PNG data couldn't be parsed.
    #[error("Malformed PNG data: {0}")]
    InvalidPng(String),

    /// Writing the output failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

//===========================================================================//
