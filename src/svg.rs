use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

//===========================================================================//

/// The prefix of the data URI that the embedded image is stored under.
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

//===========================================================================//

/// Wraps PNG data in a minimal SVG document that embeds it as a base64 data
/// URI.  The PNG contents are not inspected; `width` and `height` are written
/// as given and must both be nonzero.
pub fn wrap(png: &[u8], width: u32, height: u32) -> Result<String> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions { width, height });
    }
    let payload = STANDARD.encode(png);
    Ok(format!(
        "<svg width=\"{w}\" height=\"{h}\" \
         xmlns=\"http://www.w3.org/2000/svg\" \
         xmlns:xlink=\"http://www.w3.org/1999/xlink\">\n  \
         <image width=\"{w}\" height=\"{h}\" \
         xlink:href=\"{prefix}{payload}\" />\n\
         </svg>",
        w = width,
        h = height,
        prefix = PNG_DATA_URI_PREFIX,
        payload = payload,
    ))
}

//===========================================================================//


//===========================================================================//
