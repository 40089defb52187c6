use crate::error::{Error, Result};
use crate::size::IconSize;
use std::io::Read;

//===========================================================================//

// The signature that all PNG files start with.
const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

//===========================================================================//

/// One rendered square image, ready to be packed into an ICO file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RenderedImage {
    data: Vec<u8>,
    logical_size: IconSize,
}

impl RenderedImage {
    /// Wraps PNG-encoded `data` that was rendered at `logical_size`.  The
    /// data itself is not inspected.
    pub fn new(data: Vec<u8>, logical_size: IconSize) -> RenderedImage {
        RenderedImage { data, logical_size }
    }

    /// Returns the raw, encoded image data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the square size this image was rendered at.
    pub fn logical_size(&self) -> IconSize {
        self.logical_size
    }

    /// Returns true if the data starts with the PNG signature.
    pub fn is_png(&self) -> bool {
        self.data.starts_with(PNG_SIGNATURE)
    }

    /// Decodes just enough of the PNG data to determine its pixel size.
    pub fn png_dimensions(&self) -> Result<(u32, u32)> {
        let png_reader = read_png_info(self.data.as_slice())?;
        Ok((png_reader.info().width, png_reader.info().height))
    }
}

//===========================================================================//

pub(crate) fn read_png_info<R: Read>(reader: R) -> Result<png::Reader<R>> {
    let decoder = png::Decoder::new(reader);
    match decoder.read_info() {
        Ok(png_reader) => Ok(png_reader),
        Err(error) => invalid_png!("{}", error),
    }
}

/// Encodes row-major, top-to-bottom RGBA8 pixels as a PNG file.  The
/// `rgba_data` must have `4 * width * height` bytes.
pub fn encode_png(
    width: u32,
    height: u32,
    rgba_data: &[u8],
) -> Result<Vec<u8>> {
    let expected_data_len = (width as u64) * (height as u64) * 4;
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions { width, height });
    }
    if (rgba_data.len() as u64) != expected_data_len {
        invalid_png!(
            "Invalid data length (was {}, but must be {} for {}x{} image)",
            rgba_data.len(),
            expected_data_len,
            width,
            height
        );
    }
    let mut data = Vec::new();
    match encode_png_enc(width, height, rgba_data, &mut data) {
        Ok(()) => Ok(data),
        Err(png::EncodingError::IoError(error)) => Err(Error::Io(error)),
        Err(png::EncodingError::Format(error)) => {
            invalid_png!("PNG format error: {}", error);
        }
        Err(png::EncodingError::LimitsExceeded) => {
            invalid_png!("PNG limits exceeded");
        }
        Err(png::EncodingError::Parameter(error)) => {
            invalid_png!("PNG parameter error: {}", error);
        }
    }
}

fn encode_png_enc(
    width: u32,
    height: u32,
    rgba_data: &[u8],
    output: &mut Vec<u8>,
) -> std::result::Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(output, width, height);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_color(png::ColorType::Rgba);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(rgba_data)?;
    writer.finish()
}

//===========================================================================//


//===========================================================================//
