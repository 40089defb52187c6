use crate::error::Result;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

//===========================================================================//

/// The input to a render: either a file on disk or an in-memory encoded
/// image.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ImageSource {
    /// An image file to be read from disk.
    Path(PathBuf),
    /// An encoded image already in memory.
    Bytes(Vec<u8>),
}

impl ImageSource {
    /// Returns the encoded image bytes, reading the file if necessary.  A
    /// file that can't be read is reported as `Error::Render`.
    pub fn load(&self) -> Result<Cow<'_, [u8]>> {
        match *self {
            ImageSource::Path(ref path) => match std::fs::read(path) {
                Ok(bytes) => Ok(Cow::Owned(bytes)),
                Err(error) => render_error!(
                    "Failed to read {}: {}",
                    path.display(),
                    error
                ),
            },
            ImageSource::Bytes(ref bytes) => Ok(Cow::Borrowed(bytes)),
        }
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> ImageSource {
        ImageSource::Path(path)
    }
}

impl From<&Path> for ImageSource {
    fn from(path: &Path) -> ImageSource {
        ImageSource::Path(path.to_path_buf())
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(bytes: Vec<u8>) -> ImageSource {
        ImageSource::Bytes(bytes)
    }
}

impl From<&[u8]> for ImageSource {
    fn from(bytes: &[u8]) -> ImageSource {
        ImageSource::Bytes(bytes.to_vec())
    }
}

//===========================================================================//

/// How an image is fitted into a square target.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum Fit {
    /// Scale to fit entirely inside the square, preserving aspect ratio, and
    /// pad the rest with the background color.
    #[default]
    Contain,
    /// Scale to cover the whole square, preserving aspect ratio, and crop
    /// whatever overflows (keeping the center).
    Cover,
    /// Stretch to exactly the square, ignoring aspect ratio.
    Fill,
}

/// The resampling filter a renderer should use when resizing.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum ResizeFilter {
    /// Nearest neighbor.
    Nearest,
    /// Linear.
    Triangle,
    /// Cubic.
    CatmullRom,
    /// Gaussian.
    Gaussian,
    /// Lanczos with window 3.
    #[default]
    Lanczos3,
}

/// Options controlling how a render fits the input into a square target.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FitOptions {
    /// The fit policy; defaults to `Fit::Contain`.
    pub fit: Fit,
    /// RGBA color for padding; defaults to fully transparent black.
    pub background: [u8; 4],
    /// Resampling filter; defaults to `ResizeFilter::Lanczos3`.
    pub filter: ResizeFilter,
}

impl Default for FitOptions {
    fn default() -> FitOptions {
        FitOptions {
            fit: Fit::Contain,
            background: [0, 0, 0, 0],
            filter: ResizeFilter::Lanczos3,
        }
    }
}

//===========================================================================//

/// A PNG render and its actual pixel dimensions.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RenderOutput {
    /// PNG-encoded image data.
    pub png: Vec<u8>,
    /// Width of the encoded image, in pixels.
    pub width: u32,
    /// Height of the encoded image, in pixels.
    pub height: u32,
}

/// Something that can decode an input image and produce PNG renders of it.
pub trait RenderProvider {
    /// Renders `source` as a PNG.  With a `target`, the result must be a
    /// `target`x`target` square (any positive size, not only the sizes an
    /// ICO file can hold) fitted according to `options`; without one,
    /// the image is rendered at its native size.  Unreadable or undecodable
    /// input must produce a descriptive error.
    fn render(
        &self,
        source: &ImageSource,
        target: Option<NonZeroU32>,
        options: &FitOptions,
    ) -> Result<RenderOutput>;
}

impl<'a, P: RenderProvider + ?Sized> RenderProvider for &'a P {
    fn render(
        &self,
        source: &ImageSource,
        target: Option<NonZeroU32>,
        options: &FitOptions,
    ) -> Result<RenderOutput> {
        (**self).render(source, target, options)
    }
}

//===========================================================================//

#[cfg(feature = "render")]
pub use self::renderer::ImageRenderer;

#[cfg(feature = "render")]
mod renderer {
    use super::{
        Fit, FitOptions, ImageSource, RenderOutput, RenderProvider,
        ResizeFilter,
    };
    use crate::error::Result;
    use crate::image::encode_png;
    use image::imageops::{self, FilterType};
    use image::{DynamicImage, Rgba, RgbaImage};
    use std::num::NonZeroU32;

    /// The default render provider, backed by the `image` crate.  Accepts
    /// any format `image` can decode.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct ImageRenderer;

    impl ImageRenderer {
        /// Creates a new renderer.
        pub fn new() -> ImageRenderer {
            ImageRenderer
        }

        fn decode(source: &ImageSource) -> Result<DynamicImage> {
            let bytes = source.load()?;
            match image::load_from_memory(&bytes) {
                Ok(image) => Ok(image),
                Err(error) => {
                    render_error!("Failed to decode input image: {}", error)
                }
            }
        }
    }

    impl RenderProvider for ImageRenderer {
        fn render(
            &self,
            source: &ImageSource,
            target: Option<NonZeroU32>,
            options: &FitOptions,
        ) -> Result<RenderOutput> {
            let image = ImageRenderer::decode(source)?;
            let rgba = match target {
                Some(size) => fit_square(&image, size.get(), options),
                None => image.to_rgba8(),
            };
            let (width, height) = rgba.dimensions();
            tracing::debug!(
                width,
                height,
                fit = ?options.fit,
                "rendered image"
            );
            let png = encode_png(width, height, rgba.as_raw())?;
            Ok(RenderOutput { png, width, height })
        }
    }

    fn fit_square(
        image: &DynamicImage,
        size: u32,
        options: &FitOptions,
    ) -> RgbaImage {
        let filter = filter_type(options.filter);
        match options.fit {
            Fit::Contain => {
                let resized = image.resize(size, size, filter).to_rgba8();
                let background = Rgba(options.background);
                let mut canvas = RgbaImage::from_pixel(size, size, background);
                let x = (size - resized.width()) / 2;
                let y = (size - resized.height()) / 2;
                imageops::overlay(&mut canvas, &resized, x as i64, y as i64);
                canvas
            }
            Fit::Cover => image.resize_to_fill(size, size, filter).to_rgba8(),
            Fit::Fill => image.resize_exact(size, size, filter).to_rgba8(),
        }
    }

    fn filter_type(filter: ResizeFilter) -> FilterType {
        match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }

}

//===========================================================================//
