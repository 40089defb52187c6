use crate::error::{Error, Result};
use crate::icondir;
use crate::image::RenderedImage;
use crate::render::{FitOptions, ImageSource, RenderOutput, RenderProvider};
use crate::size::IconSize;
use crate::svg;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::thread;

//===========================================================================//

/// The sizes rendered into an ICO file when none are specified.
pub const DEFAULT_SIZES: [u32; 6] = [16, 32, 48, 64, 128, 256];

//===========================================================================//

/// Options for converting an image into an ICO file.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct IcoConfig {
    /// Square sizes to render, in directory order.  Each must be between 1
    /// and 256.  Defaults to `DEFAULT_SIZES`.
    pub sizes: Vec<u32>,
    /// How the input is fitted into each square.
    pub fit: FitOptions,
    /// Render all sizes concurrently instead of one after another.  The
    /// output is identical either way.
    pub parallel: bool,
}

impl IcoConfig {
    /// Returns the default configuration, restricted to `sizes`.
    pub fn with_sizes(sizes: &[u32]) -> IcoConfig {
        IcoConfig { sizes: sizes.to_vec(), ..IcoConfig::default() }
    }
}

impl Default for IcoConfig {
    fn default() -> IcoConfig {
        IcoConfig {
            sizes: DEFAULT_SIZES.to_vec(),
            fit: FitOptions::default(),
            parallel: false,
        }
    }
}

/// Options for wrapping an image in an SVG document.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SvgConfig {
    /// Render into a square of this size; `None` keeps the input's native
    /// dimensions.  Unlike ICO sizes there is no upper bound, but zero is
    /// rejected.
    pub size: Option<u32>,
    /// How the input is fitted into the square, if `size` is set.
    pub fit: FitOptions,
}

//===========================================================================//

/// Renders `source` at every size in `config` and packs the results into an
/// ICO file.  Every size is validated before anything is rendered.
pub fn to_ico<P>(
    provider: &P,
    source: &ImageSource,
    config: &IcoConfig,
) -> Result<Vec<u8>>
where
    P: RenderProvider + Sync + ?Sized,
{
    let sizes = config
        .sizes
        .iter()
        .map(|&size| IconSize::new(size))
        .collect::<Result<Vec<IconSize>>>()?;
    if sizes.is_empty() {
        return Err(Error::NoImages);
    }
    let images = if config.parallel {
        render_parallel(provider, source, &sizes, &config.fit)?
    } else {
        sizes
            .iter()
            .map(|&size| render_square(provider, source, size, &config.fit))
            .collect::<Result<Vec<RenderedImage>>>()?
    };
    icondir::encode(&images)
}

/// Renders `source` once and wraps it in an SVG document.  The document's
/// dimensions are the render's actual dimensions.
pub fn to_svg<P>(
    provider: &P,
    source: &ImageSource,
    config: &SvgConfig,
) -> Result<String>
where
    P: RenderProvider + ?Sized,
{
    let target = match config.size {
        Some(size) => match NonZeroU32::new(size) {
            Some(size) => Some(size),
            None => {
                return Err(Error::InvalidDimensions {
                    width: size,
                    height: size,
                })
            }
        },
        None => None,
    };
    let RenderOutput { png, width, height } =
        provider.render(source, target, &config.fit)?;
    tracing::debug!(width, height, "wrapping render in SVG");
    svg::wrap(&png, width, height)
}

//===========================================================================//

fn render_square<P>(
    provider: &P,
    source: &ImageSource,
    size: IconSize,
    fit: &FitOptions,
) -> Result<RenderedImage>
where
    P: RenderProvider + ?Sized,
{
    tracing::debug!(size = size.get(), "rendering icon");
    let output = provider.render(source, Some(size.to_non_zero()), fit)?;
    if output.width != size.get() || output.height != size.get() {
        return Err(Error::DimensionMismatch {
            requested: size.get(),
            width: output.width,
            height: output.height,
        });
    }
    Ok(RenderedImage::new(output.png, size))
}

fn render_parallel<P>(
    provider: &P,
    source: &ImageSource,
    sizes: &[IconSize],
    fit: &FitOptions,
) -> Result<Vec<RenderedImage>>
where
    P: RenderProvider + Sync + ?Sized,
{
    thread::scope(|scope| {
        let handles: Vec<_> = sizes
            .iter()
            .map(|&size| {
                scope.spawn(move || render_square(provider, source, size, fit))
            })
            .collect();
        // Joining in spawn order keeps the results in requested order.
        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(result) => result,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    })
}

//===========================================================================//

#[cfg(feature = "render")]
/// Converts an image to ICO format with the default `ImageRenderer`.
pub fn imgico<S: Into<ImageSource>>(
    source: S,
    config: &IcoConfig,
) -> Result<Vec<u8>> {
    to_ico(&crate::render::ImageRenderer::new(), &source.into(), config)
}

#[cfg(feature = "render")]
/// Converts an image to an SVG document with the default `ImageRenderer`.
pub fn imgsvg<S: Into<ImageSource>>(
    source: S,
    config: &SvgConfig,
) -> Result<String> {
    to_svg(&crate::render::ImageRenderer::new(), &source.into(), config)
}

//===========================================================================//


//===========================================================================//
