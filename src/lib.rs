//! A library for packing rendered images into ICO files, or embedding them
//! in SVG documents.
//!
//! # Overview
//!
//! An ICO file is a 6-byte header, followed by one 16-byte directory entry
//! per image, followed by the image data itself.  This crate writes ICO files
//! whose images are all PNG-encoded; the [`IconDir`] type and the [`encode`]
//! function build such a file from a list of [`RenderedImage`] values.
//!
//! Producing those PNGs (decoding the input, resizing it into a square, and
//! re-encoding it) is the job of a [`RenderProvider`].  The [`to_ico`] and
//! [`to_svg`] functions drive a provider and then hand the results to the
//! encoder or to the SVG wrapper.  With the `render` feature (on by default)
//! the crate provides `ImageRenderer`, a provider built on the `image`
//! crate, along with the `imgico` and `imgsvg` shortcuts that use it.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! let config = imgico::IcoConfig::with_sizes(&[16, 32, 256]);
//! let ico = imgico::imgico(Path::new("logo.png"), &config).unwrap();
//! std::fs::write("favicon.ico", ico).unwrap();
//! ```

#![warn(missing_docs)]

#[macro_use]
mod macros;

mod convert;
mod error;
mod icondir;
mod image;
mod render;
mod size;
mod svg;

pub use crate::convert::{to_ico, to_svg, IcoConfig, SvgConfig, DEFAULT_SIZES};
#[cfg(feature = "render")]
pub use crate::convert::{imgico, imgsvg};
pub use crate::error::{Error, Result};
pub use crate::icondir::{encode, IconDir};
pub use crate::image::{encode_png, RenderedImage};
#[cfg(feature = "render")]
pub use crate::render::ImageRenderer;
pub use crate::render::{
    Fit, FitOptions, ImageSource, RenderOutput, RenderProvider, ResizeFilter,
};
pub use crate::size::IconSize;
pub use crate::svg::{wrap, PNG_DATA_URI_PREFIX};
