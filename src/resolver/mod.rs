//! Image source resolution: built-in samples and user-picked content.
//!
//! [`Resolver::resolve`] is the only entry point. Built-in samples decode
//! synchronously from bundled assets with no host interaction; user content
//! goes through the [`ContentProvider`] (permission first, then the stream)
//! and the [`ImageDecoder`] selected at startup.

mod content;
mod decoder;
mod error;
mod reference;
pub mod samples;

use std::sync::Arc;

use image::{DynamicImage, ImageFormat, RgbaImage};

pub use content::{ContentProvider, FsContentProvider};
pub use decoder::{
    BufferedDecoder, DecodeStrategy, ImageDecoder, StreamingDecoder, MAX_CONTENT_BYTES,
};
pub use error::DecodeError;
pub use reference::{ContentLocator, ImageReference};

/// Normalized RGBA8 bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl DecodedImage {
    pub fn from_dynamic(image: DynamicImage) -> Self {
        let rgba = image.into_rgba8();
        let (width, height) = rgba.dimensions();
        Self {
            pixels: rgba.into_raw(),
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Borrow-free view as an `image` buffer, for re-encoding.
    pub fn to_rgba_image(&self) -> Option<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }
}

/// Turns an [`ImageReference`] into a [`DecodedImage`].
pub struct Resolver {
    content: Arc<dyn ContentProvider>,
    decoder: Box<dyn ImageDecoder>,
}

impl Resolver {
    pub fn new(content: Arc<dyn ContentProvider>, strategy: DecodeStrategy) -> Self {
        let decoder = strategy.into_decoder();
        tracing::info!(decoder = decoder.name(), "Image decoder selected");
        Self { content, decoder }
    }

    pub fn resolve(&self, reference: ImageReference) -> Result<DecodedImage, DecodeError> {
        match reference {
            ImageReference::BuiltInSample(index) => Self::decode_sample(index),
            ImageReference::UserContent(locator) => {
                self.content.take_persistable_permission(&locator)?;
                let stream = self.content.open(&locator)?;
                self.decoder.decode(stream, locator.as_str())
            }
        }
    }

    fn decode_sample(index: usize) -> Result<DecodedImage, DecodeError> {
        let sample = samples::sample(index).ok_or(DecodeError::UnknownSample { index })?;
        image::load_from_memory_with_format(sample.bytes, ImageFormat::Png)
            .map(DecodedImage::from_dynamic)
            .map_err(|e| DecodeError::from_image(sample.name, e))
    }
}
