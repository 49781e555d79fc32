use std::future::Future;
use std::io::Cursor;
use std::pin::Pin;

use image::ImageFormat;

use crate::resolver::DecodedImage;

use super::error::InferenceError;

/// Boxed future returned by [`InferenceBackend::infer`].
pub type InferenceFuture<'a> =
    Pin<Box<dyn Future<Output = Result<String, InferenceError>> + Send + 'a>>;

/// The opaque remote capability: image bytes plus prompt in, text out.
pub trait InferenceBackend: Send + Sync + 'static {
    fn infer<'a>(&'a self, image: &'a EncodedImage, prompt: &'a str) -> InferenceFuture<'a>;
}

/// Image bytes in a wire-friendly container format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
}

impl EncodedImage {
    /// Encode a decoded bitmap as PNG.
    pub fn png(image: &DecodedImage) -> Result<Self, InferenceError> {
        let buffer = image.to_rgba_image().ok_or_else(|| {
            InferenceError::Backend("Image buffer does not match its dimensions".to_string())
        })?;

        let mut bytes = Vec::new();
        buffer
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| InferenceError::Backend(format!("Could not encode image: {}", e)))?;

        Ok(Self {
            bytes,
            mime_type: "image/png",
        })
    }
}
