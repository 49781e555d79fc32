//! Inference request construction.

use crate::resolver::DecodedImage;

/// Fixed instruction sent alongside every image.
pub const RECON_PROMPT: &str = "Identify the main object in this photo and describe the scene. \
If it is an animal, plant, rock or insect, name the species or type and mention one \
interesting fact about it. If it is litter, say how it should be disposed of.";

/// A single inference request. Borrows the image; never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InferenceRequest<'a> {
    pub image: &'a DecodedImage,
    pub prompt: &'static str,
}

/// Package `image` with the fixed prompt.
pub fn build(image: &DecodedImage) -> InferenceRequest<'_> {
    InferenceRequest {
        image,
        prompt: RECON_PROMPT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbaImage};

    fn tiny() -> DecodedImage {
        DecodedImage::from_dynamic(DynamicImage::ImageRgba8(RgbaImage::new(2, 2)))
    }

    #[test]
    fn building_twice_is_structurally_equal() {
        let image = tiny();
        let first = build(&image);
        let second = build(&image);
        assert_eq!(first, second);
        assert!(std::ptr::eq(first.image, second.image));
        assert_eq!(first.prompt, RECON_PROMPT);
    }
}
