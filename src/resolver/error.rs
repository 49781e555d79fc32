use thiserror::Error;

/// Errors raised while turning an image reference into pixel data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Built-in sample index outside the bundled set.
    #[error("Unknown sample image #{index}")]
    UnknownSample { index: usize },

    /// The host refused (or revoked) read access to the content.
    #[error("Permission denied for '{locator}': {reason}")]
    PermissionDenied { locator: String, reason: String },

    /// The byte stream could not be opened or read.
    #[error("Could not read '{locator}': {reason}")]
    Unreadable { locator: String, reason: String },

    /// Bytes were read but are not a decodable image.
    #[error("Could not decode image '{locator}': {reason}")]
    Corrupt { locator: String, reason: String },
}

impl DecodeError {
    /// Classify an `image` crate failure for the given source.
    pub(crate) fn from_image(locator: &str, err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(io)
                if !matches!(
                    io.kind(),
                    std::io::ErrorKind::UnexpectedEof | std::io::ErrorKind::InvalidData
                ) =>
            {
                DecodeError::Unreadable {
                    locator: locator.to_string(),
                    reason: io.to_string(),
                }
            }
            image::ImageError::IoError(io) => DecodeError::Corrupt {
                locator: locator.to_string(),
                reason: io.to_string(),
            },
            other => DecodeError::Corrupt {
                locator: locator.to_string(),
                reason: other.to_string(),
            },
        }
    }
}
