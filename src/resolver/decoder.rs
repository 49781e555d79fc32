//! Decoding strategies for user-picked content.
//!
//! Two equivalent paths exist: a legacy one that buffers the full stream
//! before decoding, and a streaming one that sniffs the format and decodes
//! straight from a buffered reader. Exactly one is chosen at startup.

use std::io::{BufReader, Cursor, Read};

use image::ImageReader;

use crate::config::DecoderPreference;

use super::error::DecodeError;
use super::DecodedImage;

/// Largest user content the buffered decoder reads into memory.
pub const MAX_CONTENT_BYTES: u64 = 256 * 1024 * 1024;

/// Turns a byte stream into pixel data.
pub trait ImageDecoder: Send + Sync {
    /// Decode the full stream. `locator` is only used in error messages.
    fn decode(&self, stream: Box<dyn Read + Send>, locator: &str)
        -> Result<DecodedImage, DecodeError>;

    fn name(&self) -> &'static str;
}

/// Reads everything into memory, then decodes.
pub struct BufferedDecoder;

impl ImageDecoder for BufferedDecoder {
    fn decode(
        &self,
        stream: Box<dyn Read + Send>,
        locator: &str,
    ) -> Result<DecodedImage, DecodeError> {
        let bytes = read_capped(stream, MAX_CONTENT_BYTES, locator)?;

        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| DecodeError::Unreadable {
                locator: locator.to_string(),
                reason: e.to_string(),
            })?;

        reader
            .decode()
            .map(DecodedImage::from_dynamic)
            .map_err(|e| DecodeError::from_image(locator, e))
    }

    fn name(&self) -> &'static str {
        "buffered"
    }
}

/// Read the whole stream, refusing anything longer than `limit` bytes.
fn read_capped(
    stream: Box<dyn Read + Send>,
    limit: u64,
    locator: &str,
) -> Result<Vec<u8>, DecodeError> {
    let mut bytes = Vec::new();
    stream
        .take(limit.saturating_add(1))
        .read_to_end(&mut bytes)
        .map_err(|e| DecodeError::Unreadable {
            locator: locator.to_string(),
            reason: e.to_string(),
        })?;

    if bytes.len() as u64 > limit {
        return Err(DecodeError::Unreadable {
            locator: locator.to_string(),
            reason: format!("content is larger than {} bytes", limit),
        });
    }
    Ok(bytes)
}

/// Decodes incrementally from a buffered reader.
pub struct StreamingDecoder;

impl ImageDecoder for StreamingDecoder {
    fn decode(
        &self,
        stream: Box<dyn Read + Send>,
        locator: &str,
    ) -> Result<DecodedImage, DecodeError> {
        let reader = ImageReader::new(SeekableStream::new(stream))
            .with_guessed_format()
            .map_err(|e| DecodeError::Unreadable {
                locator: locator.to_string(),
                reason: e.to_string(),
            })?;

        reader
            .decode()
            .map(DecodedImage::from_dynamic)
            .map_err(|e| DecodeError::from_image(locator, e))
    }

    fn name(&self) -> &'static str {
        "streaming"
    }
}

/// Decoder selection, made once when the screen is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStrategy {
    Buffered,
    Streaming,
}

impl DecodeStrategy {
    /// Map a configured preference onto a concrete strategy.
    ///
    /// `Auto` picks the streaming decoder, which every supported target has.
    pub fn select(preference: DecoderPreference) -> Self {
        match preference {
            DecoderPreference::Buffered => DecodeStrategy::Buffered,
            DecoderPreference::Streaming | DecoderPreference::Auto => DecodeStrategy::Streaming,
        }
    }

    pub fn into_decoder(self) -> Box<dyn ImageDecoder> {
        match self {
            DecodeStrategy::Buffered => Box::new(BufferedDecoder),
            DecodeStrategy::Streaming => Box::new(StreamingDecoder),
        }
    }
}

/// `ImageReader` needs `BufRead + Seek`, so the stream is wrapped in a
/// `BufReader` that spills into memory only as far as the decoder seeks.
struct SeekableStream {
    inner: BufReader<Box<dyn Read + Send>>,
    consumed: Vec<u8>,
    pos: usize,
}

impl SeekableStream {
    fn new(stream: Box<dyn Read + Send>) -> Self {
        Self {
            inner: BufReader::new(stream),
            consumed: Vec::new(),
            pos: 0,
        }
    }

    fn fill_to(&mut self, end: usize) -> std::io::Result<()> {
        while self.consumed.len() < end {
            let mut chunk = [0u8; 8192];
            let want = (end - self.consumed.len()).min(chunk.len());
            let n = self.inner.read(&mut chunk[..want])?;
            if n == 0 {
                break;
            }
            self.consumed.extend_from_slice(&chunk[..n]);
        }
        Ok(())
    }
}

impl Read for SeekableStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.fill_to(self.pos.saturating_add(buf.len()))?;
        let available = self.consumed.len().saturating_sub(self.pos);
        let n = available.min(buf.len());
        if n == 0 {
            return Ok(0);
        }
        buf[..n].copy_from_slice(&self.consumed[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

impl std::io::BufRead for SeekableStream {
    fn fill_buf(&mut self) -> std::io::Result<&[u8]> {
        if self.pos >= self.consumed.len() {
            self.fill_to(self.pos.saturating_add(8192))?;
        }
        Ok(&self.consumed[self.pos.min(self.consumed.len())..])
    }

    fn consume(&mut self, amt: usize) {
        self.pos = (self.pos + amt).min(self.consumed.len());
    }
}

impl std::io::Seek for SeekableStream {
    fn seek(&mut self, target: std::io::SeekFrom) -> std::io::Result<u64> {
        let new_pos = match target {
            std::io::SeekFrom::Start(offset) => i64::try_from(offset).ok(),
            std::io::SeekFrom::Current(delta) => i64::try_from(self.pos)
                .ok()
                .and_then(|pos| pos.checked_add(delta)),
            std::io::SeekFrom::End(delta) => {
                self.fill_to(usize::MAX)?;
                i64::try_from(self.consumed.len())
                    .ok()
                    .and_then(|len| len.checked_add(delta))
            }
        };

        let new_pos = new_pos
            .filter(|pos| *pos >= 0)
            .and_then(|pos| usize::try_from(pos).ok())
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "seek outside the addressable stream",
                )
            })?;
        self.pos = new_pos;
        Ok(self.pos as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::samples;

    fn stream(bytes: &'static [u8]) -> Box<dyn Read + Send> {
        Box::new(Cursor::new(bytes))
    }

    #[test]
    fn auto_selects_streaming() {
        assert_eq!(
            DecodeStrategy::select(DecoderPreference::Auto),
            DecodeStrategy::Streaming
        );
        assert_eq!(
            DecodeStrategy::select(DecoderPreference::Buffered),
            DecodeStrategy::Buffered
        );
    }

    #[test]
    fn both_paths_produce_the_same_image() {
        let bytes = samples::sample(0).unwrap().bytes;
        let buffered = BufferedDecoder.decode(stream(bytes), "bear").unwrap();
        let streaming = StreamingDecoder.decode(stream(bytes), "bear").unwrap();
        assert_eq!(buffered, streaming);
        assert_eq!(buffered.width(), 48);
        assert_eq!(buffered.height(), 32);
    }

    #[test]
    fn garbage_is_corrupt_on_both_paths() {
        let junk: &'static [u8] = b"\x89PNG\r\n\x1a\nthis is not really a png";
        for decoder in [
            DecodeStrategy::Buffered.into_decoder(),
            DecodeStrategy::Streaming.into_decoder(),
        ] {
            let err = decoder.decode(stream(junk), "junk.png").unwrap_err();
            assert!(
                matches!(err, DecodeError::Corrupt { .. } | DecodeError::Unreadable { .. }),
                "{} decoder returned {:?}",
                decoder.name(),
                err
            );
        }
    }

    #[test]
    fn oversized_content_is_refused() {
        let err = read_capped(stream(b"0123456789"), 4, "big.png").unwrap_err();
        assert_eq!(
            err,
            DecodeError::Unreadable {
                locator: "big.png".to_string(),
                reason: "content is larger than 4 bytes".to_string(),
            }
        );
        assert_eq!(read_capped(stream(b"0123"), 4, "ok.png").unwrap(), b"0123");
    }

    #[test]
    fn seeks_past_i64_are_rejected() {
        use std::io::{Seek, SeekFrom};

        let mut seekable = SeekableStream::new(stream(b"abcdef"));
        let err = seekable.seek(SeekFrom::Start(u64::MAX)).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);

        assert_eq!(seekable.seek(SeekFrom::Start(4)).unwrap(), 4);
        let err = seekable.seek(SeekFrom::Current(i64::MAX)).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
        assert!(seekable.seek(SeekFrom::Current(-5)).is_err());

        assert_eq!(seekable.seek(SeekFrom::End(-2)).unwrap(), 4);
        let mut rest = String::new();
        seekable.read_to_string(&mut rest).unwrap();
        assert_eq!(rest, "ef");
    }
}
