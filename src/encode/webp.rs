//! # WebP Encode Backend
//!
//! The resize-then-encode capability a search drives, plus the decode and
//! naming helpers around it. This is the only part of the crate that touches
//! actual codec work; the search itself never looks inside the bytes it gets
//! back, only at their length.
//!
//! ## Determinism
//!
//! One attempt at fixed (pixels, width, height, quality) always produces the
//! same bytes: the resizer is configured identically per call and libwebp is
//! deterministic for fixed inputs. Re-running a search therefore replays the
//! identical attempt sequence.
//!
//! ## Buffer Reuse
//!
//! [`WebpEncoder`] keeps its `Resizer` and resize scratch buffer across
//! attempts, so a 29-attempt search allocates the scratch once and shrinks
//! into it repeatedly.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use fast_image_resize::Resizer;
use squeeze_scale::cpu::resize_rgba;

use crate::error::{SqueezeError, SqueezeResult};
use crate::search::types::{AttemptResult, ImageDescriptor};

/// MIME type of the artifacts this backend produces.
pub const WEBP_MIME: &str = "image/webp";
/// Canonical file extension for the codec.
pub const WEBP_EXTENSION: &str = "webp";
/// Suffix appended to the source stem when deriving the output name.
const OUTPUT_SUFFIX: &str = "-compressed";

/// Resize-then-encode capability driven by the search loop.
///
/// Implementations must be deterministic for fixed inputs so a search is
/// reproducible; they are not required to be pure and may perform real
/// codec work.
#[async_trait]
pub trait AttemptEncoder: Send {
    /// Resize the descriptor's pixels to `width` x `height` and lossy-encode
    /// them at `quality` (in (0, 1]), returning the encoded bytes.
    async fn encode(
        &mut self,
        image: &ImageDescriptor,
        width: u32,
        height: u32,
        quality: f32,
    ) -> SqueezeResult<Vec<u8>>;
}

/// WebP implementation of [`AttemptEncoder`].
pub struct WebpEncoder {
    resizer: Resizer,
    scratch: Vec<u8>,
}

impl WebpEncoder {
    /// Create an encoder with an empty scratch buffer.
    pub fn new() -> Self {
        Self {
            resizer: Resizer::new(),
            scratch: Vec::new(),
        }
    }

    fn encode_rgba(rgba: &[u8], width: u32, height: u32, quality: f32) -> SqueezeResult<Vec<u8>> {
        let encoder = webp::Encoder::from_rgba(rgba, width, height);
        let memory = encoder
            .encode_simple(false, quality * 100.0)
            .map_err(|e| SqueezeError::encode("webp_encode", format!("{:?}", e)))?;
        Ok(memory.to_vec())
    }
}

impl Default for WebpEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AttemptEncoder for WebpEncoder {
    async fn encode(
        &mut self,
        image: &ImageDescriptor,
        width: u32,
        height: u32,
        quality: f32,
    ) -> SqueezeResult<Vec<u8>> {
        // Full-size attempt: encode the source buffer directly.
        if width == image.natural_width && height == image.natural_height {
            return Self::encode_rgba(&image.pixels, width, height, quality);
        }

        let needed = width as usize * height as usize * 4;
        if self.scratch.len() < needed {
            self.scratch.resize(needed, 0);
        }
        resize_rgba(
            &mut self.resizer,
            &image.pixels,
            image.natural_width,
            image.natural_height,
            width,
            height,
            &mut self.scratch,
        )
        .map_err(|e| SqueezeError::encode("resize", e.to_string()))?;

        Self::encode_rgba(&self.scratch[..needed], width, height, quality)
    }
}

/// Decode a source file into an [`ImageDescriptor`].
///
/// Zero-byte or malformed files surface as a decode error before any search
/// starts; the search layer never retries a decode.
pub fn decode_image(path: &Path) -> SqueezeResult<ImageDescriptor> {
    let display = path.display().to_string();
    let decoded = image::open(path).map_err(|e| SqueezeError::decode_source(&display, e))?;
    let rgba = decoded.into_rgba8();
    let (width, height) = rgba.dimensions();
    let source_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| display.clone());
    ImageDescriptor::new(width, height, Arc::new(rgba.into_raw()), source_name)
}

/// Derive the suggested output name from a source name.
///
/// Strips the final extension, appends the fixed suffix and the codec's
/// canonical extension. An empty stem falls back to `image`.
pub fn output_name(source_name: &str) -> String {
    let stem = match source_name.rsplit_once('.') {
        Some((stem, _ext)) => stem,
        None => source_name,
    };
    let stem = if stem.is_empty() { "image" } else { stem };
    format!("{}{}.{}", stem, OUTPUT_SUFFIX, WEBP_EXTENSION)
}

/// Final artifact of a successful search: bytes plus delivery metadata.
#[derive(Debug, Clone)]
pub struct EncodedArtifact {
    /// Encoded image bytes.
    pub bytes: Arc<Vec<u8>>,
    /// MIME type of the codec used.
    pub mime: &'static str,
    /// Suggested output file name.
    pub file_name: String,
}

impl EncodedArtifact {
    /// Build the artifact for a finished attempt.
    pub fn from_attempt(attempt: &AttemptResult, source_name: &str) -> Self {
        Self {
            bytes: attempt.bytes.clone(),
            mime: WEBP_MIME,
            file_name: output_name(source_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_name_strips_extension() {
        assert_eq!(output_name("photo.png"), "photo-compressed.webp");
        assert_eq!(output_name("archive.tar.gz"), "archive.tar-compressed.webp");
        assert_eq!(output_name("noext"), "noext-compressed.webp");
    }

    #[test]
    fn test_output_name_empty_stem_falls_back() {
        assert_eq!(output_name(".hidden"), "image-compressed.webp");
        assert_eq!(output_name(""), "image-compressed.webp");
    }

    #[test]
    fn test_artifact_carries_mime_and_bytes() {
        let attempt = AttemptResult {
            attempt_index: 1,
            scale: 1.0,
            width: 2,
            height: 2,
            bytes: Arc::new(vec![1, 2, 3]),
            size: 3,
        };
        let artifact = EncodedArtifact::from_attempt(&attempt, "cat.jpeg");
        assert_eq!(artifact.mime, WEBP_MIME);
        assert_eq!(artifact.file_name, "cat-compressed.webp");
        assert_eq!(artifact.bytes.len(), 3);
    }
}
