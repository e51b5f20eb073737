//! The decoded preview raster and its conversion to a displayable image.
//!
//! With the `data-url` feature the preview can be encoded as a PNG and wrapped
//! in a `data:` URL, ready to drop into an `<img src>` while the real image
//! loads.

#[cfg(feature = "data-url")]
use base64::{engine::general_purpose::STANDARD, Engine as _};
#[cfg(feature = "data-url")]
use image::{codecs::png::PngEncoder, ExtendedColorType, ImageEncoder};

#[cfg(feature = "data-url")]
use crate::error::{InputError, ThumbHashError};

/// A small straight-alpha RGBA raster reconstructed from a token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Preview {
    /// Width in pixels (at most 32).
    pub width: u32,
    /// Height in pixels (at most 32).
    pub height: u32,
    /// Row-major RGBA bytes, `width * height * 4` long.
    pub rgba: Vec<u8>,
}

#[cfg(feature = "data-url")]
impl Preview {
    /// Encode the preview as an 8-bit RGBA PNG.
    ///
    /// # Errors
    ///
    /// Returns [`ThumbHashError::Preview`] if the PNG encoder fails.
    pub fn to_png(&self) -> Result<Vec<u8>, ThumbHashError> {
        encode_png(self.width, self.height, &self.rgba)
    }

    /// Encode the preview as a `data:image/png;base64,...` URL.
    ///
    /// # Errors
    ///
    /// Returns [`ThumbHashError::Preview`] if the PNG encoder fails.
    pub fn to_data_url(&self) -> Result<String, ThumbHashError> {
        self.to_png().map(|png| png_data_url(&png))
    }
}

/// Encode an arbitrary RGBA raster as a PNG `data:` URL.
///
/// # Errors
///
/// Returns [`ThumbHashError::InvalidInput`] if a dimension is zero or the
/// buffer is not `width * height * 4` bytes, and [`ThumbHashError::Preview`]
/// if the PNG encoder fails.
///
/// # Examples
///
/// ```
/// use thumbhash_core::rgba_to_data_url;
/// let url = rgba_to_data_url(1, 1, &[255, 0, 0, 255]).unwrap();
/// assert!(url.starts_with("data:image/png;base64,"));
/// ```
#[cfg(feature = "data-url")]
pub fn rgba_to_data_url(width: u32, height: u32, rgba: &[u8]) -> Result<String, ThumbHashError> {
    encode_png(width, height, rgba).map(|png| png_data_url(&png))
}

/// Decode a token straight into a PNG `data:` URL.
///
/// # Errors
///
/// Returns [`ThumbHashError::MalformedToken`] for an invalid token and
/// [`ThumbHashError::Preview`] if the PNG encoder fails.
#[cfg(feature = "data-url")]
pub fn to_data_url(token: &[u8]) -> Result<String, ThumbHashError> {
    crate::decode(token)?.to_data_url()
}

#[cfg(feature = "data-url")]
fn encode_png(width: u32, height: u32, rgba: &[u8]) -> Result<Vec<u8>, ThumbHashError> {
    if width == 0 || height == 0 {
        return Err(InputError::ZeroDimension { width, height }.into());
    }
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or(InputError::Overflow { width, height })?;
    if rgba.len() != expected {
        return Err(InputError::BufferLength {
            expected,
            actual: rgba.len(),
        }
        .into());
    }

    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(rgba, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| ThumbHashError::Preview(e.to_string()))?;
    Ok(png)
}

#[cfg(feature = "data-url")]
fn png_data_url(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}
