//! The validated ThumbHash token type.

use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::decode_impl::{average_of, parse_token, render, AverageColor};
use crate::error::{ThumbHashError, TokenError};
use crate::header::Header;
use crate::preview::Preview;

/// A ThumbHash token whose header and length have been validated.
///
/// Tokens are usually stored and shipped as base64 text; `Display` and
/// `FromStr` use the standard, padded alphabet.
///
/// # Examples
///
/// ```
/// use thumbhash_core::{encode, ThumbHash};
/// let hash = encode(1, 1, &[0, 0, 0, 255]).unwrap();
/// let text = hash.to_string();
/// let parsed: ThumbHash = text.parse().unwrap();
/// assert_eq!(parsed, hash);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThumbHash {
    header: Header,
    bytes: Vec<u8>,
}

impl ThumbHash {
    /// Build from bytes the encoder just produced.
    pub(crate) fn from_parts(header: Header, bytes: Vec<u8>) -> Self {
        debug_assert_eq!(bytes.len(), header.token_len());
        Self { header, bytes }
    }

    /// Validate raw token bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ThumbHashError::MalformedToken`] if the bytes are not a
    /// well-formed token.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self, ThumbHashError> {
        let bytes = bytes.into();
        let header = parse_token(&bytes)?;
        Ok(Self { header, bytes })
    }

    /// Parse the base64 text form of a token.
    ///
    /// # Errors
    ///
    /// Returns [`ThumbHashError::MalformedToken`] if the text is not valid
    /// base64 or does not decode to a well-formed token.
    pub fn from_base64(text: &str) -> Result<Self, ThumbHashError> {
        let bytes = STANDARD
            .decode(text.trim())
            .map_err(|e| TokenError::Base64(e.to_string()))?;
        Self::from_bytes(bytes)
    }

    /// The raw token bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the token, returning its raw bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Token length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false: a valid token is never empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The base64 text form.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// Whether the token carries an alpha channel.
    pub fn has_alpha(&self) -> bool {
        self.header.has_alpha
    }

    /// Whether the source image was wider than it was tall.
    pub fn is_landscape(&self) -> bool {
        self.header.is_landscape
    }

    /// Approximate width / height ratio of the source image.
    pub fn approximate_aspect_ratio(&self) -> f64 {
        self.header.aspect_ratio()
    }

    /// Average color, from the DC terms alone.
    pub fn average_rgba(&self) -> AverageColor {
        average_of(&self.header)
    }

    /// Reconstruct the preview raster. Infallible, as the token was validated
    /// on construction.
    pub fn to_preview(&self) -> Preview {
        render(&self.header, &self.bytes)
    }

    /// Reconstruct the preview and encode it as a PNG `data:` URL.
    ///
    /// # Errors
    ///
    /// Returns [`ThumbHashError::Preview`] if the PNG encoder fails.
    #[cfg(feature = "data-url")]
    pub fn to_data_url(&self) -> Result<String, ThumbHashError> {
        self.to_preview().to_data_url()
    }
}

impl AsRef<[u8]> for ThumbHash {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<ThumbHash> for Vec<u8> {
    fn from(hash: ThumbHash) -> Self {
        hash.bytes
    }
}

impl TryFrom<Vec<u8>> for ThumbHash {
    type Error = ThumbHashError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

impl TryFrom<&[u8]> for ThumbHash {
    type Error = ThumbHashError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

impl fmt::Display for ThumbHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base64())
    }
}

impl FromStr for ThumbHash {
    type Err = ThumbHashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_base64(s)
    }
}
