//! Error types for ThumbHash encoding and decoding.

use thiserror::Error;

/// Errors that can occur during ThumbHash encoding, decoding or preview
/// rendering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThumbHashError {
    /// The source image handed to the encoder (or to a preview helper) is
    /// malformed.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    /// The token is truncated, corrupt or internally inconsistent.
    #[error("malformed token: {0}")]
    MalformedToken(#[from] TokenError),

    /// The PNG encoder rejected the preview raster.
    #[error("preview encoding failed: {0}")]
    Preview(String),
}

/// Coarse classification of a [`ThumbHashError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`ThumbHashError::InvalidInput`].
    InvalidInput,
    /// See [`ThumbHashError::MalformedToken`].
    MalformedToken,
    /// See [`ThumbHashError::Preview`].
    Preview,
}

impl ThumbHashError {
    /// The failure kind, for callers that only need to branch on the category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::MalformedToken(_) => ErrorKind::MalformedToken,
            Self::Preview(_) => ErrorKind::Preview,
        }
    }
}

/// Why a source raster was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Width or height is zero.
    #[error("image dimensions must be non-zero, got {width}x{height}")]
    ZeroDimension {
        /// The width value.
        width: u32,
        /// The height value.
        height: u32,
    },

    /// `width * height * 4` does not fit in memory addressing.
    #[error("image dimensions {width}x{height} overflow the buffer size calculation")]
    Overflow {
        /// The width value.
        width: u32,
        /// The height value.
        height: u32,
    },

    /// The RGBA buffer is not exactly `width * height * 4` bytes.
    #[error("RGBA buffer length {actual} does not match expected {expected}")]
    BufferLength {
        /// `width * height * 4`.
        expected: usize,
        /// The length that was supplied.
        actual: usize,
    },
}

/// Why a token was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Not enough bytes for the header.
    #[error("token is {actual} bytes, header needs at least {expected}")]
    TooShort {
        /// Minimum header size for the token's alpha mode.
        expected: usize,
        /// The token length.
        actual: usize,
    },

    /// The stored luminance term count is outside `1..=limit`.
    #[error("luminance term count {value} is outside 1..={limit}")]
    TermCount {
        /// The stored count.
        value: u8,
        /// The largest count valid for the token's alpha mode.
        limit: u8,
    },

    /// The byte length disagrees with the term counts declared in the header.
    #[error("token is {actual} bytes, header declares {expected}")]
    LengthMismatch {
        /// Length implied by the header.
        expected: usize,
        /// The token length.
        actual: usize,
    },

    /// The text form of the token is not valid base64.
    #[error("invalid base64: {0}")]
    Base64(String),
}
